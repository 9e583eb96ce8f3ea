//! # dt_core - Soccer-Team Statistics Tracker Core
//!
//! This library provides the data model and session state machine behind a
//! coach-facing match statistics tracker: roster storage, formation-based
//! lineup assignment, a stopwatch-driven match session with an append-only
//! action log, commentary keyword capture, and CSV export.
//!
//! ## Design rules
//! - No global state: the caller owns every session and store explicitly
//! - Elapsed time is a pure function of (anchor, elapsed, running, now)
//! - Validation findings are flagged and returned, never silently corrected
//! - Failed saves leave the previously persisted state untouched

pub mod commentary;
pub mod export;
pub mod formation;
pub mod lineup;
pub mod models;
pub mod save;
pub mod session;

// Re-export the data model
pub use models::{
    format_match_time, ActionEvent, MatchLog, Outcome, Player, Position, RoleGroup, Roster,
    RosterViolation, MIN_SQUAD_SIZE,
};

// Re-export formation and lineup assignment
pub use formation::FormationData;
pub use lineup::{
    assign, assign_substitutes, slot_candidates, substitute_candidates, Lineup, LineupReport,
    LineupViolation, SlotAssignment, SubstituteReport,
};

// Re-export the match session state machine
pub use session::{
    Half, MatchClock, MatchSession, MatchSetup, SessionError, SessionEvent, SessionEventKind,
    SessionState, DEFAULT_HALF_LENGTH,
};

// Re-export persistence
pub use save::{MatchDocument, MatchStore, MatchSummary, RosterStore, StoreError};

// Re-export export views
pub use export::{
    action_breakdown, events_from_csv, events_to_csv, player_summaries, summaries_to_csv,
    ActionCount, ExportError, PlayerSummary,
};

// Re-export commentary capture
pub use commentary::{keyword_catalog, parse_commentary, CandidateEvent, CommentaryFeed};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use tempfile::TempDir;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 14, 0, 0).unwrap()
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        t0() + chrono::Duration::seconds(seconds)
    }

    fn squad() -> Roster {
        let mut roster = Roster::new("Coach Carter", "Sam Park");
        let picks = [
            ("Kim", "1", Position::GK),
            ("Lee", "2", Position::LB),
            ("Park", "4", Position::CB),
            ("Choi", "5", Position::CB),
            ("Jung", "3", Position::RB),
            ("Kang", "11", Position::LW),
            ("Cho", "8", Position::CM),
            ("Yoon", "6", Position::CM),
            ("Jang", "7", Position::RW),
            ("Lim", "9", Position::ST),
            ("Han", "10", Position::ST),
            ("Oh", "12", Position::GK),
            ("Seo", "14", Position::CM),
        ];
        roster.players = picks
            .iter()
            .map(|(name, jersey, pos)| Player::new(*name, Some(*jersey), *pos))
            .collect();
        roster
    }

    /// Full path: roster save, lineup, live session, end, flush, export.
    #[test]
    fn match_day_end_to_end() {
        let dir = TempDir::new().unwrap();
        let roster_store = RosterStore::new(dir.path().join("roster.json"));
        let match_store = MatchStore::new(dir.path().join("matches"));

        let roster = squad();
        roster_store.save_committed(&roster).unwrap();

        // Starting eleven straight down the roster.
        let formation = FormationData::by_name("4-4-2").unwrap();
        let choices: Vec<Option<String>> = roster.players[..11]
            .iter()
            .map(|p| Some(p.name.clone()))
            .collect();
        let report = assign(&formation, &roster, &choices);
        assert!(report.is_valid());

        let starters: Vec<&str> = report.lineup.starter_names();
        let subs = assign_substitutes(&roster, &starters, &["Oh".into(), "Seo".into()], 7);
        assert!(subs.is_valid());
        let mut lineup = report.lineup;
        lineup.substitutes = subs.substitutes;

        // Live session with manual taps and a commentary candidate.
        let mut session = MatchSession::new(MatchSetup {
            date: "2026-03-01".into(),
            opponent: "Riverside FC".into(),
            formation: formation.name.clone(),
            level: "U15 League".into(),
        });
        session.start_at(t0()).unwrap();
        session
            .log_action_at(at(65), "Lim", "Striker", "Shot", Outcome::Successful)
            .unwrap();
        session.record_goal_for();

        let feed = CommentaryFeed::new();
        feed.push_utterance("great press from Han", &roster, Some(&lineup));
        assert_eq!(feed.drain_into_at(&mut session, at(120)).unwrap(), 1);

        session.end_at(at(600)).unwrap();
        assert!(session
            .log_action_at(at(700), "Lim", "Striker", "Shot", Outcome::Neutral)
            .is_err());

        // Flush and re-read the match document.
        let doc = MatchDocument::from_session(&session, &lineup);
        let path = match_store.save_match_at(&doc, at(600)).unwrap();
        let loaded = match_store.load_match(&path).unwrap();
        assert_eq!(loaded.score, "1-0");
        assert_eq!(loaded.stats.len(), 2);
        assert_eq!(loaded.subs, vec!["Oh".to_string(), "Seo".to_string()]);

        // Export round-trips field for field.
        let csv = events_to_csv(&loaded.stats).unwrap();
        assert_eq!(events_from_csv(&csv).unwrap(), loaded.stats);

        let summaries = player_summaries(&loaded.stats);
        assert_eq!(summaries.len(), 2);
        assert!(summaries.iter().all(|s| s.success_rate == 100.0));
    }
}
