//! Per-match document persistence.
//!
//! Each ended match is written to its own timestamped JSON file under the
//! match directory; `list_matches` enumerates them most recent first for
//! history browsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{write_atomic, StoreError};
use crate::lineup::Lineup;
use crate::models::ActionEvent;
use crate::session::{MatchSession, SessionEvent};

const MATCH_FILE_PREFIX: &str = "match_";

/// The persisted match document, the external contract of an ended session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchDocument {
    pub date: String,
    pub opponent: String,
    pub formation: String,
    pub level: String,
    /// Final elapsed playing time, MM:SS.
    pub duration: String,
    /// Final score as "for-against", e.g. "2-1".
    pub score: String,
    pub lineup: Lineup,
    pub subs: Vec<String>,
    pub stats: Vec<ActionEvent>,
    pub events: Vec<SessionEvent>,
}

impl MatchDocument {
    /// Build the document for a session. Callable in any state, but the
    /// usual producer is an Ended session being flushed.
    pub fn from_session(session: &MatchSession, lineup: &Lineup) -> Self {
        let setup = session.setup();
        let (score_for, score_against) = session.score();
        Self {
            date: setup.date.clone(),
            opponent: setup.opponent.clone(),
            formation: setup.formation.clone(),
            level: setup.level.clone(),
            duration: crate::models::format_match_time(session.current_elapsed()),
            score: format!("{}-{}", score_for, score_against),
            lineup: lineup.clone(),
            subs: lineup.substitutes.clone(),
            stats: session.log().events().to_vec(),
            events: session.events().to_vec(),
        }
    }
}

/// Listing entry for the match history browser.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSummary {
    pub path: PathBuf,
    pub date: String,
    pub opponent: String,
    pub score: String,
    pub action_count: usize,
}

pub struct MatchStore {
    dir: PathBuf,
}

impl MatchStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a match document to its own timestamped file.
    pub fn save_match(&self, doc: &MatchDocument) -> Result<PathBuf, StoreError> {
        self.save_match_at(doc, Utc::now())
    }

    pub fn save_match_at(
        &self,
        doc: &MatchDocument,
        now: DateTime<Utc>,
    ) -> Result<PathBuf, StoreError> {
        let name = format!("{}{}.json", MATCH_FILE_PREFIX, now.format("%Y%m%d_%H%M%S"));
        let path = self.dir.join(name);

        let json = serde_json::to_string_pretty(doc).map_err(StoreError::Serialization)?;
        write_atomic(&path, json.as_bytes())?;

        log::info!("match vs {} saved to {:?}", doc.opponent, path);
        Ok(path)
    }

    pub fn load_match(&self, path: &Path) -> Result<MatchDocument, StoreError> {
        if !path.exists() {
            return Err(StoreError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        let doc = serde_json::from_str(&contents).map_err(StoreError::Deserialization)?;
        Ok(doc)
    }

    /// All saved match documents, most recent first. Unreadable files are
    /// skipped with a warning rather than failing the listing.
    pub fn list_matches(&self) -> Result<Vec<MatchSummary>, StoreError> {
        let mut summaries = Vec::new();

        if !self.dir.exists() {
            return Ok(summaries);
        }

        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.starts_with(MATCH_FILE_PREFIX) || !name.ends_with(".json") {
                continue;
            }
            match self.load_match(&path) {
                Ok(doc) => summaries.push(MatchSummary {
                    path,
                    date: doc.date,
                    opponent: doc.opponent,
                    score: doc.score,
                    action_count: doc.stats.len(),
                }),
                Err(err) => {
                    log::warn!("skipping unreadable match document {:?}: {}", path, err);
                }
            }
        }

        // Timestamped names sort chronologically; newest first.
        summaries.sort_by(|a, b| b.path.cmp(&a.path));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;
    use crate::session::MatchSetup;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 14, 0, 0).unwrap()
    }

    fn ended_session(opponent: &str) -> MatchSession {
        let mut s = MatchSession::new(MatchSetup {
            date: "2026-03-01".into(),
            opponent: opponent.into(),
            formation: "4-4-2".into(),
            level: "U15 League".into(),
        });
        s.start_at(t0()).unwrap();
        s.log_action_at(
            t0() + chrono::Duration::seconds(65),
            "Alex",
            "Striker",
            "Shot",
            Outcome::Successful,
        )
        .unwrap();
        s.record_goal_for();
        s.end_at(t0() + chrono::Duration::seconds(600)).unwrap();
        s
    }

    #[test]
    fn document_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = MatchStore::new(dir.path());

        let session = ended_session("Riverside FC");
        let doc = MatchDocument::from_session(&session, &Lineup::default());
        assert_eq!(doc.duration, "10:00");
        assert_eq!(doc.score, "1-0");

        let path = store.save_match_at(&doc, t0()).unwrap();
        let loaded = store.load_match(&path).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn listing_is_most_recent_first() {
        let dir = TempDir::new().unwrap();
        let store = MatchStore::new(dir.path());

        let doc_a = MatchDocument::from_session(&ended_session("First FC"), &Lineup::default());
        let doc_b = MatchDocument::from_session(&ended_session("Second FC"), &Lineup::default());

        store.save_match_at(&doc_a, t0()).unwrap();
        store
            .save_match_at(&doc_b, t0() + chrono::Duration::days(7))
            .unwrap();

        let listing = store.list_matches().unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].opponent, "Second FC");
        assert_eq!(listing[1].opponent, "First FC");
        assert_eq!(listing[1].action_count, 1);
    }

    #[test]
    fn listing_skips_unreadable_documents() {
        let dir = TempDir::new().unwrap();
        let store = MatchStore::new(dir.path());

        let doc = MatchDocument::from_session(&ended_session("First FC"), &Lineup::default());
        store.save_match_at(&doc, t0()).unwrap();
        std::fs::write(dir.path().join("match_garbage.json"), "{oops").unwrap();

        let listing = store.list_matches().unwrap();
        assert_eq!(listing.len(), 1);
    }

    #[test]
    fn missing_document_is_a_typed_error() {
        let dir = TempDir::new().unwrap();
        let store = MatchStore::new(dir.path());
        let err = store.load_match(&dir.path().join("match_nope.json")).unwrap_err();
        assert!(matches!(err, StoreError::FileNotFound { .. }));
    }

    #[test]
    fn empty_directory_lists_nothing() {
        let store = MatchStore::new("/nonexistent/dreamteam/matches");
        assert!(store.list_matches().unwrap().is_empty());
    }
}
