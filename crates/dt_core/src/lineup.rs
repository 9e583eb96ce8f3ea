//! Lineup assignment: formation slots filled from the roster.
//!
//! Validation findings are flagged and returned alongside the assignment,
//! never used to abort it. The caller decides whether a flagged lineup may
//! proceed downstream.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::formation::FormationData;
use crate::models::{Player, Position, RoleGroup, Roster};

/// One formation slot and the player (if any) picked for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotAssignment {
    pub slot: usize,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Lineup {
    pub formation: String,
    pub starters: Vec<SlotAssignment>,
    pub substitutes: Vec<String>,
}

impl Lineup {
    pub fn starter_names(&self) -> Vec<&str> {
        self.starters
            .iter()
            .filter_map(|s| s.player.as_deref())
            .collect()
    }

    pub fn is_starting(&self, name: &str) -> bool {
        self.starters
            .iter()
            .any(|s| s.player.as_deref() == Some(name))
    }

    /// Role label of the slot a player occupies, if they start.
    pub fn role_of(&self, name: &str) -> Option<RoleGroup> {
        self.starters
            .iter()
            .find(|s| s.player.as_deref() == Some(name))
            .map(|s| s.position.role_group())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LineupViolation {
    #[error("{player} is assigned to more than one slot")]
    DuplicateAssignment { player: String },

    #[error("{player} is not on the roster")]
    NotInRoster { player: String },

    #[error("{player} is already in the starting lineup")]
    AlreadyStarting { player: String },

    #[error("{player} is listed twice among substitutes")]
    DuplicateSubstitute { player: String },

    #[error("too many substitutes: {found}, maximum {max}")]
    TooManySubstitutes { found: usize, max: usize },
}

/// An assignment plus everything wrong with it.
#[derive(Debug, Clone, PartialEq)]
pub struct LineupReport {
    pub lineup: Lineup,
    pub violations: Vec<LineupViolation>,
}

impl LineupReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Roster players offered for one slot: those whose role family matches the
/// slot position and who are not already taken. Falls back to the full
/// remaining roster when no position matches.
pub fn slot_candidates<'a>(
    formation: &FormationData,
    roster: &'a Roster,
    taken: &[&str],
    slot: usize,
) -> Vec<&'a Player> {
    let Some(position) = formation.slots.get(slot) else {
        return Vec::new();
    };

    let free = |p: &&Player| !taken.contains(&p.name.as_str());

    let matching: Vec<&Player> = roster
        .players
        .iter()
        .filter(|p| p.role() == position.role_group())
        .filter(free)
        .collect();

    if matching.is_empty() {
        roster.players.iter().filter(free).collect()
    } else {
        matching
    }
}

/// Build a starting lineup from per-slot choices. `choices[i]` is the player
/// name picked for slot `i`, or `None` for an unfilled slot.
pub fn assign(
    formation: &FormationData,
    roster: &Roster,
    choices: &[Option<String>],
) -> LineupReport {
    let mut violations = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut starters = Vec::with_capacity(formation.slots.len());

    for (slot, position) in formation.slots.iter().enumerate() {
        let choice = choices.get(slot).and_then(|c| c.as_deref());

        if let Some(name) = choice {
            if !roster.contains(name) {
                violations.push(LineupViolation::NotInRoster {
                    player: name.to_string(),
                });
            }
            if !seen.insert(name) {
                violations.push(LineupViolation::DuplicateAssignment {
                    player: name.to_string(),
                });
            }
        }

        starters.push(SlotAssignment {
            slot,
            position: *position,
            player: choice.map(|n| n.to_string()),
        });
    }

    LineupReport {
        lineup: Lineup {
            formation: formation.name.clone(),
            starters,
            substitutes: Vec::new(),
        },
        violations,
    }
}

/// Substitute selection report.
#[derive(Debug, Clone, PartialEq)]
pub struct SubstituteReport {
    pub substitutes: Vec<String>,
    pub violations: Vec<LineupViolation>,
}

impl SubstituteReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Players eligible for the bench: on the roster and not already used.
pub fn substitute_candidates<'a>(roster: &'a Roster, used: &[&str]) -> Vec<&'a Player> {
    roster
        .players
        .iter()
        .filter(|p| !used.contains(&p.name.as_str()))
        .collect()
}

/// Build an ordered substitute list. `used` are the starting players;
/// duplicates and already-starting picks are flagged, not dropped.
pub fn assign_substitutes(
    roster: &Roster,
    used: &[&str],
    choices: &[String],
    max_count: usize,
) -> SubstituteReport {
    let mut violations = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    if choices.len() > max_count {
        violations.push(LineupViolation::TooManySubstitutes {
            found: choices.len(),
            max: max_count,
        });
    }

    for name in choices {
        if !roster.contains(name) {
            violations.push(LineupViolation::NotInRoster {
                player: name.clone(),
            });
        }
        if used.contains(&name.as_str()) {
            violations.push(LineupViolation::AlreadyStarting {
                player: name.clone(),
            });
        }
        if !seen.insert(name.as_str()) {
            violations.push(LineupViolation::DuplicateSubstitute {
                player: name.clone(),
            });
        }
    }

    SubstituteReport {
        substitutes: choices.to_vec(),
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, Position};

    fn test_roster() -> Roster {
        let mut roster = Roster::new("Coach", "Assistant");
        roster.players = vec![
            Player::new("Kim", Some("1"), Position::GK),
            Player::new("Lee", Some("2"), Position::LB),
            Player::new("Park", Some("4"), Position::CB),
            Player::new("Choi", Some("5"), Position::CB),
            Player::new("Jung", Some("3"), Position::RB),
            Player::new("Kang", Some("11"), Position::LW),
            Player::new("Cho", Some("8"), Position::CM),
            Player::new("Yoon", Some("6"), Position::CM),
            Player::new("Jang", Some("7"), Position::RW),
            Player::new("Lim", Some("9"), Position::ST),
            Player::new("Han", Some("10"), Position::ST),
            Player::new("Oh", Some("12"), Position::GK),
            Player::new("Seo", Some("14"), Position::CM),
        ];
        roster
    }

    #[test]
    fn candidates_filter_by_role_group() {
        let formation = FormationData::by_name("4-4-2").unwrap();
        let roster = test_roster();

        // Slot 0 is GK; both keepers offered.
        let keepers = slot_candidates(&formation, &roster, &[], 0);
        assert_eq!(keepers.len(), 2);
        assert!(keepers.iter().all(|p| p.position == Position::GK));

        // Taken players disappear from later candidate lists.
        let keepers = slot_candidates(&formation, &roster, &["Kim"], 0);
        assert_eq!(keepers.len(), 1);
        assert_eq!(keepers[0].name, "Oh");
    }

    #[test]
    fn candidates_fall_back_to_full_roster() {
        let formation = FormationData::by_name("4-2-3-1").unwrap();
        let mut roster = test_roster();
        // Nobody plays DM.
        roster.players.retain(|p| p.position != Position::DM);

        let dm_slot = formation
            .slots
            .iter()
            .position(|p| *p == Position::DM)
            .unwrap();
        let candidates = slot_candidates(&formation, &roster, &[], dm_slot);
        assert_eq!(candidates.len(), roster.players.len());
    }

    #[test]
    fn duplicate_assignment_is_flagged_not_aborted() {
        let formation = FormationData::by_name("4-4-2").unwrap();
        let roster = test_roster();

        let mut choices: Vec<Option<String>> = vec![None; 11];
        choices[9] = Some("Lim".into());
        choices[10] = Some("Lim".into());

        let report = assign(&formation, &roster, &choices);
        assert!(!report.is_valid());
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, LineupViolation::DuplicateAssignment { player } if player == "Lim")));
        // The assignment itself is still returned.
        assert_eq!(report.lineup.starters[10].player.as_deref(), Some("Lim"));
    }

    #[test]
    fn unknown_player_is_flagged() {
        let formation = FormationData::by_name("4-4-2").unwrap();
        let roster = test_roster();

        let mut choices: Vec<Option<String>> = vec![None; 11];
        choices[0] = Some("Nobody".into());

        let report = assign(&formation, &roster, &choices);
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, LineupViolation::NotInRoster { player } if player == "Nobody")));
    }

    #[test]
    fn substitutes_draw_from_unused_players() {
        let roster = test_roster();
        let used = ["Kim", "Lee", "Park"];

        let candidates = substitute_candidates(&roster, &used);
        assert_eq!(candidates.len(), roster.players.len() - used.len());
        assert!(candidates.iter().all(|p| !used.contains(&p.name.as_str())));

        let report = assign_substitutes(&roster, &used, &["Oh".into(), "Seo".into()], 7);
        assert!(report.is_valid());
        assert_eq!(report.substitutes, vec!["Oh".to_string(), "Seo".to_string()]);
    }

    #[test]
    fn duplicate_substitute_is_flagged() {
        let roster = test_roster();
        let report = assign_substitutes(&roster, &["Kim"], &["Oh".into(), "Oh".into()], 7);
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, LineupViolation::DuplicateSubstitute { player } if player == "Oh")));

        let report = assign_substitutes(&roster, &["Kim"], &["Kim".into()], 7);
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, LineupViolation::AlreadyStarting { player } if player == "Kim")));
    }
}
