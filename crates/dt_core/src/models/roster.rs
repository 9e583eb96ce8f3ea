use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use super::Player;

/// Minimum number of named players before a roster may be committed.
pub const MIN_SQUAD_SIZE: usize = 11;

/// The persisted roster document. Fully replaced on each save, never merged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Roster {
    #[serde(default)]
    pub coach: String,
    #[serde(default)]
    pub assistant: String,
    #[serde(default)]
    pub players: Vec<Player>,
}

/// A single validation finding. Findings are reported, never auto-corrected.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RosterViolation {
    #[error("player at index {index} has an empty name")]
    EmptyName { index: usize },

    #[error("duplicate player name: {name}")]
    DuplicateName { name: String },

    #[error("jersey for {name} is not numeric: {jersey}")]
    NonNumericJersey { name: String, jersey: String },

    #[error("jersey {jersey} is worn by both {first} and {second}")]
    DuplicateJersey {
        jersey: String,
        first: String,
        second: String,
    },

    #[error("squad too small: {found} named players, need at least {}", MIN_SQUAD_SIZE)]
    SquadTooSmall { found: usize },
}

impl Roster {
    pub fn new(coach: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            coach: coach.into(),
            assistant: assistant.into(),
            players: Vec::new(),
        }
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.player(name).is_some()
    }

    /// Full validation pass for a committed save. Collects every finding
    /// instead of stopping at the first one.
    pub fn validate(&self) -> Vec<RosterViolation> {
        let mut violations = Vec::new();

        let mut seen_names: HashMap<&str, usize> = HashMap::new();
        let mut seen_jerseys: HashMap<&str, &str> = HashMap::new();

        for (index, player) in self.players.iter().enumerate() {
            if player.name.trim().is_empty() {
                violations.push(RosterViolation::EmptyName { index });
                continue;
            }

            *seen_names.entry(player.name.as_str()).or_insert(0) += 1;

            if let Some(jersey) = player.jersey.as_deref() {
                if jersey.is_empty() {
                    continue;
                }
                if !jersey.chars().all(|c| c.is_ascii_digit()) {
                    violations.push(RosterViolation::NonNumericJersey {
                        name: player.name.clone(),
                        jersey: jersey.to_string(),
                    });
                    continue;
                }
                match seen_jerseys.get(jersey) {
                    Some(first) => violations.push(RosterViolation::DuplicateJersey {
                        jersey: jersey.to_string(),
                        first: first.to_string(),
                        second: player.name.clone(),
                    }),
                    None => {
                        seen_jerseys.insert(jersey, player.name.as_str());
                    }
                }
            }
        }

        for (name, count) in seen_names.iter() {
            if *count > 1 {
                violations.push(RosterViolation::DuplicateName {
                    name: name.to_string(),
                });
            }
        }

        let named = self
            .players
            .iter()
            .filter(|p| !p.name.trim().is_empty())
            .count();
        if named < MIN_SQUAD_SIZE {
            violations.push(RosterViolation::SquadTooSmall { found: named });
        }

        violations
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn squad_of(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| {
                Player::new(
                    format!("Player {}", i + 1),
                    Some(&format!("{}", i + 1)),
                    Position::CM,
                )
            })
            .collect()
    }

    #[test]
    fn valid_roster_has_no_violations() {
        let roster = Roster {
            coach: "Coach".into(),
            assistant: "Assistant".into(),
            players: squad_of(11),
        };
        assert!(roster.validate().is_empty());
    }

    #[test]
    fn duplicate_jersey_is_flagged() {
        let mut roster = Roster::default();
        roster.players = squad_of(11);
        roster.players[3].jersey = Some("10".into());
        roster.players[7].jersey = Some("10".into());

        let violations = roster.validate();
        assert!(violations.iter().any(|v| matches!(
            v,
            RosterViolation::DuplicateJersey { jersey, .. } if jersey == "10"
        )));
    }

    #[test]
    fn non_numeric_jersey_is_flagged() {
        let mut roster = Roster::default();
        roster.players = squad_of(11);
        roster.players[0].jersey = Some("7a".into());

        let violations = roster.validate();
        assert!(violations
            .iter()
            .any(|v| matches!(v, RosterViolation::NonNumericJersey { .. })));
    }

    #[test]
    fn small_squad_is_flagged() {
        let roster = Roster {
            coach: String::new(),
            assistant: String::new(),
            players: squad_of(8),
        };
        let violations = roster.validate();
        assert!(violations
            .iter()
            .any(|v| matches!(v, RosterViolation::SquadTooSmall { found: 8 })));
    }

    #[test]
    fn empty_jersey_does_not_collide() {
        let mut roster = Roster::default();
        roster.players = squad_of(11);
        roster.players[0].jersey = Some(String::new());
        roster.players[1].jersey = Some(String::new());
        roster.players[2].jersey = None;

        assert!(roster.validate().is_empty());
    }
}
