use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Qualitative result of a logged action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Outcome {
    Successful,
    Neutral,
    Unsuccessful,
}

impl Outcome {
    pub fn all() -> [Outcome; 3] {
        [Outcome::Successful, Outcome::Neutral, Outcome::Unsuccessful]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Successful => "Successful",
            Outcome::Neutral => "Neutral",
            Outcome::Unsuccessful => "Unsuccessful",
        }
    }

    pub fn from_str(s: &str) -> Option<Outcome> {
        Outcome::all().into_iter().find(|o| o.as_str() == s)
    }
}

/// One logged per-player action. Append-only; never mutated after capture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionEvent {
    pub player: String,
    /// Role label at capture time (e.g. "Striker").
    pub role: String,
    pub action: String,
    pub outcome: Outcome,
    /// Match clock at capture, formatted MM:SS.
    pub match_time: String,
    /// Real-world capture time, formatted %Y-%m-%d %H:%M:%S UTC.
    pub wall_timestamp: String,
}

/// Ordered action log for one match session.
///
/// The only mutations are append and full clear; individual events are
/// never edited or removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MatchLog {
    events: Vec<ActionEvent>,
}

impl MatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: ActionEvent) {
        self.events.push(event);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[ActionEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionEvent> {
        self.events.iter()
    }
}

/// Format an elapsed duration as the match-clock string MM:SS.
///
/// Minutes are not wrapped, so extra time past 99 minutes widens the field.
pub fn format_match_time(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}
