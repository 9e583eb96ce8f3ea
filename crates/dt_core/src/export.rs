//! Tabular export of the action log.
//!
//! The event CSV is the round-trip contract: exporting a log and re-parsing
//! the CSV reproduces the same events field for field. Summary views are
//! derived, one-way exports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::{ActionEvent, Outcome};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize events as CSV, one row per event.
pub fn events_to_csv(events: &[ActionEvent]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for event in events {
        writer.serialize(event)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse an event CSV produced by `events_to_csv`.
pub fn events_from_csv(data: &str) -> Result<Vec<ActionEvent>, ExportError> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let mut events = Vec::new();
    for record in reader.deserialize() {
        events.push(record?);
    }
    Ok(events)
}

/// Per-player outcome totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerSummary {
    pub player: String,
    pub total: usize,
    pub successful: usize,
    pub neutral: usize,
    pub unsuccessful: usize,
    /// successful / total * 100, one decimal; 0 when there are no actions.
    pub success_rate: f64,
}

/// Group the log by player, one summary row per distinct player, ordered by
/// player name.
pub fn player_summaries(events: &[ActionEvent]) -> Vec<PlayerSummary> {
    let mut by_player: BTreeMap<&str, (usize, usize, usize)> = BTreeMap::new();

    for event in events {
        let entry = by_player.entry(event.player.as_str()).or_default();
        match event.outcome {
            Outcome::Successful => entry.0 += 1,
            Outcome::Neutral => entry.1 += 1,
            Outcome::Unsuccessful => entry.2 += 1,
        }
    }

    by_player
        .into_iter()
        .map(|(player, (successful, neutral, unsuccessful))| {
            let total = successful + neutral + unsuccessful;
            PlayerSummary {
                player: player.to_string(),
                total,
                successful,
                neutral,
                unsuccessful,
                success_rate: percentage(successful, total),
            }
        })
        .collect()
}

pub fn summaries_to_csv(summaries: &[PlayerSummary]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for summary in summaries {
        writer.serialize(summary)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Per-(player, action, outcome) counts with the share of that player's
/// attempts at the action, matching the classic stats download.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionCount {
    pub player: String,
    pub action: String,
    pub outcome: Outcome,
    pub count: usize,
    /// count / total-for-(player, action) * 100, one decimal.
    pub percent: f64,
}

pub fn action_breakdown(events: &[ActionEvent]) -> Vec<ActionCount> {
    let mut counts: BTreeMap<(&str, &str), BTreeMap<&str, usize>> = BTreeMap::new();

    for event in events {
        *counts
            .entry((event.player.as_str(), event.action.as_str()))
            .or_default()
            .entry(event.outcome.as_str())
            .or_default() += 1;
    }

    let mut rows = Vec::new();
    for ((player, action), outcomes) in counts {
        let total: usize = outcomes.values().sum();
        for outcome in Outcome::all() {
            let Some(count) = outcomes.get(outcome.as_str()).copied() else {
                continue;
            };
            rows.push(ActionCount {
                player: player.to_string(),
                action: action.to_string(),
                outcome,
                count,
                percent: percentage(count, total),
            });
        }
    }
    rows
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = part as f64 / total as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}
