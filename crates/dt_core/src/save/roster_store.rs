//! The roster document store.
//!
//! One JSON file holds the whole roster; each save fully replaces it.
//! Loads never fail the session: a missing or unparsable document falls
//! back to the empty default and the problem is logged.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use super::{write_atomic, StoreError};
use crate::models::Roster;

pub struct RosterStore {
    path: PathBuf,
}

impl RosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted roster, or the empty default when the document is
    /// absent or unreadable. Parse failures are reported, not fatal.
    pub fn load(&self) -> Roster {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(roster) => roster,
                Err(err) => {
                    log::warn!(
                        "roster document {:?} is unparsable ({}); starting from empty roster",
                        self.path,
                        err
                    );
                    Roster::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Roster::default(),
            Err(err) => {
                log::warn!("could not read roster document {:?}: {}", self.path, err);
                Roster::default()
            }
        }
    }

    /// Persist a draft roster without validation. A timestamped backup of
    /// the previous document is written first so a bad save is recoverable.
    pub fn save(&self, roster: &Roster) -> Result<(), StoreError> {
        self.save_at(roster, Utc::now())
    }

    pub fn save_at(&self, roster: &Roster, now: DateTime<Utc>) -> Result<(), StoreError> {
        self.backup_existing(now)?;

        let json = serde_json::to_string_pretty(roster).map_err(StoreError::Serialization)?;
        write_atomic(&self.path, json.as_bytes())?;
        log::info!(
            "roster saved to {:?} ({} players)",
            self.path,
            roster.players.len()
        );
        Ok(())
    }

    /// Validate, then persist. Jersey uniqueness and squad size are checked
    /// here, at save time, rather than on every keystroke.
    pub fn save_committed(&self, roster: &Roster) -> Result<(), StoreError> {
        self.save_committed_at(roster, Utc::now())
    }

    pub fn save_committed_at(
        &self,
        roster: &Roster,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let violations = roster.validate();
        if !violations.is_empty() {
            log::warn!(
                "roster save rejected: {} validation finding(s)",
                violations.len()
            );
            return Err(StoreError::Validation { violations });
        }
        self.save_at(roster, now)
    }

    fn backup_existing(&self, now: DateTime<Utc>) -> Result<(), StoreError> {
        if !self.path.exists() {
            return Ok(());
        }
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("roster");
        let backup_name = format!("{}_{}.bak.json", stem, now.format("%Y%m%d_%H%M%S"));
        let backup_path = self.path.with_file_name(backup_name);
        std::fs::copy(&self.path, &backup_path)?;
        log::debug!("roster backup written to {:?}", backup_path);
        Ok(())
    }
}
