//! Match stopwatch.
//!
//! Elapsed time is a pure function of `(anchor, elapsed, running, now)`;
//! there is no background timer. Invariant: `anchor` is `Some` exactly when
//! `running` is true.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MatchClock {
    elapsed: Duration,
    running: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    anchor: Option<DateTime<Utc>>,
}

impl MatchClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start or resume at `now`. The anchor is back-dated by the stored
    /// elapsed time, so `elapsed_at` continues from where the clock paused.
    pub fn start_at(&mut self, now: DateTime<Utc>) {
        if self.running {
            return;
        }
        let offset =
            chrono::Duration::from_std(self.elapsed).unwrap_or_else(|_| chrono::Duration::zero());
        self.anchor = Some(now.checked_sub_signed(offset).unwrap_or(now));
        self.running = true;
    }

    /// Freeze the clock at `now`.
    pub fn pause_at(&mut self, now: DateTime<Utc>) {
        if !self.running {
            return;
        }
        self.elapsed = self.elapsed_at(now);
        self.running = false;
        self.anchor = None;
    }

    /// Zero the clock and stop it.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.running = false;
        self.anchor = None;
    }

    /// Force the stored elapsed time to `target`, preserving the running
    /// flag. Used to pin the clock to the half boundary.
    pub fn rebase_at(&mut self, target: Duration, now: DateTime<Utc>) {
        self.elapsed = target;
        if self.running {
            let offset =
                chrono::Duration::from_std(target).unwrap_or_else(|_| chrono::Duration::zero());
            self.anchor = Some(now.checked_sub_signed(offset).unwrap_or(now));
        }
    }

    /// Elapsed playing time at `now`. Monotonically non-decreasing while
    /// running; frozen otherwise. Wall-clock regressions clamp to the last
    /// stored elapsed rather than going backwards.
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> Duration {
        match self.anchor {
            Some(anchor) if self.running => {
                let since = (now - anchor).to_std().unwrap_or(Duration::ZERO);
                since.max(self.elapsed)
            }
            _ => self.elapsed,
        }
    }

    pub fn start(&mut self) {
        self.start_at(Utc::now());
    }

    pub fn pause(&mut self) {
        self.pause_at(Utc::now());
    }

    pub fn current_elapsed(&self) -> Duration {
        self.elapsed_at(Utc::now())
    }
}
