//! Match session: the stopwatch-driven state machine that owns the action
//! log for one match.
//!
//! States: Idle, Running, Paused, HalfTime, Ended. Logging is accepted
//! whenever a match is underway (Running, Paused or HalfTime) and rejected
//! in Idle and Ended. Half-time is an explicit transition, not a condition
//! recomputed per redraw: `poll_at` moves Running → HalfTime once the clock
//! crosses the half boundary, and `start_second_half_at` re-anchors the
//! clock at exactly the half length.

pub mod clock;

pub use clock::MatchClock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::{format_match_time, ActionEvent, MatchLog, Outcome};

pub const DEFAULT_HALF_LENGTH: Duration = Duration::from_secs(45 * 60);

const WALL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    HalfTime,
    Ended,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Running => "running",
            SessionState::Paused => "paused",
            SessionState::HalfTime => "half_time",
            SessionState::Ended => "ended",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    First,
    Second,
}

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("cannot {action} while session is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("cannot log actions while session is {state}")]
    LoggingClosed { state: &'static str },
}

/// Session-level timeline entries (kick-offs, half-time, full-time).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionEventKind {
    KickOff,
    HalfTime,
    SecondHalfKickOff,
    FullTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionEvent {
    #[serde(rename = "type")]
    pub kind: SessionEventKind,
    pub match_time: String,
}

/// Fixture details entered before kick-off; carried into the saved match
/// document unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MatchSetup {
    pub date: String,
    pub opponent: String,
    pub formation: String,
    /// Competition level ("U15 League", "Friendly", ...).
    pub level: String,
}

/// One match worth of session state, owned explicitly by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSession {
    setup: MatchSetup,
    state: SessionState,
    half: Half,
    half_length: Duration,
    clock: MatchClock,
    log: MatchLog,
    events: Vec<SessionEvent>,
    score_for: u32,
    score_against: u32,
}

impl MatchSession {
    pub fn new(setup: MatchSetup) -> Self {
        Self::with_half_length(setup, DEFAULT_HALF_LENGTH)
    }

    pub fn with_half_length(setup: MatchSetup, half_length: Duration) -> Self {
        Self {
            setup,
            state: SessionState::Idle,
            half: Half::First,
            half_length,
            clock: MatchClock::new(),
            log: MatchLog::new(),
            events: Vec::new(),
            score_for: 0,
            score_against: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn half(&self) -> Half {
        self.half
    }

    pub fn setup(&self) -> &MatchSetup {
        &self.setup
    }

    pub fn log(&self) -> &MatchLog {
        &self.log
    }

    /// Exposed so callers can confirm before a destructive reset.
    pub fn log_is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn score(&self) -> (u32, u32) {
        (self.score_for, self.score_against)
    }

    pub fn record_goal_for(&mut self) {
        self.score_for += 1;
    }

    pub fn record_goal_against(&mut self) {
        self.score_against += 1;
    }

    /// Elapsed playing time at `now`. While Running in the first half the
    /// reading is capped at the half boundary; `poll_at` makes the
    /// transition official.
    pub fn current_elapsed_at(&self, now: DateTime<Utc>) -> Duration {
        let elapsed = self.clock.elapsed_at(now);
        if self.state == SessionState::Running && self.half == Half::First {
            elapsed.min(self.half_length)
        } else {
            elapsed
        }
    }

    pub fn current_elapsed(&self) -> Duration {
        self.current_elapsed_at(Utc::now())
    }

    /// Move Running → HalfTime once the first-half clock crosses the half
    /// boundary. Call on redraws or before reading the clock; a no-op in
    /// every other state.
    pub fn poll_at(&mut self, now: DateTime<Utc>) -> SessionState {
        if self.state == SessionState::Running
            && self.half == Half::First
            && self.clock.elapsed_at(now) >= self.half_length
        {
            self.clock.pause_at(now);
            self.clock.rebase_at(self.half_length, now);
            self.state = SessionState::HalfTime;
            self.push_event(SessionEventKind::HalfTime, self.half_length);
            log::info!("half-time reached at {}", format_match_time(self.half_length));
        }
        self.state
    }

    /// Idle → Running (kick-off) or Paused → Running (resume).
    pub fn start_at(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        match self.state {
            SessionState::Idle => {
                self.clock.start_at(now);
                self.state = SessionState::Running;
                self.push_event(SessionEventKind::KickOff, Duration::ZERO);
                log::info!("kick-off vs {}", self.setup.opponent);
                Ok(())
            }
            SessionState::Paused => {
                self.clock.start_at(now);
                self.state = SessionState::Running;
                Ok(())
            }
            state => Err(SessionError::InvalidTransition {
                action: "start",
                state: state.as_str(),
            }),
        }
    }

    /// Running → Paused.
    pub fn pause_at(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        self.poll_at(now);
        match self.state {
            SessionState::Running => {
                self.clock.pause_at(now);
                self.state = SessionState::Paused;
                Ok(())
            }
            state => Err(SessionError::InvalidTransition {
                action: "pause",
                state: state.as_str(),
            }),
        }
    }

    /// HalfTime → Running. The clock re-anchors at exactly the half length,
    /// so elapsed counts playing time only and the break is excluded.
    pub fn start_second_half_at(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        match self.state {
            SessionState::HalfTime => {
                self.clock.rebase_at(self.half_length, now);
                self.clock.start_at(now);
                self.half = Half::Second;
                self.state = SessionState::Running;
                self.push_event(SessionEventKind::SecondHalfKickOff, self.half_length);
                log::info!("second half under way");
                Ok(())
            }
            state => Err(SessionError::InvalidTransition {
                action: "start second half",
                state: state.as_str(),
            }),
        }
    }

    /// Any non-Ended state → Idle. Zeroes the clock and clears the action
    /// log; irreversible, so callers should check `log_is_empty` first.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Ended {
            return Err(SessionError::InvalidTransition {
                action: "reset",
                state: self.state.as_str(),
            });
        }
        let dropped = self.log.len();
        self.clock.reset();
        self.log.clear();
        self.events.clear();
        self.half = Half::First;
        self.score_for = 0;
        self.score_against = 0;
        self.state = SessionState::Idle;
        if dropped > 0 {
            log::warn!("session reset dropped {} logged actions", dropped);
        }
        Ok(())
    }

    /// Running/Paused/HalfTime → Ended. Freezes elapsed and closes the log.
    pub fn end_at(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        self.poll_at(now);
        match self.state {
            SessionState::Running | SessionState::Paused | SessionState::HalfTime => {
                if self.clock.is_running() {
                    self.clock.pause_at(now);
                }
                let final_elapsed = self.clock.elapsed_at(now);
                self.push_event(SessionEventKind::FullTime, final_elapsed);
                self.state = SessionState::Ended;
                log::info!(
                    "full-time at {} with {} logged actions",
                    format_match_time(final_elapsed),
                    self.log.len()
                );
                Ok(())
            }
            state => Err(SessionError::InvalidTransition {
                action: "end",
                state: state.as_str(),
            }),
        }
    }

    /// Append one action to the log. Valid only while a match is underway;
    /// rejected in Idle and Ended with the log left untouched. Rapid
    /// double-taps produce two events on purpose.
    pub fn log_action_at(
        &mut self,
        now: DateTime<Utc>,
        player: &str,
        role: &str,
        action: &str,
        outcome: Outcome,
    ) -> Result<ActionEvent, SessionError> {
        self.poll_at(now);
        match self.state {
            SessionState::Running | SessionState::Paused | SessionState::HalfTime => {
                let event = ActionEvent {
                    player: player.to_string(),
                    role: role.to_string(),
                    action: action.to_string(),
                    outcome,
                    match_time: format_match_time(self.current_elapsed_at(now)),
                    wall_timestamp: now.format(WALL_TIME_FORMAT).to_string(),
                };
                self.log.push(event.clone());
                Ok(event)
            }
            state => Err(SessionError::LoggingClosed {
                state: state.as_str(),
            }),
        }
    }

    // Wall-clock conveniences.

    pub fn start(&mut self) -> Result<(), SessionError> {
        self.start_at(Utc::now())
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        self.pause_at(Utc::now())
    }

    pub fn start_second_half(&mut self) -> Result<(), SessionError> {
        self.start_second_half_at(Utc::now())
    }

    pub fn end(&mut self) -> Result<(), SessionError> {
        self.end_at(Utc::now())
    }

    pub fn log_action(
        &mut self,
        player: &str,
        role: &str,
        action: &str,
        outcome: Outcome,
    ) -> Result<ActionEvent, SessionError> {
        self.log_action_at(Utc::now(), player, role, action, outcome)
    }

    fn push_event(&mut self, kind: SessionEventKind, at: Duration) {
        self.events.push(SessionEvent {
            kind,
            match_time: format_match_time(at),
        });
    }
}
