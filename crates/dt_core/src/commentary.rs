//! Commentary capture: free text in, candidate action events out.
//!
//! An utterance is scanned word by word (case-insensitive) for a roster
//! player name and an action keyword; outcome words upgrade or downgrade
//! the default Neutral outcome. A background capture source runs as a
//! producer thread that pushes candidates onto a channel; the match session
//! stays the only writer of the action log and drains the channel through
//! `log_action`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::lineup::Lineup;
use crate::models::{Outcome, RoleGroup, Roster};
use crate::session::{MatchSession, SessionError};

const SUCCESS_WORDS: &[&str] = &["good", "great", "excellent", "won", "scored", "brilliant"];
const FAILURE_WORDS: &[&str] = &["poor", "bad", "missed", "lost", "wasted", "sloppy"];

/// A parsed but not yet logged action.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateEvent {
    pub player: String,
    pub role: String,
    pub action: String,
    pub outcome: Outcome,
}

/// Every action phrase the scanner recognizes, across all role families.
pub fn keyword_catalog() -> Vec<&'static str> {
    let mut keywords: Vec<&'static str> = RoleGroup::all()
        .iter()
        .flat_map(|r| r.actions().iter().copied())
        .collect();
    keywords.sort_unstable();
    keywords.dedup();
    keywords
}

/// Scan one utterance for a player name and an action keyword.
///
/// Returns at most one candidate: the first roster player found plus the
/// first action phrase found. The role comes from the player's lineup slot
/// when they start, otherwise from their roster position.
pub fn parse_commentary(
    text: &str,
    roster: &Roster,
    lineup: Option<&Lineup>,
) -> Option<CandidateEvent> {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|w| normalize(w))
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return None;
    }

    let player = roster
        .players
        .iter()
        .filter(|p| !p.name.trim().is_empty())
        .find(|p| contains_phrase(&words, &p.name))?;

    let action = keyword_catalog()
        .into_iter()
        .find(|phrase| contains_phrase(&words, phrase))?;

    let outcome = if words.iter().any(|w| SUCCESS_WORDS.contains(&w.as_str())) {
        Outcome::Successful
    } else if words.iter().any(|w| FAILURE_WORDS.contains(&w.as_str())) {
        Outcome::Unsuccessful
    } else {
        Outcome::Neutral
    };

    let role = lineup
        .and_then(|l| l.role_of(&player.name))
        .unwrap_or_else(|| player.role());

    Some(CandidateEvent {
        player: player.name.clone(),
        role: role.label().to_string(),
        action: action.to_string(),
        outcome,
    })
}

fn normalize(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Whitespace-split phrase match: all words of `phrase` must appear
/// consecutively in `words`.
fn contains_phrase(words: &[String], phrase: &str) -> bool {
    let needle: Vec<String> = phrase.split_whitespace().map(normalize).collect();
    if needle.is_empty() || needle.len() > words.len() {
        return false;
    }
    words.windows(needle.len()).any(|window| window == needle)
}

/// Producer side of continuous capture.
///
/// The capture thread parses utterances and sends candidates; it never
/// touches the session. The stop flag is checked once per utterance and the
/// thread is joined before the session can be considered done with it.
pub struct CommentaryFeed {
    tx: Sender<CandidateEvent>,
    rx: Receiver<CandidateEvent>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Default for CommentaryFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentaryFeed {
    pub fn new() -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        Self {
            tx,
            rx,
            stop: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Hand-deliver a single utterance without a background thread.
    pub fn push_utterance(&self, text: &str, roster: &Roster, lineup: Option<&Lineup>) {
        if let Some(candidate) = parse_commentary(text, roster, lineup) {
            // Send fails only when the feed itself is gone.
            let _ = self.tx.send(candidate);
        }
    }

    /// Spawn the capture thread over a source of utterances. The source is
    /// whatever produces transcribed lines (a mock in tests).
    pub fn spawn<I>(&mut self, source: I, roster: Roster, lineup: Option<Lineup>)
    where
        I: IntoIterator<Item = String> + Send + 'static,
        I::IntoIter: Send,
    {
        let tx = self.tx.clone();
        let stop = Arc::clone(&self.stop);
        self.handle = Some(std::thread::spawn(move || {
            for utterance in source {
                if stop.load(Ordering::Relaxed) {
                    break;
                }
                if let Some(candidate) = parse_commentary(&utterance, &roster, lineup.as_ref()) {
                    if tx.send(candidate).is_err() {
                        break;
                    }
                }
            }
        }));
    }

    pub fn is_capturing(&self) -> bool {
        self.handle.is_some()
    }

    /// Request stop and wait for the capture thread to exit. Must complete
    /// before the owning session ends.
    pub fn stop_and_join(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("commentary capture thread panicked");
            }
        }
    }

    /// Drain pending candidates into the session through `log_action`.
    /// Stops at the first rejection (e.g. the session ended) and reports
    /// how many events were appended.
    pub fn drain_into_at(
        &self,
        session: &mut MatchSession,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<usize, SessionError> {
        let mut appended = 0;
        loop {
            match self.rx.try_recv() {
                Ok(candidate) => {
                    session.log_action_at(
                        now,
                        &candidate.player,
                        &candidate.role,
                        &candidate.action,
                        candidate.outcome,
                    )?;
                    appended += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        Ok(appended)
    }

    pub fn drain_into(&self, session: &mut MatchSession) -> Result<usize, SessionError> {
        self.drain_into_at(session, chrono::Utc::now())
    }
}

impl Drop for CommentaryFeed {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}
