//! Detection of short typed key sequences such as `fd`.
//!
//! Plain character key-downs are buffered and fed to a prefix matcher. While
//! the input can still complete a sequence the keys are withheld from the
//! application; once it cannot, everything withheld is replayed in order. A
//! completed sequence is published and its keys never reach the application.

use std::{collections::HashSet, iter, time::Duration};

use prefix_matcher::{MatchState, Matcher};
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    event::{Key, KeyEvent},
    listener::{Input, Listener, Reaction, TimerId, TimerIds},
};

/// Default time allowed between keys of one sequence.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(250);

/// Published when a registered sequence is typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceEvent {
    /// The characters of the completed sequence.
    MatchedSequence(Vec<char>),
}

/// A withheld key press and, once seen, its release.
#[derive(Debug, Clone)]
struct Withheld {
    /// The press.
    down: KeyEvent,
    /// The release, if it arrived while the press was withheld.
    up: Option<KeyEvent>,
}

/// Timing knobs for [`KeySequenceListener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceTiming {
    /// Maximum gap between keys of one sequence.
    pub reset_delay: Duration,
    /// Keys arriving this soon after a forwarded key-down never start a
    /// sequence. Zero disables the guard.
    pub typing_guard: Duration,
}

impl Default for SequenceTiming {
    fn default() -> Self {
        Self {
            reset_delay: DEFAULT_RESET_DELAY,
            typing_guard: Duration::ZERO,
        }
    }
}

/// Detects registered key sequences.
#[derive(Debug)]
pub struct KeySequenceListener {
    /// Registered sequences.
    matcher: Matcher<char>,
    /// Timing configuration.
    timing: SequenceTiming,
    /// Presses withheld from the application, oldest first.
    withheld: Vec<Withheld>,
    /// Keys whose press was consumed by a match; their release is dropped too.
    consumed: HashSet<Key>,
    /// The armed reset timer.
    timer: Option<TimerId>,
    /// Timer id source.
    timers: TimerIds,
    /// When a key-down last went through to the application.
    last_forwarded: Option<Instant>,
}

impl KeySequenceListener {
    /// Listen for `sequences`. Sequences that conflict with an earlier one are
    /// skipped; fails if none remain.
    pub fn new<I, S>(sequences: I, timing: SequenceTiming) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut matcher = Matcher::new();
        for seq in sequences {
            let chars: Vec<char> = seq.as_ref().chars().collect();
            if !matcher.add_word(&chars) {
                debug!(sequence = seq.as_ref(), "sequence_skipped");
            }
        }
        if matcher.trie().is_empty() {
            return Err(Error::NoSequences);
        }
        Ok(Self {
            matcher,
            timing,
            withheld: Vec::new(),
            consumed: HashSet::new(),
            timer: None,
            timers: TimerIds::default(),
            last_forwarded: None,
        })
    }

    /// Number of registered sequences.
    pub fn len(&self) -> usize {
        self.matcher.trie().len()
    }

    /// True when no sequence is registered. Never true for a constructed
    /// listener.
    pub fn is_empty(&self) -> bool {
        self.matcher.trie().is_empty()
    }

    /// Number of presses currently withheld.
    pub fn pending(&self) -> usize {
        self.withheld.len()
    }

    /// Whether `ev` may take part in a sequence.
    fn qualifies(ev: &KeyEvent) -> Option<char> {
        if ev.is_down() && !ev.repeat && !ev.has_modifiers() {
            ev.key.character()
        } else {
            None
        }
    }

    /// Drain withheld presses into replay order: each press followed by its
    /// release if one was seen.
    fn drain(&mut self) -> Vec<KeyEvent> {
        self.matcher.reset();
        self.timer = None;
        self.withheld
            .drain(..)
            .flat_map(|w| iter::once(w.down).chain(w.up))
            .collect()
    }

    /// Handle a key event.
    fn on_key(&mut self, ev: KeyEvent, now: Instant) -> Reaction<SequenceEvent> {
        if ev.is_up() {
            return self.on_release(ev);
        }
        let Some(c) = Self::qualifies(&ev) else {
            self.last_forwarded = Some(now);
            if self.withheld.is_empty() {
                return Reaction::forward();
            }
            let mut replay = self.drain();
            trace!(count = replay.len(), "sequence_interrupted");
            replay.push(ev);
            return Reaction::swallow().cancelling().replaying(replay);
        };

        if self.withheld.is_empty() && self.guarded(now) {
            trace!(key = %ev.key, "sequence_guarded");
            self.last_forwarded = Some(now);
            return Reaction::forward();
        }

        self.withheld.push(Withheld { down: ev, up: None });
        match self.matcher.advance(&c) {
            MatchState::Advancable => {
                let id = self.timers.next_id();
                self.timer = Some(id);
                Reaction::swallow().arming(id, self.timing.reset_delay)
            }
            MatchState::Matched => {
                let word = self.matcher.matched_word();
                debug!(sequence = %word.iter().collect::<String>(), "sequence_matched");
                for w in self.drain() {
                    if w.is_down() {
                        self.consumed.insert(w.key);
                    } else {
                        self.consumed.remove(&w.key);
                    }
                }
                Reaction::swallow()
                    .cancelling()
                    .emitting(SequenceEvent::MatchedSequence(word))
            }
            _ => {
                self.last_forwarded = Some(now);
                if self.withheld.len() == 1 {
                    self.drain();
                    return Reaction::forward().cancelling();
                }
                let replay = self.drain();
                trace!(count = replay.len(), "sequence_deadend");
                Reaction::swallow().cancelling().replaying(replay)
            }
        }
    }

    /// Handle a key release.
    fn on_release(&mut self, ev: KeyEvent) -> Reaction<SequenceEvent> {
        if self.consumed.remove(&ev.key) {
            return Reaction::swallow();
        }
        let slot = self
            .withheld
            .iter_mut()
            .find(|w| w.down.key == ev.key && w.up.is_none());
        match slot {
            Some(w) => {
                w.up = Some(ev);
                Reaction::swallow()
            }
            None => Reaction::forward(),
        }
    }

    /// True while the typing guard suppresses new sequences.
    fn guarded(&self, now: Instant) -> bool {
        let guard = self.timing.typing_guard;
        !guard.is_zero()
            && self
                .last_forwarded
                .is_some_and(|t| now.saturating_duration_since(t) < guard)
    }

    /// Handle a timer expiry.
    fn on_timeout(&mut self, id: TimerId) -> Reaction<SequenceEvent> {
        if self.timer != Some(id) {
            trace!(%id, "sequence_stale_timeout");
            return Reaction::swallow();
        }
        let replay = self.drain();
        trace!(count = replay.len(), "sequence_timeout");
        Reaction::swallow().replaying(replay)
    }
}

impl Listener for KeySequenceListener {
    type Output = SequenceEvent;

    fn name(&self) -> &'static str {
        "sequence"
    }

    fn handle(&mut self, input: Input, now: Instant) -> Reaction<SequenceEvent> {
        match input {
            Input::Key(ev) => self.on_key(ev, now),
            Input::Timeout(id) => self.on_timeout(id),
        }
    }
}
