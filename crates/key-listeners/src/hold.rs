//! Tap-versus-hold detection for a single trigger key.
//!
//! Pressing the trigger swallows it and starts a delay. Releasing it (or
//! pressing another key) before the delay ends replays the press so the tap
//! reaches the application as if nothing happened. Holding it past the delay
//! publishes [`HoldKeyEvent::HeldKey`] instead, and the rest of that press
//! (repeats and the release) is swallowed.

use std::{mem, time::Duration};

use tokio::time::Instant;
use tracing::{debug, trace};

use crate::{
    event::{Key, KeyEvent},
    listener::{Input, Listener, Reaction, TimerId, TimerIds},
};

/// Default hold delay.
pub const DEFAULT_HOLD_DELAY: Duration = Duration::from_millis(250);

/// Published when the trigger has been held past the delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoldKeyEvent {
    /// The trigger key was held.
    HeldKey(Key),
}

/// Listener state.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HoldState {
    /// Nothing in progress.
    Idle,
    /// Trigger pressed and swallowed; waiting to learn whether it is a tap.
    AwaitingDelay {
        /// The swallowed press.
        pressed: KeyEvent,
        /// Timer deciding the hold.
        timer: TimerId,
    },
    /// Hold published; swallow the remainder of this press.
    DispatchedHeld,
}

/// Detects a held trigger key.
#[derive(Debug)]
pub struct HoldKeyListener {
    /// Trigger key.
    key: Key,
    /// How long the trigger must stay down.
    delay: Duration,
    /// Current state.
    state: HoldState,
    /// Timer id source.
    timers: TimerIds,
}

impl HoldKeyListener {
    /// Listen for `key` held for `delay`.
    pub fn new(key: Key, delay: Duration) -> Self {
        Self {
            key,
            delay,
            state: HoldState::Idle,
            timers: TimerIds::default(),
        }
    }

    /// The trigger key.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// True when no press is in progress.
    pub fn is_idle(&self) -> bool {
        self.state == HoldState::Idle
    }

    /// Handle a key event.
    fn on_key(&mut self, ev: KeyEvent) -> Reaction<HoldKeyEvent> {
        let trigger = ev.key == self.key;
        match mem::replace(&mut self.state, HoldState::Idle) {
            HoldState::Idle => {
                if trigger && ev.is_down() && !ev.repeat && !ev.has_modifiers() {
                    let timer = self.timers.next_id();
                    trace!(key = %self.key, %timer, "hold_awaiting");
                    self.state = HoldState::AwaitingDelay { pressed: ev, timer };
                    Reaction::swallow().arming(timer, self.delay)
                } else {
                    Reaction::forward()
                }
            }
            HoldState::AwaitingDelay { pressed, timer } => {
                self.awaiting(ev, trigger, pressed, timer)
            }
            HoldState::DispatchedHeld => {
                if !trigger {
                    self.state = HoldState::DispatchedHeld;
                    return Reaction::forward();
                }
                if ev.is_down() {
                    self.state = HoldState::DispatchedHeld;
                }
                Reaction::swallow()
            }
        }
    }

    /// Handle a key event while the hold is undecided.
    fn awaiting(
        &mut self,
        ev: KeyEvent,
        trigger: bool,
        pressed: KeyEvent,
        timer: TimerId,
    ) -> Reaction<HoldKeyEvent> {
        match (trigger, ev.is_down()) {
            (true, false) => {
                trace!(key = %self.key, "hold_tap");
                let up = pressed.release();
                Reaction::swallow()
                    .cancelling()
                    .replaying(vec![pressed, up])
            }
            (false, true) => {
                trace!(key = %self.key, other = %ev.key, "hold_interrupted");
                Reaction::swallow()
                    .cancelling()
                    .replaying(vec![pressed, ev])
            }
            (false, false) => {
                self.state = HoldState::AwaitingDelay { pressed, timer };
                Reaction::forward()
            }
            (true, true) => {
                self.state = HoldState::AwaitingDelay { pressed, timer };
                Reaction::swallow()
            }
        }
    }

    /// Handle a timer expiry.
    fn on_timeout(&mut self, id: TimerId) -> Reaction<HoldKeyEvent> {
        match &self.state {
            HoldState::AwaitingDelay { timer, .. } if *timer == id => {
                debug!(key = %self.key, "hold_dispatched");
                self.state = HoldState::DispatchedHeld;
                Reaction::swallow().emitting(HoldKeyEvent::HeldKey(self.key.clone()))
            }
            _ => {
                trace!(%id, "hold_stale_timeout");
                Reaction::swallow()
            }
        }
    }
}

impl Listener for HoldKeyListener {
    type Output = HoldKeyEvent;

    fn name(&self) -> &'static str {
        "hold"
    }

    fn handle(&mut self, input: Input, _now: Instant) -> Reaction<HoldKeyEvent> {
        match input {
            Input::Key(ev) => self.on_key(ev),
            Input::Timeout(id) => self.on_timeout(id),
        }
    }
}
