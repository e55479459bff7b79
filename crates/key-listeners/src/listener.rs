//! The contract shared by all listeners.
//!
//! A listener is a plain state machine. Key events and timer expiries both
//! arrive through [`Listener::handle`], and everything the listener wants done
//! comes back as a [`Reaction`]. Nothing here touches clocks, threads or the
//! OS, so listeners can be driven synchronously in tests and by the
//! [`ListenerHost`](crate::host::ListenerHost) at runtime.

use std::{fmt, time::Duration};

use tokio::time::Instant;

use crate::event::KeyEvent;

/// Identity of one armed timer. A timeout carrying an id other than the one
/// currently armed is stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Hands out fresh [`TimerId`]s.
#[derive(Debug, Default)]
pub struct TimerIds {
    /// Last id issued.
    last: u64,
}

impl TimerIds {
    /// Next unused id.
    pub fn next_id(&mut self) -> TimerId {
        self.last += 1;
        TimerId(self.last)
    }
}

/// What a listener consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A key event from the input feed.
    Key(KeyEvent),
    /// A previously armed timer expired.
    Timeout(TimerId),
}

/// Whether the event being handled reaches the focused application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Let the event through unchanged.
    Forward,
    /// Drop the event.
    Swallow,
}

/// What to do with the listener's timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Leave any armed timer alone.
    Keep,
    /// Cancel any armed timer and arm a new one.
    Arm {
        /// Id the timeout will carry.
        id: TimerId,
        /// Delay from now.
        after: Duration,
    },
    /// Cancel any armed timer.
    Cancel,
}

/// A listener's answer to one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction<E> {
    /// Fate of the current key event. Meaningless for timeouts.
    pub disposition: Disposition,
    /// Events to re-inject, in order, before anything that follows.
    pub replay: Vec<KeyEvent>,
    /// Timer change.
    pub timer: TimerCommand,
    /// Event to publish to subscribers.
    pub emit: Option<E>,
}

impl<E> Reaction<E> {
    /// Pass the event through and change nothing.
    pub fn forward() -> Self {
        Self {
            disposition: Disposition::Forward,
            replay: Vec::new(),
            timer: TimerCommand::Keep,
            emit: None,
        }
    }

    /// Drop the event and change nothing.
    pub fn swallow() -> Self {
        Self {
            disposition: Disposition::Swallow,
            ..Self::forward()
        }
    }

    /// Builder: re-inject `events`.
    #[must_use]
    pub fn replaying(mut self, events: Vec<KeyEvent>) -> Self {
        self.replay = events;
        self
    }

    /// Builder: arm a timer.
    #[must_use]
    pub fn arming(mut self, id: TimerId, after: Duration) -> Self {
        self.timer = TimerCommand::Arm { id, after };
        self
    }

    /// Builder: cancel the timer.
    #[must_use]
    pub fn cancelling(mut self) -> Self {
        self.timer = TimerCommand::Cancel;
        self
    }

    /// Builder: publish `event`.
    #[must_use]
    pub fn emitting(mut self, event: E) -> Self {
        self.emit = Some(event);
        self
    }

    /// True when the current event should be dropped.
    pub fn swallows(&self) -> bool {
        self.disposition == Disposition::Swallow
    }
}

/// A key-driven state machine.
pub trait Listener: Send + 'static {
    /// What the listener publishes.
    type Output: fmt::Debug + Send + 'static;

    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Advance the state machine. `now` is the time the input was observed.
    fn handle(&mut self, input: Input, now: Instant) -> Reaction<Self::Output>;
}
