//! Re-injection of withheld key events.

use std::mem;

use parking_lot::Mutex;

use crate::event::KeyEvent;

/// Posts key events back into the system input stream.
///
/// Implementations must mark what they post so the listener that asked for the
/// replay does not see the events a second time.
pub trait ReplaySink: Send + Sync {
    /// Post `events` in order.
    fn replay(&self, events: &[KeyEvent]);
}

/// A sink that records what it is given. Used by tests and the scripted CLI.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Everything replayed so far.
    events: Mutex<Vec<KeyEvent>>,
}

impl RecordingSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything recorded so far.
    pub fn take(&self) -> Vec<KeyEvent> {
        mem::take(&mut *self.events.lock())
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<KeyEvent> {
        self.events.lock().clone()
    }
}

impl ReplaySink for RecordingSink {
    fn replay(&self, events: &[KeyEvent]) {
        self.events.lock().extend_from_slice(events);
    }
}
