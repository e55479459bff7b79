//! Runtime host for a [`Listener`].
//!
//! The host owns the listener behind a lock, arms and cancels its timer on a
//! tokio runtime, hands replays to a [`ReplaySink`], and publishes emitted
//! events on an unbounded channel. Key events are handled synchronously so the
//! caller (typically an event tap callback) learns the disposition at once.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::{
    runtime::Handle,
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    time::{self, Instant},
};
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use crate::{
    event::KeyEvent,
    listener::{Disposition, Input, Listener, TimerCommand, TimerId},
    sink::ReplaySink,
};

/// Shared host state.
struct Inner<L: Listener> {
    /// The hosted state machine.
    listener: Mutex<L>,
    /// Cancels the armed timer task, if any.
    timer: Mutex<Option<CancellationToken>>,
    /// Where replays go.
    sink: Arc<dyn ReplaySink>,
    /// Subscriber channel.
    events: UnboundedSender<L::Output>,
    /// Runtime that runs timer tasks.
    runtime: Handle,
}

/// Drives a listener with real time.
pub struct ListenerHost<L: Listener> {
    /// Shared state; timer tasks hold a clone.
    inner: Arc<Inner<L>>,
}

impl<L: Listener> Clone for ListenerHost<L> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<L: Listener> ListenerHost<L> {
    /// Host `listener`, spawning timers on `runtime`. Returns the host and the
    /// receiver for emitted events.
    pub fn new(
        listener: L,
        sink: Arc<dyn ReplaySink>,
        runtime: Handle,
    ) -> (Self, UnboundedReceiver<L::Output>) {
        let (tx, rx) = unbounded_channel();
        let inner = Inner {
            listener: Mutex::new(listener),
            timer: Mutex::new(None),
            sink,
            events: tx,
            runtime,
        };
        (
            Self {
                inner: Arc::new(inner),
            },
            rx,
        )
    }

    /// Host `listener` on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn(listener: L, sink: Arc<dyn ReplaySink>) -> (Self, UnboundedReceiver<L::Output>) {
        Self::new(listener, sink, Handle::current())
    }

    /// Feed a key event and return whether it should reach the application.
    pub fn on_event(&self, ev: KeyEvent) -> Disposition {
        dispatch(&self.inner, Input::Key(ev))
    }

    /// Run `f` against the hosted listener.
    pub fn with_listener<R>(&self, f: impl FnOnce(&L) -> R) -> R {
        f(&self.inner.listener.lock())
    }

    /// Cancel any armed timer. The listener keeps its state.
    pub fn shutdown(&self) {
        if let Some(token) = self.inner.timer.lock().take() {
            token.cancel();
        }
    }
}

/// Handle one input and carry out the reaction.
///
/// The listener lock is released before replaying or emitting, so sinks and
/// subscribers may call back into the host.
fn dispatch<L: Listener>(inner: &Arc<Inner<L>>, input: Input) -> Disposition {
    let (reaction, name) = {
        let mut listener = inner.listener.lock();
        let reaction = listener.handle(input, Instant::now());
        // Timer changes apply in transition order.
        match reaction.timer {
            TimerCommand::Keep => {}
            TimerCommand::Cancel => cancel_timer(inner),
            TimerCommand::Arm { id, after } => arm_timer(inner, id, after),
        }
        (reaction, listener.name())
    };

    if !reaction.replay.is_empty() {
        trace!(
            listener = name,
            count = reaction.replay.len(),
            "listener_replay"
        );
        inner.sink.replay(&reaction.replay);
    }
    if let Some(ev) = reaction.emit {
        trace!(listener = name, event = ?ev, "listener_emit");
        if inner.events.send(ev).is_err() {
            warn!(listener = name, "listener_no_subscriber");
        }
    }
    reaction.disposition
}

/// Cancel the armed timer task, if any.
fn cancel_timer<L: Listener>(inner: &Inner<L>) {
    if let Some(token) = inner.timer.lock().take() {
        token.cancel();
    }
}

/// Replace any armed timer with one that fires `id` after `after`.
fn arm_timer<L: Listener>(inner: &Arc<Inner<L>>, id: TimerId, after: Duration) {
    let token = CancellationToken::new();
    let cancel = token.clone();
    if let Some(old) = inner.timer.lock().replace(token) {
        old.cancel();
    }
    let task_inner = inner.clone();
    inner.runtime.spawn(async move {
        tokio::select! {
            _ = time::sleep(after) => {
                trace!(%id, "listener_timer_fired");
                dispatch(&task_inner, Input::Timeout(id));
            }
            _ = cancel.cancelled() => {
                trace!(%id, "listener_timer_cancelled");
            }
        }
    });
}
