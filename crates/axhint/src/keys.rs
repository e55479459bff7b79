//! `axhint keys`: run a scripted key stream through the activation listeners.
//!
//! Events pass through the hold listener, then the sequence listener, then
//! reach the "application". Replays from the hold listener enter the sequence
//! listener; replays from the sequence listener go straight to the
//! application. Time is virtual, so a script runs instantly.

use std::{fmt, fs, path::Path, slice, sync::Arc, time::Duration};

use config::Config;
use key_listeners::{
    Activation, ActivationRouter, Disposition, HoldKeyEvent, HoldKeyListener, Key, KeyEvent,
    KeySequenceListener, Listener, ListenerHost, RecordingSink, ReplaySink, SequenceEvent,
};
use serde::Deserialize;
use tokio::{
    sync::mpsc::UnboundedReceiver,
    task,
    time::{self, Instant},
};
use tracing::debug;

use crate::error::{Error, Result};

/// One script step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum Step {
    /// Press a key.
    Down(String),
    /// Release a key.
    Up(String),
    /// Press and release a key.
    Tap(String),
    /// Let this many milliseconds pass.
    Wait(u64),
}

/// Parse a RON script.
pub fn parse_script(text: &str, path: &Path) -> Result<Vec<Step>> {
    ron::from_str(text).map_err(|e| Error::Script {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read and parse a script file.
pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    let text = fs::read_to_string(path).map_err(|e| Error::Script {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_script(&text, path)
}

/// Expand a step into key events, resolving key names.
fn events(step: &Step) -> key_listeners::Result<Vec<KeyEvent>> {
    Ok(match step {
        Step::Down(k) => vec![KeyEvent::down(Key::from_spec(k)?)],
        Step::Up(k) => vec![KeyEvent::up(Key::from_spec(k)?)],
        Step::Tap(k) => {
            let down = KeyEvent::down(Key::from_spec(k)?);
            let up = down.release();
            vec![down, up]
        }
        Step::Wait(_) => Vec::new(),
    })
}

/// What a script run produced.
#[derive(Debug, Default)]
pub struct Transcript {
    /// Human-readable log, one line per occurrence.
    pub lines: Vec<String>,
    /// Events that reached the application, in order.
    pub delivered: Vec<KeyEvent>,
    /// Modes started, in order.
    pub activations: Vec<Activation>,
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Sink for the hold listener: replays continue into the sequence listener.
struct Downstream {
    /// Next listener, if sequences are enabled.
    sequences: Option<ListenerHost<KeySequenceListener>>,
    /// The application.
    app: Arc<RecordingSink>,
}

impl ReplaySink for Downstream {
    fn replay(&self, events: &[KeyEvent]) {
        for ev in events {
            if pass(self.sequences.as_ref(), ev) == Disposition::Forward {
                self.app.replay(slice::from_ref(ev));
            }
        }
    }
}

/// Offer `ev` to `host`; no host lets everything through.
fn pass<L: Listener>(host: Option<&ListenerHost<L>>, ev: &KeyEvent) -> Disposition {
    host.map_or(Disposition::Forward, |h| h.on_event(ev.clone()))
}

/// Collect everything waiting on `rx`.
fn drain<T>(rx: Option<&mut UnboundedReceiver<T>>) -> Vec<T> {
    let mut out = Vec::new();
    if let Some(rx) = rx {
        while let Ok(ev) = rx.try_recv() {
            out.push(ev);
        }
    }
    out
}

/// The wired-up listener chain.
struct Chain {
    /// Hold listener, if a hold key is configured.
    hold: Option<ListenerHost<HoldKeyListener>>,
    /// Hold events.
    hold_rx: Option<UnboundedReceiver<HoldKeyEvent>>,
    /// Sequence listener, if any sequence is enabled.
    sequences: Option<ListenerHost<KeySequenceListener>>,
    /// Sequence events.
    sequence_rx: Option<UnboundedReceiver<SequenceEvent>>,
    /// Everything replayed into the application.
    app: Arc<RecordingSink>,
    /// Maps listener output to modes.
    router: ActivationRouter,
}

impl Chain {
    /// Build the chain `cfg` describes. Must run inside a tokio runtime.
    fn new(cfg: &Config) -> Result<Self> {
        let app = Arc::new(RecordingSink::new());
        let keys: Vec<&str> = cfg
            .activation
            .sequences()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        let (sequences, sequence_rx) = if keys.is_empty() {
            (None, None)
        } else {
            let listener = KeySequenceListener::new(keys, cfg.activation.sequence_timing())?;
            let (host, rx) = ListenerHost::spawn(listener, app.clone());
            (Some(host), Some(rx))
        };
        let (hold, hold_rx) = match cfg.activation.hold_key() {
            Some(key) => {
                let sink = Arc::new(Downstream {
                    sequences: sequences.clone(),
                    app: app.clone(),
                });
                let listener = HoldKeyListener::new(key, cfg.activation.hold_delay());
                let (host, rx) = ListenerHost::spawn(listener, sink);
                (Some(host), Some(rx))
            }
            None => (None, None),
        };
        Ok(Self {
            hold,
            hold_rx,
            sequences,
            sequence_rx,
            app,
            router: cfg.activation.router(),
        })
    }

    /// Feed one event from the input stream.
    fn feed(&self, ev: &KeyEvent) -> Disposition {
        match pass(self.hold.as_ref(), ev) {
            Disposition::Forward => pass(self.sequences.as_ref(), ev),
            Disposition::Swallow => Disposition::Swallow,
        }
    }

    /// Record replays and activations produced since the last call.
    fn collect(&mut self, at: u128, out: &mut Transcript) {
        for ev in self.app.take() {
            out.lines.push(format!("{at:>6}ms   replay {ev}"));
            out.delivered.push(ev);
        }
        let held = drain(self.hold_rx.as_mut());
        let typed = drain(self.sequence_rx.as_mut());
        let routed = held
            .iter()
            .map(|e| self.router.on_hold(e))
            .chain(typed.iter().map(|e| self.router.on_sequence(e)));
        for activation in routed.flatten() {
            debug!(%activation, "activation");
            out.lines.push(format!("{at:>6}ms   activate {activation}"));
            out.activations.push(activation);
        }
    }

    /// Cancel pending timers.
    fn shutdown(&self) {
        if let Some(h) = &self.hold {
            h.shutdown();
        }
        if let Some(s) = &self.sequences {
            s.shutdown();
        }
    }
}

/// Run `steps` through the listeners `cfg` describes.
///
/// Call on a runtime with a paused clock for instant, deterministic runs.
pub async fn run_script(cfg: &Config, steps: &[Step]) -> Result<Transcript> {
    let mut chain = Chain::new(cfg)?;
    let mut out = Transcript::default();
    let start = Instant::now();

    for step in steps {
        if let Step::Wait(ms) = step {
            time::sleep(Duration::from_millis(*ms)).await;
            task::yield_now().await;
            chain.collect(start.elapsed().as_millis(), &mut out);
            continue;
        }
        for ev in events(step)? {
            let at = start.elapsed().as_millis();
            let disposition = chain.feed(&ev);
            let verdict = match disposition {
                Disposition::Forward => "forward",
                Disposition::Swallow => "swallow",
            };
            out.lines.push(format!("{at:>6}ms {ev} -> {verdict}"));
            chain.collect(at, &mut out);
            if disposition == Disposition::Forward {
                out.delivered.push(ev);
            }
        }
    }

    // Let any armed timer run out so nothing stays withheld.
    let settle = cfg
        .activation
        .hold_delay()
        .max(cfg.activation.sequence_timing().reset_delay);
    time::sleep(settle + Duration::from_millis(1)).await;
    task::yield_now().await;
    chain.collect(start.elapsed().as_millis(), &mut out);
    chain.shutdown();
    Ok(out)
}
