//! `axhint hints`: discover, label and optionally select hints on a captured
//! desktop.

use std::{fmt::Write as _, path::Path, sync::Arc};

use config::Config;
use discovery::{Aggregator, SnapshotDesktop, Source};
use hint_mode::{Hint, HintAction, HintSession, Outcome};
use key_listeners::{Key, KeyEvent};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{Error, Result};

/// Parse `--sources` names. An empty list means the configured sources.
pub fn parse_sources(names: &[String], cfg: &Config) -> Result<Vec<Source>> {
    if names.is_empty() {
        return Ok(cfg.discovery.sources.clone());
    }
    names
        .iter()
        .map(|n| Source::from_name(n.trim()).ok_or_else(|| Error::UnknownSource(n.clone())))
        .collect()
}

/// Load `snapshot` into an aggregator configured by `cfg`.
pub fn open(cfg: &Config, snapshot: &Path) -> Result<Aggregator<SnapshotDesktop>> {
    let desktop = SnapshotDesktop::load(snapshot).map_err(|source| Error::Snapshot {
        path: snapshot.to_path_buf(),
        source,
    })?;
    Ok(Aggregator::new(Arc::new(desktop), cfg.discovery_options()))
}

/// Run discovery over `sources`. Ctrl-C cancels.
pub async fn discover(
    aggregator: &Aggregator<SnapshotDesktop>,
    sources: &[Source],
) -> Result<Vec<Hint<u64>>> {
    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                debug!("interrupted");
                cancel.cancel();
            }
        })
    };
    let hints = aggregator.discover(sources, &cancel).await;
    interrupt.abort();
    Ok(hints?)
}

/// One line per hint: label, role, handle, frame and click target.
pub fn render(hints: &[Hint<u64>]) -> String {
    let mut out = String::new();
    for hint in hints {
        let f = hint.node.effective_frame();
        let (tx, ty) = hint.target();
        let _ignored = writeln!(
            out,
            "{:<4} {:<20} #{:<5} {:>7.1},{:<7.1} {:>6.1}x{:<6.1} -> {:.1},{:.1}",
            hint.label,
            hint.node.role().to_string(),
            hint.node.handle(),
            f.x,
            f.y,
            f.w,
            f.h,
            tx,
            ty
        );
    }
    out
}

/// Type `text` into a session over `hints`, describing each outcome. A
/// selected window hint raises its window.
pub fn select(
    aggregator: &Aggregator<SnapshotDesktop>,
    hints: Vec<Hint<u64>>,
    text: &str,
) -> Vec<String> {
    let mut session = HintSession::new(hints);
    let mut lines = Vec::new();
    for c in text.chars() {
        if session.is_closed() {
            lines.push(format!("{c}: ignored, session closed"));
            continue;
        }
        let outcome = session.handle_key(&KeyEvent::down(Key::from_char(c)));
        let mut line = format!("{c}: {}", describe(&outcome));
        if let Outcome::Activated {
            hint,
            action: HintAction::Raise,
        } = &outcome
        {
            match aggregator.raise(hint) {
                Ok(_) => line.push_str(" (raised)"),
                Err(e) => {
                    let _ignored = write!(line, " (raise failed: {e})");
                }
            }
        }
        lines.push(line);
    }
    lines
}

/// Human-readable outcome.
fn describe(outcome: &Outcome<u64>) -> String {
    match outcome {
        Outcome::Narrowed { typed, remaining } => format!("narrowed to {remaining} ({typed})"),
        Outcome::Activated { hint, action } => {
            let (x, y) = hint.target();
            format!(
                "{action:?} {} #{} at {x:.1},{y:.1}",
                hint.label,
                hint.node.handle()
            )
        }
        Outcome::Exited => "exited".to_string(),
        Outcome::Rotated => "rotate".to_string(),
        Outcome::Unchanged => "unchanged".to_string(),
    }
}
