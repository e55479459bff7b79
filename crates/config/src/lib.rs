//! Configuration for axhint.
//!
//! Configs are RON files with every field optional:
//!
//! ```text
//! (
//!     hints: (characters: "sadfjklewcmpgh"),
//!     activation: (
//!         hint_mode: (keys: "fd"),
//!         scroll_mode: (enabled: false, keys: "jk"),
//!         hold_key: "space",
//!         hold_delay_ms: 250,
//!     ),
//!     discovery: (sources: [menu_bar, active_window]),
//! )
//! ```

use std::{
    env,
    path::{Path, PathBuf},
};

mod defaults;
mod error;
mod loader;
mod types;
mod validate;

#[cfg(test)]
mod test_parse;

pub use error::{Error, excerpt_at};
pub use loader::{load, load_from_path, load_from_str};
pub use types::{Config, Discovery, Hints, SequenceBinding, Triggers};

/// Determine the preferred user config path (`~/.axhint/config.ron`).
pub fn default_config_path() -> PathBuf {
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(".axhint");
    p.push("config.ron");
    p
}

/// Resolve the effective config path.
///
/// Policy:
/// 1) Use `explicit` when provided.
/// 2) Else use `~/.axhint/config.ron` when it exists.
/// 3) Else `None`: run with built-in defaults.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let preferred = default_config_path();
    preferred.exists().then_some(preferred)
}
