//! Incremental matching of typed symbols against a prefix-free word set.
//!
//! - [`trie`]: the arena-backed word store.
//! - [`matcher`]: a cursor over the trie with a small state machine that
//!   reports whether the input so far is pending, complete, or hopeless.
//! - [`keymap`]: a matcher whose words carry values, for key bindings.

pub mod keymap;
pub mod matcher;
pub mod trie;

pub use keymap::{Keymap, Step};
pub use matcher::{MatchState, Matcher};
pub use trie::Trie;
