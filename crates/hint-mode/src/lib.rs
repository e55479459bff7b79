//! Hint labelling and selection.
//!
//! [`generate_labels`] produces short, prefix-free labels; [`label_nodes`]
//! attaches them to discovered nodes; [`HintSession`] turns typed keys into
//! an activated hint.

mod error;
pub mod hint;
pub mod labels;
pub mod session;

pub use error::{LabelError, Result};
pub use hint::{Hint, HintAction, HintKind, label_nodes, label_targets};
pub use labels::{DEFAULT_ALPHABET, generate_labels, normalize_alphabet};
pub use session::{HintSession, Intent, Outcome};
