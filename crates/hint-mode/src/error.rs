//! Errors produced while labelling hints.

use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for this crate.
pub type Result<T> = StdResult<T, LabelError>;

/// Label generation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// Labels need at least two distinct characters.
    #[error("hint alphabet needs at least 2 unique characters, got {unique} in {alphabet:?}")]
    AlphabetTooSmall {
        /// The alphabet as given.
        alphabet: String,
        /// Distinct characters after normalisation.
        unique: usize,
    },
    /// The character's case mapping is not a single character.
    #[error("hint alphabet character {0:?} has no single-character upper-case form")]
    UnsupportedCharacter(char),
}
