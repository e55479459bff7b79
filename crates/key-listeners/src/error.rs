//! Errors constructing listeners.

use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for this crate.
pub type Result<T> = StdResult<T, Error>;

/// Listener construction errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// None of the requested sequences could be registered.
    #[error("no key sequence could be registered")]
    NoSequences,

    /// A key name could not be parsed.
    #[error("unknown key: {0}")]
    UnknownKey(String),
}
