//! Error type for snapshot loading.

use std::{io, path::PathBuf, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type for this crate.
pub type Result<T> = StdResult<T, Error>;

/// Errors loading a captured accessibility tree.
#[derive(Debug, Error)]
pub enum Error {
    /// The snapshot file could not be read.
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The snapshot text is not valid RON or JSON.
    #[error("failed to parse snapshot: {0}")]
    Parse(String),

    /// Two nodes share an id.
    #[error("duplicate node id {0} in snapshot")]
    DuplicateId(u64),

    /// A reference names a node that does not exist.
    #[error("unknown node id {0} referenced in snapshot")]
    UnknownId(u64),
}
