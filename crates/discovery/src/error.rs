//! Discovery errors.

use std::{result::Result as StdResult, time::Duration};

use hint_mode::LabelError;
use thiserror::Error;

/// Convenient result type for this crate.
pub type Result<T> = StdResult<T, DiscoveryError>;

/// Failure of a single desktop query. Drops that source's contribution only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The queried service or application is not reachable.
    #[error("{0} is unavailable")]
    Unavailable(String),

    /// The query did not answer in time.
    #[error("{what} timed out after {after:?}")]
    Timeout {
        /// What was being queried.
        what: String,
        /// The timeout that elapsed.
        after: Duration,
    },
}

/// Failure of a whole discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The caller cancelled the discovery.
    #[error("discovery cancelled")]
    Cancelled,

    /// The discovered nodes could not be labelled.
    #[error(transparent)]
    Labels(#[from] LabelError),
}
