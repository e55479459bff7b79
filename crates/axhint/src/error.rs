use std::path::PathBuf;

use discovery::DiscoveryError;
use thiserror::Error;

/// Errors surfaced by the command line.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration could not be loaded.
    #[error("{}", .0.pretty())]
    Config(#[from] config::Error),

    /// A desktop snapshot could not be loaded.
    #[error("snapshot {}: {source}", path.display())]
    Snapshot {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: ax_tree::Error,
    },

    /// Discovery failed or was cancelled.
    #[error("discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    /// A `--sources` entry named no known source.
    #[error("unknown source '{0}'")]
    UnknownSource(String),

    /// A key script could not be read or parsed.
    #[error("key script {}: {message}", path.display())]
    Script {
        /// File that failed.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// A listener rejected its configuration.
    #[error("listener setup: {0}")]
    Listener(#[from] key_listeners::Error),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for the command line.
pub type Result<T> = std::result::Result<T, Error>;

/// Print helpful hints for common errors.
pub fn print_hints(err: &Error) {
    match err {
        Error::UnknownSource(_) => {
            let names: Vec<&str> = discovery::Source::ALL.iter().map(|s| s.name()).collect();
            eprintln!("hint: known sources are {}", names.join(", "));
        }
        Error::Discovery(DiscoveryError::Labels(_)) => {
            eprintln!("hint: hints.characters needs at least two distinct characters");
        }
        Error::Script { .. } => {
            eprintln!("hint: a script is a RON list such as [Down(\"f\"), Wait(40), Up(\"f\")]");
        }
        _ => {}
    }
}
