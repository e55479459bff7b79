//! Parse and load user configuration.

use std::{fs, path::Path};

use ron::{Options, extensions::Extensions};
use tracing::debug;

use crate::{Config, Error, resolve_config_path, validate::validate};

/// RON options used for config files.
fn ron_options() -> Options {
    Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
}

/// Parse and validate a config from RON text. `path` is only used for error
/// reporting.
pub fn load_from_str(text: &str, path: Option<&Path>) -> Result<Config, Error> {
    let cfg: Config = ron_options()
        .from_str(text)
        .map_err(|e| Error::parse(path, text, e.to_string()))?;
    validate(&cfg).map_err(|message| Error::Validation {
        path: path.map(Path::to_path_buf),
        message,
    })?;
    Ok(cfg)
}

/// Load a config from the RON file at `path`.
pub fn load_from_path(path: &Path) -> Result<Config, Error> {
    let text = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    load_from_str(&text, Some(path)).map_err(|e| e.with_path(path))
}

/// Load the effective config: `explicit` when given, else the default file
/// when it exists, else built-in defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config, Error> {
    match resolve_config_path(explicit) {
        Some(path) => {
            debug!(path = %path.display(), "config_load");
            load_from_path(&path)
        }
        None => {
            debug!("config_defaults");
            Ok(Config::default())
        }
    }
}
