// Defaults and constants for configuration

use discovery::{DEFAULT_EXTRAS_TIMEOUT, Source};
use hint_mode::DEFAULT_ALPHABET;
use key_listeners::{DEFAULT_HOLD_DELAY, DEFAULT_RESET_DELAY};

pub(crate) const HINT_MODE_SEQUENCE: &str = "fd";
pub(crate) const SCROLL_MODE_SEQUENCE: &str = "jk";
pub(crate) const HOLD_KEY: &str = "space";

// Serde default functions
pub(crate) fn default_characters() -> String {
    DEFAULT_ALPHABET.to_string()
}
pub(crate) fn default_hold_key() -> Option<String> {
    Some(HOLD_KEY.to_string())
}
pub(crate) const fn default_true() -> bool {
    true
}
pub(crate) fn default_hold_delay_ms() -> u64 {
    millis(DEFAULT_HOLD_DELAY.as_millis())
}
pub(crate) fn default_reset_delay_ms() -> u64 {
    millis(DEFAULT_RESET_DELAY.as_millis())
}
pub(crate) fn default_extras_timeout_ms() -> u64 {
    millis(DEFAULT_EXTRAS_TIMEOUT.as_millis())
}
pub(crate) fn default_sources() -> Vec<Source> {
    Source::ALL.to_vec()
}

/// Narrow a millisecond count; the defaults are all far below `u64::MAX`.
fn millis(ms: u128) -> u64 {
    u64::try_from(ms).unwrap_or(u64::MAX)
}
