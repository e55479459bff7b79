//! Core configuration data types.

use std::time::Duration;

use discovery::{DiscoveryOptions, Source};
use key_listeners::{Activation, ActivationRouter, Key, SequenceTiming};
use serde::{Deserialize, Serialize};

use crate::defaults::{
    HINT_MODE_SEQUENCE, SCROLL_MODE_SEQUENCE, default_characters, default_extras_timeout_ms,
    default_hold_delay_ms, default_hold_key, default_reset_delay_ms, default_sources,
    default_true,
};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Hint labels.
    pub hints: Hints,
    /// Triggers that start a mode.
    pub activation: Triggers,
    /// Where hints come from.
    pub discovery: Discovery,
}

/// Hint label settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hints {
    /// Characters labels are built from.
    #[serde(default = "default_characters")]
    pub characters: String,
}

impl Default for Hints {
    fn default() -> Self {
        Self {
            characters: default_characters(),
        }
    }
}

/// A typed key sequence bound to a mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceBinding {
    /// When false the sequence is not listened for.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Characters to type.
    pub keys: String,
}

impl SequenceBinding {
    /// An enabled binding for `keys`.
    pub fn new(keys: &str) -> Self {
        Self {
            enabled: true,
            keys: keys.to_string(),
        }
    }
}

/// Activation triggers and their timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Triggers {
    /// Sequence that starts hint mode.
    #[serde(default = "hint_mode_binding")]
    pub hint_mode: SequenceBinding,
    /// Sequence that starts scroll mode.
    #[serde(default = "scroll_mode_binding")]
    pub scroll_mode: SequenceBinding,
    /// Key that starts hint mode when held; `None` disables holding.
    #[serde(default = "default_hold_key")]
    pub hold_key: Option<String>,
    /// Mode started by the hold key.
    #[serde(default = "default_hold_activation")]
    pub hold_activates: Activation,
    /// How long the hold key must stay down.
    #[serde(default = "default_hold_delay_ms")]
    pub hold_delay_ms: u64,
    /// Maximum gap between keys of one sequence.
    #[serde(default = "default_reset_delay_ms")]
    pub sequence_reset_ms: u64,
    /// Sequences never start within this long of a forwarded key; zero disables.
    #[serde(default)]
    pub typing_guard_ms: u64,
}

/// Serde default for [`Triggers::hint_mode`].
fn hint_mode_binding() -> SequenceBinding {
    SequenceBinding::new(HINT_MODE_SEQUENCE)
}

/// Serde default for [`Triggers::scroll_mode`].
fn scroll_mode_binding() -> SequenceBinding {
    SequenceBinding::new(SCROLL_MODE_SEQUENCE)
}

/// Serde default for [`Triggers::hold_activates`].
fn default_hold_activation() -> Activation {
    Activation::HintMode
}

impl Default for Triggers {
    fn default() -> Self {
        Self {
            hint_mode: hint_mode_binding(),
            scroll_mode: scroll_mode_binding(),
            hold_key: default_hold_key(),
            hold_activates: default_hold_activation(),
            hold_delay_ms: default_hold_delay_ms(),
            sequence_reset_ms: default_reset_delay_ms(),
            typing_guard_ms: 0,
        }
    }
}

impl Triggers {
    /// Enabled sequence bindings with the mode each starts.
    pub fn sequences(&self) -> Vec<(&str, Activation)> {
        [
            (&self.hint_mode, Activation::HintMode),
            (&self.scroll_mode, Activation::ScrollMode),
        ]
        .into_iter()
        .filter(|(b, _)| b.enabled)
        .map(|(b, a)| (b.keys.as_str(), a))
        .collect()
    }

    /// Parsed hold key. `None` when holding is disabled or the key name is
    /// invalid (rejected by validation).
    pub fn hold_key(&self) -> Option<Key> {
        self.hold_key
            .as_deref()
            .and_then(|k| Key::from_spec(k).ok())
    }

    /// Hold delay.
    pub fn hold_delay(&self) -> Duration {
        Duration::from_millis(self.hold_delay_ms)
    }

    /// Sequence timing.
    pub fn sequence_timing(&self) -> SequenceTiming {
        SequenceTiming {
            reset_delay: Duration::from_millis(self.sequence_reset_ms),
            typing_guard: Duration::from_millis(self.typing_guard_ms),
        }
    }

    /// Router mapping listener output to modes.
    pub fn router(&self) -> ActivationRouter {
        let mut router = ActivationRouter::new();
        for (keys, activation) in self.sequences() {
            router.sequence(keys, activation);
        }
        if let Some(key) = self.hold_key() {
            router.hold(key, self.hold_activates);
        }
        router
    }
}

/// Discovery settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Discovery {
    /// Sources to query. Results are always merged in priority order.
    #[serde(default = "default_sources")]
    pub sources: Vec<Source>,
    /// Per-application timeout for menu bar extras.
    #[serde(default = "default_extras_timeout_ms")]
    pub extras_timeout_ms: u64,
}

impl Default for Discovery {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            extras_timeout_ms: default_extras_timeout_ms(),
        }
    }
}

impl Config {
    /// Options for a discovery aggregator.
    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            extras_timeout: Duration::from_millis(self.discovery.extras_timeout_ms),
            alphabet: self.hints.characters.clone(),
        }
    }
}
