//! Mapping listener output to the modes it activates.

use std::{collections::HashMap, fmt};

use prefix_matcher::Keymap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{event::Key, hold::HoldKeyEvent, sequence::SequenceEvent};

/// A mode that a held key or typed sequence can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// Label clickable elements and wait for a label to be typed.
    HintMode,
    /// Scroll the focused area with the keyboard.
    ScrollMode,
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::HintMode => "hint_mode",
            Self::ScrollMode => "scroll_mode",
        })
    }
}

/// Routes listener events to activations.
#[derive(Debug, Clone, Default)]
pub struct ActivationRouter {
    /// Typed sequences.
    sequences: Keymap<char, Activation>,
    /// Held keys.
    holds: HashMap<Key, Activation>,
}

impl ActivationRouter {
    /// An empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Route `sequence` to `activation`. Returns false when the sequence is
    /// empty or collides with one already routed.
    pub fn sequence(&mut self, sequence: &str, activation: Activation) -> bool {
        let chars: Vec<char> = sequence.chars().collect();
        self.sequences.bind(&chars, activation)
    }

    /// Route a held `key` to `activation`, replacing any earlier route.
    pub fn hold(&mut self, key: Key, activation: Activation) {
        self.holds.insert(key, activation);
    }

    /// The routed sequences, as strings.
    pub fn sequences(&self) -> Vec<String> {
        self.sequences
            .bindings()
            .map(|(keys, _)| keys.iter().collect())
            .collect()
    }

    /// Activation for a completed sequence.
    pub fn on_sequence(&self, ev: &SequenceEvent) -> Option<Activation> {
        let SequenceEvent::MatchedSequence(chars) = ev;
        let hit = self.sequences.get(chars).copied();
        if hit.is_none() {
            debug!(sequence = %chars.iter().collect::<String>(), "sequence_unrouted");
        }
        hit
    }

    /// Activation for a held key.
    pub fn on_hold(&self, ev: &HoldKeyEvent) -> Option<Activation> {
        let HoldKeyEvent::HeldKey(key) = ev;
        let hit = self.holds.get(key).copied();
        if hit.is_none() {
            debug!(%key, "hold_unrouted");
        }
        hit
    }
}
