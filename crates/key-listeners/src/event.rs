//! Key events as delivered by a global input feed.

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Modifier keys.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    /// Command (⌘).
    Command,
    /// Shift.
    Shift,
    /// Option / Alt.
    Option,
    /// Control.
    Control,
    /// Function.
    Function,
}

impl Modifier {
    /// Parse a modifier name (`cmd`, `shift`, `opt`/`alt`, `ctrl`, `fn`).
    pub fn from_spec(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cmd" | "command" => Some(Self::Command),
            "shift" => Some(Self::Shift),
            "opt" | "option" | "alt" => Some(Self::Option),
            "ctrl" | "control" => Some(Self::Control),
            "fn" | "function" => Some(Self::Function),
            _ => None,
        }
    }
}

/// A physical key, reduced to what the listeners care about.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A key producing a printable character.
    Char(char),
    /// The space bar.
    Space,
    /// Escape.
    Escape,
    /// Backspace / delete.
    Backspace,
    /// Return.
    Return,
    /// Tab.
    Tab,
    /// Any other key, by platform key code.
    Code(u16),
}

impl Key {
    /// The character this key types, if any.
    pub fn character(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            Self::Space => Some(' '),
            _ => None,
        }
    }

    /// The key that types `c`.
    pub fn from_char(c: char) -> Self {
        if c == ' ' { Self::Space } else { Self::Char(c) }
    }

    /// Parse a key name: a single character, or one of `space`, `esc`,
    /// `backspace`, `return`, `tab`.
    pub fn from_spec(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Self::from_char(c));
        }
        match s.to_ascii_lowercase().as_str() {
            "space" => Ok(Self::Space),
            "esc" | "escape" => Ok(Self::Escape),
            "backspace" | "delete" => Ok(Self::Backspace),
            "return" | "enter" => Ok(Self::Return),
            "tab" => Ok(Self::Tab),
            _ => Err(Error::UnknownKey(s.to_string())),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Space => f.write_str("space"),
            Self::Escape => f.write_str("esc"),
            Self::Backspace => f.write_str("backspace"),
            Self::Return => f.write_str("return"),
            Self::Tab => f.write_str("tab"),
            Self::Code(code) => write!(f, "code:{code}"),
        }
    }
}

/// Press or release.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Key pressed (or auto-repeated).
    KeyDown,
    /// Key released.
    KeyUp,
}

/// One keyboard event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Press or release.
    pub kind: EventKind,
    /// Which key.
    pub key: Key,
    /// Modifiers held at the time.
    #[serde(default)]
    pub modifiers: HashSet<Modifier>,
    /// True for OS auto-repeat key-downs.
    #[serde(default)]
    pub repeat: bool,
}

impl KeyEvent {
    /// A plain key-down.
    pub fn down(key: Key) -> Self {
        Self {
            kind: EventKind::KeyDown,
            key,
            modifiers: HashSet::new(),
            repeat: false,
        }
    }

    /// A plain key-up.
    pub fn up(key: Key) -> Self {
        Self {
            kind: EventKind::KeyUp,
            ..Self::down(key)
        }
    }

    /// Builder: add modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, mods: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(mods);
        self
    }

    /// Builder: mark as auto-repeat.
    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// True for key-downs, including repeats.
    pub fn is_down(&self) -> bool {
        self.kind == EventKind::KeyDown
    }

    /// True for key-ups.
    pub fn is_up(&self) -> bool {
        self.kind == EventKind::KeyUp
    }

    /// True when any modifier is held.
    pub fn has_modifiers(&self) -> bool {
        !self.modifiers.is_empty()
    }

    /// True when `m` is held.
    pub fn has(&self, m: Modifier) -> bool {
        self.modifiers.contains(&m)
    }

    /// The key-up matching this event.
    pub fn release(&self) -> Self {
        Self {
            kind: EventKind::KeyUp,
            key: self.key.clone(),
            modifiers: self.modifiers.clone(),
            repeat: false,
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = if self.is_down() { "down" } else { "up" };
        let mut mods: Vec<String> = self.modifiers.iter().map(|m| format!("{m:?}")).collect();
        mods.sort();
        if mods.is_empty() {
            write!(f, "{dir} {}", self.key)?;
        } else {
            write!(f, "{dir} {}+{}", mods.join("+"), self.key)?;
        }
        if self.repeat {
            f.write_str(" (repeat)")?;
        }
        Ok(())
    }
}
