//! A matcher whose words carry a bound value.

use std::hash::Hash;

use crate::matcher::{MatchState, Matcher};

/// Outcome of feeding one symbol to a [`Keymap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<'a, V> {
    /// More input needed.
    Pending,
    /// No binding starts with the typed symbols. The keymap has been reset.
    Deadend,
    /// A binding completed. The keymap has been reset.
    Matched(&'a V),
}

/// Maps prefix-free symbol sequences to values.
#[derive(Debug, Clone)]
pub struct Keymap<S, V> {
    /// Underlying matcher.
    matcher: Matcher<S>,
    /// Registered sequences with their values, in registration order.
    bindings: Vec<(Vec<S>, V)>,
}

impl<S: Eq + Hash + Clone, V> Default for Keymap<S, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Eq + Hash + Clone, V> Keymap<S, V> {
    /// Empty keymap.
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(),
            bindings: Vec::new(),
        }
    }

    /// Bind `keys` to `value`. Returns false if `keys` conflicts with an
    /// existing binding.
    ///
    /// # Panics
    ///
    /// Panics if input is in progress.
    pub fn bind(&mut self, keys: &[S], value: V) -> bool {
        if !self.matcher.add_word(keys) {
            return false;
        }
        self.bindings.push((keys.to_vec(), value));
        true
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in registration order.
    pub fn bindings(&self) -> impl Iterator<Item = (&[S], &V)> {
        self.bindings.iter().map(|(k, v)| (k.as_slice(), v))
    }

    /// Look up the value bound to exactly `keys`.
    pub fn get(&self, keys: &[S]) -> Option<&V> {
        self.bindings
            .iter()
            .find(|(k, _)| k.as_slice() == keys)
            .map(|(_, v)| v)
    }

    /// Feed one symbol. Returns [`Step::Deadend`] without touching the matcher
    /// when nothing is bound.
    pub fn step(&mut self, sym: &S) -> Step<'_, V> {
        if self.bindings.is_empty() {
            return Step::Deadend;
        }
        match self.matcher.advance(sym) {
            MatchState::Matched => {
                let word = self.matcher.matched_word();
                self.matcher.reset();
                match self.bindings.iter().find(|(k, _)| *k == word) {
                    Some((_, v)) => Step::Matched(v),
                    None => Step::Deadend,
                }
            }
            MatchState::Deadend => {
                self.matcher.reset();
                Step::Deadend
            }
            _ => Step::Pending,
        }
    }

    /// Abandon any partial input.
    pub fn reset(&mut self) {
        if !self.bindings.is_empty() {
            self.matcher.reset();
        }
    }
}
