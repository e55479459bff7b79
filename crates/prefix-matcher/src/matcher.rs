//! Incremental matcher driving a cursor through a [`Trie`].

use std::{fmt, hash::Hash};

use tracing::trace;

use crate::trie::{NodeIndex, ROOT, Trie};

/// Where the matcher currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchState {
    /// No word registered yet.
    Initial,
    /// At least one word registered; cursor at the root.
    WordsAdded,
    /// The typed symbols are a strict prefix of at least one word.
    Advancable,
    /// The last symbol left the trie. Call [`Matcher::reset`] to continue.
    Deadend,
    /// The typed symbols spell a registered word.
    Matched,
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Initial => "initial",
            Self::WordsAdded => "words_added",
            Self::Advancable => "advancable",
            Self::Deadend => "deadend",
            Self::Matched => "matched",
        };
        f.write_str(s)
    }
}

/// A trie plus a cursor and a five-state machine.
///
/// Legal call sequences:
///
/// - `add_word` while in [`MatchState::Initial`] or [`MatchState::WordsAdded`]
/// - `advance` while in [`MatchState::WordsAdded`] or [`MatchState::Advancable`]
/// - `matched_word` while in [`MatchState::Matched`]
/// - `reset` once at least one word is registered
///
/// Anything else is a caller bug and panics.
#[derive(Debug, Clone)]
pub struct Matcher<S> {
    /// Registered words.
    trie: Trie<S>,
    /// Current position in the trie.
    cursor: NodeIndex,
    /// Current machine state.
    state: MatchState,
}

impl<S: Eq + Hash + Clone> Default for Matcher<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Eq + Hash + Clone> Matcher<S> {
    /// Create a matcher with no words.
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            cursor: ROOT,
            state: MatchState::Initial,
        }
    }

    /// Build a matcher from `words`, silently skipping words that conflict with
    /// earlier ones. Returns the matcher and the number of accepted words.
    pub fn with_words<I, W>(words: I) -> (Self, usize)
    where
        I: IntoIterator<Item = W>,
        W: AsRef<[S]>,
    {
        let mut m = Self::new();
        let accepted = words
            .into_iter()
            .filter(|w| m.add_word(w.as_ref()))
            .count();
        (m, accepted)
    }

    /// Current state.
    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Read-only access to the registered words.
    pub fn trie(&self) -> &Trie<S> {
        &self.trie
    }

    /// Register a word. Returns false when the word is empty or conflicts with a
    /// registered word (duplicate, prefix or extension); the matcher is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if called after input has been advanced.
    pub fn add_word(&mut self, word: &[S]) -> bool {
        assert!(
            matches!(self.state, MatchState::Initial | MatchState::WordsAdded),
            "add_word called in state {}",
            self.state
        );
        if !self.trie.insert(word) {
            trace!(len = word.len(), "matcher_word_rejected");
            return false;
        }
        self.state = MatchState::WordsAdded;
        true
    }

    /// Feed one symbol and return the resulting state.
    ///
    /// # Panics
    ///
    /// Panics unless the state is [`MatchState::WordsAdded`] or
    /// [`MatchState::Advancable`].
    pub fn advance(&mut self, sym: &S) -> MatchState {
        assert!(
            matches!(self.state, MatchState::WordsAdded | MatchState::Advancable),
            "advance called in state {}",
            self.state
        );
        self.state = match self.trie.child(self.cursor, sym) {
            None => MatchState::Deadend,
            Some(next) => {
                self.cursor = next;
                if self.trie.terminates(next) {
                    MatchState::Matched
                } else {
                    MatchState::Advancable
                }
            }
        };
        self.state
    }

    /// The word spelled by the cursor.
    ///
    /// # Panics
    ///
    /// Panics unless the state is [`MatchState::Matched`].
    pub fn matched_word(&self) -> Vec<S> {
        assert!(
            self.state == MatchState::Matched,
            "matched_word called in state {}",
            self.state
        );
        self.trie.path(self.cursor)
    }

    /// Symbols accepted so far. After a deadend this excludes the rejected symbol.
    pub fn typed(&self) -> Vec<S> {
        self.trie.path(self.cursor)
    }

    /// Registered words still reachable from the cursor. Empty after a deadend.
    pub fn completions(&self) -> Vec<Vec<S>> {
        match self.state {
            MatchState::Initial | MatchState::Deadend => Vec::new(),
            _ => self.trie.words_below(self.cursor),
        }
    }

    /// Return the cursor to the root.
    ///
    /// # Panics
    ///
    /// Panics if no word has been registered.
    pub fn reset(&mut self) {
        assert!(
            self.state != MatchState::Initial,
            "reset called before any word was added"
        );
        self.cursor = ROOT;
        self.state = MatchState::WordsAdded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn matcher(words: &[&str]) -> Matcher<char> {
        let mut m = Matcher::new();
        for w in words {
            assert!(m.add_word(&chars(w)), "word {w} rejected");
        }
        m
    }

    #[test]
    fn starts_initial_then_words_added() {
        let mut m = Matcher::new();
        assert_eq!(m.state(), MatchState::Initial);
        assert!(m.add_word(&chars("abc")));
        assert_eq!(m.state(), MatchState::WordsAdded);
    }

    #[test]
    fn rejected_words_leave_state_unchanged() {
        let mut m = matcher(&["abc"]);
        assert!(!m.add_word(&chars("abc")));
        assert!(!m.add_word(&chars("ab")));
        assert!(!m.add_word(&chars("abcd")));
        assert_eq!(m.state(), MatchState::WordsAdded);
    }

    #[test]
    fn advance_off_the_trie_is_deadend() {
        let mut m = matcher(&["abcd"]);
        assert_eq!(m.advance(&'c'), MatchState::Deadend);
        assert!(m.completions().is_empty());
    }

    #[test]
    fn advance_through_to_match() {
        let mut m = matcher(&["abcd"]);
        assert_eq!(m.advance(&'a'), MatchState::Advancable);
        assert_eq!(m.advance(&'b'), MatchState::Advancable);
        assert_eq!(m.advance(&'c'), MatchState::Advancable);
        assert_eq!(m.advance(&'d'), MatchState::Matched);
        assert_eq!(m.matched_word(), chars("abcd"));
    }

    #[test]
    fn single_symbol_word_matches_immediately() {
        let mut m = matcher(&["a"]);
        assert_eq!(m.advance(&'a'), MatchState::Matched);
        assert_eq!(m.matched_word(), vec!['a']);
    }

    #[test]
    fn completions_narrow_with_input() {
        let mut m = matcher(&["B", "AA", "AB"]);
        assert_eq!(m.advance(&'A'), MatchState::Advancable);
        let mut left = m.completions();
        left.sort();
        assert_eq!(left, vec![chars("AA"), chars("AB")]);
        assert_eq!(m.typed(), vec!['A']);
    }

    #[test]
    fn reset_returns_to_root() {
        let mut m = matcher(&["ab"]);
        m.advance(&'x');
        m.reset();
        assert_eq!(m.state(), MatchState::WordsAdded);
        assert_eq!(m.advance(&'a'), MatchState::Advancable);
        assert_eq!(m.advance(&'b'), MatchState::Matched);
    }

    #[test]
    fn with_words_counts_accepted() {
        let (m, n) = Matcher::<char>::with_words([chars("fd"), chars("f"), chars("jk")]);
        assert_eq!(n, 2);
        assert_eq!(m.trie().len(), 2);
    }

    #[test]
    #[should_panic(expected = "advance called in state initial")]
    fn advance_without_words_panics() {
        let mut m = Matcher::<char>::new();
        m.advance(&'a');
    }

    #[test]
    #[should_panic(expected = "advance called in state deadend")]
    fn advance_after_deadend_panics() {
        let mut m = matcher(&["ab"]);
        m.advance(&'z');
        m.advance(&'a');
    }

    #[test]
    #[should_panic(expected = "advance called in state matched")]
    fn advance_after_match_panics() {
        let mut m = matcher(&["a"]);
        m.advance(&'a');
        m.advance(&'a');
    }

    #[test]
    #[should_panic(expected = "matched_word called in state advancable")]
    fn matched_word_requires_match() {
        let mut m = matcher(&["ab"]);
        m.advance(&'a');
        m.matched_word();
    }

    #[test]
    #[should_panic(expected = "add_word called in state advancable")]
    fn add_word_after_advance_panics() {
        let mut m = matcher(&["ab"]);
        m.advance(&'a');
        m.add_word(&chars("cd"));
    }
}
