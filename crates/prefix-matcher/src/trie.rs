//! Arena-backed trie over arbitrary symbols.
//!
//! Nodes live in a single `Vec` and refer to each other by index, so parent
//! links cost nothing and the whole trie is dropped in one go. The trie only
//! ever holds a prefix-free word set: [`Trie::insert`] refuses duplicates,
//! prefixes of existing words and extensions of existing words.

use std::{collections::HashMap, hash::Hash};

/// Index of a node inside a [`Trie`] arena.
pub type NodeIndex = usize;

/// Index of the root node.
pub const ROOT: NodeIndex = 0;

/// One arena slot.
#[derive(Debug, Clone)]
struct TrieNode<S> {
    /// Symbol on the edge leading into this node; `None` for the root.
    symbol: Option<S>,
    /// Parent slot; `None` for the root.
    parent: Option<NodeIndex>,
    /// Outgoing edges.
    children: HashMap<S, NodeIndex>,
    /// True when a registered word ends here.
    terminates: bool,
}

impl<S> TrieNode<S> {
    /// Fresh node hanging off `parent` via `symbol`.
    fn new(symbol: Option<S>, parent: Option<NodeIndex>) -> Self {
        Self {
            symbol,
            parent,
            children: HashMap::new(),
            terminates: false,
        }
    }
}

/// A prefix-free set of words.
#[derive(Debug, Clone)]
pub struct Trie<S> {
    /// Node arena; slot 0 is the root.
    nodes: Vec<TrieNode<S>>,
    /// Number of registered words.
    words: usize,
}

impl<S: Eq + Hash + Clone> Default for Trie<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Eq + Hash + Clone> Trie<S> {
    /// Create an empty trie containing only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::new(None, None)],
            words: 0,
        }
    }

    /// Number of registered words.
    pub fn len(&self) -> usize {
        self.words
    }

    /// True when no word has been registered.
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Register `word`.
    ///
    /// Returns false, leaving the trie untouched, when `word` is empty, already
    /// present, a prefix of a registered word, or has a registered word as its
    /// prefix.
    pub fn insert(&mut self, word: &[S]) -> bool {
        if word.is_empty() || self.conflicts(word) {
            return false;
        }
        let mut at = ROOT;
        for sym in word {
            at = match self.nodes[at].children.get(sym) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::new(Some(sym.clone()), Some(at)));
                    self.nodes[at].children.insert(sym.clone(), next);
                    next
                }
            };
        }
        self.nodes[at].terminates = true;
        self.words += 1;
        true
    }

    /// True if inserting `word` would break prefix-freedom.
    fn conflicts(&self, word: &[S]) -> bool {
        let mut at = ROOT;
        for sym in word {
            if self.nodes[at].terminates {
                // A registered word is a prefix of `word`.
                return true;
            }
            match self.nodes[at].children.get(sym) {
                Some(&next) => at = next,
                None => return false,
            }
        }
        // `word` is fully present as a path: either a duplicate or a prefix.
        true
    }

    /// Follow the edge labelled `sym` out of `at`.
    pub fn child(&self, at: NodeIndex, sym: &S) -> Option<NodeIndex> {
        self.nodes.get(at)?.children.get(sym).copied()
    }

    /// True when a registered word ends at `at`.
    pub fn terminates(&self, at: NodeIndex) -> bool {
        self.nodes.get(at).is_some_and(|n| n.terminates)
    }

    /// Walk `word` from the root, returning the node reached.
    pub fn find(&self, word: &[S]) -> Option<NodeIndex> {
        word.iter().try_fold(ROOT, |at, sym| self.child(at, sym))
    }

    /// True when `word` is a registered word.
    pub fn contains(&self, word: &[S]) -> bool {
        self.find(word).is_some_and(|at| self.terminates(at))
    }

    /// True when some registered word starts with `word` (equality counts).
    /// The empty sequence is a prefix of everything.
    pub fn is_prefix(&self, word: &[S]) -> bool {
        self.find(word).is_some()
    }

    /// True when a registered word is a prefix of `word` (equality counts).
    pub fn has_word_prefixing(&self, word: &[S]) -> bool {
        let mut at = ROOT;
        for sym in word {
            if self.nodes[at].terminates {
                return true;
            }
            match self.child(at, sym) {
                Some(next) => at = next,
                None => return false,
            }
        }
        self.nodes[at].terminates
    }

    /// Symbols on the path from the root down to `at`.
    pub fn path(&self, at: NodeIndex) -> Vec<S> {
        let mut out = Vec::new();
        let mut cur = self.nodes.get(at);
        while let Some(node) = cur {
            if let Some(sym) = &node.symbol {
                out.push(sym.clone());
            }
            cur = node.parent.and_then(|p| self.nodes.get(p));
        }
        out.reverse();
        out
    }

    /// All registered words in the subtree rooted at `at`, in no particular order.
    pub fn words_below(&self, at: NodeIndex) -> Vec<Vec<S>> {
        let mut out = Vec::new();
        let mut stack = vec![at];
        while let Some(idx) = stack.pop() {
            let Some(node) = self.nodes.get(idx) else {
                continue;
            };
            if node.terminates {
                out.push(self.path(idx));
            }
            stack.extend(node.children.values().copied());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn contains_only_registered_words() {
        let mut t = Trie::new();
        assert!(!t.contains(&chars("abc")));
        assert!(t.insert(&chars("abc")));
        assert!(t.contains(&chars("abc")));
        assert!(!t.contains(&chars("ab")));
    }

    #[test]
    fn is_prefix_semantics() {
        let mut t = Trie::new();
        t.insert(&chars("abc"));
        assert!(t.is_prefix(&chars("ab")));
        assert!(t.is_prefix(&chars("abc")));
        assert!(t.is_prefix(&[]));
        assert!(!t.is_prefix(&chars("x")));
        assert!(!t.is_prefix(&chars("abcd")));
    }

    #[test]
    fn insert_rejects_conflicts() {
        let mut t = Trie::new();
        assert!(t.insert(&chars("abc")));
        assert!(!t.insert(&chars("abc")), "duplicate");
        assert!(!t.insert(&chars("ab")), "prefix of existing");
        assert!(!t.insert(&chars("abcd")), "extension of existing");
        assert!(!t.insert(&[]), "empty word");
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn siblings_share_a_prefix() {
        let mut t = Trie::new();
        assert!(t.insert(&chars("gg")));
        assert!(t.insert(&chars("gi")));
        assert_eq!(t.len(), 2);
        let g = t.find(&chars("g")).unwrap();
        let mut below = t.words_below(g);
        below.sort();
        assert_eq!(below, vec![chars("gg"), chars("gi")]);
    }

    #[test]
    fn word_prefixing_lookup() {
        let mut t = Trie::new();
        t.insert(&chars("ab"));
        assert!(t.has_word_prefixing(&chars("ab")));
        assert!(t.has_word_prefixing(&chars("abz")));
        assert!(!t.has_word_prefixing(&chars("a")));
        assert!(!t.has_word_prefixing(&chars("x")));
    }

    #[test]
    fn path_walks_back_to_root() {
        let mut t = Trie::new();
        t.insert(&chars("xyz"));
        let leaf = t.find(&chars("xyz")).unwrap();
        assert_eq!(t.path(leaf), chars("xyz"));
        assert!(t.path(ROOT).is_empty());
    }
}
