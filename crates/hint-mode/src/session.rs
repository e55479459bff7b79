//! Interactive hint selection.
//!
//! A [`HintSession`] owns the labelled hints for one activation and consumes
//! key-downs until a label is completed or the user gives up.

use key_listeners::{Key, KeyEvent, Modifier};
use prefix_matcher::{MatchState, Matcher};
use tracing::debug;

use crate::hint::{Hint, HintAction, HintKind};

/// What a key-down means to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Leave hint mode.
    Exit,
    /// Drop the last typed character.
    Backspace,
    /// Cycle overlapping hints.
    Rotate,
    /// Type a label character.
    Advance(char, HintAction),
}

impl Intent {
    /// Interpret a key event. Key-ups and keys without meaning yield `None`.
    pub fn from_event(ev: &KeyEvent) -> Option<Self> {
        if !ev.is_down() {
            return None;
        }
        match &ev.key {
            Key::Escape => Some(Self::Exit),
            Key::Char('[') if ev.has(Modifier::Control) => Some(Self::Exit),
            Key::Backspace => Some(Self::Backspace),
            Key::Space => Some(Self::Rotate),
            Key::Char(c) => Some(Self::Advance(*c, Self::action_for(ev))),
            _ => None,
        }
    }

    /// Click style chosen by the held modifiers.
    fn action_for(ev: &KeyEvent) -> HintAction {
        if ev.has(Modifier::Shift) {
            HintAction::RightClick
        } else if ev.has(Modifier::Command) {
            HintAction::DoubleLeftClick
        } else if ev.has(Modifier::Option) {
            HintAction::MoveCursor
        } else {
            HintAction::LeftClick
        }
    }
}

/// Result of feeding one intent to a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<H> {
    /// Input accepted; `remaining` hints still match `typed`.
    Narrowed {
        /// Characters typed so far.
        typed: String,
        /// Number of hints still reachable.
        remaining: usize,
    },
    /// A label was completed. The session is over. Window hints always
    /// carry [`HintAction::Raise`].
    Activated {
        /// The selected hint.
        hint: Hint<H>,
        /// What to do with it.
        action: HintAction,
    },
    /// The user left, or typed something no label starts with. The session is
    /// over.
    Exited,
    /// Overlapping hints should be cycled.
    Rotated,
    /// Nothing changed.
    Unchanged,
}

/// One round of hint selection.
#[derive(Debug)]
pub struct HintSession<H> {
    /// Hints on screen.
    hints: Vec<Hint<H>>,
    /// Matcher over the hint labels.
    matcher: Matcher<char>,
    /// Accepted characters.
    typed: Vec<char>,
    /// Set once the session has activated or exited.
    closed: bool,
}

impl<H: Clone> HintSession<H> {
    /// Start a session over `hints`.
    ///
    /// Hints whose label the matcher rejects (empty, duplicated, or in a
    /// prefix relation with an earlier label) are dropped, since they could
    /// never be selected.
    pub fn new(hints: Vec<Hint<H>>) -> Self {
        let mut matcher = Matcher::new();
        let mut kept = Vec::with_capacity(hints.len());
        for hint in hints {
            let label: Vec<char> = hint.label.chars().collect();
            if matcher.add_word(&label) {
                kept.push(hint);
            } else {
                debug!(label = %hint.label, "hint_label_rejected");
            }
        }
        Self {
            hints: kept,
            matcher,
            typed: Vec::new(),
            closed: false,
        }
    }

    /// All hints.
    pub fn hints(&self) -> &[Hint<H>] {
        &self.hints
    }

    /// Characters typed so far.
    pub fn typed(&self) -> String {
        self.typed.iter().collect()
    }

    /// True once the session has activated a hint or exited.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Hints whose label starts with the typed input.
    pub fn candidates(&self) -> impl Iterator<Item = &Hint<H>> {
        let typed = self.typed();
        self.hints.iter().filter(move |h| h.label.starts_with(&typed))
    }

    /// Feed a key event.
    pub fn handle_key(&mut self, ev: &KeyEvent) -> Outcome<H> {
        match Intent::from_event(ev) {
            Some(intent) => self.apply(intent),
            None => Outcome::Unchanged,
        }
    }

    /// Feed an intent.
    pub fn apply(&mut self, intent: Intent) -> Outcome<H> {
        if self.closed {
            return Outcome::Unchanged;
        }
        match intent {
            Intent::Exit => self.close(),
            Intent::Rotate => Outcome::Rotated,
            Intent::Backspace => self.backspace(),
            Intent::Advance(c, action) => self.advance(c, action),
        }
    }

    /// Mark the session over.
    fn close(&mut self) -> Outcome<H> {
        self.closed = true;
        Outcome::Exited
    }

    /// Outcome describing the current narrowed state.
    fn narrowed(&self) -> Outcome<H> {
        Outcome::Narrowed {
            typed: self.typed(),
            remaining: self.candidates().count(),
        }
    }

    /// Remove the last typed character and rebuild the matcher position.
    fn backspace(&mut self) -> Outcome<H> {
        if self.typed.pop().is_none() {
            return Outcome::Unchanged;
        }
        self.matcher.reset();
        for c in &self.typed {
            self.matcher.advance(c);
        }
        self.narrowed()
    }

    /// Type one character.
    fn advance(&mut self, c: char, action: HintAction) -> Outcome<H> {
        if self.hints.is_empty() {
            return self.close();
        }
        for upper in c.to_uppercase() {
            match self.matcher.advance(&upper) {
                MatchState::Advancable => self.typed.push(upper),
                MatchState::Matched => {
                    self.typed.push(upper);
                    let label = self.typed();
                    self.closed = true;
                    return match self.hints.iter().find(|h| h.label == label) {
                        Some(hint) => {
                            let action = match hint.kind {
                                HintKind::Window => HintAction::Raise,
                                HintKind::Element => action,
                            };
                            debug!(%label, ?action, "hint_activated");
                            Outcome::Activated {
                                hint: hint.clone(),
                                action,
                            }
                        }
                        None => Outcome::Exited,
                    };
                }
                _ => {
                    debug!(typed = %self.typed(), key = %upper, "hint_deadend");
                    return self.close();
                }
            }
        }
        self.narrowed()
    }
}

#[cfg(test)]
mod tests {
    use ax_tree::{Action, Node, Rect, Role};

    use super::*;
    use crate::hint::{label_nodes, label_targets};

    fn session(n: usize, alphabet: &str) -> HintSession<u64> {
        let nodes = (0..n as u64)
            .map(|i| {
                Node::new(
                    i,
                    Role::Button,
                    Rect::new(i as f64 * 20.0, 0.0, 10.0, 10.0),
                    vec![Action::Press],
                )
            })
            .collect();
        HintSession::new(label_nodes(nodes, alphabet).unwrap())
    }

    fn hint(label: &str, id: u64, kind: HintKind) -> Hint<u64> {
        Hint {
            label: label.into(),
            node: Node::new(id, Role::Window, Rect::new(0.0, 0.0, 100.0, 100.0), vec![]),
            kind,
        }
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::down(Key::Char(c))
    }

    #[test]
    fn typing_narrows_then_activates() {
        let mut s = session(3, "ab");
        assert_eq!(
            s.handle_key(&key('a')),
            Outcome::Narrowed {
                typed: "A".into(),
                remaining: 2
            }
        );
        let mut labels: Vec<&str> = s.candidates().map(|h| h.label.as_str()).collect();
        labels.sort_unstable();
        assert_eq!(labels, vec!["AA", "AB"]);

        match s.handle_key(&key('a')) {
            Outcome::Activated { hint, action } => {
                assert_eq!(hint.label, "AA");
                assert_eq!(*hint.node.handle(), 0);
                assert_eq!(action, HintAction::LeftClick);
            }
            other => panic!("expected activation, got {other:?}"),
        }
        assert!(s.is_closed());
        assert_eq!(s.handle_key(&key('b')), Outcome::Unchanged);
    }

    #[test]
    fn modifiers_choose_the_action() {
        let cases = [
            (Modifier::Shift, HintAction::RightClick),
            (Modifier::Command, HintAction::DoubleLeftClick),
            (Modifier::Option, HintAction::MoveCursor),
        ];
        for (m, want) in cases {
            let mut s = session(3, "ab");
            match s.handle_key(&key('b').with_modifiers([m])) {
                Outcome::Activated { action, .. } => assert_eq!(action, want),
                other => panic!("expected activation, got {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_prefix_exits() {
        let mut s = session(3, "ab");
        assert_eq!(s.handle_key(&key('z')), Outcome::Exited);
        assert!(s.is_closed());
    }

    #[test]
    fn escape_and_ctrl_bracket_exit() {
        let mut s = session(3, "ab");
        assert_eq!(s.handle_key(&KeyEvent::down(Key::Escape)), Outcome::Exited);
        let mut s = session(3, "ab");
        let ev = key('[').with_modifiers([Modifier::Control]);
        assert_eq!(s.handle_key(&ev), Outcome::Exited);
    }

    #[test]
    fn backspace_restores_previous_prefix() {
        let mut s = session(3, "ab");
        assert_eq!(s.handle_key(&KeyEvent::down(Key::Backspace)), Outcome::Unchanged);
        s.handle_key(&key('a'));
        assert_eq!(
            s.handle_key(&KeyEvent::down(Key::Backspace)),
            Outcome::Narrowed {
                typed: String::new(),
                remaining: 3
            }
        );
        assert!(matches!(
            s.handle_key(&key('b')),
            Outcome::Activated { .. }
        ));
    }

    #[test]
    fn space_rotates_without_changing_input() {
        let mut s = session(3, "ab");
        s.handle_key(&key('a'));
        assert_eq!(s.handle_key(&KeyEvent::down(Key::Space)), Outcome::Rotated);
        assert_eq!(s.typed(), "A");
        assert_eq!(s.handle_key(&KeyEvent::up(Key::Char('a'))), Outcome::Unchanged);
    }

    #[test]
    fn empty_session_exits_on_first_character() {
        let mut s = session(0, "ab");
        assert_eq!(s.handle_key(&key('a')), Outcome::Exited);
    }

    #[test]
    fn empty_label_leaves_nothing_to_select() {
        let mut s = HintSession::new(vec![hint("", 1, HintKind::Element)]);
        assert!(s.hints().is_empty());
        assert_eq!(s.handle_key(&KeyEvent::down(Key::Backspace)), Outcome::Unchanged);
        assert_eq!(s.handle_key(&key('a')), Outcome::Exited);
        assert!(s.is_closed());
    }

    #[test]
    fn conflicting_labels_are_dropped() {
        let mut s = HintSession::new(vec![
            hint("A", 1, HintKind::Element),
            hint("AB", 2, HintKind::Element),
            hint("B", 3, HintKind::Element),
            hint("B", 4, HintKind::Element),
        ]);
        let kept: Vec<u64> = s.hints().iter().map(|h| *h.node.handle()).collect();
        assert_eq!(kept, vec![1, 3]);
        match s.handle_key(&key('b')) {
            Outcome::Activated { hint, .. } => assert_eq!(*hint.node.handle(), 3),
            other => panic!("expected activation, got {other:?}"),
        }
    }

    #[test]
    fn window_hints_raise_whatever_the_modifiers() {
        let nodes = (0..2u64)
            .map(|i| {
                let kind = if i == 1 { HintKind::Window } else { HintKind::Element };
                (hint("", i, kind).node, kind)
            })
            .collect();
        let hints = label_targets(nodes, "ab").unwrap();

        let mut s = HintSession::new(hints.clone());
        match s.handle_key(&key('b').with_modifiers([Modifier::Shift])) {
            Outcome::Activated { hint, action } => {
                assert_eq!(*hint.node.handle(), 1);
                assert_eq!(action, HintAction::Raise);
            }
            other => panic!("expected activation, got {other:?}"),
        }

        let mut s = HintSession::new(hints);
        match s.handle_key(&key('a')) {
            Outcome::Activated { action, .. } => assert_eq!(action, HintAction::LeftClick),
            other => panic!("expected activation, got {other:?}"),
        }
    }
}
