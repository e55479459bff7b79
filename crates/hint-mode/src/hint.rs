//! Labelled nodes.

use ax_tree::{Node, Rect};
use serde::{Deserialize, Serialize};

use crate::{error::Result, labels::generate_labels};

/// What a hint stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    /// An element inside a window.
    #[default]
    Element,
    /// A whole window behind the focused one. Selecting it raises the window.
    Window,
}

/// A hintable node with its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Hint<H> {
    /// Upper-case label the user types.
    pub label: String,
    /// The labelled node.
    pub node: Node<H>,
    /// Element or window.
    pub kind: HintKind,
}

impl<H> Hint<H> {
    /// Where clicks land: the centre of the visible part of the node.
    pub fn target(&self) -> (f64, f64) {
        let f: Rect = self.node.effective_frame();
        (f.cx(), f.cy())
    }
}

/// What to do with the element under a selected hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintAction {
    /// Single left click.
    LeftClick,
    /// Single right click.
    RightClick,
    /// Double left click.
    DoubleLeftClick,
    /// Move the pointer without clicking.
    MoveCursor,
    /// Bring the window to the front and focus it.
    Raise,
}

/// Pair `nodes` with labels from `alphabet`, in order.
pub fn label_nodes<H>(nodes: Vec<Node<H>>, alphabet: &str) -> Result<Vec<Hint<H>>> {
    label_targets(
        nodes.into_iter().map(|n| (n, HintKind::Element)).collect(),
        alphabet,
    )
}

/// Like [`label_nodes`], with an explicit kind per node.
pub fn label_targets<H>(targets: Vec<(Node<H>, HintKind)>, alphabet: &str) -> Result<Vec<Hint<H>>> {
    let labels = generate_labels(targets.len(), alphabet)?;
    Ok(labels
        .into_iter()
        .zip(targets)
        .map(|(label, (node, kind))| Hint { label, node, kind })
        .collect())
}
