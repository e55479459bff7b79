//! Arena of nodes discovered by one traversal, and the flatten query.
//!
//! Nodes are addressed by [`NodeId`]. Edges are checked on insertion: every
//! node has at most one parent, the root has none, and a handle is stored at
//! most once. Together these keep everything reachable from the root a tree.

use std::{collections::HashMap, fmt, hash::Hash};

use tracing::trace;

use crate::{node::Node, role::Role};

/// Index of a node inside a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Nodes and parent/child edges found by one traversal.
#[derive(Debug, Clone)]
pub struct Registry<H> {
    /// Node arena.
    nodes: Vec<Node<H>>,
    /// Handle to arena slot.
    index: HashMap<H, NodeId>,
    /// Children per slot, in discovery order.
    children: Vec<Vec<NodeId>>,
    /// Parent per slot.
    parents: Vec<Option<NodeId>>,
    /// The root, once set.
    root: Option<NodeId>,
}

impl<H: Clone + Eq + Hash> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Clone + Eq + Hash> Registry<H> {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            children: Vec::new(),
            parents: Vec::new(),
            root: None,
        }
    }

    /// Number of stored nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root, if one was inserted.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Store `node`. Returns `None`, dropping `node`, if its handle is already
    /// present.
    pub fn insert(&mut self, node: Node<H>) -> Option<NodeId> {
        if self.index.contains_key(node.handle()) {
            return None;
        }
        let id = NodeId(self.nodes.len());
        self.index.insert(node.handle().clone(), id);
        self.nodes.push(node);
        self.children.push(Vec::new());
        self.parents.push(None);
        Some(id)
    }

    /// Store `node` as the root. Returns `None` if a root already exists or the
    /// handle is already present.
    pub fn insert_root(&mut self, node: Node<H>) -> Option<NodeId> {
        if self.root.is_some() {
            return None;
        }
        let id = self.insert(node)?;
        self.root = Some(id);
        Some(id)
    }

    /// Record `child` under `parent`. Refused when either id is unknown, the
    /// child already has a parent, the child is the root, or the two are the
    /// same node.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let known = parent.0 < self.nodes.len() && child.0 < self.nodes.len();
        if !known || parent == child || self.root == Some(child) || self.parents[child.0].is_some()
        {
            trace!(%parent, %child, "registry_edge_refused");
            return false;
        }
        self.parents[child.0] = Some(parent);
        self.children[parent.0].push(child);
        true
    }

    /// Node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node<H>> {
        self.nodes.get(id.0)
    }

    /// Mutable node by id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<H>> {
        self.nodes.get_mut(id.0)
    }

    /// Id of the node with `handle`.
    pub fn id_of(&self, handle: &H) -> Option<NodeId> {
        self.index.get(handle).copied()
    }

    /// True when `handle` is stored.
    pub fn contains(&self, handle: &H) -> bool {
        self.index.contains_key(handle)
    }

    /// Children of `id` in discovery order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(id.0).map_or(&[], Vec::as_slice)
    }

    /// Parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id.0).copied().flatten()
    }

    /// All stored nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<H>)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Ids of the nodes that deserve a hint, in depth-first pre-order from the
    /// root.
    ///
    /// If an open menu is reached, its direct children are returned instead of
    /// anything else. An empty registry yields nothing.
    pub fn flatten(&self) -> Vec<NodeId> {
        let Some(root) = self.root else {
            return Vec::new();
        };
        let mut counts = HintCounts::new(self);
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if *self.nodes[id.0].role() == Role::Menu {
                trace!(menu = %id, "flatten_menu_short_circuit");
                return self.children[id.0].clone();
            }
            if counts.is_hintable(id) {
                out.push(id);
            }
            stack.extend(self.children[id.0].iter().rev());
        }
        out
    }

    /// Whether a single node deserves a hint.
    pub fn is_hintable(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len() && HintCounts::new(self).is_hintable(id)
    }

    /// Consume the registry, returning the flattened nodes in order.
    pub fn into_hintable(self) -> Vec<Node<H>> {
        let ids = self.flatten();
        let mut slots: Vec<Option<Node<H>>> = self.nodes.into_iter().map(Some).collect();
        ids.into_iter()
            .filter_map(|id| slots.get_mut(id.0).and_then(Option::take))
            .collect()
    }
}

/// Memoized per-node count of hintable descendants, valid for one query.
struct HintCounts<'a, H> {
    /// Registry being queried.
    registry: &'a Registry<H>,
    /// Count per slot, filled lazily.
    memo: Vec<Option<usize>>,
}

impl<'a, H: Clone + Eq + Hash> HintCounts<'a, H> {
    /// Fresh memo for `registry`.
    fn new(registry: &'a Registry<H>) -> Self {
        Self {
            registry,
            memo: vec![None; registry.nodes.len()],
        }
    }

    /// Hintability given the descendant count of `id`.
    fn is_hintable(&mut self, id: NodeId) -> bool {
        let node = &self.registry.nodes[id.0];
        if node.role().is_never_hinted() {
            return false;
        }
        if node.has_meaningful_action() {
            return true;
        }
        *node.role() == Role::Row && self.descendants(id) == 0
    }

    /// Number of hintable nodes strictly below `id`.
    fn descendants(&mut self, id: NodeId) -> usize {
        let registry = self.registry;
        let mut stack = vec![(id, false)];
        while let Some((cur, expanded)) = stack.pop() {
            if self.memo[cur.0].is_some() {
                continue;
            }
            let kids = &registry.children[cur.0];
            if expanded {
                let total = kids
                    .iter()
                    .map(|&k| self.memo[k.0].unwrap_or(0) + usize::from(self.own(k)))
                    .sum();
                self.memo[cur.0] = Some(total);
            } else {
                stack.push((cur, true));
                stack.extend(
                    kids.iter()
                        .filter(|k| self.memo[k.0].is_none())
                        .map(|&k| (k, false)),
                );
            }
        }
        self.memo[id.0].unwrap_or(0)
    }

    /// Hintability of a node whose descendant count is already memoized.
    fn own(&self, id: NodeId) -> bool {
        let node = &self.registry.nodes[id.0];
        !node.role().is_never_hinted()
            && (node.has_meaningful_action()
                || (*node.role() == Role::Row && self.memo[id.0] == Some(0)))
    }
}
