//! A captured accessibility tree that implements [`AxProvider`].
//!
//! Snapshots are written as nested nodes in RON or JSON:
//!
//! ```text
//! [
//!     (id: 1, role: "AXWindow", frame: (x: 0.0, y: 0.0, w: 800.0, h: 600.0), children: [
//!         (id: 2, role: "AXButton", frame: (x: 10.0, y: 10.0, w: 80.0, h: 20.0), actions: ["AXPress"]),
//!     ]),
//! ]
//! ```
//!
//! Missing `role` or `frame` make a node unreadable; `actions` defaults to an
//! empty list. `visible_rows` and `search` refer to other nodes by id; a node
//! with `search` set supports content search.

use std::{collections::HashMap, fs, path::Path};

use ron::{Options, extensions::Extensions};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    error::{Error, Result},
    geom::Rect,
    provider::{AxProvider, SEARCH_PREDICATE_ATTRIBUTE, SearchQuery},
    role::{Action, Role},
};

/// One node as written in a snapshot file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    /// Unique id; becomes the provider handle.
    pub id: u64,
    /// Role, absent when unreadable.
    #[serde(default)]
    pub role: Option<Role>,
    /// Frame, absent when unreadable.
    #[serde(default)]
    pub frame: Option<Rect>,
    /// Actions; `None` when unreadable.
    #[serde(default = "no_actions")]
    pub actions: Option<Vec<Action>>,
    /// Structural children.
    #[serde(default)]
    pub children: Vec<SnapshotNode>,
    /// When true, reading this node's children fails.
    #[serde(default)]
    pub children_unreadable: bool,
    /// Ids of the rows on screen; defaults to all children.
    #[serde(default)]
    pub visible_rows: Option<Vec<u64>>,
    /// Ids returned by a content search rooted here.
    #[serde(default)]
    pub search: Option<Vec<u64>>,
}

/// Default for [`SnapshotNode::actions`].
fn no_actions() -> Option<Vec<Action>> {
    Some(Vec::new())
}

impl SnapshotNode {
    /// A readable node with no children.
    pub fn new(id: u64, role: Role, frame: Rect) -> Self {
        Self {
            id,
            role: Some(role),
            frame: Some(frame),
            actions: no_actions(),
            children: Vec::new(),
            children_unreadable: false,
            visible_rows: None,
            search: None,
        }
    }

    /// Builder: set actions.
    #[must_use]
    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Builder: set children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// Builder: set visible rows.
    #[must_use]
    pub fn with_visible_rows(mut self, rows: Vec<u64>) -> Self {
        self.visible_rows = Some(rows);
        self
    }

    /// Builder: enable content search with the given results.
    #[must_use]
    pub fn with_search(mut self, results: Vec<u64>) -> Self {
        self.search = Some(results);
        self
    }
}

/// Flattened attributes of one node.
#[derive(Debug, Clone)]
struct Entry {
    /// Role, if readable.
    role: Option<Role>,
    /// Frame, if readable.
    frame: Option<Rect>,
    /// Actions, if readable.
    actions: Option<Vec<Action>>,
    /// Child ids, `None` when unreadable.
    children: Option<Vec<u64>>,
    /// Explicit visible rows.
    visible_rows: Option<Vec<u64>>,
    /// Content search results.
    search: Option<Vec<u64>>,
}

/// An immutable captured tree keyed by node id.
#[derive(Debug, Clone, Default)]
pub struct SnapshotTree {
    /// Nodes by id.
    nodes: HashMap<u64, Entry>,
}

impl SnapshotTree {
    /// Index `roots` and all their descendants, checking ids.
    pub fn from_roots(roots: Vec<SnapshotNode>) -> Result<Self> {
        let mut nodes = HashMap::new();
        let mut stack = roots;
        while let Some(n) = stack.pop() {
            let children = (!n.children_unreadable)
                .then(|| n.children.iter().map(|c| c.id).collect());
            let entry = Entry {
                role: n.role,
                frame: n.frame,
                actions: n.actions,
                children,
                visible_rows: n.visible_rows,
                search: n.search,
            };
            if nodes.insert(n.id, entry).is_some() {
                return Err(Error::DuplicateId(n.id));
            }
            stack.extend(n.children);
        }
        let tree = Self { nodes };
        tree.check_references()?;
        Ok(tree)
    }

    /// Ensure every id reference resolves.
    fn check_references(&self) -> Result<()> {
        for entry in self.nodes.values() {
            let refs = entry
                .visible_rows
                .iter()
                .chain(entry.search.iter())
                .flatten();
            for id in refs {
                if !self.nodes.contains_key(id) {
                    return Err(Error::UnknownId(*id));
                }
            }
        }
        Ok(())
    }

    /// Parse a RON list of root nodes.
    pub fn from_ron(text: &str) -> Result<Self> {
        Self::from_roots(parse_ron(text)?)
    }

    /// Load roots from `path`; `.json` files are JSON, anything else RON.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_roots(load_document(path)?)
    }

    /// True when a node with `id` exists.
    pub fn contains(&self, id: u64) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl AxProvider for SnapshotTree {
    type Handle = u64;

    fn role(&self, node: &u64) -> Option<Role> {
        self.nodes.get(node)?.role.clone()
    }

    fn frame(&self, node: &u64) -> Option<Rect> {
        self.nodes.get(node)?.frame
    }

    fn actions(&self, node: &u64) -> Option<Vec<Action>> {
        self.nodes.get(node)?.actions.clone()
    }

    fn children(&self, node: &u64) -> Option<Vec<u64>> {
        self.nodes.get(node)?.children.clone()
    }

    fn visible_rows(&self, node: &u64) -> Option<Vec<u64>> {
        let entry = self.nodes.get(node)?;
        entry.visible_rows.clone().or_else(|| entry.children.clone())
    }

    fn supports_parameterized_attribute(&self, node: &u64, name: &str) -> bool {
        name == SEARCH_PREDICATE_ATTRIBUTE
            && self.nodes.get(node).is_some_and(|e| e.search.is_some())
    }

    fn search(&self, node: &u64, _query: &SearchQuery) -> Option<Vec<u64>> {
        self.nodes.get(node)?.search.clone()
    }
}

/// RON options accepting optionals without `Some(..)`.
fn ron_options() -> Options {
    Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
}

/// Parse RON text into `T`.
pub fn parse_ron<T: DeserializeOwned>(text: &str) -> Result<T> {
    ron_options()
        .from_str(text)
        .map_err(|e| Error::Parse(e.to_string()))
}

/// Read and parse `path`; `.json` files are JSON, anything else RON.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")) {
        serde_json::from_str(&text).map_err(|e| Error::Parse(e.to_string()))
    } else {
        parse_ron(&text)
    }
}
