//! Walking a provider tree into a [`Registry`].
//!
//! The walk is iterative, driven by an explicit work stack, and visits nodes
//! in depth-first pre-order. Each node is handled by the [`Strategy`] its role
//! and capabilities select. Clip rects flow downward: a node whose frame
//! misses the inherited clip is pruned together with its subtree, and
//! clipping containers narrow the clip for their descendants.

use tracing::{debug, trace};

use crate::{
    geom::Rect,
    node::Node,
    provider::{AxProvider, SearchQuery},
    registry::{NodeId, Registry},
    strategy::Strategy,
};

/// Counters describing one traversal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TraversalStats {
    /// Nodes stored in the registry.
    pub stored: usize,
    /// Nodes rejected because they fell outside their clip rect.
    pub pruned: usize,
    /// Nodes skipped because their handle was already stored.
    pub duplicates: usize,
    /// Nodes skipped because their attributes could not be read.
    pub unreadable: usize,
    /// Content search queries issued.
    pub searches: usize,
}

/// A node waiting on the work stack.
struct Visit<H> {
    /// The node, attributes already read.
    node: Node<H>,
    /// Registry parent; `None` for the root.
    parent: Option<NodeId>,
    /// Clip rect inherited from the nearest clipping ancestor.
    clip: Option<Rect>,
}

/// One traversal of one provider tree.
pub struct Traversal<'a, P: AxProvider + ?Sized> {
    /// Attribute source.
    provider: &'a P,
    /// Output.
    registry: Registry<P::Handle>,
    /// Pending visits; popped from the back.
    stack: Vec<Visit<P::Handle>>,
    /// Running counters.
    stats: TraversalStats,
}

/// Walk the tree below `root` and return what was found.
pub fn traverse<P>(provider: &P, root: &P::Handle) -> Registry<P::Handle>
where
    P: AxProvider + ?Sized,
{
    Traversal::new(provider).run(root).0
}

impl<'a, P: AxProvider + ?Sized> Traversal<'a, P> {
    /// Prepare a traversal over `provider`.
    pub fn new(provider: &'a P) -> Self {
        Self {
            provider,
            registry: Registry::new(),
            stack: Vec::new(),
            stats: TraversalStats::default(),
        }
    }

    /// Walk from `root`. An unreadable root yields an empty registry.
    pub fn run(mut self, root: &P::Handle) -> (Registry<P::Handle>, TraversalStats) {
        match Node::fetch(self.provider, root.clone()) {
            Some(node) => self.stack.push(Visit {
                node,
                parent: None,
                clip: None,
            }),
            None => self.stats.unreadable += 1,
        }
        while let Some(visit) = self.stack.pop() {
            self.visit(visit);
        }
        debug!(
            stored = self.stats.stored,
            pruned = self.stats.pruned,
            duplicates = self.stats.duplicates,
            unreadable = self.stats.unreadable,
            searches = self.stats.searches,
            "traversal_done"
        );
        (self.registry, self.stats)
    }

    /// Handle one node according to its strategy.
    fn visit(&mut self, visit: Visit<P::Handle>) {
        let strategy = Strategy::for_node(self.provider, &visit.node);
        let handle = visit.node.handle().clone();
        let clips = visit.node.role().clips_children();
        let inherited = visit.clip;
        let Some((id, effective)) = self.admit(visit) else {
            return;
        };
        let child_clip = if clips { Some(effective) } else { inherited };
        match strategy {
            Strategy::Generic => {
                let kids = self.provider.children(&handle);
                self.push_children(kids, id, child_clip);
            }
            Strategy::TableOutline => {
                let rows = self.provider.visible_rows(&handle);
                self.push_children(rows, id, child_clip);
            }
            Strategy::ContentSearch => {
                self.stats.searches += 1;
                match self.provider.search(&handle, &SearchQuery::visible_content()) {
                    Some(results) => self.adopt_search_results(results, id, effective),
                    None => {
                        trace!(node = ?handle, "content_search_fallback");
                        let kids = self.provider.children(&handle);
                        self.push_children(kids, id, child_clip);
                    }
                }
            }
        }
    }

    /// Clip, store and link a node. Returns its id and effective frame, or
    /// `None` if it was pruned or already stored.
    fn admit(&mut self, visit: Visit<P::Handle>) -> Option<(NodeId, Rect)> {
        let Visit {
            mut node,
            parent,
            clip,
        } = visit;
        if let Some(clip) = clip {
            let Some(clipped) = clip.intersection(&node.frame()) else {
                trace!(node = ?node.handle(), "node_pruned");
                self.stats.pruned += 1;
                return None;
            };
            node.set_clipped_frame(clipped);
        }
        let effective = node.effective_frame();
        let id = match parent {
            None => self.registry.insert_root(node),
            Some(p) => {
                let id = self.registry.insert(node);
                if let Some(id) = id {
                    self.registry.add_child(p, id);
                }
                id
            }
        };
        match id {
            Some(id) => {
                self.stats.stored += 1;
                Some((id, effective))
            }
            None => {
                self.stats.duplicates += 1;
                None
            }
        }
    }

    /// Read `handles` and queue them so the first child is visited first.
    fn push_children(
        &mut self,
        handles: Option<Vec<P::Handle>>,
        parent: NodeId,
        clip: Option<Rect>,
    ) {
        let mut pending = Vec::new();
        for handle in handles.unwrap_or_default() {
            match Node::fetch(self.provider, handle) {
                Some(node) => pending.push(Visit {
                    node,
                    parent: Some(parent),
                    clip,
                }),
                None => self.stats.unreadable += 1,
            }
        }
        self.stack.extend(pending.into_iter().rev());
    }

    /// Store content search results as direct, non-recursed children of
    /// `parent`, clipped to `clip`.
    fn adopt_search_results(&mut self, results: Vec<P::Handle>, parent: NodeId, clip: Rect) {
        for handle in results {
            let Some(mut node) = Node::fetch(self.provider, handle) else {
                self.stats.unreadable += 1;
                continue;
            };
            let Some(clipped) = clip.intersection(&node.frame()) else {
                self.stats.pruned += 1;
                continue;
            };
            node.set_clipped_frame(clipped);
            match self.registry.insert(node) {
                Some(id) => {
                    self.registry.add_child(parent, id);
                    self.stats.stored += 1;
                }
                None => self.stats.duplicates += 1,
            }
        }
    }
}
