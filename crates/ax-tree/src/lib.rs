//! Accessibility tree discovery.
//!
//! A traversal reads nodes from an [`AxProvider`], prunes anything outside the
//! visible clip, picks a walking [`Strategy`] per node, and records what it
//! found in a [`Registry`]. The registry then answers which nodes deserve a
//! hint.
//!
//! - [`geom`]: rectangles and clipping
//! - [`role`]: role and action enums
//! - [`provider`]: the provider trait and content search query
//! - [`node`], [`registry`]: discovered nodes and their relations
//! - [`strategy`], [`traverse`]: how the tree is walked
//! - [`snapshot`]: a captured tree usable as a provider

mod error;
pub mod geom;
pub mod node;
pub mod provider;
pub mod registry;
pub mod role;
pub mod snapshot;
pub mod strategy;
pub mod traverse;

pub use error::{Error, Result};
pub use geom::Rect;
pub use node::Node;
pub use provider::{AxProvider, SEARCH_PREDICATE_ATTRIBUTE, SearchQuery};
pub use registry::{NodeId, Registry};
pub use role::{Action, Role};
pub use snapshot::{SnapshotNode, SnapshotTree};
pub use strategy::Strategy;
pub use traverse::{Traversal, TraversalStats, traverse};
