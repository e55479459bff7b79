//! Choosing how to walk below a node.

use crate::{
    node::Node,
    provider::{AxProvider, SEARCH_PREDICATE_ATTRIBUTE},
    role::Role,
};

/// How the subtree below a node is discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Structural children, recursively.
    Generic,
    /// One content search query; results become direct children.
    ContentSearch,
    /// Visible rows only, recursively.
    TableOutline,
}

impl Strategy {
    /// Pick a strategy from a role and a capability probe. The probe is only
    /// consulted for rich-content roles.
    pub fn classify(role: &Role, supports_search: impl FnOnce() -> bool) -> Self {
        if role.is_rich_content() && supports_search() {
            Self::ContentSearch
        } else if role.is_row_container() {
            Self::TableOutline
        } else {
            Self::Generic
        }
    }

    /// Pick the strategy for `node`, probing `provider` when needed.
    pub fn for_node<P>(provider: &P, node: &Node<P::Handle>) -> Self
    where
        P: AxProvider + ?Sized,
    {
        Self::classify(node.role(), || {
            provider.supports_parameterized_attribute(node.handle(), SEARCH_PREDICATE_ATTRIBUTE)
        })
    }
}
