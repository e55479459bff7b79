//! The accessibility provider seam.
//!
//! Every call is best-effort: a provider answers `None` when it cannot read a
//! value, and callers treat that as absence rather than failure.

use std::{fmt::Debug, hash::Hash};

use crate::{
    geom::Rect,
    role::{Action, Role},
};

/// Name of the parameterized attribute used for content search.
pub const SEARCH_PREDICATE_ATTRIBUTE: &str = "AXUIElementsForSearchPredicate";

/// Direction of a content search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    /// Forward in document order.
    Next,
    /// Backward in document order.
    Previous,
}

impl SearchDirection {
    /// Provider string for this direction.
    pub fn as_ax(self) -> &'static str {
        match self {
            Self::Next => "AXDirectionNext",
            Self::Previous => "AXDirectionPrevious",
        }
    }
}

/// Element categories a content search can match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKey {
    /// Buttons.
    Button,
    /// Check boxes.
    CheckBox,
    /// Any control.
    Control,
    /// Images and other graphics.
    Graphic,
    /// Links.
    Link,
    /// Radio groups.
    RadioGroup,
    /// Static text runs.
    StaticText,
    /// Text fields.
    TextField,
}

impl SearchKey {
    /// Provider string for this key.
    pub fn as_ax(self) -> &'static str {
        match self {
            Self::Button => "AXButtonSearchKey",
            Self::CheckBox => "AXCheckBoxSearchKey",
            Self::Control => "AXControlSearchKey",
            Self::Graphic => "AXGraphicSearchKey",
            Self::Link => "AXLinkSearchKey",
            Self::RadioGroup => "AXRadioGroupSearchKey",
            Self::StaticText => "AXStaticTextSearchKey",
            Self::TextField => "AXTextFieldSearchKey",
        }
    }
}

/// Parameters of a content search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Search direction.
    pub direction: SearchDirection,
    /// Restrict results to immediate children.
    pub immediate_descendants_only: bool,
    /// Maximum number of results; `None` is unlimited.
    pub results_limit: Option<usize>,
    /// Restrict results to visible elements.
    pub visible_only: bool,
    /// Element categories to match.
    pub keys: Vec<SearchKey>,
}

impl SearchQuery {
    /// Every visible interactive or textual element, in document order.
    pub fn visible_content() -> Self {
        Self {
            direction: SearchDirection::Next,
            immediate_descendants_only: false,
            results_limit: None,
            visible_only: true,
            keys: vec![
                SearchKey::Button,
                SearchKey::CheckBox,
                SearchKey::Control,
                SearchKey::Graphic,
                SearchKey::Link,
                SearchKey::RadioGroup,
                SearchKey::StaticText,
                SearchKey::TextField,
            ],
        }
    }
}

/// Read access to a live accessibility tree.
///
/// `Handle` identifies one node. Two handles compare equal exactly when they
/// refer to the same node, which is what makes duplicate detection work.
pub trait AxProvider: Send + Sync {
    /// Opaque node identity.
    type Handle: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// The node's role.
    fn role(&self, node: &Self::Handle) -> Option<Role>;

    /// The node's frame in screen space.
    fn frame(&self, node: &Self::Handle) -> Option<Rect>;

    /// The node's actions. `Some(vec![])` means "no actions", `None` means the
    /// read failed.
    fn actions(&self, node: &Self::Handle) -> Option<Vec<Action>>;

    /// Structural children.
    fn children(&self, node: &Self::Handle) -> Option<Vec<Self::Handle>>;

    /// Rows currently on screen, for tables and outlines.
    fn visible_rows(&self, node: &Self::Handle) -> Option<Vec<Self::Handle>>;

    /// Whether `node` answers the parameterized attribute `name`.
    fn supports_parameterized_attribute(&self, node: &Self::Handle, name: &str) -> bool;

    /// Run a content search rooted at `node`.
    fn search(&self, node: &Self::Handle, query: &SearchQuery) -> Option<Vec<Self::Handle>>;
}
