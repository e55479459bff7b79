//! A captured desktop: a snapshot tree plus the entry points into it.
//!
//! ```text
//! (
//!     tree: [ (id: 1, role: "AXWindow", frame: (x: 0.0, y: 0.0, w: 800.0, h: 600.0)) ],
//!     focused_window: 1,
//!     menu_bar: [],
//!     menu_bar_extras: [ (app: "Clock", items: [], latency_ms: 10) ],
//!     windows: [ (handle: 1, frame: (x: 0.0, y: 0.0, w: 800.0, h: 600.0)) ],
//!     unavailable: [notifications],
//! )
//! ```

use std::{collections::HashMap, mem, path::Path, thread, time::Duration};

use ax_tree::{
    Action, AxProvider, Rect, Role, SearchQuery, SnapshotNode, SnapshotTree,
    snapshot::{load_document, parse_ron},
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    desktop::{Desktop, ProviderResult, WindowInfo},
    error::ProviderError,
    source::Source,
};

/// Status items owned by one application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrasApp {
    /// Application name, for logs.
    pub app: String,
    /// Status item ids.
    pub items: Vec<u64>,
    /// How long the application takes to answer, in milliseconds.
    pub latency_ms: u64,
}

impl ExtrasApp {
    /// An application answering at once with `items`.
    pub fn new(app: impl Into<String>, items: Vec<u64>) -> Self {
        Self {
            app: app.into(),
            items,
            latency_ms: 0,
        }
    }

    /// Set the answer latency.
    pub fn with_latency(mut self, ms: u64) -> Self {
        self.latency_ms = ms;
        self
    }
}

/// On-disk form of a captured desktop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopDocument {
    /// Root nodes of every captured tree.
    pub tree: Vec<SnapshotNode>,
    /// Focused window id.
    pub focused_window: Option<u64>,
    /// Menu bar item ids.
    pub menu_bar: Vec<u64>,
    /// Status items, per application.
    pub menu_bar_extras: Vec<ExtrasApp>,
    /// Notification window ids.
    pub notifications: Vec<u64>,
    /// Window list, front to back.
    pub windows: Vec<WindowInfo<u64>>,
    /// Sources whose entry point fails with [`ProviderError::Unavailable`].
    pub unavailable: Vec<Source>,
    /// Artificial latency per source, in milliseconds.
    pub latency_ms: HashMap<Source, u64>,
}

/// A [`Desktop`] backed by a [`DesktopDocument`].
#[derive(Debug)]
pub struct SnapshotDesktop {
    /// All captured nodes.
    tree: SnapshotTree,
    /// Entry points and failure injection.
    doc: DesktopDocument,
    /// Windows raised so far, oldest first.
    raised: Mutex<Vec<u64>>,
}

impl SnapshotDesktop {
    /// Build from a document.
    pub fn from_document(mut doc: DesktopDocument) -> ax_tree::Result<Self> {
        let tree = SnapshotTree::from_roots(mem::take(&mut doc.tree))?;
        Ok(Self {
            tree,
            doc,
            raised: Mutex::new(Vec::new()),
        })
    }

    /// Parse a RON document.
    pub fn from_ron(text: &str) -> ax_tree::Result<Self> {
        Self::from_document(parse_ron(text)?)
    }

    /// Load a document from `path`; `.json` files are JSON, anything else RON.
    pub fn load(path: &Path) -> ax_tree::Result<Self> {
        Self::from_document(load_document(path)?)
    }

    /// The captured tree.
    pub fn tree(&self) -> &SnapshotTree {
        &self.tree
    }

    /// Windows raised through [`Desktop::raise_window`], oldest first.
    pub fn raised(&self) -> Vec<u64> {
        self.raised.lock().clone()
    }

    /// Simulate the entry point for `source`: sleep for its latency, then fail
    /// if it is marked unavailable.
    fn enter(&self, source: Source) -> ProviderResult<()> {
        if let Some(ms) = self.doc.latency_ms.get(&source) {
            thread::sleep(Duration::from_millis(*ms));
        }
        if self.doc.unavailable.contains(&source) {
            trace!(%source, "snapshot_source_unavailable");
            return Err(ProviderError::Unavailable(source.to_string()));
        }
        Ok(())
    }
}

impl AxProvider for SnapshotDesktop {
    type Handle = u64;

    fn role(&self, node: &u64) -> Option<Role> {
        self.tree.role(node)
    }

    fn frame(&self, node: &u64) -> Option<Rect> {
        self.tree.frame(node)
    }

    fn actions(&self, node: &u64) -> Option<Vec<Action>> {
        self.tree.actions(node)
    }

    fn children(&self, node: &u64) -> Option<Vec<u64>> {
        self.tree.children(node)
    }

    fn visible_rows(&self, node: &u64) -> Option<Vec<u64>> {
        self.tree.visible_rows(node)
    }

    fn supports_parameterized_attribute(&self, node: &u64, name: &str) -> bool {
        self.tree.supports_parameterized_attribute(node, name)
    }

    fn search(&self, node: &u64, query: &SearchQuery) -> Option<Vec<u64>> {
        self.tree.search(node, query)
    }
}

impl Desktop for SnapshotDesktop {
    fn focused_window(&self) -> ProviderResult<Option<u64>> {
        self.enter(Source::ActiveWindow)?;
        Ok(self.doc.focused_window)
    }

    fn menu_bar_items(&self) -> ProviderResult<Vec<u64>> {
        self.enter(Source::MenuBar)?;
        Ok(self.doc.menu_bar.clone())
    }

    fn menu_bar_extras(&self, timeout: Duration) -> ProviderResult<Vec<u64>> {
        self.enter(Source::MenuBarExtras)?;
        let mut items = Vec::new();
        let mut answered = 0;
        for app in &self.doc.menu_bar_extras {
            let latency = Duration::from_millis(app.latency_ms);
            if latency > timeout {
                thread::sleep(timeout);
                debug!(app = %app.app, ?timeout, "extras_app_timed_out");
                continue;
            }
            thread::sleep(latency);
            answered += 1;
            items.extend_from_slice(&app.items);
        }
        if answered == 0 && !self.doc.menu_bar_extras.is_empty() {
            return Err(ProviderError::Timeout {
                what: Source::MenuBarExtras.to_string(),
                after: timeout,
            });
        }
        Ok(items)
    }

    fn notification_windows(&self) -> ProviderResult<Vec<u64>> {
        self.enter(Source::Notifications)?;
        Ok(self.doc.notifications.clone())
    }

    fn window_list(&self) -> ProviderResult<Vec<WindowInfo<u64>>> {
        self.enter(Source::OtherWindows)?;
        Ok(self.doc.windows.clone())
    }

    fn raise_window(&self, window: &u64) -> ProviderResult<()> {
        if !self.doc.windows.iter().any(|w| w.handle == Some(*window)) {
            return Err(ProviderError::Unavailable(format!("window {window}")));
        }
        trace!(window, "snapshot_window_raised");
        self.raised.lock().push(*window);
        Ok(())
    }
}
