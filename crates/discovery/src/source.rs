//! The individual discovery queries.

use std::{collections::HashSet, fmt, time::Duration};

use ax_tree::{Node, traverse};
use hint_mode::HintKind;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::desktop::{Desktop, ProviderResult, visible_windows};

/// Where hintable elements come from. Variants are declared in merge
/// priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// The frontmost application's menu bar.
    MenuBar,
    /// Status items across all applications.
    MenuBarExtras,
    /// Notification center banners and alerts.
    Notifications,
    /// Visible windows other than the focused one.
    OtherWindows,
    /// The focused window's full tree.
    ActiveWindow,
}

impl Source {
    /// Every source, in priority order.
    pub const ALL: [Self; 5] = [
        Self::MenuBar,
        Self::MenuBarExtras,
        Self::Notifications,
        Self::OtherWindows,
        Self::ActiveWindow,
    ];

    /// Stable name used in configuration and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::MenuBar => "menu_bar",
            Self::MenuBarExtras => "menu_bar_extras",
            Self::Notifications => "notifications",
            Self::OtherWindows => "other_windows",
            Self::ActiveWindow => "active_window",
        }
    }

    /// Look a source up by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// What this source's hints stand for. Selecting a window from
    /// [`OtherWindows`](Self::OtherWindows) raises it rather than clicking.
    pub fn hint_kind(self) -> HintKind {
        match self {
            Self::OtherWindows => HintKind::Window,
            _ => HintKind::Element,
        }
    }

    /// Run this source's query. Blocks on provider calls.
    pub fn query<D>(self, desktop: &D, extras_timeout: Duration) -> ProviderResult<Vec<Node<D::Handle>>>
    where
        D: Desktop + ?Sized,
    {
        let nodes = match self {
            Self::MenuBar => fetch_all(desktop, desktop.menu_bar_items()?),
            Self::MenuBarExtras => fetch_all(desktop, desktop.menu_bar_extras(extras_timeout)?),
            Self::Notifications => {
                let mut out = Vec::new();
                for window in desktop.notification_windows()? {
                    out.extend(actionable_descendants(desktop, window));
                }
                out
            }
            Self::OtherWindows => {
                let focused = desktop.focused_window().ok().flatten();
                let handles = visible_windows(desktop.window_list()?)
                    .into_iter()
                    .filter_map(|w| w.handle)
                    .filter(|h| focused.as_ref() != Some(h))
                    .collect();
                fetch_all(desktop, handles)
            }
            Self::ActiveWindow => match desktop.focused_window()? {
                Some(window) => traverse(desktop, &window).into_hintable(),
                None => Vec::new(),
            },
        };
        trace!(source = %self, count = nodes.len(), "source_done");
        Ok(nodes)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read every handle, skipping unreadable nodes.
fn fetch_all<D>(desktop: &D, handles: Vec<D::Handle>) -> Vec<Node<D::Handle>>
where
    D: Desktop + ?Sized,
{
    handles
        .into_iter()
        .filter_map(|h| Node::fetch(desktop, h))
        .collect()
}

/// Every node at or below `root` that exposes at least one action, in
/// preorder.
fn actionable_descendants<D>(desktop: &D, root: D::Handle) -> Vec<Node<D::Handle>>
where
    D: Desktop + ?Sized,
{
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut stack = vec![root];
    while let Some(handle) = stack.pop() {
        if !seen.insert(handle.clone()) {
            continue;
        }
        if let Some(mut children) = desktop.children(&handle) {
            children.reverse();
            stack.extend(children);
        }
        if let Some(node) = Node::fetch(desktop, handle)
            && !node.actions().is_empty()
        {
            out.push(node);
        }
    }
    out
}
