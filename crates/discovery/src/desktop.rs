//! The desktop-wide queries that feed discovery.

use std::time::Duration;

use ax_tree::{AxProvider, Rect};
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Default per-application messaging timeout for menu bar extras.
pub const DEFAULT_EXTRAS_TIMEOUT: Duration = Duration::from_millis(50);

/// Result of one desktop query.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// One entry of the on-screen window list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowInfo<H> {
    /// Matching accessibility node, when one could be associated.
    #[serde(default)]
    pub handle: Option<H>,
    /// Window bounds.
    pub frame: Rect,
    /// Window layer; ordinary application windows are on layer 0.
    #[serde(default)]
    pub layer: i64,
}

/// Entry points into the desktop's accessibility trees.
///
/// Every method may fail as a whole, in which case the corresponding source
/// contributes nothing.
pub trait Desktop: AxProvider {
    /// The focused window of the frontmost application.
    fn focused_window(&self) -> ProviderResult<Option<Self::Handle>>;

    /// Items of the frontmost application's menu bar.
    fn menu_bar_items(&self) -> ProviderResult<Vec<Self::Handle>>;

    /// Status items of every running application. Each application gets at
    /// most `timeout` to answer; applications that miss it are skipped.
    fn menu_bar_extras(&self, timeout: Duration) -> ProviderResult<Vec<Self::Handle>>;

    /// Windows of the notification center.
    fn notification_windows(&self) -> ProviderResult<Vec<Self::Handle>>;

    /// On-screen windows, front to back.
    fn window_list(&self) -> ProviderResult<Vec<WindowInfo<Self::Handle>>>;

    /// Make `window` its application's main window and bring the application
    /// to the front.
    fn raise_window(&self, window: &Self::Handle) -> ProviderResult<()>;
}

/// Minimum height for a window to count as a window rather than a menu bar
/// strip.
const MIN_WINDOW_HEIGHT: f64 = 50.0;

/// The windows that are fully visible: ordinary windows that are frontmost
/// among the windows they overlap.
///
/// Windows are grouped into clusters; each joins the first cluster holding a
/// window it intersects. The first window of each cluster is kept.
pub fn visible_windows<H>(windows: Vec<WindowInfo<H>>) -> Vec<WindowInfo<H>> {
    let mut clusters: Vec<Vec<WindowInfo<H>>> = Vec::new();
    for w in windows
        .into_iter()
        .filter(|w| w.frame.h > MIN_WINDOW_HEIGHT && w.layer == 0)
    {
        match clusters
            .iter_mut()
            .find(|c| c.iter().any(|m| m.frame.intersects(&w.frame)))
        {
            Some(cluster) => cluster.push(w),
            None => clusters.push(vec![w]),
        }
    }
    clusters
        .into_iter()
        .filter_map(|c| c.into_iter().next())
        .collect()
}
