//! Multi-source discovery of hintable elements.
//!
//! Each [`Source`] is queried on its own blocking worker against a
//! [`Desktop`]. The [`Aggregator`] merges the results in a fixed priority
//! order and labels them. [`SnapshotDesktop`] replays a captured desktop for
//! tests and the command line.

pub mod aggregator;
pub mod desktop;
mod error;
pub mod snapshot;
pub mod source;

pub use aggregator::{Aggregator, DiscoveryOptions};
pub use desktop::{DEFAULT_EXTRAS_TIMEOUT, Desktop, ProviderResult, WindowInfo, visible_windows};
pub use error::{DiscoveryError, ProviderError, Result};
pub use snapshot::{DesktopDocument, ExtrasApp, SnapshotDesktop};
pub use source::Source;
