//! Concurrent fan-out over sources with an order-preserving merge.

use std::{sync::Arc, time::Duration};

use ax_tree::Node;
use futures::future::join_all;
use hint_mode::{DEFAULT_ALPHABET, Hint, HintKind, label_targets};
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    desktop::{DEFAULT_EXTRAS_TIMEOUT, Desktop, ProviderResult},
    error::{DiscoveryError, Result},
    source::Source,
};

/// Tunables for one aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Per-application timeout for the menu bar extras query.
    pub extras_timeout: Duration,
    /// Characters used for hint labels.
    pub alphabet: String,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            extras_timeout: DEFAULT_EXTRAS_TIMEOUT,
            alphabet: DEFAULT_ALPHABET.to_string(),
        }
    }
}

/// Runs source queries concurrently against one desktop.
#[derive(Debug)]
pub struct Aggregator<D> {
    /// Shared with every worker.
    desktop: Arc<D>,
    /// Tunables.
    options: DiscoveryOptions,
}

impl<D> Clone for Aggregator<D> {
    fn clone(&self) -> Self {
        Self {
            desktop: self.desktop.clone(),
            options: self.options.clone(),
        }
    }
}

impl<D: Desktop + 'static> Aggregator<D> {
    /// Aggregate over `desktop`.
    pub fn new(desktop: Arc<D>, options: DiscoveryOptions) -> Self {
        Self { desktop, options }
    }

    /// The desktop being queried.
    pub fn desktop(&self) -> &Arc<D> {
        &self.desktop
    }

    /// Query `sources` concurrently and concatenate the results in priority
    /// order. Duplicate sources are queried once. Sources that fail contribute
    /// nothing.
    ///
    /// Cancelling `cancel` returns [`DiscoveryError::Cancelled`] at once;
    /// workers still running are abandoned and their results dropped.
    pub async fn collect(
        &self,
        sources: &[Source],
        cancel: &CancellationToken,
    ) -> Result<Vec<Node<D::Handle>>> {
        let tagged = self.collect_by_source(sources, cancel).await?;
        Ok(tagged.into_iter().map(|(_, node)| node).collect())
    }

    /// [`collect`](Self::collect), keeping the source of each node.
    pub async fn collect_by_source(
        &self,
        sources: &[Source],
        cancel: &CancellationToken,
    ) -> Result<Vec<(Source, Node<D::Handle>)>> {
        if cancel.is_cancelled() {
            return Err(DiscoveryError::Cancelled);
        }
        let mut wanted = sources.to_vec();
        wanted.sort();
        wanted.dedup();

        let workers: Vec<_> = wanted
            .into_iter()
            .map(|source| {
                let desktop = self.desktop.clone();
                let timeout = self.options.extras_timeout;
                let handle = task::spawn_blocking(move || source.query(&*desktop, timeout));
                async move { (source, handle.await) }
            })
            .collect();

        let results = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("discovery_cancelled");
                return Err(DiscoveryError::Cancelled);
            }
            results = join_all(workers) => results,
        };

        let mut nodes = Vec::new();
        for (source, result) in results {
            match result {
                Ok(Ok(found)) => nodes.extend(found.into_iter().map(|n| (source, n))),
                Ok(Err(e)) => debug!(%source, error = %e, "source_failed"),
                Err(e) => warn!(%source, error = %e, "source_worker_failed"),
            }
        }
        debug!(count = nodes.len(), "discovery_done");
        Ok(nodes)
    }

    /// [`collect`](Self::collect), then label the merged list in order.
    /// Nodes from [`Source::OtherWindows`] become window hints.
    pub async fn discover(
        &self,
        sources: &[Source],
        cancel: &CancellationToken,
    ) -> Result<Vec<Hint<D::Handle>>> {
        let tagged = self.collect_by_source(sources, cancel).await?;
        let targets = tagged
            .into_iter()
            .map(|(source, node)| (node, source.hint_kind()))
            .collect();
        Ok(label_targets(targets, &self.options.alphabet)?)
    }

    /// Raise the window behind a window hint. Returns false, doing nothing,
    /// for element hints.
    pub fn raise(&self, hint: &Hint<D::Handle>) -> ProviderResult<bool> {
        if hint.kind != HintKind::Window {
            return Ok(false);
        }
        self.desktop.raise_window(hint.node.handle())?;
        debug!(label = %hint.label, "window_raised");
        Ok(true)
    }
}
