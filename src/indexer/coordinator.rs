//! Indexing coordinator - shared state and entry points
//!
//! This module contains the [`SourceIndexer`], which owns the index state
//! tracker and the batch progress channel, and exposes:
//! - Resyncing the indexed-URL set from the backend
//! - Read-only `is_indexed` / `is_indexing` queries
//! - Single-source indexing (see `single.rs`)
//! - Batch indexing with progress and cancellation (see `batch.rs`)

use crate::config::Config;
use crate::indexer::{BatchProgress, CancellationToken};
use crate::service::{HttpIndexingService, IndexingService};
use crate::state::IndexStateTracker;
use crate::ServiceResult;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

/// Coordinates deduplicated indexing against an [`IndexingService`]
///
/// Share it behind an `Arc`; every method takes `&self`.
pub struct SourceIndexer {
    pub(crate) service: Arc<dyn IndexingService>,
    pub(crate) tracker: Arc<IndexStateTracker>,
    pub(crate) progress: watch::Sender<BatchProgress>,

    /// Serializes batch calls so progress and cancellation always refer to one batch
    pub(crate) batch_lock: tokio::sync::Mutex<()>,

    /// Token of the running (or most recent) batch
    pub(crate) current_batch: Mutex<CancellationToken>,
}

impl SourceIndexer {
    /// Creates a coordinator with an empty indexed set
    pub fn new(service: Arc<dyn IndexingService>) -> Self {
        let (progress, _) = watch::channel(BatchProgress::default());

        Self {
            service,
            tracker: Arc::new(IndexStateTracker::new()),
            progress,
            batch_lock: tokio::sync::Mutex::new(()),
            current_batch: Mutex::new(CancellationToken::new()),
        }
    }

    /// Creates a coordinator talking to the configured HTTP backend
    ///
    /// If `refresh-on-start` is set the indexed set is loaded immediately. A
    /// failed refresh is logged and the coordinator starts with an empty set.
    pub async fn from_config(config: &Config) -> crate::Result<Self> {
        let service = HttpIndexingService::new(&config.service)?;
        let indexer = Self::new(Arc::new(service));

        if config.indexer.refresh_on_start {
            if let Err(e) = indexer.refresh().await {
                tracing::warn!("Initial refresh failed, starting with empty index: {}", e);
            }
        }

        Ok(indexer)
    }

    /// Resyncs the indexed-URL set from the backend, replacing it wholesale
    pub async fn refresh(&self) -> ServiceResult<usize> {
        self.tracker.refresh(self.service.as_ref()).await
    }

    /// Returns true if the URL, or any URL of a composite source, is indexed
    pub fn is_indexed(&self, url: &str) -> bool {
        self.tracker.is_indexed(url)
    }

    /// Returns true if the URL is currently being indexed
    pub fn is_indexing(&self, url: &str) -> bool {
        self.tracker.is_indexing(url)
    }

    /// Returns a read handle on the index state
    pub fn tracker(&self) -> Arc<IndexStateTracker> {
        Arc::clone(&self.tracker)
    }

    /// Returns the latest batch progress
    pub fn progress(&self) -> BatchProgress {
        self.progress.borrow().clone()
    }

    /// Subscribes to batch progress updates
    pub fn subscribe_progress(&self) -> watch::Receiver<BatchProgress> {
        self.progress.subscribe()
    }

    /// Requests cancellation of the running batch
    ///
    /// Results already applied stay applied; the in-flight service call is not
    /// aborted.
    pub fn cancel_batch(&self) {
        let token = self
            .current_batch
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        tracing::info!("Batch cancellation requested");
        token.cancel();
    }

    pub(crate) fn install_batch_token(&self, token: CancellationToken) {
        *self
            .current_batch
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }
}
