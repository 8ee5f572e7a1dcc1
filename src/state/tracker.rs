//! Index state tracking
//!
//! The tracker is the single source of truth for which URLs are already in the
//! knowledge base and which are currently being submitted. Readers go through
//! [`IndexStateTracker::is_indexed`] and [`IndexStateTracker::is_indexing`];
//! only the indexers in this crate mutate the sets.

use crate::service::IndexingService;
use crate::state::InFlightGuard;
use crate::url::{extract_valid_urls, is_composite};
use crate::ServiceResult;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Tracks indexed and in-flight URLs
///
/// Both sets sit behind plain mutexes that are never held across an `.await`,
/// so every read or write between two service calls is atomic.
#[derive(Debug, Default)]
pub struct IndexStateTracker {
    /// URLs confirmed present in the knowledge base
    indexed: Mutex<HashSet<String>>,

    /// URLs submitted for indexing and not yet resolved
    in_flight: Mutex<HashSet<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Set contents stay valid even if a holder panicked mid-operation
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl IndexStateTracker {
    /// Creates a tracker with empty sets
    pub fn new() -> Self {
        Self::default()
    }

    /// Resyncs the indexed set from the indexing service
    ///
    /// The set is replaced wholesale on success. On failure it keeps its last
    /// known contents and the error is returned to the caller.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of indexed URLs after the resync
    /// * `Err(ServiceError)` - The service could not list its URLs
    pub async fn refresh(&self, service: &dyn IndexingService) -> ServiceResult<usize> {
        match service.get_indexed_urls().await {
            Ok(urls) => {
                let count = urls.len();
                self.replace_indexed(urls);
                tracing::info!("Refreshed indexed URL set: {} URLs", count);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to refresh indexed URLs, keeping {} cached: {}",
                    self.indexed_count(),
                    e
                );
                Err(e)
            }
        }
    }

    /// Returns true if the URL is in the knowledge base
    ///
    /// A composite source (`"a and b"`) counts as indexed when any of its
    /// extracted URLs is.
    pub fn is_indexed(&self, url: &str) -> bool {
        let indexed = lock(&self.indexed);
        if indexed.contains(url) {
            return true;
        }

        if is_composite(url) {
            return extract_valid_urls(url)
                .urls
                .iter()
                .any(|sub_url| indexed.contains(sub_url));
        }

        false
    }

    /// Returns true if the URL is currently submitted for indexing
    pub fn is_indexing(&self, url: &str) -> bool {
        lock(&self.in_flight).contains(url)
    }

    /// Returns the number of indexed URLs
    pub fn indexed_count(&self) -> usize {
        lock(&self.indexed).len()
    }

    /// Returns the number of in-flight URLs
    pub fn in_flight_count(&self) -> usize {
        lock(&self.in_flight).len()
    }

    /// Returns a copy of the indexed set
    pub fn indexed_snapshot(&self) -> HashSet<String> {
        lock(&self.indexed).clone()
    }

    /// Replaces the indexed set
    pub(crate) fn replace_indexed(&self, urls: HashSet<String>) {
        *lock(&self.indexed) = urls;
    }

    /// Adds confirmed URLs to the indexed set in a single update
    pub(crate) fn mark_indexed<I>(&self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut indexed = lock(&self.indexed);
        let before = indexed.len();
        indexed.extend(urls);
        indexed.len() - before
    }

    /// Returns true if the exact URL is in the indexed set
    pub(crate) fn contains_indexed(&self, url: &str) -> bool {
        lock(&self.indexed).contains(url)
    }

    /// Marks URLs as in-flight until the returned guard is dropped
    pub(crate) fn begin_indexing(&self, urls: Vec<String>) -> InFlightGuard<'_> {
        lock(&self.in_flight).extend(urls.iter().cloned());
        InFlightGuard::new(self, urls)
    }

    pub(crate) fn finish_indexing(&self, urls: &[String]) {
        let mut in_flight = lock(&self.in_flight);
        for url in urls {
            in_flight.remove(url);
        }
    }
}
