//! Indexing service trait
//!
//! This module defines the interface the coordinator uses to reach the
//! fetch-and-store backend. Implementations must be shareable across tasks.

use crate::service::{BatchResponse, FetchOutcome, UrlSubmission};
use crate::ServiceResult;
use async_trait::async_trait;
use std::collections::HashSet;

/// Trait for indexing backend implementations
#[async_trait]
pub trait IndexingService: Send + Sync {
    /// Fetches and indexes a single URL
    ///
    /// An `Ok` outcome may still carry an `error` when the backend answered
    /// but could not index the URL.
    async fn fetch_and_index_url(&self, submission: &UrlSubmission) -> ServiceResult<FetchOutcome>;

    /// Fetches and indexes many URLs in one round trip
    ///
    /// The response holds one entry per submitted URL, in processing order.
    async fn fetch_and_index_batch(&self, sources: &[UrlSubmission])
        -> ServiceResult<BatchResponse>;

    /// Returns every URL currently stored in the knowledge base
    async fn get_indexed_urls(&self) -> ServiceResult<HashSet<String>>;
}
