//! Indexing service module
//!
//! The indexing service is the external backend that actually fetches a URL,
//! embeds its content and stores it in the knowledge base. This module defines
//! the [`IndexingService`] seam the coordinator consumes, the wire types shared
//! with the backend, and an HTTP implementation.

mod http;
mod traits;

pub use http::{build_http_client, HttpIndexingService};
pub use traits::IndexingService;

use crate::indexer::{Metadata, SourceType};
use serde::{Deserialize, Serialize};

/// Opaque document record returned by the backend for an indexed URL
pub type Document = serde_json::Value;

/// One URL submitted to the indexing service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlSubmission {
    pub url: String,
    pub title: String,
    pub source_type: SourceType,
    #[serde(default)]
    pub metadata: Metadata,
}

/// Outcome of indexing a single URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOutcome {
    /// The backend already held this URL and did no work
    #[serde(default)]
    pub was_already_indexed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,

    /// Set when the backend accepted the request but could not index the URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchOutcome {
    /// Returns true if the URL is now present in the knowledge base
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-URL status reported by the batch operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    /// Fetched and stored by this request
    Indexed,
    /// Already present before this request
    Exists,
    /// Could not be indexed
    Failed,
}

impl BatchStatus {
    /// Returns true if the URL is present in the knowledge base afterwards
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Indexed | Self::Exists)
    }
}

/// One entry of a batch response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItemResult {
    pub url: String,
    pub status: BatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response of the batch operation, in the order the backend processed items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    #[serde(default)]
    pub results: Vec<BatchItemResult>,
}
