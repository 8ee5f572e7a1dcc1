//! Request and result types for the indexers

use crate::service::{BatchItemResult, BatchStatus, Document, UrlSubmission};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-form metadata attached to a source, passed through to the backend unvalidated
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Prefix of the error reported for sources without a single valid URL
pub const NO_VALID_URLS: &str = "No valid URLs found";

/// Where a source came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// A trending article surfaced by search
    Trending,
    /// A tool or product page
    Tool,
    /// A topic suggestion's reference link
    Suggestion,
    /// A previously generated newsletter archive entry
    Archive,
}

impl SourceType {
    /// Returns the wire name of this source type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trending => "trending",
            Self::Tool => "tool",
            Self::Suggestion => "suggestion",
            Self::Archive => "archive",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical unit of indexing work
///
/// `raw_url` may glue several URLs together; each valid one is indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRequest {
    #[serde(rename = "url")]
    pub raw_url: String,
    pub title: String,
    pub source_type: SourceType,
    #[serde(default)]
    pub metadata: Metadata,
}

impl SourceRequest {
    /// Creates a request with empty metadata
    pub fn new(
        raw_url: impl Into<String>,
        title: impl Into<String>,
        source_type: SourceType,
    ) -> Self {
        Self {
            raw_url: raw_url.into(),
            title: title.into(),
            source_type,
            metadata: Metadata::new(),
        }
    }

    /// Adds a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Builds the backend submission for one of this request's URLs
    pub(crate) fn submission_for(&self, url: &str) -> UrlSubmission {
        UrlSubmission {
            url: url.to_string(),
            title: self.title.clone(),
            source_type: self.source_type,
            metadata: self.metadata.clone(),
        }
    }
}

/// Outcome of indexing one logical source or one expanded URL
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexResult {
    pub url: String,

    /// At least one useful outcome was achieved
    pub success: bool,

    /// No new content had to be fetched
    pub was_already_indexed: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,

    /// Failure reason, or a warning when `success` is true but some URLs failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
}

impl IndexResult {
    /// Result for a source that produced no valid URL
    pub(crate) fn invalid(request: &SourceRequest) -> Self {
        Self {
            url: request.raw_url.clone(),
            success: false,
            was_already_indexed: false,
            document: None,
            error: Some(format!("{} in: {}", NO_VALID_URLS, request.raw_url)),
            title: Some(request.title.clone()),
            source_type: Some(request.source_type),
        }
    }

    /// Result for one URL as reported by the batch operation
    pub(crate) fn from_batch_item(item: BatchItemResult, submission: &UrlSubmission) -> Self {
        let error = match item.status {
            BatchStatus::Failed => item.error.or_else(|| Some("Indexing failed".to_string())),
            _ => item.error,
        };

        Self {
            url: item.url,
            success: item.status.is_confirmed(),
            was_already_indexed: item.status == BatchStatus::Exists,
            document: item.document,
            error,
            title: Some(submission.title.clone()),
            source_type: Some(submission.source_type),
        }
    }

    /// Failed result for a submitted URL
    pub(crate) fn failed(submission: &UrlSubmission, error: impl Into<String>) -> Self {
        Self {
            url: submission.url.clone(),
            success: false,
            was_already_indexed: false,
            document: None,
            error: Some(error.into()),
            title: Some(submission.title.clone()),
            source_type: Some(submission.source_type),
        }
    }
}
