//! Source-Indexer: knowledge-base ingestion coordinator
//!
//! This crate decides which external content sources have already been absorbed
//! into a knowledge base, avoids submitting duplicate indexing work, and drives
//! single-source and batch ingestion with progress reporting and cooperative
//! cancellation. The actual fetch-and-store work is delegated to an
//! [`IndexingService`](service::IndexingService).

pub mod config;
pub mod indexer;
pub mod logging;
pub mod service;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Source-Indexer operations
#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Indexing service error: {0}")]
    Service(#[from] ServiceError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while talking to the indexing service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Indexing service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Invalid service base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Indexing service unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for Source-Indexer operations
pub type Result<T> = std::result::Result<T, IndexerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for indexing service calls
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

// Re-export commonly used types
pub use config::Config;
pub use indexer::{
    BatchProgress, CancellationToken, IndexResult, SourceIndexer, SourceRequest, SourceType,
};
pub use service::{HttpIndexingService, IndexingService};
pub use state::IndexStateTracker;
pub use crate::url::{extract_valid_urls, get_clean_url, ExtractedUrls, MULTI_URL_MARKER};
