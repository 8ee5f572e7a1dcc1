//! Indexer module for submitting sources to the knowledge base
//!
//! This module contains the core coordination logic, including:
//! - Expanding composite source strings into URLs
//! - Skipping URLs that are already indexed
//! - Single-source indexing with partial-failure attribution
//! - Batch indexing with live progress and cooperative cancellation

mod batch;
mod cancel;
mod coordinator;
mod progress;
mod single;
mod types;

pub use cancel::CancellationToken;
pub use coordinator::SourceIndexer;
pub use progress::BatchProgress;
pub use types::{IndexResult, Metadata, SourceRequest, SourceType, NO_VALID_URLS};
