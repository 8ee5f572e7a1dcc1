//! URL handling module for Source-Indexer
//!
//! This module recovers well-formed URLs from raw source strings. Sources are
//! frequently produced by language models and may glue several URLs together
//! (`"https://a.com and https://b.com"`), so every raw string is expanded into
//! an ordered list of valid URLs before any indexing decision is made.

mod extract;

// Re-export main functions
pub use extract::{
    extract_valid_urls, get_clean_url, is_composite, primary_url, ExtractedUrls,
    MULTI_URL_MARKER,
};
