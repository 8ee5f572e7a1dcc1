//! Configuration module for Source-Indexer
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use source_indexer::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("indexer.toml")).unwrap();
//! println!("Indexing backend: {}", config.service.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, IndexerConfig, LoggingConfig, ServiceConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
