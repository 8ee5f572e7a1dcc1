//! Logging setup
//!
//! Installs a `tracing-subscriber` formatter for applications embedding the
//! coordinator. `RUST_LOG` takes precedence over the configured level.

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Builds the filter used by [`init_logging`]
///
/// The configured level applies to this crate; everything else logs at `warn`
/// unless the configured level is quieter.
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let level = config.level.to_lowercase();
    let filter = match level.as_str() {
        "error" => "error".to_string(),
        "warn" => "warn".to_string(),
        _ => format!("source_indexer={},warn", level),
    };
    EnvFilter::new(filter)
}

/// Installs the global tracing subscriber
///
/// Returns false if a subscriber was already installed, so calling this more
/// than once is harmless.
pub fn init_logging(config: &LoggingConfig) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .try_init()
        .is_ok()
}
