use serde::Deserialize;

/// Main configuration structure for Source-Indexer
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub indexer: IndexerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Indexing service connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the backend exposing the RAG endpoints
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum time to establish a connection (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Coordinator behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IndexerConfig {
    /// Resync the indexed-URL set from the backend when the coordinator starts
    #[serde(rename = "refresh-on-start", default = "default_refresh_on_start")]
    pub refresh_on_start: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            refresh_on_start: default_refresh_on_start(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("source-indexer/{}", env!("CARGO_PKG_VERSION"))
}

fn default_refresh_on_start() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
