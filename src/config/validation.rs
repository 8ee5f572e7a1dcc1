use crate::config::types::{Config, LoggingConfig, ServiceConfig};
use crate::ConfigError;
use url::Url;

/// Log levels accepted in `[logging] level`
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_service_config(&config.service)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Validates indexing service configuration
fn validate_service_config(config: &ServiceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be between 1 and 300, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates logging configuration
fn validate_logging_config(config: &LoggingConfig) -> Result<(), ConfigError> {
    let level = config.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::Validation(format!(
            "logging level must be one of {:?}, got '{}'",
            LOG_LEVELS, config.level
        )));
    }
    Ok(())
}
