use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;
use reqwest::header::HeaderValue;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    validate_user_agent(&config.user_agent)?;

    if let Some(timeout) = config.request_timeout_secs {
        if timeout < 1 {
            return Err(ConfigError::Validation(format!(
                "request_timeout_secs must be >= 1, got {}",
                timeout
            )));
        }
    }

    Ok(())
}

/// The user agent must be sendable as an HTTP header value
fn validate_user_agent(user_agent: &str) -> Result<(), ConfigError> {
    if user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if HeaderValue::from_str(user_agent).is_err() {
        return Err(ConfigError::Validation(format!(
            "user_agent is not a valid header value: '{}'",
            user_agent.escape_debug()
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if let Some(root) = &config.root_dir {
        if root.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "root_dir cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
