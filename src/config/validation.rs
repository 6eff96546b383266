//! Configuration validation
//!
//! Catches impossible settings at load time so the pipeline never has to
//! defend against them.

use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates a parsed configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_base_url(&config.site.base_url)?;

    if config.site.page_count == 0 {
        return Err(ConfigError::Validation(
            "site.page-count must be at least 1".to_string(),
        ));
    }

    if config.fetcher.max_concurrent_requests == 0 {
        return Err(ConfigError::Validation(
            "fetcher.max-concurrent-requests must be at least 1".to_string(),
        ));
    }

    if config.fetcher.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetcher.request-timeout-secs must be at least 1".to_string(),
        ));
    }

    if config.fetcher.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "fetcher.user-agent must not be empty".to_string(),
        ));
    }

    for (name, path) in [
        ("output.database-path", &config.output.database_path),
        ("output.csv-path", &config.output.csv_path),
        ("output.json-path", &config.output.json_path),
    ] {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{} must not be empty",
                name
            )));
        }
    }

    Ok(())
}

fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url =
        Url::parse(base_url).map_err(|_| ConfigError::InvalidUrl(base_url.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} (scheme must be http or https)",
            base_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "{} (missing host)",
            base_url
        )));
    }

    Ok(())
}
