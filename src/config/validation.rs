use crate::config::types::{CrawlerSettings, PageRankSettings, Settings};
use crate::ConfigError;

/// Validates the entire settings structure
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    validate_crawler_settings(&settings.crawler)?;
    validate_pagerank_settings(&settings.pagerank)?;
    Ok(())
}

/// Validates crawler settings
fn validate_crawler_settings(settings: &CrawlerSettings) -> Result<(), ConfigError> {
    if settings.max_concurrent_fetches < 1 || settings.max_concurrent_fetches > 256 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 256, got {}",
            settings.max_concurrent_fetches
        )));
    }

    if settings.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            settings.request_timeout_secs
        )));
    }

    if settings.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates PageRank settings
fn validate_pagerank_settings(settings: &PageRankSettings) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&settings.damping_factor) {
        return Err(ConfigError::Validation(format!(
            "damping_factor must be between 0 and 1, got {}",
            settings.damping_factor
        )));
    }

    if settings.tolerance.is_nan() || settings.tolerance <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "tolerance must be > 0, got {}",
            settings.tolerance
        )));
    }

    if settings.max_iterations < 1 {
        return Err(ConfigError::Validation(format!(
            "max_iterations must be >= 1, got {}",
            settings.max_iterations
        )));
    }

    Ok(())
}
