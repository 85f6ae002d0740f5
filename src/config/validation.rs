use crate::config::types::{AdvisorConfig, Config, CrawlerConfig, ScoringConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    if let Some(advisor) = &config.advisor {
        validate_advisor_config(advisor)?;
    }
    validate_scoring_config(&config.scoring)?;
    Ok(())
}

/// Validates crawl budgets and sampling limits
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.homepage_budget < 1 {
        return Err(ConfigError::Validation(format!(
            "homepage_budget must be >= 1, got {}",
            config.homepage_budget
        )));
    }

    if config.max_pages < config.homepage_budget {
        return Err(ConfigError::Validation(format!(
            "max_pages ({}) must be >= homepage_budget ({})",
            config.max_pages, config.homepage_budget
        )));
    }

    if config.sample_articles < 1 {
        return Err(ConfigError::Validation(format!(
            "sample_articles must be >= 1, got {}",
            config.sample_articles
        )));
    }

    if config.homepage_sample_chars < 1 {
        return Err(ConfigError::Validation(
            "homepage_sample_chars must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP client identification
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates the advisor endpoint settings
fn validate_advisor_config(config: &AdvisorConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid advisor base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Advisor base_url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.model.trim().is_empty() {
        return Err(ConfigError::Validation(
            "advisor model cannot be empty".to_string(),
        ));
    }

    if config.api_key_env.trim().is_empty() {
        return Err(ConfigError::Validation(
            "advisor api_key_env cannot be empty".to_string(),
        ));
    }

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(ConfigError::Validation(format!(
            "advisor temperature must be between 0 and 2, got {}",
            config.temperature
        )));
    }

    Ok(())
}

/// Validates scoring constants
fn validate_scoring_config(config: &ScoringConfig) -> Result<(), ConfigError> {
    let weights = [
        config.article_div_paragraph_weight,
        config.article_paragraph_weight,
        config.main_paragraph_weight,
        config.class_div_paragraph_weight,
        config.density_weight,
    ];

    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(ConfigError::Validation(
            "scoring weights must be finite and non-negative".to_string(),
        ));
    }

    if config.container_depth < 1 {
        return Err(ConfigError::Validation(
            "container_depth must be >= 1".to_string(),
        ));
    }

    Ok(())
}
