//! Article-Scout: selector discovery for article-publishing websites
//!
//! This crate crawls a bounded portion of an unseen site, scores DOM patterns
//! to propose CSS selectors for article links, titles and bodies, and
//! optionally reconciles those proposals with a text-generation advisor
//! before re-validating them against real pages.

pub mod config;
pub mod crawler;
pub mod discovery;
pub mod output;
pub mod refine;
pub mod registry;
pub mod selectors;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Article-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Homepage could not be fetched: {url}")]
    HomepageUnreachable { url: String },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid crawl phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing environment variable: {0}")]
    MissingEnv(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Article-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use discovery::{discover, discover_cached, DiscoveryReport};
pub use refine::{ChatAdvisor, SelectorAdvisor};
pub use registry::SelectorRegistry;
pub use selectors::{Confidence, Field, Method, SelectorSet};
pub use state::{CrawlPhase, FetchStatus};
pub use url::{classify_link, LinkCategory, LinkClassification};
