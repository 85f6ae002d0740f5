//! Configuration module for Article-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use article_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scout.toml")).unwrap();
//! println!("Crawl ceiling: {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{AdvisorConfig, Config, CrawlerConfig, ScoringConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
