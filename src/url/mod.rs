//! URL handling module for Article-Scout
//!
//! This module provides URL resolution, domain extraction, site identity,
//! and the link classifier that drives the discovery crawl.

mod classify;
mod domain;
mod normalize;

// Re-export main functions
pub use classify::{
    classify_link, is_excluded_path, link_flags, LinkCategory, LinkClassification, LinkFlags,
};
pub use domain::{extract_domain, site_id};
pub use normalize::{normalize_url, resolve_link};
