//! The text-generation advisor seam
//!
//! The refinement loop talks to the advisor only through `SelectorAdvisor`,
//! so the shipped HTTP client can be swapped for a scripted fake in tests.

use crate::selectors::Field;
use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

/// Advisor errors
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, error reply, empty reply)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (no JSON object found in the reply)
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Request to review the automatically detected selectors
#[derive(Debug, Clone, PartialEq)]
pub struct EnhanceRequest {
    /// Homepage markup prefix
    pub homepage_sample: String,

    /// Markup prefixes of up to two article pages
    pub article_samples: Vec<String>,

    /// The selectors currently proposed
    pub selectors: BTreeMap<Field, String>,
}

/// Request to fix selectors that matched nothing
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionRequest {
    /// Only the selectors that failed validation
    pub failed_selectors: BTreeMap<Field, String>,

    /// Homepage markup prefix
    pub homepage_sample: String,

    /// Markup prefix of the article page used for validation
    pub article_sample: String,
}

/// A text-generation collaborator that reviews and corrects selectors
///
/// Both calls return the raw reply text; interpreting it is up to the
/// caller.
#[async_trait]
pub trait SelectorAdvisor: Send + Sync {
    /// Asks for an improved selector set
    ///
    /// The reply is expected to hold a JSON object shaped like
    /// `{selectors: {article_links, title, content}, confidence, notes,
    /// potential_issues}`.
    async fn enhance(&self, request: &EnhanceRequest) -> Result<String, AdvisorError>;

    /// Asks for corrected values of the failed selectors
    ///
    /// The reply is expected to hold a JSON object shaped like
    /// `{corrected_selectors: {...}, explanation}`.
    async fn correct(&self, request: &CorrectionRequest) -> Result<String, AdvisorError>;
}
