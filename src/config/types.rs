use serde::Deserialize;

/// Main configuration structure for Article-Scout
///
/// Every section is optional; an empty file yields the stock discovery
/// settings with no advisor configured.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub advisor: Option<AdvisorConfig>,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Crawl budget and sampling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Page budget shared by the homepage and section phases
    #[serde(rename = "homepage-budget", default = "default_homepage_budget")]
    pub homepage_budget: usize,

    /// Absolute page ceiling across all phases
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Number of discovered articles fetched for selector scoring
    #[serde(rename = "sample-articles", default = "default_sample_articles")]
    pub sample_articles: usize,

    /// Number of characters of serialized homepage kept as a sample
    #[serde(
        rename = "homepage-sample-chars",
        default = "default_homepage_sample_chars"
    )]
    pub homepage_sample_chars: usize,

    /// Delay between successive article-sample fetches (milliseconds)
    #[serde(rename = "pacing-ms", default = "default_pacing_ms")]
    pub pacing_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            homepage_budget: default_homepage_budget(),
            max_pages: default_max_pages(),
            sample_articles: default_sample_articles(),
            homepage_sample_chars: default_homepage_sample_chars(),
            pacing_ms: default_pacing_ms(),
        }
    }
}

/// HTTP client identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub value: String,

    /// Request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Text-generation advisor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorConfig {
    /// Base URL of an OpenAI-compatible API
    #[serde(rename = "base-url", default = "default_advisor_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_advisor_model")]
    pub model: String,

    /// Name of the environment variable holding the API key
    #[serde(rename = "api-key-env", default = "default_api_key_env")]
    pub api_key_env: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            base_url: default_advisor_base_url(),
            model: default_advisor_model(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
        }
    }
}

/// Heuristic scoring constants
///
/// These values are empirical. Changing any of them changes which selectors
/// win on real sites.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Minimum number of `<p>` descendants for a content candidate
    #[serde(rename = "min-paragraphs")]
    pub min_paragraphs: usize,

    /// Paragraph multiplier for a content div nested inside `<article>`
    #[serde(rename = "article-div-paragraph-weight")]
    pub article_div_paragraph_weight: f64,

    /// Paragraph multiplier for a bare `<article>`
    #[serde(rename = "article-paragraph-weight")]
    pub article_paragraph_weight: f64,

    /// Paragraph multiplier for `<main>`
    #[serde(rename = "main-paragraph-weight")]
    pub main_paragraph_weight: f64,

    /// Paragraph multiplier for class-matched divs
    #[serde(rename = "class-div-paragraph-weight")]
    pub class_div_paragraph_weight: f64,

    /// Multiplier applied to text density for every content candidate
    #[serde(rename = "density-weight")]
    pub density_weight: f64,

    /// Title priority for an `h1` inside `<article>` or `<main>`
    #[serde(rename = "semantic-title-priority")]
    pub semantic_title_priority: u8,

    /// Title priority for an `h1` with a title-like class
    #[serde(rename = "classed-title-priority")]
    pub classed_title_priority: u8,

    /// Title priority for any other heading candidate
    #[serde(rename = "fallback-title-priority")]
    pub fallback_title_priority: u8,

    /// Ancestor levels inspected above each homepage link
    #[serde(rename = "container-depth")]
    pub container_depth: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_paragraphs: 2,
            article_div_paragraph_weight: 10.0,
            article_paragraph_weight: 8.0,
            main_paragraph_weight: 7.0,
            class_div_paragraph_weight: 6.0,
            density_weight: 5.0,
            semantic_title_priority: 3,
            classed_title_priority: 2,
            fallback_title_priority: 1,
            container_depth: 3,
        }
    }
}

fn default_homepage_budget() -> usize {
    10
}

fn default_max_pages() -> usize {
    15
}

fn default_sample_articles() -> usize {
    5
}

fn default_homepage_sample_chars() -> usize {
    5000
}

fn default_pacing_ms() -> u64 {
    500
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; ScraperBot/1.0)".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_advisor_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_advisor_model() -> String {
    "anthropic/claude-3.5-sonnet".to_string()
}

fn default_api_key_env() -> String {
    "OPENROUTER_API_KEY".to_string()
}

fn default_temperature() -> f32 {
    0.3
}
