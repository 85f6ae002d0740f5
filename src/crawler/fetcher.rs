//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the identifying user agent and timeout
//! - GET requests to fetch page content
//! - Error classification into page fetch statuses
//!
//! Nothing in here returns an error past the page boundary: every failure is
//! folded into the `FetchStatus` of the returned `Page`.

use crate::config::UserAgentConfig;
use crate::state::FetchStatus;
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use url::Url;

/// Result of a single HTTP request
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Non-2xx response
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },

    /// The body could not be read as text
    BodyError {
        /// Error description
        error: String,
    },
}

/// A fetched page and its parsed DOM tree
///
/// A page whose fetch failed carries no document.
#[derive(Debug, Clone)]
pub struct Page {
    /// Absolute URL that was requested (or the raw href if it could not be
    /// resolved)
    pub url: String,

    /// How the fetch ended
    pub status: FetchStatus,

    /// Parsed DOM tree, present only when `status` is `Ok`
    pub document: Option<Html>,
}

impl Page {
    /// Creates a page for a failed fetch
    pub fn failed(url: impl Into<String>, status: FetchStatus) -> Self {
        Self {
            url: url.into(),
            status,
            document: None,
        }
    }

    /// Returns true if the page has a DOM tree
    pub fn is_ok(&self) -> bool {
        self.status.is_success() && self.document.is_some()
    }

    /// Returns the parsed URL of this page, if it is absolute
    pub fn parsed_url(&self) -> Option<Url> {
        Url::parse(&self.url).ok()
    }

    /// Serializes the DOM tree back to markup
    pub fn markup(&self) -> Option<String> {
        self.document.as_ref().map(|doc| doc.html())
    }
}

/// Builds an HTTP client with proper configuration
///
/// The client is cheap to clone and safe to share between concurrent
/// discovery runs.
///
/// # Example
///
/// ```no_run
/// use article_scout::config::UserAgentConfig;
/// use article_scout::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.value.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends a GET request and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Success` |
/// | Any other status | `HttpError` |
/// | Timeout / connect / other transport error | `NetworkError` |
/// | Undecodable body | `BodyError` |
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::BodyError {
            error: e.to_string(),
        },
    }
}

/// Turns a response body into a DOM tree
///
/// An empty body is treated as a parse failure; anything else goes through
/// the lenient HTML5 parser.
pub fn parse_document(body: &str) -> Option<Html> {
    if body.trim().is_empty() {
        return None;
    }
    Some(Html::parse_document(body))
}

/// Fetches pages of one site
///
/// Relative hrefs are resolved against the site's base URL before the
/// request is made.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    base_url: Url,
}

impl Fetcher {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Fetches a URL (absolute or relative to the base URL) into a `Page`
    pub async fn fetch(&self, href: &str) -> Page {
        match self.base_url.join(href) {
            Ok(url) => self.fetch_absolute(&url).await,
            Err(e) => {
                tracing::warn!("Cannot resolve {} against {}: {}", href, self.base_url, e);
                Page::failed(href, FetchStatus::FetchError)
            }
        }
    }

    /// Fetches an absolute URL into a `Page`
    pub async fn fetch_absolute(&self, url: &Url) -> Page {
        match fetch_url(&self.client, url).await {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => match parse_document(&body) {
                Some(document) => {
                    tracing::debug!("Fetched {} ({}) via {}", url, status_code, final_url);
                    Page {
                        url: url.to_string(),
                        status: FetchStatus::Ok,
                        document: Some(document),
                    }
                }
                None => {
                    tracing::warn!("Empty document at {}", url);
                    Page::failed(url.as_str(), FetchStatus::ParseError)
                }
            },
            FetchResult::HttpError { status_code } => {
                tracing::warn!("Error fetching {}: HTTP {}", url, status_code);
                Page::failed(url.as_str(), FetchStatus::FetchError)
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Error fetching {}: {}", url, error);
                Page::failed(url.as_str(), FetchStatus::FetchError)
            }
            FetchResult::BodyError { error } => {
                tracing::warn!("Unreadable body at {}: {}", url, error);
                Page::failed(url.as_str(), FetchStatus::ParseError)
            }
        }
    }
}
