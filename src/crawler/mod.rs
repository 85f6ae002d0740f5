//! Crawler module for bounded article discovery
//!
//! This module contains the crawling logic, including:
//! - HTTP fetching with the identifying user agent
//! - HTML parsing and link extraction
//! - Frontier and budget bookkeeping
//! - The three-phase crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{CrawlReport, Crawler};
pub use fetcher::{build_http_client, fetch_url, parse_document, FetchResult, Fetcher, Page};
pub use frontier::CrawlState;
pub use parser::{classify_page_links, extract_links, markup_sample, truncate_chars};

use crate::config::Config;
use crate::ScoutError;
use url::Url;

/// Runs a complete discovery crawl from a homepage
///
/// This is the main entry point for crawling on its own. It will:
/// 1. Build the HTTP client
/// 2. Crawl the homepage, section pages and pagination
/// 3. Return the collected article urls along with the homepage page
///
/// # Arguments
///
/// * `homepage` - The site's homepage
/// * `config` - Crawler configuration
///
/// # Returns
///
/// * `Ok((CrawlReport, Page))` - Crawl completed
/// * `Err(ScoutError)` - The homepage could not be fetched or the client
///   could not be built
pub async fn crawl(homepage: Url, config: &Config) -> Result<(CrawlReport, Page), ScoutError> {
    let client = build_http_client(&config.user_agent)?;
    let fetcher = Fetcher::new(client, homepage);
    crawl_with(fetcher, config).await
}

/// Same as [`crawl`], reusing an existing fetcher
pub async fn crawl_with(
    fetcher: Fetcher,
    config: &Config,
) -> Result<(CrawlReport, Page), ScoutError> {
    let mut crawler = Crawler::new(fetcher, config.crawler.clone())?;
    let report = crawler.run().await?;
    let homepage = crawler
        .homepage()
        .cloned()
        .ok_or_else(|| ScoutError::HomepageUnreachable {
            url: report.homepage_url.clone(),
        })?;
    Ok((report, homepage))
}
