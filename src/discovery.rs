//! End-to-end selector discovery for one site
//!
//! crawl -> fetch article samples -> score -> aggregate -> (refine)
//!
//! The only error surfaced past this boundary besides setup failures is an
//! unreachable homepage; everything else degrades to fallback selectors.

use crate::config::Config;
use crate::crawler::{build_http_client, crawl_with, Fetcher, Page};
use crate::refine::{refine, SelectorAdvisor};
use crate::registry::SelectorRegistry;
use crate::selectors::{detect_selectors, Method, SelectorSet};
use crate::url::{extract_domain, normalize_url, site_id};
use crate::{ScoutError, UrlError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Output of a discovery run
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryReport {
    /// Identifier derived from the homepage host
    pub site_id: String,

    pub homepage_url: String,

    /// The finalized selectors
    pub selectors: SelectorSet,

    /// Every article url found by the crawl, in discovery order
    pub article_urls: Vec<String>,

    pub total_articles: usize,

    /// Pages fetched by the crawl (sample fetches not included)
    pub pages_crawled: usize,

    /// Article samples that were fetched and analyzed
    pub samples_analyzed: usize,

    pub discovered_at: DateTime<Utc>,
}

/// Discovers selectors for the site at `homepage_url`
///
/// # Arguments
///
/// * `homepage_url` - Absolute http(s) URL of the site's homepage
/// * `config` - Crawl, client and scoring settings
/// * `advisor` - Optional text-generation collaborator
///
/// # Returns
///
/// * `Ok(DiscoveryReport)` - Discovery finished (possibly with fallback
///   selectors)
/// * `Err(ScoutError)` - Bad URL, client setup failure, or unreachable
///   homepage
pub async fn discover(
    homepage_url: &str,
    config: &Config,
    advisor: Option<&dyn SelectorAdvisor>,
) -> Result<DiscoveryReport, ScoutError> {
    let homepage = normalize_url(homepage_url)?;
    let client = build_http_client(&config.user_agent)?;
    discover_with(Fetcher::new(client, homepage), config, advisor).await
}

/// Same as [`discover`], reusing an existing fetcher
pub async fn discover_with(
    fetcher: Fetcher,
    config: &Config,
    advisor: Option<&dyn SelectorAdvisor>,
) -> Result<DiscoveryReport, ScoutError> {
    let homepage_url = fetcher.base_url().clone();
    let site = site_id(&homepage_url);
    let domain = extract_domain(&homepage_url).ok_or(UrlError::MissingDomain)?;
    tracing::info!("Starting selector discovery for {} ({})", homepage_url, site);

    let (crawl, homepage) = crawl_with(fetcher.clone(), config).await?;

    tracing::info!(
        "Fetching {} sample articles for analysis",
        crawl.sample_article_urls.len()
    );
    let samples = fetch_samples(
        &fetcher,
        &crawl.sample_article_urls,
        Duration::from_millis(config.crawler.pacing_ms),
    )
    .await;
    let samples_analyzed = samples.iter().filter(|page| page.is_ok()).count();

    let selectors = if samples_analyzed == 0 {
        tracing::warn!("No article pages could be fetched for analysis");
        SelectorSet::failed("No article pages could be fetched for analysis")
    } else {
        let automatic = detect_selectors(&homepage, &samples, &domain, &config.scoring);
        match advisor {
            Some(advisor) => {
                refine(
                    automatic,
                    &homepage,
                    &crawl.homepage_html_sample,
                    &samples,
                    advisor,
                )
                .await
            }
            None => automatic,
        }
    };

    tracing::info!(
        "Final selectors ({}, {} confidence): links={} title={} content={}",
        selectors.method,
        selectors.confidence,
        selectors.article_links,
        selectors.title,
        selectors.content
    );

    Ok(DiscoveryReport {
        site_id: site,
        homepage_url: crawl.homepage_url,
        selectors,
        total_articles: crawl.total_article_links,
        article_urls: crawl.article_links,
        pages_crawled: crawl.pages_crawled,
        samples_analyzed,
        discovered_at: Utc::now(),
    })
}

/// Fetches article samples one at a time with a pause between fetches
async fn fetch_samples(fetcher: &Fetcher, urls: &[String], pacing: Duration) -> Vec<Page> {
    let mut pages = Vec::with_capacity(urls.len());
    for (index, url) in urls.iter().enumerate() {
        if index > 0 && !pacing.is_zero() {
            tokio::time::sleep(pacing).await;
        }
        pages.push(fetcher.fetch(url).await);
    }
    pages
}

/// Looks up the site in the registry, discovering and registering it on a
/// miss
///
/// Sets whose method is `Failed` are returned but not registered.
pub async fn discover_cached(
    homepage_url: &str,
    config: &Config,
    advisor: Option<&dyn SelectorAdvisor>,
    registry: &SelectorRegistry,
) -> Result<SelectorSet, ScoutError> {
    let site = site_id(&normalize_url(homepage_url)?);

    if let Some(selectors) = registry.get(&site) {
        tracing::info!("Using registered selectors for {}", site);
        return Ok(selectors);
    }

    let report = discover(homepage_url, config, advisor).await?;
    if report.selectors.method != Method::Failed {
        registry.insert(site, report.selectors.clone());
    }
    Ok(report.selectors)
}
