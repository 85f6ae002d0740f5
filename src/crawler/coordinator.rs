//! Crawler coordinator - bounded discovery crawl
//!
//! This module contains the three-phase crawl that finds article urls on a
//! site:
//! - Homepage phase: drain the frontier from the homepage, following
//!   pagination, under the phase budget
//! - Sections phase: probe content-section index pages linked from the
//!   homepage, under the same budget
//! - Pagination phase: drain whatever pagination is left, under the
//!   absolute ceiling

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{Fetcher, Page};
use crate::crawler::frontier::CrawlState;
use crate::crawler::parser::{classify_page_links, markup_sample};
use crate::state::CrawlPhase;
use crate::url::extract_domain;
use crate::{ScoutError, UrlError};
use serde::Serialize;
use std::collections::HashSet;
use url::Url;

/// Terminal output of a discovery crawl
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// The homepage the crawl started from
    pub homepage_url: String,

    /// Number of distinct article urls found
    pub total_article_links: usize,

    /// Every article url found, in discovery order
    pub article_links: Vec<String>,

    /// The first few article urls, used as scoring samples
    pub sample_article_urls: Vec<String>,

    /// Bounded prefix of the serialized homepage DOM, handed to the advisor
    #[serde(skip)]
    pub homepage_html_sample: String,

    /// Number of pages fetched (including failed attempts)
    pub pages_crawled: usize,
}

/// What to harvest from a crawled page besides article links
#[derive(Debug, Clone, Copy)]
struct Harvest {
    pagination: bool,
    sections: bool,
}

/// Main crawler structure
pub struct Crawler {
    fetcher: Fetcher,
    config: CrawlerConfig,
    homepage_url: Url,
    domain: String,
    state: CrawlState,
    phase: CrawlPhase,
    article_links: Vec<Url>,
    article_seen: HashSet<String>,
    sections: Vec<Url>,
    homepage: Option<Page>,
    homepage_sample: String,
}

impl Crawler {
    /// Creates a crawler for the site the fetcher is bound to
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(ScoutError)` - The base URL has no domain
    pub fn new(fetcher: Fetcher, config: CrawlerConfig) -> Result<Self, ScoutError> {
        let homepage_url = fetcher.base_url().clone();
        let domain = extract_domain(&homepage_url).ok_or(UrlError::MissingDomain)?;
        let state = CrawlState::new(homepage_url.clone(), config.max_pages);

        Ok(Self {
            fetcher,
            config,
            homepage_url,
            domain,
            state,
            phase: CrawlPhase::Idle,
            article_links: Vec::new(),
            article_seen: HashSet::new(),
            sections: Vec::new(),
            homepage: None,
            homepage_sample: String::new(),
        })
    }

    /// Runs all crawl phases
    ///
    /// A crawler runs once; a second call fails with an invalid transition.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - Crawl finished (possibly with zero articles)
    /// * `Err(ScoutError::HomepageUnreachable)` - The homepage could not be
    ///   fetched, so nothing else could be discovered
    pub async fn run(&mut self) -> Result<CrawlReport, ScoutError> {
        self.advance(CrawlPhase::Homepage)?;
        tracing::info!("Analyzing homepage: {}", self.homepage_url);
        self.crawl_homepage_phase().await;

        if self.homepage.is_none() {
            self.advance(CrawlPhase::Done)?;
            return Err(ScoutError::HomepageUnreachable {
                url: self.homepage_url.to_string(),
            });
        }

        self.advance(CrawlPhase::Sections)?;
        self.crawl_sections_phase().await;

        self.advance(CrawlPhase::Pagination)?;
        self.crawl_pagination_phase().await;

        self.advance(CrawlPhase::Done)?;

        let report = self.report();
        tracing::info!(
            "Found {} total article links across {} pages",
            report.total_article_links,
            report.pages_crawled
        );
        Ok(report)
    }

    /// Phase 1: FIFO drain from the homepage under the phase budget
    async fn crawl_homepage_phase(&mut self) {
        let limit = self.config.homepage_budget;

        while self.state.has_capacity(limit) {
            let Some(url) = self.state.next_url() else {
                break;
            };
            if !self.state.claim(&url, limit) {
                continue;
            }

            let is_homepage = url == self.homepage_url;
            tracing::info!("Crawling page: {}", url);
            let page = self.fetcher.fetch_absolute(&url).await;
            if !page.is_ok() {
                continue;
            }

            self.absorb(
                &page,
                Harvest {
                    pagination: true,
                    sections: is_homepage,
                },
            );

            if is_homepage {
                if let Some(document) = &page.document {
                    self.homepage_sample =
                        markup_sample(document, self.config.homepage_sample_chars);
                }
                self.homepage = Some(page);
            }
        }
    }

    /// Phase 2: probe section index pages found on the homepage
    async fn crawl_sections_phase(&mut self) {
        let limit = self.config.homepage_budget;
        let sections = std::mem::take(&mut self.sections);

        for section in &sections {
            if !self.state.has_capacity(limit) {
                break;
            }
            if !self.state.claim(section, limit) {
                continue;
            }

            tracing::info!("Checking content section: {}", section);
            let page = self.fetcher.fetch_absolute(section).await;
            if page.is_ok() {
                self.absorb(
                    &page,
                    Harvest {
                        pagination: true,
                        sections: false,
                    },
                );
            }
        }

        self.sections = sections;
    }

    /// Phase 3: drain remaining pagination under the absolute ceiling
    async fn crawl_pagination_phase(&mut self) {
        let limit = self.config.max_pages;

        while self.state.has_capacity(limit) {
            let Some(url) = self.state.next_url() else {
                break;
            };
            if !self.state.claim(&url, limit) {
                continue;
            }

            tracing::info!("Crawling pagination page: {}", url);
            let page = self.fetcher.fetch_absolute(&url).await;
            if page.is_ok() {
                self.absorb(
                    &page,
                    Harvest {
                        pagination: false,
                        sections: false,
                    },
                );
            }
        }
    }

    /// Classifies a page's links and merges the results into crawl state
    fn absorb(&mut self, page: &Page, harvest: Harvest) {
        let (Some(document), Some(page_url)) = (&page.document, page.parsed_url()) else {
            return;
        };

        let mut new_articles = 0;
        let mut new_pages = 0;

        for link in classify_page_links(document, &page_url, &self.domain) {
            tracing::trace!("{} -> {:?}", link.url, link.category);

            if link.flags.article && self.article_seen.insert(link.url.to_string()) {
                self.article_links.push(link.url.clone());
                new_articles += 1;
            }

            if harvest.pagination && link.flags.pagination && self.state.enqueue(link.url.clone())
            {
                new_pages += 1;
            }

            if harvest.sections && link.flags.content_section && !self.sections.contains(&link.url)
            {
                self.sections.push(link.url);
            }
        }

        tracing::debug!(
            "{}: {} new article links, {} new pagination pages",
            page.url,
            new_articles,
            new_pages
        );
    }

    fn advance(&mut self, next: CrawlPhase) -> Result<(), ScoutError> {
        self.phase = self.phase.transition(next)?;
        tracing::debug!("Crawl phase: {}", self.phase);
        Ok(())
    }

    fn report(&self) -> CrawlReport {
        let article_links: Vec<String> = self.article_links.iter().map(Url::to_string).collect();
        let sample_article_urls = article_links
            .iter()
            .take(self.config.sample_articles)
            .cloned()
            .collect();

        CrawlReport {
            homepage_url: self.homepage_url.to_string(),
            total_article_links: article_links.len(),
            article_links,
            sample_article_urls,
            homepage_html_sample: self.homepage_sample.clone(),
            pages_crawled: self.state.pages_crawled(),
        }
    }

    /// The homepage, once it has been fetched successfully
    pub fn homepage(&self) -> Option<&Page> {
        self.homepage.as_ref()
    }

    /// Content-section urls collected from the homepage
    pub fn sections(&self) -> &[Url] {
        &self.sections
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }
}
