//! Selector discovery module
//!
//! This module turns crawled pages into CSS selectors:
//! - `links`: article-link container pattern on the homepage
//! - `title` / `content`: per-page scored candidates on article samples
//! - `aggregate`: cross-page plurality vote with fixed fallbacks
//! - `validate`: checks selectors against real pages

mod aggregate;
mod content;
mod css;
mod links;
mod title;
mod types;
mod validate;

pub use aggregate::{aggregate, Tally};
pub use content::{content_candidate, content_candidates};
pub use css::{paragraph_count, selector_of, text_density, visible_text};
pub use links::{find_link_pattern, LinkPattern};
pub use title::{title_candidate, title_candidates};
pub use types::{CandidateSelector, Confidence, Field, Method, SelectorSet};
pub use validate::{failed_fields, selector_matches, validate, validate_page, ValidationResult};

use crate::config::ScoringConfig;
use crate::crawler::Page;
use url::Url;

/// Scores one article sample, returning its winning title and content
/// candidates (either may be missing)
pub fn score_article(page: &Page, scoring: &ScoringConfig) -> Vec<CandidateSelector> {
    let Some(document) = &page.document else {
        return Vec::new();
    };

    tracing::debug!(
        "{}: {} title candidates, {} content candidates",
        page.url,
        title_candidates(document, scoring).len(),
        content_candidates(document, scoring).len()
    );

    title_candidate(document, scoring, &page.url)
        .into_iter()
        .chain(content_candidate(document, scoring, &page.url))
        .collect()
}

/// Runs the heuristic stage over the homepage and article samples
///
/// # Arguments
///
/// * `homepage` - The fetched homepage
/// * `samples` - Fetched article pages (failed fetches contribute nothing)
/// * `base_domain` - Domain of the site being analyzed
/// * `scoring` - Heuristic constants
///
/// # Returns
///
/// A `SelectorSet` with `method = Automatic`. Fields that no page produced a
/// candidate for carry their fixed fallback selector.
pub fn detect_selectors(
    homepage: &Page,
    samples: &[Page],
    base_domain: &str,
    scoring: &ScoringConfig,
) -> SelectorSet {
    tracing::info!("Detecting selectors from {} article pages", samples.len());

    let mut candidates = Vec::new();

    if let (Some(document), Ok(page_url)) = (&homepage.document, Url::parse(&homepage.url)) {
        let pattern =
            find_link_pattern(document, &page_url, base_domain, scoring.container_depth)
                .unwrap_or_else(LinkPattern::fallback);
        tracing::info!(
            "Article link pattern found: {} (appears {} times)",
            pattern.link_selector,
            pattern.count
        );
        if pattern.count > 0 {
            candidates.push(CandidateSelector {
                field: Field::ArticleLinks,
                selector: pattern.link_selector,
                score: pattern.count as f64,
                source_page: homepage.url.clone(),
            });
        }
    }

    for sample in samples {
        candidates.extend(score_article(sample, scoring));
    }

    let mut winners = aggregate(&candidates);
    let mut take = |field: Field| winners.remove(&field).unwrap_or_default();
    let selectors = SelectorSet::automatic(
        take(Field::ArticleLinks),
        take(Field::Title),
        take(Field::Content),
    );

    tracing::info!("Title selector detected: {}", selectors.title);
    tracing::info!("Content selector detected: {}", selectors.content);
    selectors
}
