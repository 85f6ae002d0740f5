//! Title selector candidates for one article page

#![allow(clippy::expect_used)]

use crate::config::ScoringConfig;
use crate::selectors::css::{any_class_matches, class_contains_any, selector_of};
use crate::selectors::types::{CandidateSelector, Field};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

const TITLE_CLASS_TERMS: [&str; 3] = ["title", "heading", "headline"];

static SUBHEADING_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)title|heading").expect("valid regex"));

static SEMANTIC_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article, main").expect("valid selector"));

static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").expect("valid selector"));

static SUBHEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2, h3").expect("valid selector"));

/// Collects every title candidate on a page as `(selector, priority)`
///
/// Candidates are listed tier by tier, each tier in document order:
/// `h1` inside `article`/`main`, then classed `h1`, then any `h1`, then
/// classed `h2`/`h3`.
pub fn title_candidates(document: &Html, scoring: &ScoringConfig) -> Vec<(String, u8)> {
    let mut candidates = Vec::new();

    for container in document.select(&SEMANTIC_CONTAINER) {
        let qualified = format!("{} h1", container.value().name());
        for _ in container.select(&H1) {
            candidates.push((qualified.clone(), scoring.semantic_title_priority));
        }
    }

    for h1 in document.select(&H1) {
        if class_contains_any(h1, &TITLE_CLASS_TERMS) {
            candidates.push((selector_of(h1), scoring.classed_title_priority));
        }
    }

    for _ in document.select(&H1) {
        candidates.push(("h1".to_string(), scoring.fallback_title_priority));
    }

    for heading in document.select(&SUBHEADING) {
        if any_class_matches(heading, &SUBHEADING_CLASS) {
            candidates.push((selector_of(heading), scoring.fallback_title_priority));
        }
    }

    candidates
}

/// Picks the page's title selector
///
/// The highest priority wins; among equal priorities the first candidate
/// listed wins. Returns `None` if the page has no heading candidates.
pub fn title_candidate(
    document: &Html,
    scoring: &ScoringConfig,
    source_page: &str,
) -> Option<CandidateSelector> {
    let mut best: Option<(String, u8)> = None;
    for (selector, priority) in title_candidates(document, scoring) {
        if best.as_ref().map_or(true, |(_, top)| priority > *top) {
            best = Some((selector, priority));
        }
    }

    best.map(|(selector, priority)| CandidateSelector {
        field: Field::Title,
        selector,
        score: f64::from(priority),
        source_page: source_page.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(html: &str) -> Option<String> {
        let doc = Html::parse_document(html);
        title_candidate(&doc, &ScoringConfig::default(), "https://example.com/posts/1")
            .map(|c| c.selector)
    }

    #[test]
    fn test_semantic_container_wins() {
        let html = r#"<html><body>
            <h1 class="site-title">Site</h1>
            <article><h1 class="entry-title">Post</h1></article>
        </body></html>"#;
        assert_eq!(pick(html).as_deref(), Some("article h1"));
    }

    #[test]
    fn test_classed_h1() {
        let html = r#"<html><body><div><h1 class="Headline main-7">Post</h1></div></body></html>"#;
        assert_eq!(pick(html).as_deref(), Some("h1.Headline"));
    }

    #[test]
    fn test_bare_h1_fallback() {
        let html = r#"<html><body><h2 class="post-title">Sub</h2><h1>Post</h1></body></html>"#;
        assert_eq!(pick(html).as_deref(), Some("h1"));
    }

    #[test]
    fn test_classed_subheading() {
        let html = r#"<html><body><h2 class="post-title">Post</h2></body></html>"#;
        assert_eq!(pick(html).as_deref(), Some("h2.post-title"));
    }

    #[test]
    fn test_document_order_breaks_ties() {
        let html = r#"<html><body>
            <main><h1>One</h1></main>
            <article><h1>Two</h1></article>
        </body></html>"#;
        assert_eq!(pick(html).as_deref(), Some("main h1"));
    }

    #[test]
    fn test_no_candidates() {
        assert_eq!(pick("<html><body><p>No headings</p></body></html>"), None);
    }
}
