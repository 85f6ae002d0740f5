//! Content selector candidates for one article page
//!
//! Each candidate block is scored by how many paragraphs it holds and how
//! text-dense it is. Blocks with fewer than the minimum number of paragraphs
//! are never candidates.

#![allow(clippy::expect_used)]

use crate::config::ScoringConfig;
use crate::selectors::css::{any_class_matches, paragraph_count, selector_of, text_density};
use crate::selectors::types::{CandidateSelector, Field};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Matches every class in the content list (content, article-content,
/// post-content, body, article-body, post-body, text, entry-content)
static CONTENT_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)content|body|text").expect("valid regex"));

static ARTICLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article").expect("valid selector"));

static MAIN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("main").expect("valid selector"));

static DIV: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div").expect("valid selector"));

fn score(element: ElementRef<'_>, paragraph_weight: f64, scoring: &ScoringConfig) -> f64 {
    paragraph_count(element) as f64 * paragraph_weight
        + text_density(element) * scoring.density_weight
}

fn content_divs<'a>(root: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    root.select(&DIV)
        .filter(|div| any_class_matches(*div, &CONTENT_CLASS))
}

/// Collects every scored content candidate on a page as `(selector, score)`
///
/// Candidates are listed as `article` blocks, then `main`, then classed
/// divs, each group in document order.
pub fn content_candidates(document: &Html, scoring: &ScoringConfig) -> Vec<(String, f64)> {
    let min = scoring.min_paragraphs;
    let mut candidates = Vec::new();

    for article in document.select(&ARTICLE) {
        if paragraph_count(article) < min {
            continue;
        }

        let mut nested = content_divs(article)
            .filter(|div| paragraph_count(*div) >= min)
            .peekable();

        if nested.peek().is_none() {
            candidates.push((
                "article".to_string(),
                score(article, scoring.article_paragraph_weight, scoring),
            ));
            continue;
        }

        for div in nested {
            candidates.push((
                format!("article {}", selector_of(div)),
                score(div, scoring.article_div_paragraph_weight, scoring),
            ));
        }
    }

    for main in document.select(&MAIN) {
        if paragraph_count(main) >= min {
            candidates.push((
                "main".to_string(),
                score(main, scoring.main_paragraph_weight, scoring),
            ));
        }
    }

    for div in document.select(&DIV) {
        if any_class_matches(div, &CONTENT_CLASS) && paragraph_count(div) >= min {
            candidates.push((
                selector_of(div),
                score(div, scoring.class_div_paragraph_weight, scoring),
            ));
        }
    }

    candidates
}

/// Picks the page's content selector
///
/// The highest score wins; equal scores keep the earliest candidate.
/// Returns `None` if no block holds enough paragraphs.
pub fn content_candidate(
    document: &Html,
    scoring: &ScoringConfig,
    source_page: &str,
) -> Option<CandidateSelector> {
    let mut best: Option<(String, f64)> = None;
    for (selector, score) in content_candidates(document, scoring) {
        if best.as_ref().map_or(true, |(_, top)| score > *top) {
            best = Some((selector, score));
        }
    }

    best.map(|(selector, score)| CandidateSelector {
        field: Field::Content,
        selector,
        score,
        source_page: source_page.to_string(),
    })
}
