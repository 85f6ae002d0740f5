//! Article-link container detection on the homepage
//!
//! Article listings almost always wrap each link in a repeated card-like
//! container. Finding the most common such container gives a selector that
//! picks out article links and nothing else.

use crate::selectors::aggregate::Tally;
use crate::selectors::css::{class_contains_any, selector_of};
use crate::url::{extract_domain, resolve_link};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Container tags considered when walking up from a link
const CONTAINER_TAGS: [&str; 3] = ["article", "div", "section"];

/// Class terms that mark a container as holding one article teaser
const CONTAINER_TERMS: [&str; 7] = ["article", "post", "card", "item", "entry", "story", "review"];

/// Href fragments that are never article links
const SKIPPED_HREFS: [&str; 4] = ["/about", "/contact", "/terms", "/privacy"];

/// Winning link-container pattern
#[derive(Debug, Clone, PartialEq)]
pub struct LinkPattern {
    /// Selector of the container element, e.g. `div.post-card`
    pub container_selector: String,

    /// Selector of the links inside it, e.g. `div.post-card a`
    pub link_selector: String,

    /// Number of homepage links found under this container
    pub count: usize,
}

impl LinkPattern {
    /// Pattern used when no link sits inside a recognizable container
    pub fn fallback() -> Self {
        Self {
            container_selector: "article".to_string(),
            link_selector: "article a".to_string(),
            count: 0,
        }
    }
}

/// Returns the closest article-like container above a link
fn find_container(link: ElementRef<'_>, depth: usize) -> Option<ElementRef<'_>> {
    link.ancestors()
        .map_while(ElementRef::wrap)
        .take(depth)
        .find(|ancestor| {
            CONTAINER_TAGS.contains(&ancestor.value().name())
                && class_contains_any(*ancestor, &CONTAINER_TERMS)
        })
}

/// Finds the most common container pattern around same-domain links
///
/// # Arguments
///
/// * `homepage` - Parsed homepage
/// * `page_url` - URL the homepage was fetched from (for resolving hrefs)
/// * `base_domain` - Domain of the site being analyzed
/// * `depth` - Number of ancestor levels to inspect above each link
///
/// # Returns
///
/// The plurality container, or `None` if no link had a matching container
pub fn find_link_pattern(
    homepage: &Html,
    page_url: &Url,
    base_domain: &str,
    depth: usize,
) -> Option<LinkPattern> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return None;
    };

    let mut containers = Tally::default();

    for link in homepage.select(&a_selector) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };

        let href_lower = href.to_lowercase();
        if SKIPPED_HREFS.iter().any(|skip| href_lower.contains(skip)) {
            continue;
        }

        let same_domain = resolve_link(href, page_url)
            .and_then(|url| extract_domain(&url))
            .is_some_and(|domain| domain == base_domain);
        if !same_domain {
            continue;
        }

        if let Some(container) = find_container(link, depth) {
            containers.record(&selector_of(container));
        }
    }

    let (container_selector, count) = containers.winner()?;
    tracing::debug!(
        "Article link container {} appears {} times",
        container_selector,
        count
    );

    Some(LinkPattern {
        link_selector: format!("{} a", container_selector),
        container_selector: container_selector.to_string(),
        count,
    })
}
