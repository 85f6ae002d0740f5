//! HTML parser for extracting and classifying links
//!
//! This module handles walking a parsed page to extract:
//! - Links to follow (from `<a href>` tags)
//! - Their classification relative to the crawled site
//! - A bounded markup sample for downstream prompts

use crate::url::{classify_link, resolve_link, LinkClassification};
use scraper::{Html, Selector};
use url::Url;

/// Extracts all valid links from the HTML document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs and fragment-only anchors
///
/// Relative hrefs are resolved against `page_url`.
///
/// # Example
///
/// ```
/// use article_scout::crawler::extract_links;
/// use scraper::Html;
/// use url::Url;
///
/// let doc = Html::parse_document(r#"<a href="/blog/post-1">One</a>"#);
/// let base = Url::parse("https://example.com/").unwrap();
/// let links = extract_links(&doc, &base);
/// assert_eq!(links[0].as_str(), "https://example.com/blog/post-1");
/// ```
pub fn extract_links(document: &Html, page_url: &Url) -> Vec<Url> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, page_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Extracts and classifies every same-domain link on a page
///
/// Cross-domain links are dropped before classification.
pub fn classify_page_links(
    document: &Html,
    page_url: &Url,
    base_domain: &str,
) -> Vec<LinkClassification> {
    extract_links(document, page_url)
        .iter()
        .filter_map(|link| classify_link(link, base_domain))
        .collect()
}

/// Returns at most `max_chars` characters of the serialized document
pub fn markup_sample(document: &Html, max_chars: usize) -> String {
    truncate_chars(&document.html(), max_chars)
}

/// Truncates a string to at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
