//! DOM helpers shared by the selector scorers
//!
//! Covers selector-string generation for an element, text density, paragraph
//! counting and class matching.

#![allow(clippy::expect_used)]

use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

/// Classes that look generated (numbers, ids) and would not survive a rebuild
static VOLATILE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d|uuid|unique|id-").expect("valid regex"));

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid selector"));

/// Generates a CSS selector for an element
///
/// Prefers `tag#id`, then `tag.class1.class2` using only stable classes,
/// then the bare tag name.
///
/// # Example
///
/// ```
/// use article_scout::selectors::selector_of;
/// use scraper::{Html, Selector};
///
/// let doc = Html::parse_fragment(r#"<div class="post-body x42">Hi</div>"#);
/// let div = doc.select(&Selector::parse("div").unwrap()).next().unwrap();
/// assert_eq!(selector_of(div), "div.post-body");
/// ```
pub fn selector_of(element: ElementRef<'_>) -> String {
    let value = element.value();
    let tag = value.name();

    if let Some(id) = value.id().filter(|id| !id.is_empty()) {
        return format!("{}#{}", tag, id);
    }

    let classes: Vec<&str> = value
        .classes()
        .filter(|class| !VOLATILE_CLASS.is_match(class))
        .collect();
    if !classes.is_empty() {
        return format!("{}.{}", tag, classes.join("."));
    }

    tag.to_string()
}

/// Visible text with every text node trimmed and concatenated
pub fn visible_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// Ratio of visible text length to serialized markup length
///
/// Returns 0 for an element that serializes to nothing.
pub fn text_density(element: ElementRef<'_>) -> f64 {
    let markup_len = element.html().chars().count();
    if markup_len == 0 {
        return 0.0;
    }
    let text_len = visible_text(element).chars().count();
    (text_len as f64 / markup_len as f64).min(1.0)
}

/// Number of `<p>` elements nested anywhere below the element
pub fn paragraph_count(element: ElementRef<'_>) -> usize {
    element.select(&PARAGRAPH).count()
}

/// Space-joined, lower-cased class attribute
pub fn class_string(element: ElementRef<'_>) -> String {
    element
        .value()
        .classes()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Returns true if the lower-cased class string contains any of the terms
pub fn class_contains_any(element: ElementRef<'_>, terms: &[&str]) -> bool {
    let classes = class_string(element);
    terms.iter().any(|term| classes.contains(term))
}

/// Returns true if any single class matches the pattern
pub fn any_class_matches(element: ElementRef<'_>, pattern: &Regex) -> bool {
    element.value().classes().any(|class| pattern.is_match(class))
}
