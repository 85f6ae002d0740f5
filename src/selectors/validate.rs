//! Selector validation against real pages
//!
//! A selector is valid on a page when it matches at least one element.
//! Everything here is a pure function of its inputs.

use crate::crawler::Page;
use crate::selectors::types::Field;
use scraper::{Html, Selector};
use std::collections::BTreeMap;

/// Result of validating selectors on one page
pub type ValidationResult = BTreeMap<Field, bool>;

/// Returns true iff the selector parses and matches at least one element
pub fn selector_matches(document: &Html, css: &str) -> bool {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).next().is_some(),
        Err(e) => {
            tracing::debug!("Invalid selector {:?}: {}", css, e);
            false
        }
    }
}

/// Validates each selector against a parsed page
///
/// An unparseable selector is reported as `false` for its own field.
///
/// # Example
///
/// ```
/// use article_scout::selectors::validate;
/// use article_scout::Field;
/// use scraper::Html;
/// use std::collections::BTreeMap;
///
/// let doc = Html::parse_document("<article><h1>Hi</h1></article>");
/// let selectors = BTreeMap::from([
///     (Field::Title, "article h1".to_string()),
///     (Field::Content, "div.body".to_string()),
/// ]);
/// let result = validate(&doc, &selectors);
/// assert!(result[&Field::Title]);
/// assert!(!result[&Field::Content]);
/// ```
pub fn validate(document: &Html, selectors: &BTreeMap<Field, String>) -> ValidationResult {
    selectors
        .iter()
        .map(|(field, css)| (*field, selector_matches(document, css)))
        .collect()
}

/// Validates selectors against a fetched page
///
/// A page without a DOM tree fails every field.
pub fn validate_page(page: &Page, selectors: &BTreeMap<Field, String>) -> ValidationResult {
    match &page.document {
        Some(document) => validate(document, selectors),
        None => selectors.keys().map(|field| (*field, false)).collect(),
    }
}

/// Fields that failed validation, in field order
pub fn failed_fields(result: &ValidationResult) -> Vec<Field> {
    result
        .iter()
        .filter(|(_, ok)| !**ok)
        .map(|(field, _)| *field)
        .collect()
}
