//! Link classification for discovery crawls
//!
//! Every same-domain link found on a crawled page is run through three
//! independent checks: article eligibility, pagination, and content-section
//! index. Exclusion rules only govern article eligibility; a `/page/2` link
//! is never an article but is still pagination.

#![allow(clippy::expect_used)]

use crate::url::domain::extract_domain;
use regex::RegexSet;
use serde::Serialize;
use std::sync::LazyLock;
use url::Url;

/// Path fragments that disqualify a link from being an article
static EXCLUDE_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"/about",
        r"/contact",
        r"/privacy",
        r"/terms",
        r"/category",
        r"/categories",
        r"/tag",
        r"/tags",
        r"/author",
        r"/authors",
        r"/page/\d+",
        r"/(blog|articles|posts|reviews|stories)/?$",
    ])
    .expect("EXCLUDE_PATTERNS regex set")
});

/// Path fragments that mark a link as an article
static INCLUDE_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"/articles?/",
        r"/posts?/",
        r"/blog/",
        r"/news/",
        r"/reviews?/",
        r"/stories/",
        r"/\d{4}/\d{2}/",
    ])
    .expect("INCLUDE_PATTERNS regex set")
});

static PAGINATION_PATTERN: LazyLock<RegexSet> =
    LazyLock::new(|| RegexSet::new([r"/page/\d+"]).expect("PAGINATION_PATTERN regex set"));

/// Bare index pages that list articles
static SECTION_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"/blog/?$",
        r"/articles/?$",
        r"/posts/?$",
        r"/news/?$",
        r"/reviews/?$",
        r"/stories/?$",
    ])
    .expect("SECTION_PATTERNS regex set")
});

/// Primary category of a classified link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkCategory {
    Article,
    Pagination,
    ContentSection,
    Excluded,
}

/// Outcome of the three independent link checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkFlags {
    /// Link is eligible as an article (inclusion matched, no exclusion)
    pub article: bool,

    /// Link is a numbered `/page/N` listing page
    pub pagination: bool,

    /// Link is a bare section index such as `/blog/`
    pub content_section: bool,
}

/// A classified same-domain link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkClassification {
    pub url: Url,
    pub category: LinkCategory,
    pub flags: LinkFlags,
}

impl LinkFlags {
    /// Derives the primary category; article eligibility wins, then
    /// pagination, then content section
    pub fn category(&self) -> LinkCategory {
        if self.article {
            LinkCategory::Article
        } else if self.pagination {
            LinkCategory::Pagination
        } else if self.content_section {
            LinkCategory::ContentSection
        } else {
            LinkCategory::Excluded
        }
    }
}

/// Returns true if the path matches any article exclusion rule
pub fn is_excluded_path(path: &str) -> bool {
    EXCLUDE_PATTERNS.is_match(&path.to_lowercase())
}

/// Runs the three link checks against a URL path
pub fn link_flags(path: &str) -> LinkFlags {
    let path = path.to_lowercase();
    let excluded = is_excluded_path(&path);

    LinkFlags {
        article: !excluded && INCLUDE_PATTERNS.is_match(&path),
        pagination: PAGINATION_PATTERN.is_match(&path),
        content_section: SECTION_PATTERNS.is_match(&path),
    }
}

/// Classifies a link relative to the crawled site
///
/// Cross-domain links are ignored and yield `None`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use article_scout::url::{classify_link, LinkCategory};
///
/// let url = Url::parse("https://example.com/blog/first-post").unwrap();
/// let link = classify_link(&url, "example.com").unwrap();
/// assert_eq!(link.category, LinkCategory::Article);
///
/// let url = Url::parse("https://example.com/about/blog/team").unwrap();
/// let link = classify_link(&url, "example.com").unwrap();
/// assert_eq!(link.category, LinkCategory::Excluded);
///
/// let url = Url::parse("https://other.com/blog/first-post").unwrap();
/// assert!(classify_link(&url, "example.com").is_none());
/// ```
pub fn classify_link(url: &Url, base_domain: &str) -> Option<LinkClassification> {
    if extract_domain(url).as_deref() != Some(base_domain) {
        return None;
    }

    let flags = link_flags(url.path());
    Some(LinkClassification {
        url: url.clone(),
        category: flags.category(),
        flags,
    })
}
