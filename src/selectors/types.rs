/// Selector data model shared by scoring, aggregation and refinement
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which part of an article page a selector targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Links from the homepage to individual articles
    ArticleLinks,

    /// The article headline
    Title,

    /// The article body
    Content,
}

impl Field {
    /// All fields in report order
    pub const ALL: [Field; 3] = [Field::ArticleLinks, Field::Title, Field::Content];

    /// Converts the field to its wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArticleLinks => "article_links",
            Self::Title => "title",
            Self::Content => "content",
        }
    }

    /// Parses a wire name back into a field
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "article_links" => Some(Self::ArticleLinks),
            "title" => Some(Self::Title),
            "content" => Some(Self::Content),
            _ => None,
        }
    }

    /// Selector used when no page produced a candidate
    pub fn fallback_selector(&self) -> &'static str {
        match self {
            Self::ArticleLinks => "article a",
            Self::Title => "h1",
            Self::Content => "article",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a selector set was arrived at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Heuristic scoring only
    Automatic,

    /// Adopted from the advisor's enhancement reply
    LlmEnhanced,

    /// A corrective round with the advisor was attempted
    LlmRefined,

    /// No article sample could be analyzed
    Failed,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Automatic => "automatic",
            Self::LlmEnhanced => "llm_enhanced",
            Self::LlmRefined => "llm_refined",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse confidence label attached to a finalized selector set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
    None,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }

    /// Reads a self-reported confidence label
    ///
    /// Labels are matched case-insensitively; anything unrecognized is
    /// treated as `Medium`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            "none" => Self::None,
            _ => Self::Medium,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A proposed selector scoped to one sampled page
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSelector {
    pub field: Field,
    pub selector: String,
    pub score: f64,
    pub source_page: String,
}

/// The three finalized selectors plus how they were obtained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorSet {
    pub article_links: String,
    pub title: String,
    pub content: String,
    pub method: Method,
    pub confidence: Confidence,
    pub notes: String,
}

impl SelectorSet {
    /// Heuristic result with the stock automatic metadata
    pub fn automatic(article_links: String, title: String, content: String) -> Self {
        Self {
            article_links,
            title,
            content,
            method: Method::Automatic,
            confidence: Confidence::Medium,
            notes: "Automatic detection completed".to_string(),
        }
    }

    /// Fixed default selectors, used when nothing could be analyzed
    pub fn failed(notes: impl Into<String>) -> Self {
        Self {
            article_links: Field::ArticleLinks.fallback_selector().to_string(),
            title: Field::Title.fallback_selector().to_string(),
            content: Field::Content.fallback_selector().to_string(),
            method: Method::Failed,
            confidence: Confidence::None,
            notes: notes.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::ArticleLinks => &self.article_links,
            Field::Title => &self.title,
            Field::Content => &self.content,
        }
    }

    pub fn set(&mut self, field: Field, selector: impl Into<String>) {
        let selector = selector.into();
        match field {
            Field::ArticleLinks => self.article_links = selector,
            Field::Title => self.title = selector,
            Field::Content => self.content = selector,
        }
    }

    /// The selector strings keyed by field
    pub fn selectors(&self) -> BTreeMap<Field, String> {
        Field::ALL
            .iter()
            .map(|field| (*field, self.get(*field).to_string()))
            .collect()
    }
}
