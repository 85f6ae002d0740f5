//! Advisor reply parsing
//!
//! Replies are free text that should contain a JSON object. Parsing is
//! two-tier: the whole reply as JSON first, then the first fenced code block
//! holding an object. Field extraction afterwards is lenient; anything
//! missing or of the wrong type is simply absent.

#![allow(clippy::expect_used)]

use crate::refine::advisor::AdvisorError;
use crate::selectors::{Confidence, Field};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static FENCED_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)```(?:json)?\s*(\{.*?\})\s*```").expect("valid regex"));

/// Extracts the JSON object from an advisor reply
///
/// # Returns
///
/// * `Ok(Map)` - The reply object
/// * `Err(AdvisorError::Parse)` - Neither tier produced an object
/// * `Err(AdvisorError::Api)` - The object carries an `error` key
pub fn parse_reply_object(reply: &str) -> Result<Map<String, Value>, AdvisorError> {
    let trimmed = reply.trim();

    let object = match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(object)) => Some(object),
        _ => FENCED_OBJECT
            .captures(trimmed)
            .and_then(|captures| captures.get(1))
            .and_then(|block| serde_json::from_str::<Value>(block.as_str()).ok())
            .and_then(|value| match value {
                Value::Object(object) => Some(object),
                _ => None,
            }),
    };

    let object = object.ok_or_else(|| {
        let preview: String = trimmed.chars().take(200).collect();
        AdvisorError::Parse(format!("No JSON object in reply: {}", preview))
    })?;

    if let Some(error) = object.get("error") {
        let message = error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(AdvisorError::Api(message));
    }

    Ok(object)
}

/// Reads a `{field: selector}` object, keeping known fields with string values
fn selector_map(value: Option<&Value>) -> BTreeMap<Field, String> {
    let Some(Value::Object(object)) = value else {
        return BTreeMap::new();
    };

    object
        .iter()
        .filter_map(|(key, value)| {
            let field = Field::from_key(key)?;
            let selector = value.as_str()?.trim();
            (!selector.is_empty()).then(|| (field, selector.to_string()))
        })
        .collect()
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Interpreted enhancement reply
#[derive(Debug, Clone, PartialEq)]
pub struct EnhanceReply {
    pub selectors: BTreeMap<Field, String>,
    pub confidence: Option<Confidence>,
    pub notes: Option<String>,
    pub potential_issues: Vec<String>,
}

impl EnhanceReply {
    pub fn parse(reply: &str) -> Result<Self, AdvisorError> {
        let object = parse_reply_object(reply)?;

        let potential_issues = match object.get("potential_issues") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Some(Value::String(issue)) => vec![issue.clone()],
            _ => Vec::new(),
        };

        Ok(Self {
            selectors: selector_map(object.get("selectors")),
            confidence: string_field(&object, "confidence").map(|c| Confidence::from_label(&c)),
            notes: string_field(&object, "notes"),
            potential_issues,
        })
    }
}

/// Interpreted correction reply
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionReply {
    pub corrected_selectors: BTreeMap<Field, String>,
    pub explanation: Option<String>,
}

impl CorrectionReply {
    pub fn parse(reply: &str) -> Result<Self, AdvisorError> {
        let object = parse_reply_object(reply)?;
        Ok(Self {
            corrected_selectors: selector_map(object.get("corrected_selectors")),
            explanation: string_field(&object, "explanation"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_json() {
        let reply = r#"{"selectors": {"article_links": "div.card a", "title": "h1.title", "content": "div.body"}, "confidence": "high", "notes": "clean markup", "potential_issues": ["lazy images"]}"#;
        let parsed = EnhanceReply::parse(reply).unwrap();
        assert_eq!(parsed.selectors[&Field::Title], "h1.title");
        assert_eq!(parsed.confidence, Some(Confidence::High));
        assert_eq!(parsed.notes.as_deref(), Some("clean markup"));
        assert_eq!(parsed.potential_issues, vec!["lazy images".to_string()]);
    }

    #[test]
    fn test_fenced_block() {
        let reply = "Sure! Here you go:\n```JSON\n{\"corrected_selectors\": {\"title\": \"h1.post-title\"}, \"explanation\": \"class renamed\"}\n```\nGood luck.";
        let parsed = CorrectionReply::parse(reply).unwrap();
        assert_eq!(parsed.corrected_selectors[&Field::Title], "h1.post-title");
        assert_eq!(parsed.explanation.as_deref(), Some("class renamed"));
    }

    #[test]
    fn test_unlabelled_fence() {
        let reply = "```\n{\"selectors\": {\"content\": \"article\"}}\n```";
        let parsed = EnhanceReply::parse(reply).unwrap();
        assert_eq!(parsed.selectors[&Field::Content], "article");
        assert_eq!(parsed.confidence, None);
    }

    #[test]
    fn test_free_text_is_parse_error() {
        let result = EnhanceReply::parse("I think the selectors look fine overall.");
        assert!(matches!(result, Err(AdvisorError::Parse(_))));
    }

    #[test]
    fn test_error_object() {
        let result = EnhanceReply::parse(r#"{"error": "rate limited"}"#);
        assert!(matches!(result, Err(AdvisorError::Api(msg)) if msg == "rate limited"));
    }

    #[test]
    fn test_unknown_and_malformed_fields_dropped() {
        let reply = r#"{"corrected_selectors": {"author": "span.by", "title": 3, "content": "  "}}"#;
        let parsed = CorrectionReply::parse(reply).unwrap();
        assert!(parsed.corrected_selectors.is_empty());
    }
}
