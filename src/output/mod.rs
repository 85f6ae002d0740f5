//! Output module for discovery reports
//!
//! This module handles:
//! - Serializing discovery reports to JSON
//! - Generating markdown summaries of discovery results

mod markdown;

pub use markdown::{format_markdown_summary, write_markdown_summary};

use crate::discovery::DiscoveryReport;
use crate::ScoutError;
use std::path::Path;

/// Serializes a discovery report as pretty-printed JSON
pub fn to_json(report: &DiscoveryReport) -> Result<String, ScoutError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes a discovery report as JSON to a file
///
/// # Returns
///
/// * `Ok(())` - Report written
/// * `Err(ScoutError)` - Serialization or IO failure
pub fn write_report(report: &DiscoveryReport, output_path: &Path) -> Result<(), ScoutError> {
    let json = to_json(report)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::SelectorSet;
    use chrono::Utc;

    fn report() -> DiscoveryReport {
        DiscoveryReport {
            site_id: "example_com".to_string(),
            homepage_url: "https://example.com/".to_string(),
            selectors: SelectorSet::failed("No article pages could be fetched for analysis"),
            article_urls: vec![],
            total_articles: 0,
            pages_crawled: 1,
            samples_analyzed: 0,
            discovered_at: Utc::now(),
        }
    }

    #[test]
    fn test_to_json_shape() {
        let json = to_json(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["site_id"], "example_com");
        assert_eq!(value["selectors"]["method"], "failed");
        assert_eq!(value["selectors"]["confidence"], "none");
        assert_eq!(value["selectors"]["article_links"], "article a");
        assert_eq!(value["pages_crawled"], 1);
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        write_report(&report(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"total_articles\": 0"));
    }
}
