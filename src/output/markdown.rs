//! Markdown summary generation
//!
//! This module renders a human-readable summary of a discovery run:
//! the selectors found, how they were obtained, and the articles seen.

use crate::discovery::DiscoveryReport;
use crate::selectors::Field;
use crate::ScoutError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Article urls listed before the summary truncates
const LISTED_ARTICLES: usize = 20;

/// Writes a markdown summary of a discovery report to a file
///
/// # Arguments
///
/// * `report` - The discovery report
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(ScoutError)` - Failed to write summary
pub fn write_markdown_summary(report: &DiscoveryReport, output_path: &Path) -> Result<(), ScoutError> {
    let markdown = format_markdown_summary(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a discovery report as markdown
pub fn format_markdown_summary(report: &DiscoveryReport) -> String {
    let mut md = String::new();

    md.push_str("# Article-Scout Discovery Summary\n\n");

    md.push_str("## Site\n\n");
    md.push_str(&format!("- **Homepage**: {}\n", report.homepage_url));
    md.push_str(&format!("- **Site ID**: {}\n", report.site_id));
    md.push_str(&format!(
        "- **Discovered**: {}\n\n",
        report.discovered_at.to_rfc3339()
    ));

    md.push_str("## Selectors\n\n");
    md.push_str("| Field | Selector |\n");
    md.push_str("|-------|----------|\n");
    for field in Field::ALL {
        md.push_str(&format!(
            "| {} | `{}` |\n",
            field,
            report.selectors.get(field)
        ));
    }
    md.push('\n');

    md.push_str(&format!("- **Method**: {}\n", report.selectors.method));
    md.push_str(&format!(
        "- **Confidence**: {}\n",
        report.selectors.confidence
    ));
    if !report.selectors.notes.is_empty() {
        md.push_str(&format!("- **Notes**: {}\n", report.selectors.notes));
    }
    md.push('\n');

    md.push_str("## Crawl Statistics\n\n");
    md.push_str(&format!("- **Pages Crawled**: {}\n", report.pages_crawled));
    md.push_str(&format!(
        "- **Articles Found**: {}\n",
        report.total_articles
    ));
    md.push_str(&format!(
        "- **Samples Analyzed**: {}\n\n",
        report.samples_analyzed
    ));

    if !report.article_urls.is_empty() {
        md.push_str("## Articles\n\n");
        for url in report.article_urls.iter().take(LISTED_ARTICLES) {
            md.push_str(&format!("- {}\n", url));
        }
        if report.article_urls.len() > LISTED_ARTICLES {
            md.push_str(&format!(
                "\n... and {} more\n",
                report.article_urls.len() - LISTED_ARTICLES
            ));
        }
        md.push('\n');
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::{Method, SelectorSet};
    use chrono::{TimeZone, Utc};

    fn create_test_report() -> DiscoveryReport {
        let mut selectors = SelectorSet::automatic(
            "div.post-card a".to_string(),
            "article h1".to_string(),
            "article div.content".to_string(),
        );
        selectors.method = Method::LlmRefined;
        selectors.notes = "card layout (refined after validation)".to_string();

        DiscoveryReport {
            site_id: "example_com".to_string(),
            homepage_url: "https://example.com/".to_string(),
            selectors,
            article_urls: (0..25)
                .map(|i| format!("https://example.com/posts/{}", i))
                .collect(),
            total_articles: 25,
            pages_crawled: 4,
            samples_analyzed: 5,
            discovered_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_format_markdown_summary() {
        let markdown = format_markdown_summary(&create_test_report());

        assert!(markdown.contains("# Article-Scout Discovery Summary"));
        assert!(markdown.contains("| title | `article h1` |"));
        assert!(markdown.contains("| content | `article div.content` |"));
        assert!(markdown.contains("- **Method**: llm_refined"));
        assert!(markdown.contains("- **Confidence**: medium"));
        assert!(markdown.contains("refined after validation"));
    }

    #[test]
    fn test_markdown_contains_statistics() {
        let markdown = format_markdown_summary(&create_test_report());

        assert!(markdown.contains("- **Pages Crawled**: 4"));
        assert!(markdown.contains("- **Articles Found**: 25"));
        assert!(markdown.contains("- **Samples Analyzed**: 5"));
    }

    #[test]
    fn test_markdown_truncates_article_list() {
        let markdown = format_markdown_summary(&create_test_report());

        assert!(markdown.contains("https://example.com/posts/19"));
        assert!(!markdown.contains("https://example.com/posts/20\n"));
        assert!(markdown.contains("... and 5 more"));
    }

    #[test]
    fn test_write_markdown_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.md");

        write_markdown_summary(&create_test_report(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Article-Scout Discovery Summary"));
    }
}
