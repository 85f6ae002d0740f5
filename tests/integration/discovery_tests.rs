//! End-to-end discovery without an advisor

use crate::common::{
    article_with_content_div, card_homepage, mount_html, mount_html_expect, page, paragraphs,
    test_config,
};
use article_scout::output::{format_markdown_summary, to_json};
use article_scout::{discover, discover_cached, Confidence, Method, SelectorRegistry};
use wiremock::MockServer;

async fn mount_card_site(server: &MockServer, articles: usize) {
    mount_html(server, "/", card_homepage(articles)).await;
    for i in 1..=articles {
        mount_html(
            server,
            &format!("/posts/story-{}", i),
            article_with_content_div(4),
        )
        .await;
    }
}

#[tokio::test]
async fn test_discovers_card_site_selectors() {
    let server = MockServer::start().await;
    mount_card_site(&server, 8).await;

    let report = discover(&server.uri(), &test_config(), None)
        .await
        .expect("discovery should succeed");

    assert_eq!(report.total_articles, 8);
    assert_eq!(report.samples_analyzed, 5);
    assert_eq!(report.pages_crawled, 1);
    assert_eq!(report.selectors.article_links, "div.post-card a");
    assert_eq!(report.selectors.title, "article h1");
    assert_eq!(report.selectors.content, "article div.content");
    assert_eq!(report.selectors.method, Method::Automatic);
    assert_eq!(report.selectors.confidence, Confidence::Medium);
    assert_eq!(report.selectors.notes, "Automatic detection completed");
}

#[tokio::test]
async fn test_content_selector_follows_majority_layout() {
    let server = MockServer::start().await;
    mount_html(&server, "/", card_homepage(3)).await;
    mount_html(&server, "/posts/story-1", article_with_content_div(5)).await;
    mount_html(&server, "/posts/story-2", article_with_content_div(5)).await;
    mount_html(
        &server,
        "/posts/story-3",
        page(&format!(
            r#"<h1 class="post-title">Odd one</h1><div class="post-body">{}</div>"#,
            paragraphs(3)
        )),
    )
    .await;

    let report = discover(&server.uri(), &test_config(), None)
        .await
        .expect("discovery should succeed");

    assert_eq!(report.samples_analyzed, 3);
    assert_eq!(report.selectors.content, "article div.content");
    assert_eq!(report.selectors.title, "article h1");
}

#[tokio::test]
async fn test_discovery_is_deterministic() {
    let server = MockServer::start().await;
    mount_card_site(&server, 6).await;

    let config = test_config();
    let first = discover(&server.uri(), &config, None).await.expect("first run");
    let second = discover(&server.uri(), &config, None).await.expect("second run");

    assert_eq!(first.selectors, second.selectors);
    assert_eq!(first.article_urls, second.article_urls);
}

#[tokio::test]
async fn test_only_sample_articles_are_fetched() {
    let server = MockServer::start().await;
    mount_html_expect(&server, "/", card_homepage(7), 1).await;
    for i in 1..=5 {
        mount_html_expect(
            &server,
            &format!("/posts/story-{}", i),
            article_with_content_div(3),
            1,
        )
        .await;
    }
    for i in 6..=7 {
        mount_html_expect(
            &server,
            &format!("/posts/story-{}", i),
            article_with_content_div(3),
            0,
        )
        .await;
    }

    let report = discover(&server.uri(), &test_config(), None)
        .await
        .expect("discovery should succeed");
    assert_eq!(report.total_articles, 7);
}

#[tokio::test]
async fn test_registry_serves_repeat_lookups() {
    let server = MockServer::start().await;
    mount_html_expect(&server, "/", card_homepage(2), 1).await;
    for i in 1..=2 {
        mount_html(
            &server,
            &format!("/posts/story-{}", i),
            article_with_content_div(3),
        )
        .await;
    }

    let registry = SelectorRegistry::new();
    let config = test_config();

    let first = discover_cached(&server.uri(), &config, None, &registry)
        .await
        .expect("first lookup");
    let second = discover_cached(&server.uri(), &config, None, &registry)
        .await
        .expect("second lookup");

    assert_eq!(first, second);
    assert_eq!(registry.len(), 1);

    registry.clear();
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_report_renders() {
    let server = MockServer::start().await;
    mount_card_site(&server, 3).await;

    let report = discover(&server.uri(), &test_config(), None)
        .await
        .expect("discovery should succeed");

    let json = to_json(&report).expect("report serializes");
    assert!(json.contains("\"method\": \"automatic\""));

    let markdown = format_markdown_summary(&report);
    assert!(markdown.contains("`div.post-card a`"));
    assert!(markdown.contains("- **Articles Found**: 3"));
}
