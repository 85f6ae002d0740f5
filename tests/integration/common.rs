//! Shared fixtures for integration tests

use article_scout::config::Config;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Default configuration with pacing disabled and a short timeout
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.crawler.pacing_ms = 0;
    config.user_agent.timeout_secs = 2;
    config
}

/// Wraps body markup in a minimal document
pub fn page(body: &str) -> String {
    format!(
        "<html><head><title>Test</title></head><body>{}</body></html>",
        body
    )
}

/// `n` paragraphs of filler text
pub fn paragraphs(n: usize) -> String {
    (0..n)
        .map(|i| {
            format!(
                "<p>Paragraph {} of the article, with enough words to look like prose.</p>",
                i
            )
        })
        .collect()
}

/// Article page laid out as `<article><h1/><div class="content">...</div></article>`
pub fn article_with_content_div(n: usize) -> String {
    page(&format!(
        r#"<article><h1>Headline</h1><div class="content">{}</div></article>"#,
        paragraphs(n)
    ))
}

/// Mounts an HTML page at a path
pub async fn mount_html(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts an HTML page that must be requested exactly `times` times
pub async fn mount_html_expect(server: &MockServer, route: &str, html: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

/// Homepage listing `count` articles under `div.post-card` containers
pub fn card_homepage(count: usize) -> String {
    let cards: String = (1..=count)
        .map(|i| {
            format!(
                r#"<div class="post-card"><h2><a href="/posts/story-{}">Story {}</a></h2></div>"#,
                i, i
            )
        })
        .collect();
    page(&cards)
}
