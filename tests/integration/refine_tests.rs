//! Discovery with an advisor speaking the chat completions protocol

use crate::common::{article_with_content_div, card_homepage, mount_html, test_config};
use article_scout::config::AdvisorConfig;
use article_scout::{discover, ChatAdvisor, Confidence, Method};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-test",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    }))
}

fn advisor_for(server: &MockServer) -> ChatAdvisor {
    let config = AdvisorConfig {
        base_url: format!("{}/v1", server.uri()),
        model: "test/model".to_string(),
        api_key_env: "UNUSED".to_string(),
        temperature: 0.3,
    };
    ChatAdvisor::new("test-key", &config)
}

async fn mount_site(server: &MockServer) {
    mount_html(server, "/", card_homepage(3)).await;
    for i in 1..=3 {
        mount_html(
            server,
            &format!("/posts/story-{}", i),
            article_with_content_div(4),
        )
        .await;
    }
}

#[tokio::test]
async fn test_failed_title_triggers_single_correction() {
    let site = MockServer::start().await;
    mount_site(&site).await;

    let api = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("validate/improve"))
        .respond_with(chat_reply(
            r#"```json
{"selectors": {"article_links": "div.post-card a", "title": "h1.article-headline", "content": "article div.content"}, "confidence": "high", "notes": "card listing", "potential_issues": []}
```"#,
        ))
        .expect(1)
        .mount(&api)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("failed to find elements"))
        .respond_with(chat_reply(
            r#"{"corrected_selectors": {"title": "article h1"}, "explanation": "no such class"}"#,
        ))
        .expect(1)
        .mount(&api)
        .await;

    let advisor = advisor_for(&api);
    let report = discover(&site.uri(), &test_config(), Some(&advisor))
        .await
        .expect("discovery should succeed");

    assert_eq!(report.selectors.method, Method::LlmRefined);
    assert_eq!(report.selectors.confidence, Confidence::High);
    assert_eq!(report.selectors.title, "article h1");
    assert_eq!(report.selectors.content, "article div.content");
    assert_eq!(
        report.selectors.notes,
        "card listing (refined after validation)"
    );

    let requests = api.received_requests().await.expect("request recording");
    let correction = requests
        .iter()
        .find(|r| String::from_utf8_lossy(&r.body).contains("failed to find elements"))
        .expect("a correction request");
    let body = String::from_utf8_lossy(&correction.body);
    assert!(body.contains("h1.article-headline"));
    assert!(!body.contains("div.post-card a"));
}

#[tokio::test]
async fn test_free_text_reply_keeps_automatic_selectors() {
    let site = MockServer::start().await;
    mount_site(&site).await;

    let api = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(chat_reply(
            "The selectors you detected look fine; I would keep them as they are.",
        ))
        .expect(1)
        .mount(&api)
        .await;

    let advisor = advisor_for(&api);
    let report = discover(&site.uri(), &test_config(), Some(&advisor))
        .await
        .expect("discovery should succeed");

    assert_eq!(report.selectors.method, Method::Automatic);
    assert_eq!(report.selectors.article_links, "div.post-card a");
    assert_eq!(report.selectors.title, "article h1");
    assert_eq!(report.selectors.content, "article div.content");
}

#[tokio::test]
async fn test_advisor_outage_keeps_automatic_selectors() {
    let site = MockServer::start().await;
    mount_site(&site).await;

    let api = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&api)
        .await;

    let advisor = advisor_for(&api);
    let report = discover(&site.uri(), &test_config(), Some(&advisor))
        .await
        .expect("discovery should succeed");

    assert_eq!(report.selectors.method, Method::Automatic);
    assert_eq!(report.selectors.confidence, Confidence::Medium);
}

#[tokio::test]
async fn test_valid_enhancement_skips_correction() {
    let site = MockServer::start().await;
    mount_site(&site).await;

    let api = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(chat_reply(
            r#"{"selectors": {"article_links": ".post-card h2 a", "title": "h1", "content": "div.content"}, "confidence": "low", "notes": "simple layout"}"#,
        ))
        .expect(1)
        .mount(&api)
        .await;

    let advisor = advisor_for(&api);
    let report = discover(&site.uri(), &test_config(), Some(&advisor))
        .await
        .expect("discovery should succeed");

    assert_eq!(report.selectors.method, Method::LlmEnhanced);
    assert_eq!(report.selectors.confidence, Confidence::Low);
    assert_eq!(report.selectors.article_links, ".post-card h2 a");
    assert_eq!(report.selectors.notes, "simple layout");
}
