//! Integration tests for the discovery crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full three-phase crawl end-to-end.

use crate::common::{card_homepage, mount_html, mount_html_expect, page, test_config};
use article_scout::crawler::crawl;
use article_scout::ScoutError;
use std::collections::HashSet;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn homepage_url(server: &MockServer) -> Url {
    Url::parse(&server.uri()).expect("mock server URL")
}

#[tokio::test]
async fn test_excluded_links_never_become_articles() {
    let server = MockServer::start().await;
    let html = card_homepage(12).replace(
        "</body>",
        r#"<footer><a href="/contact">Contact</a><a href="/privacy">Privacy</a><a href="/terms">Terms</a></footer></body>"#,
    );
    mount_html(&server, "/", html).await;

    let (report, homepage) = crawl(homepage_url(&server), &test_config())
        .await
        .expect("crawl should succeed");

    assert!(homepage.is_ok());
    assert_eq!(report.total_article_links, 12);
    assert_eq!(report.article_links.len(), 12);
    for excluded in ["/contact", "/privacy", "/terms"] {
        assert!(
            report.article_links.iter().all(|u| !u.ends_with(excluded)),
            "{} leaked into article links",
            excluded
        );
    }
    assert_eq!(report.sample_article_urls.len(), 5);
}

#[tokio::test]
async fn test_pagination_followed_and_homepage_fetched_once() {
    let server = MockServer::start().await;
    mount_html_expect(
        &server,
        "/",
        page(r#"<a href="/">Home</a><a href="/posts/a">A</a><a href="/page/2">2</a><a href="/page/3">3</a>"#),
        1,
    )
    .await;
    mount_html_expect(
        &server,
        "/page/2",
        page(r#"<a href="/">Home</a><a href="/posts/b">B</a><a href="/page/3">3</a>"#),
        1,
    )
    .await;
    mount_html_expect(
        &server,
        "/page/3",
        page(r#"<a href="/">Home</a><a href="/posts/c">C</a><a href="/page/2">2</a>"#),
        1,
    )
    .await;

    let (report, _) = crawl(homepage_url(&server), &test_config())
        .await
        .expect("crawl should succeed");

    assert_eq!(report.pages_crawled, 3);
    assert_eq!(report.total_article_links, 3);
    assert!(report.article_links.iter().all(|u| !u.contains("/page/")));
}

#[tokio::test]
async fn test_page_budget_is_never_exceeded() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        page(r#"<a href="/posts/home-story">Story</a><a href="/page/2">Next</a>"#),
    )
    .await;
    for n in 2..=40 {
        mount_html(
            &server,
            &format!("/page/{}", n),
            page(&format!(
                r#"<a href="/posts/story-{n}">Story</a><a href="/page/{next}">Next</a><a href="/">Home</a>"#,
                n = n,
                next = n + 1
            )),
        )
        .await;
    }

    let config = test_config();
    let (report, _) = crawl(homepage_url(&server), &config)
        .await
        .expect("crawl should succeed");

    assert!(report.pages_crawled <= config.crawler.max_pages);

    let requests = server.received_requests().await.expect("request recording");
    assert!(requests.len() <= 15);
    let distinct: HashSet<String> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(distinct.len(), requests.len(), "a url was fetched twice");
}

#[tokio::test]
async fn test_homepage_phase_budget_then_pagination_ceiling() {
    let server = MockServer::start().await;
    let pagination: String = (2..=20)
        .map(|n| format!(r#"<a href="/page/{}">{}</a>"#, n, n))
        .collect();
    mount_html(&server, "/", page(&pagination)).await;
    for n in 2..=20 {
        mount_html(
            &server,
            &format!("/page/{}", n),
            page(&format!(r#"<a href="/posts/p-{}">P</a>"#, n)),
        )
        .await;
    }

    let (report, _) = crawl(homepage_url(&server), &test_config())
        .await
        .expect("crawl should succeed");

    assert_eq!(report.pages_crawled, 15);
    assert_eq!(report.total_article_links, 14);
    assert!(report.article_links[0].ends_with("/posts/p-2"));
}

#[tokio::test]
async fn test_sections_probed_after_homepage() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        page(r#"<a href="/blog/">Blog</a><a href="/reviews">Reviews</a>"#),
    )
    .await;
    mount_html_expect(
        &server,
        "/blog/",
        page(r#"<a href="/blog/first-post">First</a><a href="/blog/page/2">More</a>"#),
        1,
    )
    .await;
    mount_html_expect(
        &server,
        "/reviews",
        page(r#"<a href="/reviews/gadget">Gadget</a>"#),
        1,
    )
    .await;
    mount_html_expect(
        &server,
        "/blog/page/2",
        page(r#"<a href="/blog/second-post">Second</a>"#),
        1,
    )
    .await;

    let (report, _) = crawl(homepage_url(&server), &test_config())
        .await
        .expect("crawl should succeed");

    assert_eq!(report.pages_crawled, 4);
    assert_eq!(report.total_article_links, 3);
    assert!(report
        .article_links
        .iter()
        .any(|u| u.ends_with("/blog/second-post")));
}

#[tokio::test]
async fn test_failed_pages_are_skipped() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        page(r#"<a href="/posts/one">One</a><a href="/page/2">2</a><a href="/page/3">3</a>"#),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/page/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_html(&server, "/page/3", page(r#"<a href="/posts/three">Three</a>"#)).await;

    let (report, _) = crawl(homepage_url(&server), &test_config())
        .await
        .expect("crawl should succeed");

    assert_eq!(report.pages_crawled, 3);
    assert_eq!(report.total_article_links, 2);
}

#[tokio::test]
async fn test_unreachable_homepage_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = crawl(homepage_url(&server), &test_config()).await;
    assert!(matches!(
        result,
        Err(ScoutError::HomepageUnreachable { .. })
    ));
}
