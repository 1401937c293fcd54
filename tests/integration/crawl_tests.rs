//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! audit cycle end-to-end through the reqwest client.

use site_auditor::config::Config;
use site_auditor::run_audit;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a fast test configuration for the given seed
fn create_test_config(seed: &str) -> Config {
    let mut config = Config::for_seed(seed);
    config.crawler.max_pages = 20;
    config.crawler.max_depth = 2;
    config.crawler.politeness_delay_ms = 10; // Very short for testing
    config.crawler.request_timeout_secs = 5;
    config.crawler.max_retries = 0;
    config
}

async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html"))
        .mount(server)
        .await;
}

async fn mount_robots(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/plain"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_audit_single_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;
    mount_html(
        &mock_server,
        "/",
        r#"<html><head><title>Home page of the integration test site</title></head><body>
            <h1>Home</h1>
            <a href="/page1">Page 1</a>
            <a href="/page2">Page 2</a>
        </body></html>"#,
    )
    .await;
    mount_html(
        &mock_server,
        "/page1",
        r#"<html><head><title>Page 1</title></head><body><p>First page</p></body></html>"#,
    )
    .await;
    mount_html(
        &mock_server,
        "/page2",
        r#"<html><head><title>Page 2</title></head><body><a href="/">Home</a></body></html>"#,
    )
    .await;

    let seed = format!("{}/", base_url);
    let report = run_audit(create_test_config(&seed))
        .await
        .expect("audit should succeed");

    let expected_domain = url::Url::parse(&base_url)
        .map(|u| format!("{}:{}", u.host_str().unwrap(), u.port().unwrap()))
        .unwrap();
    assert_eq!(report.domain, expected_domain);
    assert_eq!(report.pages.len(), 3);
    assert_eq!(report.counters.pages_recorded, 3);
    assert_eq!(report.counters.errors, 0);

    let home = report.page(&seed).expect("seed recorded");
    assert_eq!(home.status, 200);
    assert_eq!(home.depth, 0);
    assert_eq!(home.metrics.headings.h1_count, 1);
    assert_eq!(home.graph.incoming_links, 1);
    assert!(!home.graph.is_orphan);

    let page1 = report.page(&format!("{}/page1", base_url)).expect("page1 recorded");
    assert_eq!(page1.depth, 1);
    assert_eq!(page1.metrics.title, "Page 1");
}

#[tokio::test]
async fn test_robots_disallow_respected() {
    let mock_server = MockServer::start().await;

    mount_robots(&mock_server, "User-agent: *\nDisallow: /private\n").await;
    mount_html(
        &mock_server,
        "/",
        r#"<html><body>
            <a href="/private/report">Secret</a>
            <a href="/public">Public</a>
        </body></html>"#,
    )
    .await;
    mount_html(&mock_server, "/public", "<html><body>Open</body></html>").await;

    Mock::given(method("GET"))
        .and(path("/private/report"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("hidden", "text/html"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let seed = format!("{}/", mock_server.uri());
    let report = run_audit(create_test_config(&seed)).await.unwrap();

    assert_eq!(report.pages.len(), 2);
    assert!(report.pages.iter().all(|p| !p.url.contains("/private")));
}

#[tokio::test]
async fn test_dead_link_counted_as_error() {
    let mock_server = MockServer::start().await;

    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;
    mount_html(
        &mock_server,
        "/",
        r#"<html><body><a href="/missing">Gone</a></body></html>"#,
    )
    .await;

    let seed = format!("{}/", mock_server.uri());
    let report = run_audit(create_test_config(&seed)).await.unwrap();

    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.counters.pages_visited, 2);
    assert_eq!(report.counters.errors, 1);
}

#[tokio::test]
async fn test_missing_robots_allows_all() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/",
        r#"<html><body><a href="/about">About</a></body></html>"#,
    )
    .await;
    mount_html(&mock_server, "/about", "<html><body>About us</body></html>").await;

    let seed = format!("{}/", mock_server.uri());
    let report = run_audit(create_test_config(&seed)).await.unwrap();

    assert_eq!(report.pages.len(), 2);
}

#[tokio::test]
async fn test_sitemap_membership() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{base}/</loc></url>
  <url><loc>{base}/listed</loc></url>
</urlset>"#,
                base = base_url
            ),
            "application/xml",
        ))
        .mount(&mock_server)
        .await;
    mount_html(
        &mock_server,
        "/",
        r#"<html><body><a href="/listed">Listed</a><a href="/unlisted">Unlisted</a></body></html>"#,
    )
    .await;
    mount_html(&mock_server, "/listed", "<html><body>Listed</body></html>").await;
    mount_html(&mock_server, "/unlisted", "<html><body>Unlisted</body></html>").await;

    let seed = format!("{}/", base_url);
    let report = run_audit(create_test_config(&seed)).await.unwrap();

    assert_eq!(report.sitemap_urls.len(), 2);
    assert!(report.page(&seed).unwrap().in_sitemap);
    assert!(report.page(&format!("{}/listed", base_url)).unwrap().in_sitemap);
    assert!(!report.page(&format!("{}/unlisted", base_url)).unwrap().in_sitemap);
}
