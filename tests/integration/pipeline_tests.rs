//! End-to-end pipeline tests over an in-memory site
//!
//! The fake fetcher serves canned responses by path, so these tests cover
//! traversal, analysis and scoring without any network.

use async_trait::async_trait;
use site_auditor::config::Config;
use site_auditor::crawler::{FetchError, HttpFetch, RawResponse};
use site_auditor::{AuditReport, Coordinator, CrawlState};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use url::Url;

const SEED: &str = "https://site.test/";

#[derive(Default)]
struct FakeSite {
    pages: HashMap<String, (u16, String, String)>,
    /// Requested path and the time the request arrived
    requests: Mutex<Vec<(String, Instant)>>,
}

impl FakeSite {
    fn html(self, path: &str, body: &str) -> Self {
        self.respond(path, 200, "text/html; charset=utf-8", body)
    }

    fn respond(mut self, path: &str, status: u16, content_type: &str, body: &str) -> Self {
        self.pages.insert(
            path.to_string(),
            (status, content_type.to_string(), body.to_string()),
        );
        self
    }

    /// Paths requested, excluding robots.txt and sitemap lookups
    fn page_requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p)
            .filter(|p| p.as_str() != "/robots.txt" && p.as_str() != "/sitemap.xml")
            .cloned()
            .collect()
    }

    /// Every requested path, in order
    fn all_requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.clone())
            .collect()
    }

    /// Time between each pair of consecutive requests
    fn request_gaps(&self) -> Vec<Duration> {
        let requests = self.requests.lock().unwrap();
        requests
            .windows(2)
            .map(|pair| pair[1].1.duration_since(pair[0].1))
            .collect()
    }
}

#[async_trait]
impl HttpFetch for FakeSite {
    async fn get(&self, url: &Url) -> Result<RawResponse, FetchError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.path().to_string(), Instant::now()));

        let Some((status, content_type, body)) = self.pages.get(url.path()) else {
            return Ok(RawResponse {
                status: 404,
                final_url: url.to_string(),
                ..RawResponse::default()
            });
        };

        Ok(RawResponse {
            status: *status,
            headers: HashMap::from([("content-type".to_string(), content_type.clone())]),
            body: body.as_bytes().to_vec(),
            final_url: url.to_string(),
        })
    }
}

fn config(max_pages: u32, max_depth: u32) -> Config {
    let mut config = Config::for_seed(SEED);
    config.crawler.max_pages = max_pages;
    config.crawler.max_depth = max_depth;
    config.crawler.politeness_delay_ms = 0;
    config
}

fn links(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|h| format!(r#"<a href="{}">link</a>"#, h))
        .collect();
    format!("<html><body>{}</body></html>", anchors)
}

async fn audit(site: Arc<FakeSite>, config: Config) -> AuditReport {
    let coordinator = Coordinator::with_fetcher(config, site).unwrap();
    assert_eq!(coordinator.state(), CrawlState::Idle);
    coordinator.run().await.unwrap()
}

fn url(path: &str) -> String {
    format!("https://site.test{}", path)
}

#[tokio::test]
async fn test_three_page_site() {
    let site = Arc::new(
        FakeSite::default()
            .html("/", &links(&["/a", "/b"]))
            .html("/a", &links(&["/"]))
            .html("/b", &links(&[])),
    );

    let report = audit(site, config(3, 1)).await;

    assert_eq!(report.pages.len(), 3);

    let home = report.page(&url("/")).unwrap();
    let a = report.page(&url("/a")).unwrap();
    let b = report.page(&url("/b")).unwrap();

    assert_eq!(home.graph.incoming_links, 1);
    assert_eq!(b.graph.incoming_links, 1);
    assert!(!b.graph.is_orphan);

    assert!(home.graph.authority_score > a.graph.authority_score);
    assert!(home.graph.authority_score > b.graph.authority_score);
    assert!(a.graph.authority_score >= b.graph.authority_score);
}

#[tokio::test]
async fn test_page_cap_bounds_fetches() {
    let children: Vec<String> = (0..10).map(|i| format!("/p{}", i)).collect();
    let hrefs: Vec<&str> = children.iter().map(String::as_str).collect();

    let mut site = FakeSite::default().html("/", &links(&hrefs));
    for child in &children {
        site = site.html(child, &links(&["/"]));
    }
    let site = Arc::new(site);

    let report = audit(site.clone(), config(4, 2)).await;

    assert_eq!(report.counters.pages_visited, 4);
    assert_eq!(report.pages.len(), 4);
    assert_eq!(site.page_requests().len(), 4);
}

#[tokio::test]
async fn test_records_are_unique() {
    let site = Arc::new(
        FakeSite::default()
            .html("/", &links(&["/a", "/a", "/b#top", "/"]))
            .html("/a", &links(&["/", "/b", "/a"]))
            .html("/b", &links(&["/a"])),
    );

    let report = audit(site.clone(), config(10, 3)).await;

    let urls: HashSet<&str> = report.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls.len(), report.pages.len());
    assert_eq!(report.pages.len(), 3);

    let mut fetched = site.page_requests();
    fetched.sort();
    fetched.dedup();
    assert_eq!(fetched.len(), site.page_requests().len());
}

#[tokio::test]
async fn test_depth_zero_fetches_only_seed() {
    let site = Arc::new(
        FakeSite::default()
            .html("/", &links(&["/a"]))
            .html("/a", &links(&["/"])),
    );

    let report = audit(site.clone(), config(10, 0)).await;

    assert_eq!(report.pages.len(), 1);
    assert_eq!(site.page_requests(), vec!["/".to_string()]);
}

#[tokio::test]
async fn test_query_only_inbound_is_orphan() {
    let sitemap = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://site.test/</loc></url>
  <url><loc>https://site.test/c</loc></url>
</urlset>"#;
    let site = Arc::new(
        FakeSite::default()
            .respond("/sitemap.xml", 200, "application/xml", sitemap)
            .html("/", &links(&["/c?ref=home", "/a"]))
            .html("/a", &links(&["/"]))
            .html("/c", &links(&[])),
    );

    let mut config = config(10, 2);
    config.crawler.seed_from_sitemap = true;
    let report = audit(site, config).await;

    let c = report.page(&url("/c")).expect("sitemap page crawled");
    assert!(c.in_sitemap);
    assert_eq!(c.graph.incoming_links, 0);
    assert!(c.graph.is_orphan);

    assert!(!report.page(&url("/")).unwrap().graph.is_orphan);
    assert!(!report.page(&url("/a")).unwrap().graph.is_orphan);
    assert_eq!(report.orphans().count(), 1);
}

#[tokio::test]
async fn test_non_html_is_skipped() {
    let site = Arc::new(
        FakeSite::default()
            .html("/", &links(&["/report", "/a"]))
            .respond("/report", 200, "application/pdf", "%PDF-1.4")
            .html("/a", &links(&[])),
    );

    let report = audit(site, config(10, 1)).await;

    assert_eq!(report.counters.non_html, 1);
    assert_eq!(report.pages.len(), 2);
    assert!(report.page(&url("/report")).is_none());
}

#[tokio::test]
async fn test_robots_disallowed_never_fetched() {
    let site = Arc::new(
        FakeSite::default()
            .respond(
                "/robots.txt",
                200,
                "text/plain",
                "User-agent: *\nDisallow: /private\n",
            )
            .html("/", &links(&["/private", "/a"]))
            .html("/private", &links(&[]))
            .html("/a", &links(&[])),
    );

    let report = audit(site.clone(), config(10, 1)).await;

    assert_eq!(report.pages.len(), 2);
    assert!(!site.page_requests().contains(&"/private".to_string()));
}

#[tokio::test]
async fn test_every_page_is_scored() {
    let site = Arc::new(
        FakeSite::default()
            .html(
                "/",
                r#"<html><head><title>Rust crawling guide for careful site owners</title>
                <link rel="canonical" href="https://site.test/"></head>
                <body><h1>Rust crawling</h1><h2>Why crawl</h2><p>Crawling a site shows its structure.</p>
                <a href="/a">Read the detailed crawling tutorial</a></body></html>"#,
            )
            .html("/a", "<html><body><p>tutorial</p></body></html>"),
    );

    let report = audit(site, config(10, 1)).await;

    for page in &report.pages {
        assert!(page.scores.site_health > 0.0, "{} unscored", page.url);
        assert!(page.graph.topic_cluster.is_some() || page.graph.tf_idf_keywords.is_empty());
    }

    let home = report.page(&url("/")).unwrap();
    assert!(home.metrics.technical.canonical);
    assert_eq!(home.graph.total_links, 1);
}

#[tokio::test]
async fn test_every_request_waits_for_politeness_delay() {
    let index = r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://site.test/sitemap-1.xml</loc></sitemap>
  <sitemap><loc>https://site.test/sitemap-2.xml</loc></sitemap>
  <sitemap><loc>https://site.test/sitemap-3.xml</loc></sitemap>
</sitemapindex>"#;
    let child = r#"<urlset><url><loc>https://site.test/a</loc></url></urlset>"#;
    let site = Arc::new(
        FakeSite::default()
            .respond("/robots.txt", 200, "text/plain", "User-agent: *\nAllow: /\n")
            .respond("/sitemap.xml", 200, "application/xml", index)
            .respond("/sitemap-1.xml", 200, "application/xml", child)
            .respond("/sitemap-2.xml", 200, "application/xml", child)
            .respond("/sitemap-3.xml", 200, "application/xml", child)
            .html("/", &links(&["/a"]))
            .html("/a", &links(&["/"])),
    );

    let delay = Duration::from_millis(50);
    let mut config = config(10, 1);
    config.crawler.politeness_delay_ms = 50;
    let report = audit(site.clone(), config).await;

    assert_eq!(report.pages.len(), 2);
    assert_eq!(
        site.all_requests(),
        vec![
            "/robots.txt",
            "/sitemap.xml",
            "/sitemap-1.xml",
            "/sitemap-2.xml",
            "/sitemap-3.xml",
            "/",
            "/a",
        ]
    );
    for gap in site.request_gaps() {
        assert!(gap >= delay, "requests only {:?} apart", gap);
    }
}

#[tokio::test]
async fn test_robots_crawl_delay_raises_politeness() {
    let site = Arc::new(
        FakeSite::default()
            .respond(
                "/robots.txt",
                200,
                "text/plain",
                "User-agent: *\nCrawl-delay: 0.2\n",
            )
            .html("/", &links(&["/a"]))
            .html("/a", &links(&[])),
    );

    let mut config = config(10, 1);
    config.crawler.load_sitemap = false;
    let report = audit(site.clone(), config).await;

    assert_eq!(report.pages.len(), 2);
    assert_eq!(site.all_requests(), vec!["/robots.txt", "/", "/a"]);
    for gap in site.request_gaps() {
        assert!(gap >= Duration::from_millis(200), "requests only {:?} apart", gap);
    }
}
