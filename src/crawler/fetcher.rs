//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - The `HttpFetch` capability the crawler depends on
//! - A reqwest-backed client with the configured user agent and timeout
//! - Status and content-type classification of responses
//! - Bounded retry with exponential backoff for transient failures

use crate::config::Config;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Maximum redirect hops followed by the HTTP client
pub const MAX_REDIRECTS: usize = 10;

/// Base delay between retries; doubled on each attempt
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Longest wait before any single retry
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// A raw HTTP response, independent of the client that produced it
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers with lower-cased names
    pub headers: HashMap<String, String>,
    /// Undecoded response body
    pub body: Vec<u8>,
    /// URL after redirects
    pub final_url: String,
}

impl RawResponse {
    /// Looks up a header by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// Errors from a single page fetch
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    /// Whether retrying the request could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout { .. } | FetchError::Network { .. } => true,
            FetchError::Status { status, .. } => *status >= 500,
        }
    }
}

/// HTTP GET capability used by the crawler
///
/// Implementations return any HTTP status as `Ok`; only transport failures
/// are errors.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, url: &Url) -> Result<RawResponse, FetchError>;
}

#[async_trait]
impl<T: HttpFetch + ?Sized> HttpFetch for Arc<T> {
    async fn get(&self, url: &Url) -> Result<RawResponse, FetchError> {
        (**self).get(url).await
    }
}

/// Response metadata kept alongside a fetched page
#[derive(Debug, Clone, Default)]
pub struct ResponseMeta {
    pub status: u16,
    pub final_url: String,
    pub headers: HashMap<String, String>,
}

impl ResponseMeta {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// An HTML page that passed the fetch contract
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Body decoded as UTF-8 (lossy)
    pub body: String,
    pub meta: ResponseMeta,
}

/// Outcome of a successful request
#[derive(Debug, Clone)]
pub enum FetchResult {
    /// HTML page ready for extraction
    Success(FetchedPage),

    /// Page is not HTML (Content-Type mismatch)
    ContentMismatch {
        /// The declared Content-Type, empty when absent
        content_type: String,
    },
}

/// reqwest-backed [`HttpFetch`] implementation
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Builds a client from the audit configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use site_auditor::config::Config;
    /// use site_auditor::crawler::HttpClient;
    ///
    /// let config = Config::for_seed("https://example.com/");
    /// let client = HttpClient::new(&config).unwrap();
    /// ```
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.user_agent.clone())
            .timeout(Duration::from_secs(config.crawler.request_timeout_secs))
            .redirect(Policy::limited(MAX_REDIRECTS))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetch for HttpClient {
    async fn get(&self, url: &Url) -> Result<RawResponse, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, &e))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_error(url, &e))?
            .to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
            final_url,
        })
    }
}

fn classify_error(url: &Url, error: &reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

/// Returns true for `text/html` and `application/xhtml+xml` content types
pub fn is_html_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}

/// Fetches a page and applies the fetch contract
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | 2xx HTML | Success |
/// | 2xx non-HTML | ContentMismatch (not retried) |
/// | HTTP 4xx | Immediate `FetchError::Status` |
/// | HTTP 5xx | Retry up to `retries` times, then `FetchError::Status` |
/// | Timeout / network | Retry up to `retries` times, then the error |
///
/// The delay before retry `n` is 500ms * 2^n, capped at 30s.
pub async fn fetch_page<F>(fetcher: &F, url: &Url, retries: u32) -> Result<FetchResult, FetchError>
where
    F: HttpFetch + ?Sized,
{
    let mut attempt = 0;
    loop {
        match fetch_once(fetcher, url).await {
            Err(e) if e.is_transient() && attempt < retries => {
                let delay = retry_delay(attempt);
                tracing::debug!(
                    "Retrying {} in {:?} after: {} (attempt {}/{})",
                    url,
                    delay,
                    e,
                    attempt + 1,
                    retries
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}

fn retry_delay(attempt: u32) -> Duration {
    RETRY_BASE_DELAY
        .checked_mul(2u32.saturating_pow(attempt))
        .map_or(MAX_RETRY_DELAY, |d| d.min(MAX_RETRY_DELAY))
}

async fn fetch_once<F>(fetcher: &F, url: &Url) -> Result<FetchResult, FetchError>
where
    F: HttpFetch + ?Sized,
{
    let response = fetcher.get(url).await?;

    if !(200..300).contains(&response.status) {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }

    let content_type = response.header("content-type").unwrap_or("").to_string();
    if !is_html_content_type(&content_type) {
        return Ok(FetchResult::ContentMismatch { content_type });
    }

    let body = String::from_utf8_lossy(&response.body).into_owned();
    Ok(FetchResult::Success(FetchedPage {
        body,
        meta: ResponseMeta {
            status: response.status,
            final_url: response.final_url,
            headers: response.headers,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Scripted {
        responses: Vec<Result<RawResponse, FetchError>>,
        calls: AtomicU32,
    }

    #[async_trait]
    impl HttpFetch for Scripted {
        async fn get(&self, _url: &Url) -> Result<RawResponse, FetchError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
            self.responses[n.min(self.responses.len() - 1)].clone()
        }
    }

    fn html(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            headers: HashMap::from([(
                "content-type".to_string(),
                "text/html; charset=utf-8".to_string(),
            )]),
            body: body.as_bytes().to_vec(),
            final_url: "https://example.com/".to_string(),
        }
    }

    fn url() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[test]
    fn test_html_content_types() {
        assert!(is_html_content_type("text/html"));
        assert!(is_html_content_type("Text/HTML; charset=UTF-8"));
        assert!(is_html_content_type("application/xhtml+xml"));
        assert!(!is_html_content_type("application/pdf"));
        assert!(!is_html_content_type("text/plain"));
        assert!(!is_html_content_type(""));
    }

    #[test]
    fn test_retry_delay_doubles_up_to_cap() {
        assert_eq!(retry_delay(0), Duration::from_millis(500));
        assert_eq!(retry_delay(1), Duration::from_secs(1));
        assert_eq!(retry_delay(3), Duration::from_secs(4));
        assert_eq!(retry_delay(6), MAX_RETRY_DELAY);
        assert_eq!(retry_delay(40), MAX_RETRY_DELAY);
        assert_eq!(retry_delay(u32::MAX), MAX_RETRY_DELAY);
    }

    #[test]
    fn test_build_http_client() {
        let config = Config::for_seed("https://example.com/");
        assert!(HttpClient::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_success_decodes_body() {
        let fetcher = Scripted {
            responses: vec![Ok(html(200, "<p>caf\u{e9}</p>"))],
            calls: AtomicU32::new(0),
        };

        match fetch_page(&fetcher, &url(), 0).await.unwrap() {
            FetchResult::Success(page) => {
                assert_eq!(page.body, "<p>caf\u{e9}</p>");
                assert_eq!(page.meta.status, 200);
                assert!(page.meta.header("Content-Type").is_some());
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_html_is_mismatch() {
        let mut response = html(200, "%PDF");
        response
            .headers
            .insert("content-type".to_string(), "application/pdf".to_string());
        let fetcher = Scripted {
            responses: vec![Ok(response)],
            calls: AtomicU32::new(0),
        };

        let result = fetch_page(&fetcher, &url(), 0).await.unwrap();
        assert!(matches!(result, FetchResult::ContentMismatch { content_type } if content_type == "application/pdf"));
    }

    #[tokio::test]
    async fn test_client_error_not_retried() {
        let fetcher = Scripted {
            responses: vec![Ok(html(404, "")), Ok(html(200, "ok"))],
            calls: AtomicU32::new(0),
        };

        let err = fetch_page(&fetcher, &url(), 3).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_server_error_retried() {
        let fetcher = Scripted {
            responses: vec![Ok(html(503, "")), Ok(html(200, "ok"))],
            calls: AtomicU32::new(0),
        };

        let result = fetch_page(&fetcher, &url(), 2).await.unwrap();
        assert!(matches!(result, FetchResult::Success(_)));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_timeout_without_retries() {
        let fetcher = Scripted {
            responses: vec![Err(FetchError::Timeout {
                url: "https://example.com/".to_string(),
            })],
            calls: AtomicU32::new(0),
        };

        let err = fetch_page(&fetcher, &url(), 0).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }
}
