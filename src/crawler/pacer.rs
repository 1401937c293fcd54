//! Request pacing
//!
//! Every request an audit sends goes through one `PacedFetcher`, so robots.txt,
//! sitemap, and page fetches (retries included) all share a single delay.

use crate::crawler::fetcher::{FetchError, HttpFetch, RawResponse};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::Url;

/// Wraps a fetcher so consecutive requests are at least `delay` apart
pub struct PacedFetcher<F> {
    inner: F,
    delay: Duration,
    /// When the previous request finished
    last_request: Mutex<Option<Instant>>,
}

impl<F> PacedFetcher<F> {
    pub fn new(inner: F, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            last_request: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Raises the delay to `delay`; a shorter value is ignored
    ///
    /// Returns true if the delay changed.
    pub fn raise_delay(&mut self, delay: Duration) -> bool {
        if delay > self.delay {
            self.delay = delay;
            true
        } else {
            false
        }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

#[async_trait]
impl<F: HttpFetch> HttpFetch for PacedFetcher<F> {
    async fn get(&self, url: &Url) -> Result<RawResponse, FetchError> {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let wait = self.delay.saturating_sub(previous.elapsed());
            if !wait.is_zero() {
                tracing::trace!("Waiting {:?} before {}", wait, url);
                tokio::time::sleep(wait).await;
            }
        }

        let result = self.inner.get(url).await;
        *last = Some(Instant::now());
        result
    }
}
