//! Crawler coordinator - main audit orchestration logic
//!
//! This module contains the crawl loop that coordinates one audit run:
//! - Loading robots.txt and the sitemap before the first page
//! - Draining the breadth-first frontier under the page and depth caps
//! - Fetching, parsing, and recording each in-scope HTML page
//! - Running the post-crawl analysis and scoring passes
//! - Assembling the final report

use crate::analysis;
use crate::config::{validate_crawl_bounds, Config};
use crate::crawler::fetcher::{fetch_page, FetchResult, FetchedPage, HttpClient, HttpFetch};
use crate::crawler::pacer::PacedFetcher;
use crate::crawler::parser::parse_page;
use crate::record::{AuditReport, PageRecord};
use crate::robots::{load_robots, load_sitemap};
use crate::scoring;
use crate::state::{CrawlCounters, CrawlState, Frontier};
use crate::url::{extract_authority, FetchGate};
use crate::{AuditError, ConfigError};
use chrono::Utc;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use url::Url;

/// Upper bound applied to a robots.txt `Crawl-delay`
const MAX_CRAWL_DELAY: Duration = Duration::from_secs(10);

/// Main crawler coordinator structure
///
/// Owns every piece of mutable crawl state; nothing is shared across tasks.
/// All requests go through one paced fetcher.
pub struct Coordinator<F: HttpFetch = HttpClient> {
    config: Config,
    fetcher: PacedFetcher<F>,
    seed: Url,
    domain: String,
    gate: FetchGate,
    frontier: Frontier,
    state: CrawlState,
    counters: CrawlCounters,
    records: Vec<PageRecord>,
    sitemap_urls: Vec<String>,
    /// Parsed sitemap URLs, for `in_sitemap` lookups
    sitemap_index: HashSet<String>,
}

impl Coordinator<HttpClient> {
    /// Creates a coordinator backed by the reqwest client
    ///
    /// # Arguments
    ///
    /// * `config` - The audit configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(AuditError)` - Invalid seed or bounds, or the client failed to build
    pub fn new(config: Config) -> Result<Self, AuditError> {
        let fetcher = HttpClient::new(&config)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: HttpFetch> Coordinator<F> {
    /// Creates a coordinator that fetches through `fetcher`
    pub fn with_fetcher(config: Config, fetcher: F) -> Result<Self, AuditError> {
        let seed = validate_crawl_bounds(&config.crawler)?;
        let domain = extract_authority(&seed)
            .ok_or_else(|| ConfigError::InvalidUrl(format!("Seed URL '{}' has no host", seed)))?;

        let queue_limit =
            config.crawler.max_pages as usize * config.crawler.frontier_slack_factor as usize;
        let politeness = Duration::from_millis(config.crawler.politeness_delay_ms);

        Ok(Self {
            gate: FetchGate::new(domain.clone()),
            frontier: Frontier::new(seed.clone(), queue_limit),
            state: CrawlState::Idle,
            counters: CrawlCounters::default(),
            records: Vec::new(),
            sitemap_urls: Vec::new(),
            sitemap_index: HashSet::new(),
            fetcher: PacedFetcher::new(fetcher, politeness),
            config,
            seed,
            domain,
        })
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Current delay between requests
    pub fn politeness(&self) -> Duration {
        self.fetcher.delay()
    }

    fn transition(&mut self, next: CrawlState) -> Result<(), AuditError> {
        if !self.state.can_transition_to(next) {
            return Err(AuditError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::debug!("Crawl state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// Runs the audit to completion and returns the report
    ///
    /// Individual page failures are counted and logged, never returned; the
    /// run itself only fails on an invalid state transition.
    pub async fn run(mut self) -> Result<AuditReport, AuditError> {
        let started_at = Utc::now();
        self.transition(CrawlState::Running)?;
        tracing::info!("Starting audit of {} (domain {})", self.seed, self.domain);

        self.prepare().await;
        self.crawl().await;

        let mut records = std::mem::take(&mut self.records);
        let site = analysis::analyze(&mut records, self.seed.as_str());
        scoring::score_all(&mut records);

        self.transition(CrawlState::Done)?;
        let finished_at = Utc::now();

        tracing::info!(
            "Audit complete: {} pages recorded, {} skipped, {} non-HTML, {} errors",
            self.counters.pages_recorded,
            self.counters.pages_skipped,
            self.counters.non_html,
            self.counters.errors
        );

        Ok(AuditReport {
            seed: self.seed.to_string(),
            domain: self.domain,
            pages: records,
            graph: site.graph,
            clusters: site.clusters,
            counters: self.counters,
            sitemap_urls: self.sitemap_urls,
            started_at,
            finished_at,
        })
    }

    /// Loads robots.txt and the sitemap, and seeds the frontier from it
    async fn prepare(&mut self) {
        let robots = load_robots(&self.fetcher, &self.seed).await;
        let token = self.config.user_agent.robots_token.clone();

        if let Some(delay) = robots.crawl_delay(&token).filter(|d| d.is_finite()) {
            let requested = Duration::from_secs_f64(delay.max(0.0)).min(MAX_CRAWL_DELAY);
            if self.fetcher.raise_delay(requested) {
                tracing::info!("robots.txt Crawl-delay raises politeness to {:?}", requested);
            }
        }

        if self.config.crawler.load_sitemap {
            self.sitemap_urls = load_sitemap(&self.fetcher, &self.seed, &robots).await;
            self.sitemap_index = self
                .sitemap_urls
                .iter()
                .filter_map(|raw| Url::parse(raw).ok())
                .map(String::from)
                .collect();
        }

        self.gate = FetchGate::new(self.domain.clone()).with_robots(robots, token);

        if self.config.crawler.seed_from_sitemap {
            self.seed_from_sitemap();
        }
    }

    fn seed_from_sitemap(&mut self) {
        if self.config.crawler.max_depth < 1 {
            return;
        }

        let mut queued = 0;
        for raw in &self.sitemap_urls {
            let Ok(url) = Url::parse(raw) else {
                continue;
            };
            if url == self.seed || !self.gate.is_eligible(&url) {
                continue;
            }
            if self.frontier.enqueue(url, 1) {
                queued += 1;
            }
        }
        tracing::info!("Queued {} URLs from the sitemap", queued);
    }

    /// Drains the frontier until it is empty or the page cap is reached
    async fn crawl(&mut self) {
        let max_pages = self.config.crawler.max_pages as usize;
        let max_depth = self.config.crawler.max_depth;
        let start_time = Instant::now();

        while self.frontier.visited_count() < max_pages {
            let Some((url, depth)) = self.frontier.pop() else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };

            if self.frontier.is_visited(&url) || depth > max_depth {
                self.counters.pages_skipped += 1;
                continue;
            }

            if let Err(reason) = self.gate.check(&url) {
                tracing::trace!("Skipping {}: {}", url, reason.as_str());
                self.counters.pages_skipped += 1;
                continue;
            }

            self.frontier.mark_visited(&url);
            self.counters.pages_visited += 1;

            tracing::debug!("Fetching {} (depth {})", url, depth);
            match fetch_page(&self.fetcher, &url, self.config.crawler.max_retries).await {
                Ok(FetchResult::Success(page)) => self.record_page(url, depth, &page),
                Ok(FetchResult::ContentMismatch { content_type }) => {
                    tracing::debug!("Skipping non-HTML {} ({})", url, content_type);
                    self.counters.non_html += 1;
                }
                Err(e) => {
                    tracing::debug!("Fetch failed: {}", e);
                    self.counters.errors += 1;
                }
            }

            if self.counters.pages_visited % 10 == 0 {
                let rate = self.counters.pages_visited as f64
                    / start_time.elapsed().as_secs_f64().max(f64::EPSILON);
                tracing::info!(
                    "Progress: {} pages crawled, {} in frontier, {:.2} pages/sec",
                    self.counters.pages_visited,
                    self.frontier.queue_len(),
                    rate
                );
            }
        }

        tracing::info!(
            "Crawl finished: {} pages visited in {:?}",
            self.counters.pages_visited,
            start_time.elapsed()
        );
    }

    /// Extracts metrics for a fetched page, stores the record and queues its links
    fn record_page(&mut self, url: Url, depth: u32, page: &FetchedPage) {
        let extracted = parse_page(page, &url, &self.gate, Utc::now());

        let mut record = PageRecord::new(url.as_str(), depth, extracted.metrics);
        record.final_url = page.meta.final_url.clone();
        record.status = page.meta.status;
        record.in_sitemap = self.sitemap_index.contains(url.as_str());
        record.outgoing_internal_links = extracted.edges.iter().map(|e| e.to_string()).collect();
        record.anchors = extracted.anchors;
        record.text = extracted.text;

        let next_depth = depth + 1;
        if next_depth <= self.config.crawler.max_depth {
            let mut queued_this_page: HashSet<&str> = HashSet::new();
            for edge in &extracted.edges {
                if !queued_this_page.insert(edge.as_str()) {
                    continue;
                }
                self.frontier.enqueue(edge.clone(), next_depth);
            }
        }

        tracing::debug!(
            "Recorded {} ({} internal links)",
            url,
            record.outgoing_internal_links.len()
        );
        self.records.push(record);
        self.counters.pages_recorded += 1;
    }
}

/// Runs a complete audit for the given configuration
///
/// # Example
///
/// ```no_run
/// use site_auditor::{run_audit, Config};
///
/// # async fn example() -> site_auditor::Result<()> {
/// let report = run_audit(Config::for_seed("https://example.com/")).await?;
/// println!("{} pages audited", report.pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_audit(config: Config) -> Result<AuditReport, AuditError> {
    Coordinator::new(config)?.run().await
}
