use serde::{Deserialize, Serialize};

/// Browser-like user agent sent with every request
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Main configuration structure for Site-Auditor
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Builds a configuration with default settings for the given seed URL
    pub fn for_seed(seed_url: &str) -> Self {
        Self {
            crawler: CrawlerConfig {
                seed_url: seed_url.to_string(),
                ..CrawlerConfig::default()
            },
            user_agent: UserAgentConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrawlerConfig {
    /// URL the crawl starts from; its host[:port] defines the crawl domain
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Maximum number of URLs marked visited in one run
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// Maximum BFS depth from the seed
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Queue length bound, as a multiple of `max_pages`
    #[serde(
        rename = "frontier-slack-factor",
        default = "default_frontier_slack_factor"
    )]
    pub frontier_slack_factor: u32,

    /// Pause between consecutive fetches (milliseconds)
    #[serde(
        rename = "politeness-delay-ms",
        default = "default_politeness_delay_ms"
    )]
    pub politeness_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(
        rename = "request-timeout-secs",
        default = "default_request_timeout_secs"
    )]
    pub request_timeout_secs: u64,

    /// Extra attempts for transient fetch failures
    #[serde(rename = "max-retries", default)]
    pub max_retries: u32,

    /// Fetch /sitemap.xml before crawling
    #[serde(rename = "load-sitemap", default = "default_true")]
    pub load_sitemap: bool,

    /// Enqueue same-domain sitemap URLs after the seed
    #[serde(rename = "seed-from-sitemap", default)]
    pub seed_from_sitemap: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seed_url: String::new(),
            max_pages: default_max_pages(),
            max_depth: default_max_depth(),
            frontier_slack_factor: default_frontier_slack_factor(),
            politeness_delay_ms: default_politeness_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: 0,
            load_sitemap: true,
            seed_from_sitemap: false,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserAgentConfig {
    /// Value of the User-Agent header
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Product token matched against robots.txt groups
    #[serde(rename = "robots-token", default = "default_robots_token")]
    pub robots_token: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            robots_token: default_robots_token(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Path to the markdown summary file
    #[serde(rename = "summary-path", default = "default_summary_path")]
    pub summary_path: String,

    /// Path to the JSON export (skipped when unset)
    #[serde(rename = "json-path", default)]
    pub json_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            summary_path: default_summary_path(),
            json_path: None,
        }
    }
}

fn default_max_pages() -> u32 {
    50
}

fn default_max_depth() -> u32 {
    3
}

fn default_frontier_slack_factor() -> u32 {
    2
}

fn default_politeness_delay_ms() -> u64 {
    200
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_robots_token() -> String {
    "SiteAuditor".to_string()
}

fn default_summary_path() -> String {
    "./audit_summary.md".to_string()
}
