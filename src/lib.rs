//! Site-Auditor: a polite single-site SEO crawler
//!
//! This crate crawls one website breadth-first, respecting robots.txt and a
//! politeness delay, extracts per-page SEO metrics, and runs a post-crawl pass
//! over the collected pages (internal link graph, authority propagation,
//! TF-IDF keywords, topic clusters, composite scores).

pub mod analysis;
pub mod config;
pub mod crawler;
pub mod metrics;
pub mod output;
pub mod record;
pub mod robots;
pub mod scoring;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for audit operations
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_audit, Coordinator};
pub use record::{AuditReport, PageRecord};
pub use state::CrawlState;
pub use url::FetchGate;
