//! Output handler traits and types
//!
//! This module defines the trait interface for report writers and the
//! condensed summary they render from an [`AuditReport`].

use crate::output::stats::SiteStatistics;
use crate::record::AuditReport;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Run-level summary of one audit
#[derive(Debug, Clone, Default)]
pub struct AuditSummary {
    // Run metadata
    pub seed: String,
    pub domain: String,
    pub started_at: String,
    pub finished_at: String,
    pub duration_seconds: i64,

    // Crawl counters
    pub pages_visited: u32,
    pub pages_recorded: u32,
    pub pages_skipped: u32,
    pub pages_non_html: u32,
    pub total_errors: u32,
    pub sitemap_urls: usize,

    // Depth breakdown (depth -> recorded pages)
    pub depth_breakdown: BTreeMap<u32, usize>,

    pub statistics: SiteStatistics,
}

impl AuditSummary {
    /// Condenses a finished report
    pub fn from_report(report: &AuditReport) -> Self {
        let mut depth_breakdown = BTreeMap::new();
        for page in &report.pages {
            *depth_breakdown.entry(page.depth).or_insert(0) += 1;
        }

        Self {
            seed: report.seed.clone(),
            domain: report.domain.clone(),
            started_at: report.started_at.to_rfc3339(),
            finished_at: report.finished_at.to_rfc3339(),
            duration_seconds: report.duration_secs(),
            pages_visited: report.counters.pages_visited,
            pages_recorded: report.counters.pages_recorded,
            pages_skipped: report.counters.pages_skipped,
            pages_non_html: report.counters.non_html,
            total_errors: report.counters.errors,
            sitemap_urls: report.sitemap_urls.len(),
            depth_breakdown,
            statistics: SiteStatistics::from_report(report),
        }
    }

    /// Returns the share of visited URLs that produced a record, in percent
    pub fn success_rate(&self) -> f64 {
        if self.pages_visited == 0 {
            return 0.0;
        }
        (self.pages_recorded as f64 / self.pages_visited as f64) * 100.0
    }

    /// Returns the share of visited URLs that failed to fetch, in percent
    pub fn error_rate(&self) -> f64 {
        if self.pages_visited == 0 {
            return 0.0;
        }
        (self.total_errors as f64 / self.pages_visited as f64) * 100.0
    }
}

/// Trait for report writers
///
/// Each handler renders the finished report to its own destination.
pub trait OutputHandler {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Writes the report
    ///
    /// # Arguments
    ///
    /// * `report` - The finished audit report
    fn write_report(&self, report: &AuditReport) -> OutputResult<()>;
}
