//! Output module for audit summaries and exports
//!
//! This module handles:
//! - Generating the markdown summary of an audit
//! - Exporting the full report as JSON
//! - Aggregating site statistics for the console

mod json;
mod markdown;
pub mod stats;
mod traits;

pub use json::JsonExport;
pub use markdown::{format_markdown_summary, generate_markdown_summary, MarkdownSummary};
pub use stats::{print_statistics, SiteStatistics};
pub use traits::{AuditSummary, OutputError, OutputHandler, OutputResult};

use crate::config::OutputConfig;
use crate::record::AuditReport;

/// Builds the handlers enabled by the output configuration
pub fn handlers_for(config: &OutputConfig) -> Vec<Box<dyn OutputHandler>> {
    let mut handlers: Vec<Box<dyn OutputHandler>> =
        vec![Box::new(MarkdownSummary::new(&config.summary_path))];
    if let Some(path) = &config.json_path {
        handlers.push(Box::new(JsonExport::new(path)));
    }
    handlers
}

/// Runs every handler over the report, stopping at the first failure
pub fn write_all(handlers: &[Box<dyn OutputHandler>], report: &AuditReport) -> OutputResult<()> {
    for handler in handlers {
        handler.write_report(report)?;
        tracing::info!("Wrote {} output", handler.name());
    }
    Ok(())
}
