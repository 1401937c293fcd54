//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of an audit,
//! including run information, site averages, the weakest pages, orphans,
//! topic clusters, and a per-page table.

use crate::output::traits::{AuditSummary, OutputHandler, OutputResult};
use crate::record::AuditReport;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Pages listed in the "Weakest Pages" section
const WORST_PAGES: usize = 10;

/// Writes the markdown summary to a file
#[derive(Debug, Clone)]
pub struct MarkdownSummary {
    path: PathBuf,
}

impl MarkdownSummary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputHandler for MarkdownSummary {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn write_report(&self, report: &AuditReport) -> OutputResult<()> {
        generate_markdown_summary(report, &self.path)
    }
}

/// Generates a markdown summary from an audit report
///
/// # Arguments
///
/// * `report` - The finished audit report
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(report: &AuditReport, output_path: &Path) -> OutputResult<()> {
    let summary = AuditSummary::from_report(report);
    let markdown = format_markdown_summary(&summary, report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Table cells cannot contain raw pipes or newlines
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
        .replace(|c: char| c == '\n' || c == '\r', " ")
}

/// Formats an audit as markdown
///
/// # Arguments
///
/// * `summary` - The condensed run summary
/// * `report` - The full report, for the per-page sections
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_summary(summary: &AuditSummary, report: &AuditReport) -> String {
    let stats = &summary.statistics;
    let mut md = String::new();

    // Title
    md.push_str("# Site Audit Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed**: {}\n", summary.seed));
    md.push_str(&format!("- **Domain**: {}\n", summary.domain));
    md.push_str(&format!("- **Started**: {}\n", summary.started_at));
    md.push_str(&format!("- **Finished**: {}\n", summary.finished_at));
    md.push_str(&format!(
        "- **Duration**: {} seconds ({:.2} minutes)\n\n",
        summary.duration_seconds,
        summary.duration_seconds as f64 / 60.0
    ));

    // Crawl counters
    md.push_str("## Crawl Statistics\n\n");
    md.push_str("| Counter | Count |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!("| Visited | {} |\n", summary.pages_visited));
    md.push_str(&format!("| Recorded | {} |\n", summary.pages_recorded));
    md.push_str(&format!("| Skipped | {} |\n", summary.pages_skipped));
    md.push_str(&format!("| Non-HTML | {} |\n", summary.pages_non_html));
    md.push_str(&format!("| Errors | {} |\n", summary.total_errors));
    md.push_str(&format!("| Sitemap URLs | {} |\n\n", summary.sitemap_urls));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n",
        summary.success_rate()
    ));
    md.push_str(&format!("- **Error Rate**: {:.2}%\n\n", summary.error_rate()));

    // Site averages
    md.push_str("## Site Averages\n\n");
    md.push_str("| Score | Average |\n");
    md.push_str("|-------|---------|\n");
    md.push_str(&format!("| Site Health | {:.1} |\n", stats.avg_site_health));
    md.push_str(&format!("| Technical | {:.1} |\n", stats.avg_tech_health));
    md.push_str(&format!("| Content | {:.1} |\n", stats.avg_content_health));
    md.push_str(&format!("| SEO | {:.1} |\n", stats.avg_seo_health));
    md.push_str(&format!("| Trust | {:.1} |\n", stats.avg_trust));
    md.push_str(&format!("| E-E-A-T | {:.1} |\n\n", stats.avg_eeat));
    md.push_str(&format!("- **Internal Links**: {}\n", stats.total_links));
    md.push_str(&format!("- **Thin Pages**: {}\n", stats.thin_pages));
    md.push_str(&format!(
        "- **Average Word Count**: {:.0}\n\n",
        stats.avg_word_count
    ));

    // Depth breakdown
    if !summary.depth_breakdown.is_empty() {
        md.push_str("## Depth Breakdown\n\n");
        md.push_str("| Depth | Pages |\n");
        md.push_str("|-------|-------|\n");
        for (depth, count) in &summary.depth_breakdown {
            md.push_str(&format!("| {} | {} |\n", depth, count));
        }
        md.push('\n');
    }

    // Issue summary
    if !stats.issue_counts.is_empty() {
        md.push_str("## Issue Summary\n\n");
        md.push_str("| Issue | Pages |\n");
        md.push_str("|-------|-------|\n");
        for (kind, count) in &stats.issue_counts {
            md.push_str(&format!("| {} | {} |\n", cell(kind), count));
        }
        md.push('\n');
    }

    // Weakest pages
    if !report.pages.is_empty() {
        let mut worst: Vec<_> = report.pages.iter().collect();
        worst.sort_by(|a, b| {
            a.scores
                .site_health
                .partial_cmp(&b.scores.site_health)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        md.push_str(&format!("## Weakest {} Pages\n\n", WORST_PAGES));
        md.push_str("| URL | Site Health | Issues |\n");
        md.push_str("|-----|-------------|--------|\n");
        for page in worst.into_iter().take(WORST_PAGES) {
            md.push_str(&format!(
                "| {} | {:.1} | {} |\n",
                cell(&page.url),
                page.scores.site_health,
                cell(&page.metrics.issues.join("; "))
            ));
        }
        md.push('\n');
    }

    // Orphans
    let orphans: Vec<_> = report.orphans().collect();
    if !orphans.is_empty() {
        md.push_str("## Orphan Pages\n\n");
        md.push_str(&format!("Total: {}\n\n", orphans.len()));
        for page in orphans {
            md.push_str(&format!("- {}\n", page.url));
        }
        md.push('\n');
    }

    // Topic clusters
    if !report.clusters.is_empty() {
        md.push_str("## Topic Clusters\n\n");
        md.push_str("| Topic | Hub | Satellites |\n");
        md.push_str("|-------|-----|------------|\n");
        for cluster in &report.clusters {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                cell(&cluster.name),
                cell(&cluster.hub),
                cluster.satellites.len()
            ));
        }
        md.push('\n');
    }

    // Per-page table
    if !report.pages.is_empty() {
        md.push_str("## Pages\n\n");
        md.push_str(
            "| URL | Depth | Status | Words | Title Length | H1 | Headings | Authority | Incoming | Site Health | Topic |\n",
        );
        md.push_str(
            "|-----|-------|--------|-------|--------------|----|----------|-----------|----------|-------------|-------|\n",
        );
        for page in &report.pages {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {:.2} | {} | {:.1} | {} |\n",
                cell(&page.url),
                page.depth,
                page.status,
                page.metrics.content.word_count,
                page.metrics.title_length,
                page.metrics.headings.h1_count,
                page.metrics.headings.hierarchy,
                page.graph.authority_score,
                page.graph.incoming_links,
                page.scores.site_health,
                cell(page.graph.topic_cluster.as_deref().unwrap_or("-"))
            ));
        }
        md.push('\n');
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::PageMetrics;
    use crate::record::{PageRecord, TopicCluster};
    use crate::state::CrawlCounters;
    use chrono::Utc;

    fn create_test_report() -> AuditReport {
        let mut home = PageRecord::new("https://example.com/", 0, PageMetrics::default());
        home.scores.site_health = 72.5;
        home.graph.topic_cluster = Some("rust".to_string());

        let mut orphan = PageRecord::new("https://example.com/lost", 1, PageMetrics::default());
        orphan.graph.is_orphan = true;
        orphan.metrics.issues = vec!["Thin content: 12 words (300+)".to_string()];

        AuditReport {
            seed: "https://example.com/".to_string(),
            domain: "example.com".to_string(),
            pages: vec![home, orphan],
            graph: Default::default(),
            clusters: vec![TopicCluster {
                name: "rust".to_string(),
                hub: "https://example.com/".to_string(),
                satellites: vec![],
            }],
            counters: CrawlCounters {
                pages_visited: 3,
                pages_recorded: 2,
                pages_skipped: 4,
                non_html: 1,
                errors: 0,
            },
            sitemap_urls: Vec::new(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_markdown_summary() {
        let report = create_test_report();
        let summary = AuditSummary::from_report(&report);
        let markdown = format_markdown_summary(&summary, &report);

        assert!(markdown.contains("# Site Audit Summary"));
        assert!(markdown.contains("- **Domain**: example.com"));
        assert!(markdown.contains("| Visited | 3 |"));
        assert!(markdown.contains("| Non-HTML | 1 |"));
    }

    #[test]
    fn test_markdown_lists_orphans_and_clusters() {
        let report = create_test_report();
        let summary = AuditSummary::from_report(&report);
        let markdown = format_markdown_summary(&summary, &report);

        assert!(markdown.contains("## Orphan Pages"));
        assert!(markdown.contains("- https://example.com/lost"));
        assert!(markdown.contains("| rust | https://example.com/ | 0 |"));
        assert!(markdown.contains("| Thin content | 1 |"));
    }

    #[test]
    fn test_markdown_with_depth_breakdown() {
        let report = create_test_report();
        let summary = AuditSummary::from_report(&report);
        let markdown = format_markdown_summary(&summary, &report);

        assert!(markdown.contains("Depth Breakdown"));
        assert!(markdown.contains("| 0 | 1 |"));
        assert!(markdown.contains("| 1 | 1 |"));
    }

    #[test]
    fn test_cell_escapes_pipes() {
        assert_eq!(cell("a|b\nc"), "a\\|b c");
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let handler = MarkdownSummary::new(dir.path().join("summary.md"));

        handler.write_report(&create_test_report()).unwrap();

        let written = std::fs::read_to_string(handler.path()).unwrap();
        assert!(written.starts_with("# Site Audit Summary"));
    }
}
