//! Site-wide statistics over the recorded pages
//!
//! This module aggregates per-page scores and issues into the figures shown
//! on the console and at the top of the markdown summary.

use crate::metrics::text::round_to;
use crate::metrics::THIN_CONTENT_WORDS;
use crate::record::{AuditReport, PageRecord};
use std::collections::HashMap;

/// Site statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteStatistics {
    /// Number of recorded pages
    pub total_pages: usize,

    /// Average composite scores, rounded to one decimal
    pub avg_site_health: f64,
    pub avg_tech_health: f64,
    pub avg_content_health: f64,
    pub avg_seo_health: f64,
    pub avg_trust: f64,
    pub avg_eeat: f64,

    pub avg_word_count: f64,

    /// Pages with no inbound internal link (seed excluded)
    pub orphan_pages: usize,

    /// Pages under the thin-content word threshold
    pub thin_pages: usize,

    /// Pages listed in the sitemap
    pub pages_in_sitemap: usize,

    /// Internal edges in the link graph
    pub total_links: usize,

    pub topic_clusters: usize,

    /// Issue kind and number of pages reporting it, most frequent first
    pub issue_counts: Vec<(String, usize)>,
}

impl SiteStatistics {
    /// Aggregates statistics from a finished report
    pub fn from_report(report: &AuditReport) -> Self {
        let pages = &report.pages;
        let avg = |f: fn(&PageRecord) -> f64| -> f64 {
            if pages.is_empty() {
                return 0.0;
            }
            round_to(pages.iter().map(f).sum::<f64>() / pages.len() as f64, 1)
        };

        Self {
            total_pages: pages.len(),
            avg_site_health: avg(|p| p.scores.site_health),
            avg_tech_health: avg(|p| p.scores.tech_health),
            avg_content_health: avg(|p| p.scores.content_health),
            avg_seo_health: avg(|p| p.scores.seo_health),
            avg_trust: avg(|p| p.scores.trust),
            avg_eeat: avg(|p| p.scores.eeat),
            avg_word_count: avg(|p| p.metrics.content.word_count as f64),
            orphan_pages: pages.iter().filter(|p| p.graph.is_orphan).count(),
            thin_pages: pages
                .iter()
                .filter(|p| p.metrics.content.word_count < THIN_CONTENT_WORDS)
                .count(),
            pages_in_sitemap: pages.iter().filter(|p| p.in_sitemap).count(),
            total_links: pages.iter().map(|p| p.outgoing_internal_links.len()).sum(),
            topic_clusters: report.clusters.len(),
            issue_counts: issue_counts(pages),
        }
    }
}

/// Groups page issues by kind, the text before the first `:`
fn issue_counts(pages: &[PageRecord]) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for page in pages {
        for issue in &page.metrics.issues {
            let kind = issue.split(':').next().unwrap_or(issue).trim().to_string();
            let entry = counts.entry(kind.clone()).or_insert_with(|| {
                order.push(kind);
                0
            });
            *entry += 1;
        }
    }

    let mut result: Vec<(String, usize)> = order
        .into_iter()
        .map(|kind| {
            let count = counts.get(&kind).copied().unwrap_or(0);
            (kind, count)
        })
        .collect();
    // stable: ties keep first-seen order
    result.sort_by(|a, b| b.1.cmp(&a.1));
    result
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &SiteStatistics) {
    println!("=== Site Audit Statistics ===\n");

    println!("Overview:");
    println!("  Pages audited: {}", stats.total_pages);
    println!("  Internal links: {}", stats.total_links);
    println!("  Orphan pages: {}", stats.orphan_pages);
    println!("  Thin pages: {}", stats.thin_pages);
    println!("  Pages in sitemap: {}", stats.pages_in_sitemap);
    println!("  Topic clusters: {}", stats.topic_clusters);
    println!("  Average word count: {:.0}", stats.avg_word_count);
    println!();

    println!("Average Scores:");
    println!("  Site health: {:.1}", stats.avg_site_health);
    println!("  Technical: {:.1}", stats.avg_tech_health);
    println!("  Content: {:.1}", stats.avg_content_health);
    println!("  SEO: {:.1}", stats.avg_seo_health);
    println!("  Trust: {:.1}", stats.avg_trust);
    println!("  E-E-A-T: {:.1}", stats.avg_eeat);
    println!();

    if !stats.issue_counts.is_empty() {
        println!("Issues:");
        for (kind, count) in &stats.issue_counts {
            let percentage = if stats.total_pages > 0 {
                (*count as f64 / stats.total_pages as f64) * 100.0
            } else {
                0.0
            };
            println!("  {}: {} ({:.1}%)", kind, count, percentage);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::PageMetrics;
    use crate::state::CrawlCounters;
    use chrono::Utc;

    fn page(url: &str, words: usize, health: f64, issues: &[&str]) -> PageRecord {
        let mut record = PageRecord::new(url, 0, PageMetrics::default());
        record.metrics.content.word_count = words;
        record.metrics.issues = issues.iter().map(|i| i.to_string()).collect();
        record.scores.site_health = health;
        record
    }

    fn report(pages: Vec<PageRecord>) -> AuditReport {
        AuditReport {
            seed: "https://example.com/".to_string(),
            domain: "example.com".to_string(),
            pages,
            graph: Default::default(),
            clusters: Vec::new(),
            counters: CrawlCounters::default(),
            sitemap_urls: Vec::new(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn test_averages_and_counts() {
        let mut orphan = page("https://example.com/b", 100, 50.0, &["Thin content: 100 words (300+)"]);
        orphan.graph.is_orphan = true;

        let stats = SiteStatistics::from_report(&report(vec![
            page("https://example.com/", 500, 80.0, &["H1 count: 0 (expected 1)"]),
            orphan,
        ]));

        assert_eq!(stats.total_pages, 2);
        assert_eq!(stats.avg_site_health, 65.0);
        assert_eq!(stats.avg_word_count, 300.0);
        assert_eq!(stats.orphan_pages, 1);
        assert_eq!(stats.thin_pages, 1);
    }

    #[test]
    fn test_issue_counts_grouped_by_kind() {
        let stats = SiteStatistics::from_report(&report(vec![
            page("https://example.com/", 500, 0.0, &["Title length: 10 (30-60)"]),
            page(
                "https://example.com/a",
                500,
                0.0,
                &["H1 count: 2 (expected 1)", "Title length: 90 (30-60)"],
            ),
        ]));

        assert_eq!(
            stats.issue_counts,
            vec![("Title length".to_string(), 2), ("H1 count".to_string(), 1)]
        );
    }

    #[test]
    fn test_empty_report() {
        let stats = SiteStatistics::from_report(&report(Vec::new()));
        assert_eq!(stats, SiteStatistics::default());
    }
}
