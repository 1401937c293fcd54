//! Page records and the final audit report

use crate::analysis::LinkGraph;
use crate::metrics::PageMetrics;
use crate::state::CrawlCounters;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A related page suggested for internal linking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticLink {
    pub target_url: String,
    pub target_title: String,
    pub matching_keywords: Vec<String>,
    pub relevance: f64,
    pub suggested_anchor: String,
}

/// Annotations written by the post-crawl analysis pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphAnnotations {
    pub authority_score: f64,
    pub incoming_links: usize,
    pub is_orphan: bool,
    pub top_keywords: Vec<String>,
    /// Term and score, highest first
    pub tf_idf_keywords: Vec<(String, f64)>,
    pub semantic_links: Vec<SemanticLink>,
    pub topic_cluster: Option<String>,
    pub is_topic_hub: bool,
    pub anchor_text_quality: f64,
    pub total_links: usize,
    pub linking_quality: u32,
    pub linking_issues: Vec<String>,
}

/// Composite scores written by the scorer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CompositeScores {
    pub tech_health: f64,
    pub content_health: f64,
    pub seo_health: f64,
    pub trust: f64,
    pub eeat: f64,
    pub site_health: f64,
}

/// One successfully fetched, in-scope page
#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    pub url: String,
    pub depth: u32,
    pub final_url: String,
    pub status: u16,
    pub in_sitemap: bool,
    pub metrics: PageMetrics,
    /// Gate-eligible internal link targets in document order
    pub outgoing_internal_links: Vec<String>,
    /// Lower-cased anchor texts seen on the page
    pub anchors: Vec<String>,
    #[serde(skip)]
    pub text: String,
    pub graph: GraphAnnotations,
    pub scores: CompositeScores,
}

impl PageRecord {
    /// Builds a record with empty analysis and score annotations
    pub fn new(url: impl Into<String>, depth: u32, metrics: PageMetrics) -> Self {
        let url = url.into();
        Self {
            final_url: url.clone(),
            url,
            depth,
            status: 200,
            in_sitemap: false,
            metrics,
            outgoing_internal_links: Vec::new(),
            anchors: Vec::new(),
            text: String::new(),
            graph: GraphAnnotations::default(),
            scores: CompositeScores::default(),
        }
    }
}

/// A hub page and the pages grouped with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicCluster {
    pub name: String,
    pub hub: String,
    pub satellites: Vec<String>,
}

/// Everything produced by one audit run
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub seed: String,
    pub domain: String,
    pub pages: Vec<PageRecord>,
    pub graph: LinkGraph,
    pub clusters: Vec<TopicCluster>,
    pub counters: CrawlCounters,
    pub sitemap_urls: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl AuditReport {
    pub fn page(&self, url: &str) -> Option<&PageRecord> {
        self.pages.iter().find(|p| p.url == url)
    }

    pub fn orphans(&self) -> impl Iterator<Item = &PageRecord> {
        self.pages.iter().filter(|p| p.graph.is_orphan)
    }

    pub fn duration_secs(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}
