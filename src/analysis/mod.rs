//! Post-crawl analysis over the full record set
//!
//! Runs once after traversal ends. Works on any subset of pages, so a crawl
//! that stopped early still produces a consistent report.
//!
//! # Components
//!
//! - `LinkGraph`: internal link adjacency, authority propagation, orphans
//! - `CorpusIndex`: document frequencies for TF-IDF keywords
//! - semantic link suggestions from title keywords
//! - greedy topic clustering over TF-IDF terms
//! - anchor-text and linking quality

mod anchors;
mod clusters;
mod graph;
mod semantic;
mod tfidf;

pub use anchors::{anchor_quality, linking_quality, GENERIC_ANCHORS};
pub use clusters::{cluster_topics, jaccard, CLUSTER_SIMILARITY, FALLBACK_CLUSTER};
pub use graph::{LinkGraph, AUTHORITY_ITERATIONS, DAMPING};
pub use semantic::{suggest_links, title_keywords};
pub use tfidf::CorpusIndex;

use crate::metrics::text::round_to;
use crate::record::{PageRecord, TopicCluster};

/// Site-level results of the analysis pass
#[derive(Debug, Clone, Default)]
pub struct SiteAnalysis {
    pub graph: LinkGraph,
    pub clusters: Vec<TopicCluster>,
}

/// Annotates every record with graph, keyword, cluster and linking results
pub fn analyze(records: &mut [PageRecord], seed: &str) -> SiteAnalysis {
    let graph = LinkGraph::from_records(records);
    let authority = graph.authority(AUTHORITY_ITERATIONS);

    for record in records.iter_mut() {
        let incoming = graph.incoming_count(&record.url);
        let annotations = &mut record.graph;
        let score = authority.get(&record.url).copied().unwrap_or(0.0);
        annotations.authority_score = round_to(score, 2);
        annotations.incoming_links = incoming;
        annotations.is_orphan = incoming == 0 && record.url != seed;
    }

    let index = CorpusIndex::build(records.iter().map(|r| r.text.as_str()));
    tracing::debug!("Corpus index built over {} documents", index.total_docs());

    for record in records.iter_mut() {
        record.graph.tf_idf_keywords = index.keywords(&record.text);
        record.graph.top_keywords = record
            .metrics
            .content
            .top_keywords
            .iter()
            .map(|k| k.word.clone())
            .collect();

        let (quality, total) = anchor_quality(&record.anchors);
        let (linking, issues) = linking_quality(quality, total);
        record.graph.anchor_text_quality = quality;
        record.graph.total_links = total;
        record.graph.linking_quality = linking;
        record.graph.linking_issues = issues;
    }

    let suggestions = suggest_links(records);
    for (record, links) in records.iter_mut().zip(suggestions) {
        record.graph.semantic_links = links;
    }

    let clusters = {
        let pages: Vec<(&str, &[(String, f64)])> = records
            .iter()
            .map(|r| (r.url.as_str(), r.graph.tf_idf_keywords.as_slice()))
            .collect();
        cluster_topics(&pages)
    };

    for cluster in &clusters {
        for record in records.iter_mut() {
            if record.url == cluster.hub {
                record.graph.topic_cluster = Some(cluster.name.clone());
                record.graph.is_topic_hub = true;
            } else if cluster.satellites.contains(&record.url) {
                record.graph.topic_cluster = Some(cluster.name.clone());
            }
        }
    }

    let orphans = records.iter().filter(|r| r.graph.is_orphan).count();
    tracing::info!(
        "Analysis complete: {} pages, {} clusters, {} orphans",
        records.len(),
        clusters.len(),
        orphans
    );

    SiteAnalysis { graph, clusters }
}
