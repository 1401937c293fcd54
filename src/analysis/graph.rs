use crate::record::PageRecord;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Authority propagation iterations
pub const AUTHORITY_ITERATIONS: usize = 10;
pub const DAMPING: f64 = 0.85;

/// Internal link graph built from the crawled records
///
/// `nodes` are the crawled pages in crawl order. Edges keep every
/// gate-eligible target, including pages that were never crawled.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkGraph {
    nodes: Vec<String>,
    edges: HashMap<String, Vec<String>>,
}

impl LinkGraph {
    pub fn from_records(records: &[PageRecord]) -> Self {
        let nodes = records.iter().map(|r| r.url.clone()).collect();
        let edges = records
            .iter()
            .map(|r| (r.url.clone(), r.outgoing_internal_links.clone()))
            .collect();
        Self { nodes, edges }
    }

    /// Builds a graph from `(source, targets)` pairs; sources become nodes
    pub fn from_edges<S: Into<String>>(adjacency: Vec<(S, Vec<S>)>) -> Self {
        let mut graph = Self::default();
        for (source, targets) in adjacency {
            let source = source.into();
            graph.nodes.push(source.clone());
            graph
                .edges
                .insert(source, targets.into_iter().map(Into::into).collect());
        }
        graph
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn is_crawled(&self, url: &str) -> bool {
        self.nodes.iter().any(|n| n == url)
    }

    /// Raw targets of a page, in document order
    pub fn targets(&self, source: &str) -> &[String] {
        self.edges.get(source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct crawled targets of each crawled page
    fn crawled_targets(&self) -> HashMap<&str, HashSet<&str>> {
        let crawled: HashSet<&str> = self.nodes.iter().map(String::as_str).collect();
        self.nodes
            .iter()
            .map(|source| {
                let targets = self
                    .targets(source)
                    .iter()
                    .map(String::as_str)
                    .filter(|t| crawled.contains(t))
                    .collect();
                (source.as_str(), targets)
            })
            .collect()
    }

    /// Damped authority scores after a fixed number of iterations
    ///
    /// Every page starts at 1.0. Each round a page receives
    /// `0.15 + 0.85 * sum(score(s) / out_degree(s))` over the distinct crawled
    /// pages `s` linking to it, where the out-degree counts distinct crawled
    /// targets. Scores are not normalized.
    pub fn authority(&self, iterations: usize) -> HashMap<String, f64> {
        let targets = self.crawled_targets();
        let mut scores: HashMap<&str, f64> =
            self.nodes.iter().map(|n| (n.as_str(), 1.0)).collect();

        for _ in 0..iterations {
            let mut next: HashMap<&str, f64> =
                self.nodes.iter().map(|n| (n.as_str(), 1.0 - DAMPING)).collect();

            // crawl order keeps float summation order stable between runs
            for source in &self.nodes {
                let source = source.as_str();
                let outgoing = &targets[source];
                if outgoing.is_empty() {
                    continue;
                }
                let share = scores[source] / outgoing.len() as f64;
                for target in outgoing {
                    if let Some(score) = next.get_mut(target) {
                        *score += DAMPING * share;
                    }
                }
            }

            scores = next;
        }

        scores
            .into_iter()
            .map(|(url, score)| (url.to_string(), score))
            .collect()
    }

    /// Number of distinct other crawled pages linking to `url`
    pub fn incoming_count(&self, url: &str) -> usize {
        self.nodes
            .iter()
            .filter(|source| source.as_str() != url)
            .filter(|source| self.targets(source).iter().any(|t| t == url))
            .count()
    }

    /// Crawled pages other than the seed without inbound links from other pages
    pub fn orphans(&self, seed: &str) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| n.as_str() != seed && self.incoming_count(n) == 0)
            .map(String::as_str)
            .collect()
    }
}
