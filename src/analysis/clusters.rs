use crate::record::TopicCluster;
use std::collections::HashSet;

/// Minimum Jaccard similarity for a page to join a hub's cluster
pub const CLUSTER_SIMILARITY: f64 = 0.3;

/// Name given to clusters whose hub has no TF-IDF terms
pub const FALLBACK_CLUSTER: &str = "other";

/// Jaccard similarity of two term sets; zero when either is empty
pub fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    let union = a.union(b).count();
    shared as f64 / union as f64
}

/// Greedy single-pass clustering over TF-IDF term sets
///
/// Pages are visited in the order given (crawl order). The first unassigned
/// page becomes a hub named after its top term; every later unassigned page
/// whose term set is more than 30% similar joins it. Pages without terms end
/// up as single-page `other` clusters.
pub fn cluster_topics(pages: &[(&str, &[(String, f64)])]) -> Vec<TopicCluster> {
    let term_sets: Vec<HashSet<&str>> = pages
        .iter()
        .map(|(_, terms)| terms.iter().map(|(t, _)| t.as_str()).collect())
        .collect();

    let mut assigned = vec![false; pages.len()];
    let mut clusters = Vec::new();

    for (i, (hub, terms)) in pages.iter().enumerate() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;

        let name = terms
            .first()
            .map(|(t, _)| t.clone())
            .unwrap_or_else(|| FALLBACK_CLUSTER.to_string());

        let mut satellites = Vec::new();
        for (j, (candidate, _)) in pages.iter().enumerate() {
            if assigned[j] {
                continue;
            }
            if jaccard(&term_sets[i], &term_sets[j]) > CLUSTER_SIMILARITY {
                assigned[j] = true;
                satellites.push(candidate.to_string());
            }
        }

        clusters.push(TopicCluster {
            name,
            hub: hub.to_string(),
            satellites,
        });
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(words: &[&str]) -> Vec<(String, f64)> {
        words.iter().map(|w| (w.to_string(), 0.1)).collect()
    }

    #[test]
    fn test_jaccard() {
        let a: HashSet<&str> = ["x", "y"].into_iter().collect();
        let b: HashSet<&str> = ["y", "z"].into_iter().collect();
        let empty = HashSet::new();
        assert!((jaccard(&a, &b) - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(jaccard(&a, &empty), 0.0);
    }

    #[test]
    fn test_greedy_clusters_in_order() {
        let home = terms(&["rust", "crawler"]);
        let a = terms(&["rust", "crawler", "async"]);
        let b = terms(&["cooking", "pasta"]);
        let c = terms(&[]);
        let pages: Vec<(&str, &[(String, f64)])> =
            vec![("/", &home[..]), ("/a", &a[..]), ("/b", &b[..]), ("/c", &c[..])];

        let clusters = cluster_topics(&pages);
        assert_eq!(clusters.len(), 3);
        assert_eq!(clusters[0].name, "rust");
        assert_eq!(clusters[0].hub, "/");
        assert_eq!(clusters[0].satellites, vec!["/a".to_string()]);
        assert_eq!(clusters[1].name, "cooking");
        assert!(clusters[1].satellites.is_empty());
        assert_eq!(clusters[2].name, FALLBACK_CLUSTER);
        assert_eq!(clusters[2].hub, "/c");
    }

    #[test]
    fn test_similarity_threshold_is_strict() {
        // 1 shared of 3 total is above 0.3; 1 of 4 is not
        let hub = terms(&["a", "b"]);
        let near = terms(&["b", "c"]);
        let far = terms(&["a", "x", "y"]);
        let pages: Vec<(&str, &[(String, f64)])> =
            vec![("/", &hub[..]), ("/n", &near[..]), ("/f", &far[..])];

        let clusters = cluster_topics(&pages);
        assert_eq!(clusters[0].satellites, vec!["/n".to_string()]);
        assert_eq!(clusters[1].hub, "/f");
    }
}
