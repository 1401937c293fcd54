use crate::metrics::text::is_alpha;
use crate::metrics::text::round_to;
use crate::record::{PageRecord, SemanticLink};
use std::collections::HashSet;

/// Keywords taken from title and H1
const TITLE_KEYWORDS: usize = 5;
/// Suggestions kept per page
const MAX_SUGGESTIONS: usize = 3;

/// Up to five alphabetic words longer than three characters from the title
/// followed by the H1, lower-cased
pub fn title_keywords(title: &str, h1: &str) -> Vec<String> {
    format!("{} {}", title, h1)
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() > 3 && is_alpha(w))
        .take(TITLE_KEYWORDS)
        .map(str::to_string)
        .collect()
}

/// Related-page suggestions for every record, aligned with `records`
///
/// A page is related when its top keywords share at least one word with the
/// source page's title keywords. Relevance is the Jaccard overlap of the two
/// word sets; the three most relevant pages are kept, ties in crawl order.
pub fn suggest_links(records: &[PageRecord]) -> Vec<Vec<SemanticLink>> {
    let title_words: Vec<Vec<String>> = records
        .iter()
        .map(|r| title_keywords(&r.metrics.title, &r.metrics.h1_text))
        .collect();

    records
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let own: &[String] = &title_words[i];
            let own_set: HashSet<&str> = own.iter().map(String::as_str).collect();

            let mut links: Vec<SemanticLink> = records
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .filter_map(|(_, other)| {
                    let other_set: HashSet<&str> = other
                        .metrics
                        .content
                        .top_keywords
                        .iter()
                        .map(|k| k.word.as_str())
                        .collect();

                    let mut matching: Vec<String> = Vec::new();
                    for word in own {
                        if other_set.contains(word.as_str()) && !matching.contains(word) {
                            matching.push(word.clone());
                        }
                    }
                    if matching.is_empty() {
                        return None;
                    }

                    let union = own_set.union(&other_set).count();
                    Some(SemanticLink {
                        target_url: other.url.clone(),
                        target_title: other.metrics.title.clone(),
                        suggested_anchor: matching[0].clone(),
                        relevance: round_to(matching.len() as f64 / union as f64, 2),
                        matching_keywords: matching,
                    })
                })
                .collect();

            links.sort_by(|a, b| {
                b.relevance
                    .partial_cmp(&a.relevance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            links.truncate(MAX_SUGGESTIONS);
            links
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{KeywordCount, PageMetrics};

    fn record(url: &str, title: &str, keywords: &[&str]) -> PageRecord {
        let mut metrics = PageMetrics {
            title: title.to_string(),
            ..PageMetrics::default()
        };
        metrics.content.top_keywords = keywords
            .iter()
            .map(|w| KeywordCount {
                word: w.to_string(),
                count: 1,
            })
            .collect();
        PageRecord::new(url, 0, metrics)
    }

    #[test]
    fn test_title_keywords() {
        assert_eq!(
            title_keywords("Best Rust Crawler: a guide", "Crawling sites 2024"),
            vec!["best", "rust", "guide", "crawling", "sites"]
        );
    }

    #[test]
    fn test_suggestions_ranked_by_overlap() {
        let records = vec![
            record("/", "Rust crawler guide", &[]),
            record("/a", "A", &["rust", "crawler", "guide"]),
            record("/b", "B", &["rust", "python", "golang", "java"]),
            record("/c", "C", &["cooking"]),
        ];

        let suggestions = suggest_links(&records);
        let home = &suggestions[0];
        assert_eq!(home.len(), 2);
        assert_eq!(home[0].target_url, "/a");
        assert_eq!(home[0].relevance, 1.0);
        assert_eq!(home[0].suggested_anchor, "rust");
        assert_eq!(home[1].target_url, "/b");
        // {rust} / {rust, crawler, guide, python, golang, java}
        assert_eq!(home[1].relevance, 0.17);
    }

    #[test]
    fn test_never_suggests_self() {
        let records = vec![record("/", "Rust crawler", &["rust", "crawler"])];
        assert!(suggest_links(&records)[0].is_empty());
    }
}
