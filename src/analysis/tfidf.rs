use crate::metrics::text::{most_common, round_to, tokens};
use std::collections::{HashMap, HashSet};

/// Candidate terms considered per page, by raw frequency
const CANDIDATE_TERMS: usize = 20;
/// Terms kept per page
const MAX_KEYWORDS: usize = 10;
const MIN_SCORE: f64 = 0.001;

/// Document frequencies over the crawled corpus
///
/// Built once from the page texts after the crawl and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    doc_freq: HashMap<String, usize>,
    total_docs: usize,
}

impl CorpusIndex {
    /// Counts, for every lower-cased token longer than three characters, the
    /// number of documents containing it
    pub fn build<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index = Self::default();
        for text in texts {
            index.total_docs += 1;
            let distinct: HashSet<String> = tokens(text)
                .into_iter()
                .filter(|w| w.chars().count() > 3)
                .collect();
            for word in distinct {
                *index.doc_freq.entry(word).or_insert(0) += 1;
            }
        }
        index
    }

    pub fn total_docs(&self) -> usize {
        self.total_docs
    }

    pub fn document_frequency(&self, term: &str) -> usize {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    /// `ln(total_docs / df)`, with df floored at 1
    pub fn idf(&self, term: &str) -> f64 {
        if self.total_docs == 0 {
            return 0.0;
        }
        let df = self.document_frequency(term).max(1);
        (self.total_docs as f64 / df as f64).ln()
    }

    /// Top TF-IDF terms of one page, highest first
    ///
    /// Candidates are the page's 20 most frequent tokens; only tokens longer
    /// than three characters scoring above 0.001 are kept.
    pub fn keywords(&self, text: &str) -> Vec<(String, f64)> {
        let words = tokens(text);
        if words.is_empty() {
            return Vec::new();
        }
        let total = words.len() as f64;

        let mut scored: Vec<(String, f64)> = most_common(&words, CANDIDATE_TERMS)
            .into_iter()
            .filter(|(word, _)| word.chars().count() > 3)
            .filter_map(|(word, freq)| {
                let score = freq as f64 / total * self.idf(&word);
                (score > MIN_SCORE).then(|| (word, round_to(score, 4)))
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(MAX_KEYWORDS);
        scored
    }
}
