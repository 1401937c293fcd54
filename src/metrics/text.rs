//! Content metrics over a page's visible text
//!
//! Tokens are whitespace-separated and lower-cased. A "keyword token" is an
//! all-alphabetic token longer than three characters that is not a stopword.

use serde::Serialize;
use std::collections::HashMap;

/// Russian and English function words ignored by keyword statistics
pub const STOPWORDS: &[&str] = &[
    "и", "в", "на", "что", "это", "по", "с", "для", "при", "или", "как", "от", "до", "a", "к",
    "у", "о", "из", "ом", "об", "если", "то", "же", "ь", "ы", "е", "the", "an", "is", "are",
    "was", "were", "be", "been", "of", "to", "in", "and", "or", "but", "as", "by", "at", "from",
    "with", "on",
];

const AI_MARKERS: &[&str] = &[
    "как известно",
    "необходимо отметить",
    "важно подчеркнуть",
    "следует отметить",
    "не следует забывать",
    "стоит заметить",
];

const FILLER_PHRASES: &[&str] = &[
    "нужно отметить",
    "важно заметить",
    "стоит сказать",
    "очень интересно",
    "как мы видим",
    "не забудем",
];

const SPAM_PATTERNS: &[&str] = &["!!!", "$$$", ">>>", "click here", "best price"];

/// Characters counted as vowels by the complex-word heuristic
const VOWELS: &str = "аеиоуыэюяAEIOUYaeiou";

/// A keyword with its occurrence count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

/// A frequent token with its share of all tokens (percent)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordDensity {
    pub word: String,
    pub count: usize,
    pub density: f64,
}

/// Content quality metrics for one page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContentMetrics {
    pub word_count: usize,
    pub unique_percent: f64,
    pub boilerplate_percent: f64,
    pub readability: Option<f64>,
    pub avg_sentence_length: f64,
    pub avg_word_length: f64,
    pub complex_words_percent: f64,
    pub content_density: f64,
    pub keyword_stuffing: f64,
    pub ai_markers: usize,
    pub filler_phrases: usize,
    pub spam_indicators: usize,
    pub toxicity: f64,
    pub top_keywords: Vec<KeywordCount>,
    pub density_profile: Vec<KeywordDensity>,
}

impl ContentMetrics {
    /// Computes every content metric for the page text
    ///
    /// `document_words` is the word count of the whole document including
    /// markup-only text such as scripts; it feeds content density.
    pub fn from_text(text: &str, document_words: usize) -> Self {
        let word_count = text.split_whitespace().count();
        let stuffing = keyword_stuffing(text);
        let ai = count_phrases(text, AI_MARKERS);
        let filler = count_phrases(text, FILLER_PHRASES);
        let spam = count_phrases(text, SPAM_PATTERNS);

        Self {
            word_count,
            unique_percent: unique_percent(text),
            boilerplate_percent: boilerplate_percent(text),
            readability: readability(text),
            avg_sentence_length: avg_sentence_length(text),
            avg_word_length: avg_word_length(text),
            complex_words_percent: complex_words_percent(text),
            content_density: content_density(word_count, document_words),
            keyword_stuffing: stuffing,
            ai_markers: ai,
            filler_phrases: filler,
            spam_indicators: spam,
            toxicity: toxicity_score(stuffing, ai, filler, spam),
            top_keywords: top_keywords(text, 10),
            density_profile: density_profile(text),
        }
    }
}

/// Rounds to a fixed number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// True for a non-empty token made only of alphabetic characters
pub fn is_alpha(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Lower-cased whitespace tokens
pub fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Lower-cased alphabetic non-stopword tokens longer than three characters
pub fn keyword_tokens(text: &str) -> Vec<String> {
    tokens(text)
        .into_iter()
        .filter(|w| is_alpha(w) && w.chars().count() > 3 && !is_stopword(w))
        .collect()
}

/// The `n` most frequent items, ties broken by first occurrence
pub fn most_common<I, S>(items: I, n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (idx, item) in items.into_iter().enumerate() {
        counts
            .entry(item.as_ref().to_string())
            .or_insert((0, idx))
            .0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked
        .into_iter()
        .take(n)
        .map(|(word, (count, _))| (word, count))
        .collect()
}

/// Distinct / total share of alphabetic tokens longer than two characters
pub fn unique_percent(text: &str) -> f64 {
    let words: Vec<String> = tokens(text)
        .into_iter()
        .filter(|w| is_alpha(w) && w.chars().count() > 2)
        .collect();
    if words.is_empty() {
        return 0.0;
    }
    let distinct: std::collections::HashSet<&String> = words.iter().collect();
    round_to(distinct.len() as f64 / words.len() as f64 * 100.0, 2)
}

/// Share of keyword tokens taken by the 20 most frequent ones
///
/// Zero when fewer than 20 keyword tokens exist.
pub fn boilerplate_percent(text: &str) -> f64 {
    let filtered = keyword_tokens(text);
    if filtered.len() < 20 {
        return 0.0;
    }
    let top: usize = most_common(&filtered, 20).iter().map(|(_, c)| c).sum();
    round_to(top as f64 / filtered.len() as f64 * 100.0, 2)
}

fn sentences(text: &str) -> Vec<&str> {
    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Flesch-style reading ease clamped to [0, 100]
///
/// Absent when the text has fewer than 10 words or fewer than 2 sentences.
pub fn readability(text: &str) -> Option<f64> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 10 {
        return None;
    }
    let sentence_count = sentences(text).len();
    if sentence_count < 2 {
        return None;
    }

    let avg_words = words.len() as f64 / sentence_count as f64;
    let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
    let avg_len = total_chars as f64 / words.len() as f64;
    let score = 206.835 - 1.3 * avg_words - 60.1 * (avg_len / 5.5);
    Some(score.clamp(0.0, 100.0))
}

pub fn avg_sentence_length(text: &str) -> f64 {
    let words = text.split_whitespace().count();
    let sentence_count = sentences(text).len();
    if words == 0 || sentence_count == 0 {
        return 0.0;
    }
    words as f64 / sentence_count as f64
}

/// Mean length of alphabetic tokens
pub fn avg_word_length(text: &str) -> f64 {
    let words: Vec<&str> = text.split_whitespace().filter(|w| is_alpha(w)).collect();
    if words.is_empty() {
        return 0.0;
    }
    let total: usize = words.iter().map(|w| w.chars().count()).sum();
    total as f64 / words.len() as f64
}

/// Percent of tokens with more than three vowels
pub fn complex_words_percent(text: &str) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let complex = words
        .iter()
        .filter(|w| w.chars().filter(|c| VOWELS.contains(*c)).count() > 3)
        .count();
    round_to(complex as f64 / words.len() as f64 * 100.0, 2)
}

/// Visible words as a percent of all document words
pub fn content_density(visible_words: usize, document_words: usize) -> f64 {
    if document_words == 0 {
        return 0.0;
    }
    round_to(visible_words as f64 / document_words as f64 * 100.0, 2)
}

/// Highest share (percent) among the top 5 keyword tokens, counted only
/// above 3%; zero for texts under 50 words
pub fn keyword_stuffing(text: &str) -> f64 {
    if text.split_whitespace().count() < 50 {
        return 0.0;
    }
    let filtered = keyword_tokens(text);
    if filtered.is_empty() {
        return 0.0;
    }

    let max_share = most_common(&filtered, 5)
        .iter()
        .map(|(_, count)| *count as f64 / filtered.len() as f64 * 100.0)
        .filter(|pct| *pct > 3.0)
        .fold(0.0, f64::max);
    round_to(max_share, 2)
}

/// Non-overlapping occurrences of any of the phrases in the lower-cased text
pub fn count_phrases(text: &str, phrases: &[&str]) -> usize {
    let lower = text.to_lowercase();
    phrases.iter().map(|p| lower.matches(p).count()).sum()
}

/// Combined toxicity, clamped to [0, 100] and rounded to one decimal
pub fn toxicity_score(stuffing: f64, ai: usize, filler: usize, spam: usize) -> f64 {
    let raw = stuffing * 2.0
        + (ai as f64 * 3.0).min(30.0)
        + filler as f64 * 5.0
        + spam as f64 * 10.0;
    round_to(raw.clamp(0.0, 100.0), 1)
}

/// Most frequent keyword tokens
pub fn top_keywords(text: &str, n: usize) -> Vec<KeywordCount> {
    most_common(keyword_tokens(text), n)
        .into_iter()
        .map(|(word, count)| KeywordCount { word, count })
        .collect()
}

/// The 15 most frequent tokens whose density exceeds 0.5%
pub fn density_profile(text: &str) -> Vec<KeywordDensity> {
    let words = tokens(text);
    if words.is_empty() {
        return Vec::new();
    }
    let total = words.len() as f64;

    most_common(&words, 15)
        .into_iter()
        .filter_map(|(word, count)| {
            let density = round_to(count as f64 / total * 100.0, 2);
            (density > 0.5).then_some(KeywordDensity {
                word,
                count,
                density,
            })
        })
        .collect()
}
