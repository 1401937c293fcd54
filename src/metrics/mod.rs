//! Per-page metric extraction
//!
//! Every function here is pure over one parsed document (plus the response
//! metadata for header-based checks). The crawler calls [`extract_all`] once
//! per fetched page; the results are stored on the page record and never
//! recomputed.

pub mod dom;
mod headings;
mod images;
mod links;
mod technical;
pub mod text;
mod trust;

pub use headings::{analyze_headings, classify_levels, Heading, HeadingHierarchy, HeadingReport};
pub use images::ImageMetrics;
pub use links::{extract_links, ExternalLink, LinkMetrics, PageLinks};
pub use technical::{
    html_quality_score, CtaQuality, JsDependence, StructuredData, TechnicalMetrics, DOM_NODE_LIMIT,
};
pub use text::{ContentMetrics, KeywordCount, KeywordDensity};
pub use trust::TrustSignals;

use crate::crawler::ResponseMeta;
use crate::url::FetchGate;
use chrono::{DateTime, Utc};
use scraper::Html;
use serde::Serialize;
use url::Url;

/// Issue lists are cut to this many entries
const MAX_ISSUES: usize = 10;

/// Recommended title length bounds, in characters
pub const TITLE_MIN_LEN: usize = 30;
pub const TITLE_MAX_LEN: usize = 60;

/// Pages under this word count are flagged as thin
pub const THIN_CONTENT_WORDS: usize = 300;

/// All metrics extracted from one page at fetch time
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageMetrics {
    pub title: String,
    pub title_length: usize,
    pub description: String,
    pub description_length: usize,
    pub h1_text: String,
    pub headings: HeadingReport,
    pub content: ContentMetrics,
    pub technical: TechnicalMetrics,
    pub trust: TrustSignals,
    pub links: LinkMetrics,
    pub images: ImageMetrics,
    pub issues: Vec<String>,
}

impl PageMetrics {
    pub fn title_length_ok(&self) -> bool {
        (TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&self.title_length)
    }
}

/// Output of [`extract_all`]
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    pub metrics: PageMetrics,
    /// Visible text of the page
    pub text: String,
    /// Gate-eligible internal link targets, in document order
    pub edges: Vec<Url>,
    /// Lower-cased anchor texts
    pub anchors: Vec<String>,
}

/// Runs the full metric battery over a parsed page
pub fn extract_all(
    document: &Html,
    page_url: &Url,
    meta: &ResponseMeta,
    gate: &FetchGate,
    now: DateTime<Utc>,
) -> ExtractedPage {
    let text = dom::visible_text(document);
    let document_words = dom::all_text(document).split_whitespace().count();

    let title = dom::first(document, "title")
        .map(dom::element_text)
        .unwrap_or_default();
    let description = dom::first(document, r#"meta[name="description"]"#)
        .and_then(|el| el.value().attr("content"))
        .map(|d| d.trim().to_string())
        .unwrap_or_default();
    let h1_text = dom::first(document, "h1")
        .map(dom::element_text)
        .unwrap_or_default();

    let headings = analyze_headings(document);
    let content = ContentMetrics::from_text(&text, document_words);
    let technical = TechnicalMetrics::extract(document, page_url, meta, &text, now);
    let page_links = extract_links(document, page_url, gate);
    let trust = TrustSignals::extract(document, &text, page_links.metrics.external);
    let images = ImageMetrics::extract(document);

    let title_length = title.chars().count();
    let issues = collect_issues(&headings, title_length, &content);

    ExtractedPage {
        metrics: PageMetrics {
            description_length: description.chars().count(),
            title,
            title_length,
            description,
            h1_text,
            headings,
            content,
            technical,
            trust,
            links: page_links.metrics,
            images,
            issues,
        },
        text,
        edges: page_links.edges,
        anchors: page_links.anchors,
    }
}

/// Human-readable problems found on the page, at most ten
pub fn collect_issues(
    headings: &HeadingReport,
    title_length: usize,
    content: &ContentMetrics,
) -> Vec<String> {
    let mut issues = headings.issues.clone();

    if headings.h1_count != 1 {
        issues.push(format!("H1 count: {} (expected 1)", headings.h1_count));
    }
    if !(TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&title_length) {
        issues.push(format!(
            "Title length: {} ({}-{})",
            title_length, TITLE_MIN_LEN, TITLE_MAX_LEN
        ));
    }
    if content.word_count < THIN_CONTENT_WORDS {
        issues.push(format!(
            "Thin content: {} words ({}+)",
            content.word_count, THIN_CONTENT_WORDS
        ));
    }
    if content.unique_percent < 50.0 {
        issues.push(format!("Uniqueness: {:.0}% (50%+)", content.unique_percent));
    }

    issues.truncate(MAX_ISSUES);
    issues
}
