//! HTML parsing for fetched pages
//!
//! `scraper::Html` is not `Send`, so a document is parsed and fully
//! processed inside one synchronous call and never held across an await.

use crate::crawler::fetcher::FetchedPage;
use crate::metrics::{extract_all, ExtractedPage};
use crate::url::FetchGate;
use chrono::{DateTime, Utc};
use scraper::Html;
use url::Url;

/// Parses an HTML document
///
/// Parsing never fails; malformed markup is repaired by the HTML5 parser.
///
/// # Example
///
/// ```
/// use site_auditor::crawler::parse_html;
///
/// let document = parse_html("<html><head><title>Test</title></head></html>");
/// assert_eq!(document.root_element().value().name(), "html");
/// ```
pub fn parse_html(html: &str) -> Html {
    Html::parse_document(html)
}

/// Parses a fetched page and runs the metric extractors over it
pub fn parse_page(
    page: &FetchedPage,
    page_url: &Url,
    gate: &FetchGate,
    now: DateTime<Utc>,
) -> ExtractedPage {
    let document = parse_html(&page.body);
    extract_all(&document, page_url, &page.meta, gate, now)
}
