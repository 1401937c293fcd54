use super::dom;
use crate::url::{extract_authority, resolve_link, strip_fragment, FetchGate};
use scraper::Html;
use serde::Serialize;
use url::Url;

/// Maximum characters of anchor text kept for an external link
const EXTERNAL_TEXT_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    pub url: String,
    pub text: String,
    /// False when the anchor carries `rel="nofollow"`
    pub follow: bool,
}

/// Anchor counts for one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkMetrics {
    /// Every `<a href>` on the page
    pub total_anchors: usize,
    pub internal: usize,
    pub external: usize,
    pub follow: usize,
    pub nofollow: usize,
    /// Internal links that pass the fetch gate
    pub internal_in_scope: usize,
    pub external_links: Vec<ExternalLink>,
}

/// Everything the crawler needs from a page's anchors
#[derive(Debug, Clone, Default)]
pub struct PageLinks {
    pub metrics: LinkMetrics,
    /// Gate-eligible internal targets in document order, duplicates kept
    pub edges: Vec<Url>,
    /// Lower-cased non-empty anchor texts
    pub anchors: Vec<String>,
}

/// Resolves and classifies every `<a href>` in the document
pub fn extract_links(document: &Html, page_url: &Url, gate: &FetchGate) -> PageLinks {
    let mut links = PageLinks::default();

    for anchor in dom::select(document, "a[href]") {
        let metrics = &mut links.metrics;
        metrics.total_anchors += 1;

        let nofollow = dom::attr_has_token(anchor, "rel", "nofollow");
        if nofollow {
            metrics.nofollow += 1;
        } else {
            metrics.follow += 1;
        }

        let text = dom::element_text(anchor);
        if !text.is_empty() {
            links.anchors.push(text.to_lowercase());
        }

        let Some(target) = anchor
            .value()
            .attr("href")
            .and_then(|href| resolve_link(href, page_url))
        else {
            continue;
        };

        if extract_authority(&target).as_deref() == Some(gate.domain()) {
            metrics.internal += 1;
            let target = strip_fragment(&target);
            if gate.is_eligible(&target) {
                metrics.internal_in_scope += 1;
                links.edges.push(target);
            }
        } else {
            metrics.external += 1;
            metrics.external_links.push(ExternalLink {
                url: target.to_string(),
                text: text.chars().take(EXTERNAL_TEXT_LIMIT).collect(),
                follow: !nofollow,
            });
        }
    }

    links
}
