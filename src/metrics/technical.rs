use super::dom;
use crate::crawler::ResponseMeta;
use chrono::{DateTime, Utc};
use regex::Regex;
use scraper::Html;
use serde::Serialize;
use std::sync::LazyLock;
use url::Url;

const DEPRECATED_TAGS: &[&str] = &[
    "font", "center", "marquee", "blink", "strike", "u", "tt", "applet", "basefont",
];

const SEMANTIC_TAGS: &[&str] = &["header", "nav", "main", "article", "section", "aside", "footer"];

const CTA_ACTION_WORDS: &[&str] = &[
    "купить",
    "узнать",
    "заказать",
    "скачать",
    "подписаться",
    "начать",
    "buy",
    "order",
    "download",
    "subscribe",
    "start",
];

/// DOM size above which HTML quality is penalized
pub const DOM_NODE_LIMIT: usize = 1200;

static DISPLAY_NONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display\s*:\s*none").unwrap());
static VISIBILITY_HIDDEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)visibility\s*:\s*hidden").unwrap());
static BREADCRUMB_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)breadcrumb").unwrap());
static CTA_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)btn|button|cta").unwrap());
static CTA_LINK_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)btn|cta").unwrap());
static FAQ_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)faq|question|answer").unwrap());
static QA_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)question|answer").unwrap());
static CLOAK_TOPIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)user.?agent|bot|crawler").unwrap());
static CLOAK_LOGIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)if.*user.?agent|display.*none.*user.?agent").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum JsDependence {
    #[default]
    Low,
    Medium,
    High,
}

impl JsDependence {
    /// High above 10 scripts, Medium above 5
    pub fn from_script_count(scripts: usize) -> Self {
        if scripts > 10 {
            Self::High
        } else if scripts > 5 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CtaQuality {
    Good,
    #[default]
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StructuredData {
    pub json_ld: usize,
    pub microdata: usize,
    pub rdfa: usize,
}

impl StructuredData {
    pub fn total(&self) -> usize {
        self.json_ld + self.microdata + self.rdfa
    }
}

/// Markup and transport metrics for one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicalMetrics {
    pub dom_nodes: usize,
    pub deprecated_tags: usize,
    pub inline_scripts: usize,
    pub html_quality: u32,
    pub hidden_content: usize,
    pub cloaking_suspected: bool,
    pub https: bool,
    pub mobile_viewport: bool,
    pub structured_data: StructuredData,
    pub hreflang: usize,
    pub breadcrumbs: bool,
    pub canonical: bool,
    pub meta_robots: String,
    pub last_modified: String,
    pub compression: String,
    pub cache_control: String,
    pub freshness_days: Option<i64>,
    pub semantic_tags: usize,
    pub og_tags: usize,
    pub js_dependence: JsDependence,
    pub has_main: bool,
    pub lists: usize,
    pub tables: usize,
    pub cta_count: usize,
    pub cta_quality: CtaQuality,
    pub faq_count: usize,
}

impl Default for TechnicalMetrics {
    fn default() -> Self {
        Self {
            dom_nodes: 0,
            deprecated_tags: 0,
            inline_scripts: 0,
            html_quality: 100,
            hidden_content: 0,
            cloaking_suspected: false,
            https: false,
            mobile_viewport: false,
            structured_data: StructuredData::default(),
            hreflang: 0,
            breadcrumbs: false,
            canonical: false,
            meta_robots: "default".to_string(),
            last_modified: "not set".to_string(),
            compression: "none".to_string(),
            cache_control: "not set".to_string(),
            freshness_days: None,
            semantic_tags: 0,
            og_tags: 0,
            js_dependence: JsDependence::Low,
            has_main: false,
            lists: 0,
            tables: 0,
            cta_count: 0,
            cta_quality: CtaQuality::Poor,
            faq_count: 0,
        }
    }
}

impl TechnicalMetrics {
    pub fn extract(
        document: &Html,
        page_url: &Url,
        meta: &ResponseMeta,
        text: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let dom_nodes = dom::elements(document).count();
        let deprecated_tags = count_deprecated_tags(document);
        let inline_scripts = dom::count(document, "script:not([src])");

        let last_modified = header_or(meta, "last-modified", "not set");

        Self {
            dom_nodes,
            deprecated_tags,
            inline_scripts,
            html_quality: html_quality_score(dom_nodes, inline_scripts, deprecated_tags),
            hidden_content: count_hidden(document),
            cloaking_suspected: detect_cloaking(text),
            https: page_url.scheme() == "https",
            mobile_viewport: dom::count(document, r#"meta[name="viewport"]"#) > 0,
            structured_data: StructuredData {
                json_ld: dom::count(document, r#"script[type="application/ld+json"]"#),
                microdata: dom::count(document, "[itemscope]"),
                rdfa: dom::count(document, "[typeof]"),
            },
            hreflang: dom::count(document, "link[rel~=alternate][hreflang]"),
            breadcrumbs: dom::elements(document)
                .any(|el| dom::has_class_matching(el, &BREADCRUMB_RE)),
            canonical: dom::count(document, "link[rel~=canonical]") > 0,
            meta_robots: dom::first(document, r#"meta[name="robots"]"#)
                .map(|el| el.value().attr("content").unwrap_or("").to_string())
                .unwrap_or_else(|| "default".to_string()),
            freshness_days: freshness_days(&last_modified, now),
            last_modified,
            compression: header_or(meta, "content-encoding", "none"),
            cache_control: header_or(meta, "cache-control", "not set"),
            semantic_tags: SEMANTIC_TAGS.iter().map(|tag| dom::count(document, tag)).sum(),
            og_tags: dom::select(document, "meta[property]")
                .into_iter()
                .filter(|el| {
                    el.value()
                        .attr("property")
                        .is_some_and(|p| p.to_ascii_lowercase().starts_with("og:"))
                })
                .count(),
            js_dependence: JsDependence::from_script_count(dom::count(document, "script")),
            has_main: dom::count(document, "main") > 0,
            lists: dom::count(document, "ul, ol"),
            tables: dom::count(document, "table"),
            cta_count: count_ctas(document),
            cta_quality: evaluate_cta_text(document),
            faq_count: count_faq(document),
        }
    }
}

fn header_or(meta: &ResponseMeta, name: &str, fallback: &str) -> String {
    meta.header(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

pub fn count_deprecated_tags(document: &Html) -> usize {
    DEPRECATED_TAGS.iter().map(|tag| dom::count(document, tag)).sum()
}

/// 100, minus 20 for an oversized DOM, 10 for more than five inline scripts
/// and 15 for any deprecated tag
pub fn html_quality_score(dom_nodes: usize, inline_scripts: usize, deprecated: usize) -> u32 {
    let mut score: i32 = 100;
    if dom_nodes > DOM_NODE_LIMIT {
        score -= 20;
    }
    if inline_scripts > 5 {
        score -= 10;
    }
    if deprecated > 0 {
        score -= 15;
    }
    score.max(0) as u32
}

/// Elements hidden via inline style or the `hidden` attribute
pub fn count_hidden(document: &Html) -> usize {
    let styled = dom::select(document, "[style]")
        .into_iter()
        .filter_map(|el| el.value().attr("style"))
        .map(|style| {
            usize::from(DISPLAY_NONE_RE.is_match(style))
                + usize::from(VISIBILITY_HIDDEN_RE.is_match(style))
        })
        .sum::<usize>();
    styled + dom::count(document, "[hidden]")
}

/// Text that talks about user agents and also conditions on them
pub fn detect_cloaking(text: &str) -> bool {
    CLOAK_TOPIC_RE.is_match(text) && CLOAK_LOGIC_RE.is_match(text)
}

/// Days since the Last-Modified date, when it parses as an HTTP date
pub fn freshness_days(last_modified: &str, now: DateTime<Utc>) -> Option<i64> {
    let modified = DateTime::parse_from_rfc2822(last_modified).ok()?;
    Some((now - modified.with_timezone(&Utc)).num_days())
}

/// Elements with a button-like class plus `<button>` elements
pub fn count_ctas(document: &Html) -> usize {
    let classed = dom::elements(document)
        .filter(|el| dom::has_class_matching(*el, &CTA_CLASS_RE))
        .count();
    classed + dom::count(document, "button")
}

/// `Good` when more than half of button/link CTAs contain an action word
pub fn evaluate_cta_text(document: &Html) -> CtaQuality {
    let ctas: Vec<String> = dom::select(document, "button, a")
        .into_iter()
        .filter(|el| dom::has_class_matching(*el, &CTA_LINK_CLASS_RE))
        .map(|el| dom::element_text(el).to_lowercase())
        .collect();
    if ctas.is_empty() {
        return CtaQuality::Poor;
    }

    let good = ctas
        .iter()
        .filter(|text| CTA_ACTION_WORDS.iter().any(|w| text.contains(w)))
        .count();
    if good as f64 / ctas.len() as f64 > 0.5 {
        CtaQuality::Good
    } else {
        CtaQuality::Poor
    }
}

/// FAQ-like blocks: faq/question/answer classes plus question/answer pairs
pub fn count_faq(document: &Html) -> usize {
    let faq = dom::elements(document)
        .filter(|el| dom::has_class_matching(*el, &FAQ_CLASS_RE))
        .count();
    let qa = dom::elements(document)
        .filter(|el| dom::has_class_matching(*el, &QA_CLASS_RE))
        .count();
    faq + qa / 2
}
