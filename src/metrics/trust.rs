use super::dom;
use regex::Regex;
use scraper::Html;
use serde::Serialize;
use std::sync::LazyLock;

const LEGAL_LINK_KEYWORDS: &[&str] = &[
    "политика",
    "условия",
    "privacy",
    "terms",
    "о нас",
    "контакты",
];

const TRUST_BADGE_KEYWORDS: &[&str] = &["verified", "trusted", "certified", "award", "проверено"];

static CONTACT_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\+7\d{10}",
        r"\+\d+\s?\(\d+\)",
        r"\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});
static AUTHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)автор:|написано:|by\s").unwrap());
static REVIEW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)отзывы|рейтинг|review|rating|★|⭐").unwrap());
static CITATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\d+\]").unwrap());
static CREDENTIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PhD|Doctorate|Специалист|Эксперт").unwrap());
static ORGANIZATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Organization").unwrap());
static PUBLISH_META_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"article:|publish").unwrap());

/// Trust signals and E-E-A-T component scores
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrustSignals {
    pub contact_info: bool,
    pub legal_links: bool,
    pub author_info: bool,
    pub reviews: bool,
    pub trust_badges: usize,
    pub expertise: u32,
    pub authoritativeness: u32,
    pub trustworthiness: u32,
    pub experience: u32,
}

impl TrustSignals {
    /// Extracts trust signals from the document and its visible text
    ///
    /// `external_links` is the number of outbound links to other hosts.
    pub fn extract(document: &Html, text: &str, external_links: usize) -> Self {
        let contact_info = has_contact_info(text);
        let legal_links = has_legal_links(document);
        let author_info = has_author_info(document, text);
        let reviews = REVIEW_RE.is_match(text);
        let word_count = text.split_whitespace().count();

        Self {
            contact_info,
            legal_links,
            author_info,
            reviews,
            trust_badges: count_trust_badges(text),
            expertise: expertise_score(author_info, text),
            authoritativeness: authoritativeness_score(document, external_links),
            trustworthiness: trustworthiness_score(contact_info, legal_links, reviews),
            experience: experience_score(document, word_count),
        }
    }
}

/// Phone number or email address in the text
pub fn has_contact_info(text: &str) -> bool {
    CONTACT_RES.iter().any(|re| re.is_match(text))
}

/// A link whose text names a policy, terms, "о нас" or contacts page
pub fn has_legal_links(document: &Html) -> bool {
    dom::select(document, "a[href]").into_iter().any(|a| {
        let text = dom::element_text(a).to_lowercase();
        LEGAL_LINK_KEYWORDS.iter().any(|kw| text.contains(kw))
    })
}

pub fn has_author_info(document: &Html, text: &str) -> bool {
    dom::count(document, r#"meta[name="author"]"#) > 0 || AUTHOR_RE.is_match(text)
}

pub fn count_trust_badges(text: &str) -> usize {
    let lower = text.to_lowercase();
    TRUST_BADGE_KEYWORDS
        .iter()
        .map(|kw| lower.matches(kw).count())
        .sum()
}

fn expertise_score(author_info: bool, text: &str) -> u32 {
    let mut score = 0;
    if author_info {
        score += 30;
    }
    score += (CITATION_RE.find_iter(text).count() as u32 * 2).min(20);
    if CREDENTIAL_RE.is_match(text) {
        score += 15;
    }
    score.min(100)
}

fn authoritativeness_score(document: &Html, external_links: usize) -> u32 {
    let mut score = 0;
    let has_org_schema = dom::select(document, "script")
        .into_iter()
        .any(|s| ORGANIZATION_RE.is_match(&s.text().collect::<String>()));
    if has_org_schema {
        score += 25;
    }
    score += (external_links as u32 * 2).min(30);
    score.min(100)
}

fn trustworthiness_score(contact: bool, legal: bool, reviews: bool) -> u32 {
    // baseline for any page that loads
    let mut score = 15;
    for signal in [contact, legal, reviews] {
        if signal {
            score += 20;
        }
    }
    score
}

fn experience_score(document: &Html, word_count: usize) -> u32 {
    let mut score = 0;
    let has_publish_meta = dom::select(document, "meta[property]")
        .into_iter()
        .filter_map(|m| m.value().attr("property"))
        .any(|p| PUBLISH_META_RE.is_match(p));
    if has_publish_meta {
        score += 30;
    }
    if word_count > 1000 {
        score += 25;
    }
    score
}
