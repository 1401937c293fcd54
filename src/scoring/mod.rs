//! Composite page scores
//!
//! Each score starts from already-extracted metrics and applies fixed
//! deductions or weights. All results are rounded to one decimal and
//! floored at zero.

use crate::metrics::text::round_to;
use crate::metrics::{PageMetrics, TrustSignals, DOM_NODE_LIMIT};
use crate::record::{CompositeScores, PageRecord};

const TECH_WEIGHT: f64 = 0.25;
const CONTENT_WEIGHT: f64 = 0.40;
const TRUST_WEIGHT: f64 = 0.20;
const SEO_WEIGHT: f64 = 0.15;

const EXPERTISE_WEIGHT: f64 = 0.25;
const AUTHORITATIVENESS_WEIGHT: f64 = 0.30;
const TRUSTWORTHINESS_WEIGHT: f64 = 0.35;
const EXPERIENCE_WEIGHT: f64 = 0.10;

fn finish(score: f64) -> f64 {
    round_to(score.max(0.0), 1)
}

/// 100 minus 15 for HTML quality under 70 and 10 for an oversized DOM
pub fn tech_health(metrics: &PageMetrics) -> f64 {
    let mut score = 100.0;
    if metrics.technical.html_quality < 70 {
        score -= 15.0;
    }
    if metrics.technical.dom_nodes > DOM_NODE_LIMIT {
        score -= 10.0;
    }
    finish(score)
}

/// 100 minus deductions for thin, hard to read, repetitive or toxic text
pub fn content_health(metrics: &PageMetrics) -> f64 {
    let content = &metrics.content;
    let mut score = 100.0;
    if content.word_count < 300 {
        score -= 20.0;
    }
    if content.readability.is_some_and(|r| r < 40.0) {
        score -= 15.0;
    }
    if content.unique_percent < 50.0 {
        score -= 20.0;
    }
    if content.toxicity > 50.0 {
        score -= 25.0;
    }
    finish(score)
}

/// 100 minus deductions for H1 count, outline, title length and canonical
pub fn seo_health(metrics: &PageMetrics) -> f64 {
    let mut score = 100.0;
    if metrics.headings.h1_count != 1 {
        score -= 25.0;
    }
    if !metrics.headings.hierarchy.is_good() {
        score -= 15.0;
    }
    if !metrics.title_length_ok() {
        score -= 10.0;
    }
    if !metrics.technical.canonical {
        score -= 10.0;
    }
    finish(score)
}

/// Each trust signal adds 20 points; badges add up to 20 (three badges)
pub fn trust_score(trust: &TrustSignals) -> f64 {
    let signals = [
        trust.contact_info,
        trust.legal_links,
        trust.author_info,
        trust.reviews,
    ]
    .iter()
    .filter(|s| **s)
    .count() as f64;
    let badges = (trust.trust_badges as f64 / 3.0).min(1.0);
    finish(((signals + badges) * 20.0).min(100.0))
}

/// Weighted E-E-A-T composite of the four component scores
pub fn eeat_score(trust: &TrustSignals) -> f64 {
    finish(
        f64::from(trust.expertise) * EXPERTISE_WEIGHT
            + f64::from(trust.authoritativeness) * AUTHORITATIVENESS_WEIGHT
            + f64::from(trust.trustworthiness) * TRUSTWORTHINESS_WEIGHT
            + f64::from(trust.experience) * EXPERIENCE_WEIGHT,
    )
}

/// All composite scores for one page
pub fn score_page(metrics: &PageMetrics) -> CompositeScores {
    let tech = tech_health(metrics);
    let content = content_health(metrics);
    let seo = seo_health(metrics);
    let trust = trust_score(&metrics.trust);

    CompositeScores {
        tech_health: tech,
        content_health: content,
        seo_health: seo,
        trust,
        eeat: eeat_score(&metrics.trust),
        site_health: finish(
            tech * TECH_WEIGHT
                + content * CONTENT_WEIGHT
                + trust * TRUST_WEIGHT
                + seo * SEO_WEIGHT,
        ),
    }
}

/// Scores every record in place
pub fn score_all(records: &mut [PageRecord]) {
    for record in records.iter_mut() {
        record.scores = score_page(&record.metrics);
    }
}
