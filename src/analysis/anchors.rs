use crate::metrics::text::round_to;

/// Anchor texts that say nothing about the target
pub const GENERIC_ANCHORS: &[&str] = &[
    "подробнее",
    "читать",
    "далее",
    "смотреть",
    "перейти",
    "здесь",
    "more",
    "read more",
];

/// Specific anchors as a percent of non-empty anchors, and the non-empty count
///
/// An anchor is specific when it is not generic, longer than three characters
/// and at most five words.
pub fn anchor_quality(anchors: &[String]) -> (f64, usize) {
    let texts: Vec<String> = anchors
        .iter()
        .map(|a| a.trim().to_lowercase())
        .filter(|a| !a.is_empty())
        .collect();
    if texts.is_empty() {
        return (0.0, 0);
    }

    let specific = texts
        .iter()
        .filter(|t| {
            !GENERIC_ANCHORS.contains(&t.as_str())
                && t.chars().count() > 3
                && t.split_whitespace().count() <= 5
        })
        .count();

    (
        round_to(specific as f64 / texts.len() as f64 * 100.0, 1),
        texts.len(),
    )
}

/// Linking quality from anchor quality and link count, with issue labels
pub fn linking_quality(anchor_quality: f64, total_links: usize) -> (u32, Vec<String>) {
    let mut score: i32 = 100;
    let mut issues = Vec::new();

    if anchor_quality < 50.0 {
        score -= 30;
        issues.push("Generic anchors".to_string());
    } else if anchor_quality < 70.0 {
        score -= 15;
    }

    if total_links == 0 {
        score -= 20;
        issues.push("No links".to_string());
    } else if total_links > 50 {
        score -= 10;
    } else if total_links < 5 {
        score -= 15;
        issues.push("Few links".to_string());
    }

    (score.max(0) as u32, issues)
}
