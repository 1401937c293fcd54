use super::dom;
use scraper::Html;
use serde::Serialize;

/// Verdict on a page's heading outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeadingHierarchy {
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Bad (wrong start)")]
    WrongStart,
    #[serde(rename = "Bad (hierarchy broken)")]
    Broken,
    #[serde(rename = "Bad (multiple H1)")]
    MultipleH1,
    #[serde(rename = "No headers")]
    NoHeaders,
}

impl HeadingHierarchy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::WrongStart => "Bad (wrong start)",
            Self::Broken => "Bad (hierarchy broken)",
            Self::MultipleH1 => "Bad (multiple H1)",
            Self::NoHeaders => "No headers",
        }
    }

    pub fn is_good(&self) -> bool {
        matches!(self, Self::Good)
    }
}

impl std::fmt::Display for HeadingHierarchy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    /// First 50 characters of the heading text
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadingReport {
    pub hierarchy: HeadingHierarchy,
    pub headings: Vec<Heading>,
    /// Count per level, index 0 is H1
    pub distribution: [usize; 6],
    pub h1_count: usize,
    pub issues: Vec<String>,
}

impl Default for HeadingReport {
    fn default() -> Self {
        Self {
            hierarchy: HeadingHierarchy::NoHeaders,
            headings: Vec::new(),
            distribution: [0; 6],
            h1_count: 0,
            issues: Vec::new(),
        }
    }
}

/// Collects `h1`..`h6` in document order and classifies the outline
pub fn analyze_headings(document: &Html) -> HeadingReport {
    let headings: Vec<Heading> = dom::select(document, "h1, h2, h3, h4, h5, h6")
        .into_iter()
        .filter_map(|el| {
            let level = el.value().name().strip_prefix('h')?.parse::<u8>().ok()?;
            let text = dom::element_text(el).chars().take(50).collect();
            Some(Heading { level, text })
        })
        .collect();

    let levels: Vec<u8> = headings.iter().map(|h| h.level).collect();
    let (hierarchy, issue) = classify_levels(&levels);

    let mut distribution = [0usize; 6];
    for level in &levels {
        distribution[usize::from(*level) - 1] += 1;
    }

    HeadingReport {
        hierarchy,
        h1_count: distribution[0],
        distribution,
        headings,
        issues: issue.into_iter().collect(),
    }
}

/// Classifies a sequence of heading levels
///
/// Checks run in order and the first failing one wins: empty outline, first
/// heading not H1, a jump of more than one level down, more than one H1.
pub fn classify_levels(levels: &[u8]) -> (HeadingHierarchy, Option<String>) {
    let Some(&first) = levels.first() else {
        return (
            HeadingHierarchy::NoHeaders,
            Some("No headings on page".to_string()),
        );
    };

    if first != 1 {
        return (
            HeadingHierarchy::WrongStart,
            Some(format!("Hierarchy starts with H{} instead of H1", first)),
        );
    }

    if let Some(pair) = levels.windows(2).find(|w| w[1] > w[0] + 1) {
        return (
            HeadingHierarchy::Broken,
            Some(format!("Skipped levels: H{} -> H{}", pair[0], pair[1])),
        );
    }

    let h1_count = levels.iter().filter(|l| **l == 1).count();
    if h1_count > 1 {
        return (
            HeadingHierarchy::MultipleH1,
            Some(format!("Found {} H1 headings instead of 1", h1_count)),
        );
    }

    (HeadingHierarchy::Good, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_good_outline() {
        assert_eq!(classify_levels(&[1, 2, 2, 3]).0, HeadingHierarchy::Good);
        assert_eq!(classify_levels(&[1, 2, 3, 2]).0, HeadingHierarchy::Good);
    }

    #[test]
    fn test_wrong_start() {
        let (verdict, issue) = classify_levels(&[3]);
        assert_eq!(verdict, HeadingHierarchy::WrongStart);
        assert!(issue.unwrap().contains("H3"));
    }

    #[test]
    fn test_broken_hierarchy() {
        assert_eq!(classify_levels(&[1, 2, 4]).0, HeadingHierarchy::Broken);
    }

    #[test]
    fn test_multiple_h1() {
        assert_eq!(classify_levels(&[1, 2, 1]).0, HeadingHierarchy::MultipleH1);
    }

    #[test]
    fn test_first_failure_wins() {
        // broken jump is reported before the second H1
        assert_eq!(classify_levels(&[1, 3, 1]).0, HeadingHierarchy::Broken);
    }

    #[test]
    fn test_no_headers() {
        let (verdict, issue) = classify_levels(&[]);
        assert_eq!(verdict, HeadingHierarchy::NoHeaders);
        assert!(issue.is_some());
    }

    #[test]
    fn test_analyze_document() {
        let doc = Html::parse_document(
            "<h1>Main title</h1><p>x</p><h2>Section</h2><h3>Sub</h3><h2>Other</h2>",
        );
        let report = analyze_headings(&doc);
        assert_eq!(report.hierarchy, HeadingHierarchy::Good);
        assert_eq!(report.h1_count, 1);
        assert_eq!(report.distribution, [1, 2, 1, 0, 0, 0]);
        assert_eq!(report.headings[0].text, "Main title");
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_serialized_labels() {
        let json = serde_json::to_string(&HeadingHierarchy::MultipleH1).unwrap();
        assert_eq!(json, "\"Bad (multiple H1)\"");
    }
}
