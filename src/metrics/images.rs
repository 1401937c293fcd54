use super::dom;
use scraper::Html;
use serde::Serialize;

/// Image optimization counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImageMetrics {
    pub total: usize,
    pub missing_alt: usize,
    pub missing_dimensions: usize,
    pub missing_lazy_load: usize,
}

impl ImageMetrics {
    /// Counts `<img>` elements lacking alt text, explicit size or `loading`
    pub fn extract(document: &Html) -> Self {
        let mut metrics = Self::default();

        for img in dom::select(document, "img") {
            metrics.total += 1;
            if dom::non_empty_attr(img, "alt").is_none() {
                metrics.missing_alt += 1;
            }
            if dom::non_empty_attr(img, "width").is_none()
                || dom::non_empty_attr(img, "height").is_none()
            {
                metrics.missing_dimensions += 1;
            }
            if dom::non_empty_attr(img, "loading").is_none() {
                metrics.missing_lazy_load += 1;
            }
        }

        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_counters() {
        let doc = Html::parse_document(
            r#"<img src="a.png" alt="A" width="10" height="10" loading="lazy">
               <img src="b.png" alt="" width="10">
               <img src="c.png">"#,
        );
        let m = ImageMetrics::extract(&doc);
        assert_eq!(m.total, 3);
        assert_eq!(m.missing_alt, 2);
        assert_eq!(m.missing_dimensions, 2);
        assert_eq!(m.missing_lazy_load, 2);
    }

    #[test]
    fn test_no_images() {
        let doc = Html::parse_document("<p>text only</p>");
        assert_eq!(ImageMetrics::extract(&doc), ImageMetrics::default());
    }
}
