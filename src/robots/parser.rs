//! Robots.txt policy wrapper
//!
//! Matching is delegated to the robotstxt crate; this type only keeps the raw
//! file around and answers the questions the crawler asks of it.

use robotstxt::DefaultMatcher;

/// A loaded robots.txt policy
#[derive(Debug, Clone, Default)]
pub struct ParsedRobots {
    /// Raw robots.txt body; empty means no restrictions
    content: String,
}

impl ParsedRobots {
    /// Wraps a robots.txt body
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// A policy that allows every URL
    ///
    /// Used whenever robots.txt is missing, unreachable, or not a 2xx.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Returns true when no rules were loaded
    pub fn is_permissive(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Checks whether `url` may be fetched by the given robots token
    ///
    /// `url` may be absolute or a bare path.
    pub fn is_allowed(&self, url: &str, robots_token: &str) -> bool {
        if self.is_permissive() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, robots_token, url)
    }

    /// Sitemap URLs declared with `Sitemap:` lines, in file order
    pub fn sitemaps(&self) -> Vec<String> {
        self.directive_lines()
            .filter(|(key, _)| key == "sitemap")
            .map(|(_, value)| value.to_string())
            .filter(|value| !value.is_empty())
            .collect()
    }

    /// Crawl-delay in seconds for the token, falling back to the `*` group
    pub fn crawl_delay(&self, robots_token: &str) -> Option<f64> {
        let token = robots_token.to_lowercase();
        let mut group: Vec<String> = Vec::new();
        let mut in_rules = false;
        let mut specific = None;
        let mut wildcard = None;

        for (key, value) in self.directive_lines() {
            match key.as_str() {
                "user-agent" => {
                    // a user-agent line after rules starts a new group
                    if in_rules {
                        group.clear();
                        in_rules = false;
                    }
                    group.push(value.to_lowercase());
                }
                "crawl-delay" => {
                    in_rules = true;
                    let Ok(delay) = value.parse::<f64>() else {
                        continue;
                    };
                    if group.iter().any(|agent| agent != "*" && token.contains(agent.as_str())) {
                        specific.get_or_insert(delay);
                    } else if group.iter().any(|agent| agent == "*") {
                        wildcard.get_or_insert(delay);
                    }
                }
                _ => in_rules = true,
            }
        }

        specific.or(wildcard)
    }

    fn directive_lines(&self) -> impl Iterator<Item = (String, &str)> {
        self.content.lines().filter_map(|line| {
            let line = line.split('#').next().unwrap_or("").trim();
            let (key, value) = line.split_once(':')?;
            Some((key.trim().to_lowercase(), value.trim()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "SiteAuditor";

    #[test]
    fn test_allow_all_permits_everything() {
        let robots = ParsedRobots::allow_all();
        assert!(robots.is_permissive());
        assert!(robots.is_allowed("https://example.com/anything", TOKEN));
    }

    #[test]
    fn test_disallow_prefix_with_full_urls() {
        let robots = ParsedRobots::from_content("User-agent: *\nDisallow: /private");
        assert!(robots.is_allowed("https://example.com/", TOKEN));
        assert!(robots.is_allowed("https://example.com/public", TOKEN));
        assert!(!robots.is_allowed("https://example.com/private", TOKEN));
        assert!(!robots.is_allowed("https://example.com/private/deep", TOKEN));
    }

    #[test]
    fn test_token_specific_group() {
        let content = "User-agent: SiteAuditor\nDisallow: /\n\nUser-agent: *\nAllow: /";
        let robots = ParsedRobots::from_content(content);
        assert!(!robots.is_allowed("https://example.com/page", TOKEN));
        assert!(robots.is_allowed("https://example.com/page", "OtherBot"));
    }

    #[test]
    fn test_allow_overrides_longer_match() {
        let content = "User-agent: *\nDisallow: /docs\nAllow: /docs/public";
        let robots = ParsedRobots::from_content(content);
        assert!(!robots.is_allowed("https://example.com/docs/secret", TOKEN));
        assert!(robots.is_allowed("https://example.com/docs/public/a", TOKEN));
    }

    #[test]
    fn test_garbage_is_permissive() {
        let robots = ParsedRobots::from_content("<html>not a robots file</html>");
        assert!(robots.is_allowed("https://example.com/page", TOKEN));
    }

    #[test]
    fn test_sitemap_directives() {
        let content = "Sitemap: https://example.com/sitemap.xml\nUser-agent: *\nDisallow:\nsitemap: https://example.com/news.xml # news";
        let robots = ParsedRobots::from_content(content);
        assert_eq!(
            robots.sitemaps(),
            vec![
                "https://example.com/sitemap.xml".to_string(),
                "https://example.com/news.xml".to_string()
            ]
        );
    }

    #[test]
    fn test_crawl_delay_prefers_specific_group() {
        let content = "User-agent: siteauditor\nCrawl-delay: 2\n\nUser-agent: *\nCrawl-delay: 5";
        let robots = ParsedRobots::from_content(content);
        assert_eq!(robots.crawl_delay(TOKEN), Some(2.0));
        assert_eq!(robots.crawl_delay("OtherBot"), Some(5.0));
    }

    #[test]
    fn test_crawl_delay_absent() {
        let robots = ParsedRobots::from_content("User-agent: *\nDisallow: /tmp");
        assert_eq!(robots.crawl_delay(TOKEN), None);
        assert_eq!(ParsedRobots::allow_all().crawl_delay(TOKEN), None);
    }
}
