use crate::crawler::HttpFetch;
use crate::robots::ParsedRobots;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

static LOC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<loc>\s*(.*?)\s*</loc>").unwrap());

/// Nested sitemaps followed from a sitemap index
const MAX_CHILD_SITEMAPS: usize = 20;

/// Shape of a sitemap document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    /// `<urlset>`: locs are page URLs
    UrlSet,
    /// `<sitemapindex>`: locs are further sitemaps
    Index,
}

/// Pulls every `<loc>` value out of a sitemap document
///
/// XML entities for `&` are unescaped; nothing else is interpreted.
pub fn extract_locs(xml: &str) -> (SitemapKind, Vec<String>) {
    let kind = if xml.contains("<sitemapindex") {
        SitemapKind::Index
    } else {
        SitemapKind::UrlSet
    };

    let locs = LOC_RE
        .captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().replace("&amp;", "&"))
        .filter(|loc| !loc.is_empty())
        .collect();

    (kind, locs)
}

/// Loads page URLs listed in the site's sitemap
///
/// Tries `/sitemap.xml` on the seed origin, then any `Sitemap:` URLs declared
/// in robots.txt. A sitemap index is followed one level deep. Failures are
/// logged and skipped.
pub async fn load_sitemap<F>(fetcher: &F, seed: &Url, robots: &ParsedRobots) -> Vec<String>
where
    F: HttpFetch + ?Sized,
{
    let mut candidates: Vec<Url> = Vec::new();
    if let Ok(default) = seed.join("/sitemap.xml") {
        candidates.push(default);
    }
    for declared in robots.sitemaps() {
        match Url::parse(&declared) {
            Ok(url) if !candidates.contains(&url) => candidates.push(url),
            Ok(_) => {}
            Err(e) => tracing::debug!("Ignoring sitemap directive {}: {}", declared, e),
        }
    }

    let mut seen = HashSet::new();
    let mut pages = Vec::new();

    for candidate in candidates {
        let Some((kind, locs)) = fetch_locs(fetcher, &candidate).await else {
            continue;
        };

        let page_locs = match kind {
            SitemapKind::UrlSet => locs,
            SitemapKind::Index => {
                let mut nested = Vec::new();
                for child in locs.iter().take(MAX_CHILD_SITEMAPS) {
                    let Ok(child_url) = Url::parse(child) else {
                        continue;
                    };
                    if let Some((SitemapKind::UrlSet, child_locs)) =
                        fetch_locs(fetcher, &child_url).await
                    {
                        nested.extend(child_locs);
                    }
                }
                nested
            }
        };

        for loc in page_locs {
            if seen.insert(loc.clone()) {
                pages.push(loc);
            }
        }

        if !pages.is_empty() {
            break;
        }
    }

    if pages.is_empty() {
        tracing::warn!("No sitemap URLs found for {}", seed);
    } else {
        tracing::info!("Loaded {} URLs from sitemap", pages.len());
    }

    pages
}

async fn fetch_locs<F>(fetcher: &F, url: &Url) -> Option<(SitemapKind, Vec<String>)>
where
    F: HttpFetch + ?Sized,
{
    match fetcher.get(url).await {
        Ok(response) if response.status == 200 => {
            let body = String::from_utf8_lossy(&response.body);
            Some(extract_locs(&body))
        }
        Ok(response) => {
            tracing::debug!("Sitemap {} returned HTTP {}", url, response.status);
            None
        }
        Err(e) => {
            tracing::debug!("Sitemap {} unavailable: {}", url, e);
            None
        }
    }
}
