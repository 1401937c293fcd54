//! Robots.txt and sitemap handling
//!
//! Both files are fetched once before the crawl starts. Neither is required:
//! an unreachable robots.txt degrades to an allow-all policy and an
//! unreachable sitemap to an empty URL list.

mod parser;
mod sitemap;

pub use parser::ParsedRobots;
pub use sitemap::{extract_locs, load_sitemap, SitemapKind};

use crate::crawler::HttpFetch;
use url::Url;

/// Fetches and wraps `/robots.txt` for the seed's origin
///
/// Any failure (network error, timeout, non-2xx status) yields
/// [`ParsedRobots::allow_all`].
pub async fn load_robots<F>(fetcher: &F, seed: &Url) -> ParsedRobots
where
    F: HttpFetch + ?Sized,
{
    let robots_url = match seed.join("/robots.txt") {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Cannot build robots.txt URL for {}: {}", seed, e);
            return ParsedRobots::allow_all();
        }
    };

    match fetcher.get(&robots_url).await {
        Ok(response) if (200..300).contains(&response.status) => {
            let body = String::from_utf8_lossy(&response.body);
            tracing::info!("Loaded robots.txt from {} ({} bytes)", robots_url, body.len());
            ParsedRobots::from_content(&body)
        }
        Ok(response) => {
            tracing::warn!(
                "robots.txt returned HTTP {}, allowing all URLs",
                response.status
            );
            ParsedRobots::allow_all()
        }
        Err(e) => {
            tracing::warn!("robots.txt unavailable ({}), allowing all URLs", e);
            ParsedRobots::allow_all()
        }
    }
}
