use serde::Serialize;

/// Running totals for one crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrawlCounters {
    /// URLs marked visited (each fetched once)
    pub pages_visited: u32,
    /// Pages that produced a record
    pub pages_recorded: u32,
    /// Frontier entries dropped before fetching (gate, depth, duplicates)
    pub pages_skipped: u32,
    /// Fetched responses that were not HTML
    pub non_html: u32,
    /// Fetches that failed with a timeout, network or status error
    pub errors: u32,
}
