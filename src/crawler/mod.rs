//! Crawler module for page fetching and crawl coordination
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic behind the `HttpFetch` trait
//! - Pacing of every outbound request by the politeness delay
//! - HTML parsing and per-page metric extraction
//! - The breadth-first audit loop and report assembly

mod coordinator;
mod fetcher;
mod pacer;
mod parser;

pub use coordinator::{run_audit, Coordinator};
pub use fetcher::{
    fetch_page, is_html_content_type, FetchError, FetchResult, FetchedPage, HttpClient, HttpFetch,
    RawResponse, ResponseMeta, MAX_REDIRECTS,
};
pub use pacer::PacedFetcher;
pub use parser::{parse_html, parse_page};
