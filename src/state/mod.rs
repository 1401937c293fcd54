//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: lifecycle of one crawl (idle, running, done)
//! - `Frontier`: visited set plus the breadth-first queue
//! - `CrawlCounters`: totals reported at the end of the run

mod counters;
mod crawl_state;
mod frontier;

pub use counters::CrawlCounters;
pub use crawl_state::CrawlState;
pub use frontier::Frontier;
