//! URL handling module for Site-Auditor
//!
//! This module provides authority extraction, link resolution, and the fetch
//! gate that decides which discovered URLs are eligible to crawl.

mod domain;
mod gate;
mod resolve;

pub use domain::extract_authority;
pub use gate::{FetchGate, GateRejection};
pub use resolve::{resolve_link, strip_fragment};
