//! Crawler module
//!
//! This module contains the concurrent crawl engine:
//! - HTTP fetching with terminal error classification
//! - HTML parsing and link extraction
//! - The fetch-parse worker loop
//! - The administrator that owns lifecycle and statistics

mod admin;
mod fetcher;
mod parser;
mod worker;

pub use admin::Administrator;
pub use fetcher::{build_http_client, fetch_page, FetchError, FetchedPage};
pub use parser::{parse_page, ParseError, ParsedPage};
pub use worker::run_worker;
