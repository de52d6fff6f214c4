//! Output module
//!
//! Human-readable run statistics and the crawl summary log written on
//! interruption.

mod stats;

pub use stats::{write_log, RunStatistics};
