//! Run statistics and summary log
//!
//! When a crawl is interrupted, the administrator's statistics snapshot is
//! formatted into a short human-readable summary and written to the crawl
//! log file.

use std::io::Write;
use std::path::Path;

/// Snapshot of one crawl run's statistics
#[derive(Debug, Clone)]
pub struct RunStatistics {
    /// Wall-clock runtime in seconds
    pub runtime_secs: f64,

    /// Pages processed by this run (previous runs excluded)
    pub pages_processed: u64,

    /// Average pages per second over the runtime
    pub pages_per_second: f64,

    /// The processed URLs, when the per-URL list is enabled
    pub processed_urls: Option<Vec<String>>,
}

impl RunStatistics {
    /// Average pages per minute
    pub fn pages_per_minute(&self) -> f64 {
        self.pages_per_second * 60.0
    }

    /// Formats the summary block
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Total runtime: {:.0} min ({:.0} s)\n\
             Pages processed: {}\n\
             Average: {:.3} pages/s {:.3} pages/min\n",
            self.runtime_secs / 60.0,
            self.runtime_secs,
            self.pages_processed,
            self.pages_per_second,
            self.pages_per_minute(),
        );

        if let Some(urls) = &self.processed_urls {
            out.push_str("\nProcessed URLs:\n");
            for url in urls {
                out.push_str("  ");
                out.push_str(url);
                out.push('\n');
            }
        }

        out
    }
}

/// Writes the summary to the crawl log file
pub fn write_log(stats: &RunStatistics, path: &Path) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(stats.summary().as_bytes())?;
    Ok(())
}
