use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Inkseek
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    /// Seed URLs the crawl starts from
    #[serde(default)]
    pub seeds: Vec<String>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of concurrent fetch-parse workers
    #[serde(default = "default_workers")]
    pub workers: u32,

    /// Minimum delay between requests to one host (milliseconds, 0 = none)
    #[serde(rename = "host-delay-ms", default)]
    pub host_delay_ms: u64,

    /// Total timeout for one page fetch (seconds)
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl CrawlerConfig {
    /// The per-host politeness delay as a Duration
    pub fn host_delay(&self) -> Duration {
        Duration::from_millis(self.host_delay_ms)
    }

    /// The fetch timeout as a Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            host_delay_ms: 0,
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

fn default_workers() -> u32 {
    8
}

fn default_fetch_timeout() -> u64 {
    10
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// The fixed user-agent string sent with every request
    ///
    /// Format: `CrawlerName/Version (+ContactURL)`
    pub fn ua_string(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path the crawl summary is written to on interruption
    #[serde(rename = "log-path", default = "default_log_path")]
    pub log_path: String,

    /// Whether the summary log includes the full processed-URL list
    #[serde(rename = "log-processed-urls", default)]
    pub log_processed_urls: bool,
}

fn default_log_path() -> String {
    "./crawler.log".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawler_defaults() {
        let config = CrawlerConfig::default();
        assert_eq!(config.workers, 8);
        assert_eq!(config.host_delay_ms, 0);
        assert_eq!(config.fetch_timeout_secs, 10);
    }

    #[test]
    fn test_duration_conversions() {
        let config = CrawlerConfig {
            workers: 4,
            host_delay_ms: 250,
            fetch_timeout_secs: 30,
        };
        assert_eq!(config.host_delay(), Duration::from_millis(250));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_ua_string_format() {
        let ua = UserAgentConfig {
            crawler_name: "InkseekBot".to_string(),
            crawler_version: "0.1".to_string(),
            contact_url: "https://example.com/bot".to_string(),
        };
        assert_eq!(ua.ua_string(), "InkseekBot/0.1 (+https://example.com/bot)");
    }
}
