//! Robots.txt handling module
//!
//! Fetching and evaluation of robots.txt rules. A host's rules are fetched
//! once when its [`crate::frontier::HostPolicy`] is created; any failure to
//! fetch or read the file means the host is crawled without restrictions.

mod parser;

pub use parser::ParsedRobots;

use reqwest::Client;

/// Fetches and parses robots.txt for a host
///
/// Requests `http://{host}/robots.txt`. Every failure mode — connection
/// error, timeout, non-2xx status, unreadable body — results in a
/// permissive rule set. A missing or broken robots.txt never blocks a
/// crawl.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `host` - The hostname to fetch robots.txt from
pub async fn fetch_robots(client: &Client, host: &str) -> ParsedRobots {
    let robots_url = format!("http://{}/robots.txt", host);

    let response = match client.get(&robots_url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("robots.txt fetch failed for {}: {}", host, e);
            return ParsedRobots::allow_all();
        }
    };

    if !response.status().is_success() {
        tracing::debug!(
            "robots.txt for {} returned HTTP {}, allowing all",
            host,
            response.status().as_u16()
        );
        return ParsedRobots::allow_all();
    }

    match response.text().await {
        Ok(body) => ParsedRobots::from_content(&body),
        Err(e) => {
            tracing::debug!("robots.txt body unreadable for {}: {}", host, e);
            ParsedRobots::allow_all()
        }
    }
}
