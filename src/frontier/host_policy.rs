//! Per-host crawl policy
//!
//! One [`HostPolicy`] exists per hostname seen during a run. It owns the
//! host's robots.txt rules and the politeness timer that spaces requests to
//! the host.

use crate::robots::{fetch_robots, ParsedRobots};
use reqwest::Client;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use url::Url;

/// Robots rules and politeness timer for a single host
///
/// Created on first URL referencing the host and kept for the lifetime of
/// the crawl run. The robots fetch happens once, in [`HostPolicy::resolve`],
/// and fails open: an unreachable robots.txt means the host is crawled
/// without restrictions.
#[derive(Debug)]
pub struct HostPolicy {
    hostname: String,
    rules: ParsedRobots,
    delay: Duration,
    last_access: Mutex<Option<Instant>>,
}

impl HostPolicy {
    /// Resolves the policy for a host by fetching its robots.txt
    ///
    /// This performs network IO and must never be called while any frontier
    /// lock is held.
    pub async fn resolve(client: &Client, hostname: &str, delay: Duration) -> Self {
        let rules = fetch_robots(client, hostname).await;
        Self::from_rules(hostname, rules, delay)
    }

    /// Builds a policy from already-parsed rules
    pub fn from_rules(hostname: &str, rules: ParsedRobots, delay: Duration) -> Self {
        Self {
            hostname: hostname.to_string(),
            rules,
            delay,
            last_access: Mutex::new(None),
        }
    }

    /// Returns the hostname this policy applies to
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Checks if a URL is allowed by this host's robots.txt rules
    pub fn allowed(&self, url: &Url, user_agent: &str) -> bool {
        self.rules.is_allowed(url.as_str(), user_agent)
    }

    /// Attempts to claim an access slot for this host
    ///
    /// Grants the slot and advances the access timestamp to `now` exactly
    /// when at least `delay` has elapsed since the last granted access;
    /// otherwise returns false and leaves the timer untouched. The
    /// check-and-advance is atomic: two workers racing on the same host
    /// cannot both be granted within one delay window.
    pub fn try_acquire_slot(&self, now: Instant) -> bool {
        let mut last = self.last_access.lock().unwrap();
        let ready = match *last {
            None => true,
            Some(prev) => now.saturating_duration_since(prev) >= self.delay,
        };
        if ready {
            *last = Some(now);
        }
        ready
    }
}
