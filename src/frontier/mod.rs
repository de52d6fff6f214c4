//! Shared crawl frontier
//!
//! The [`Frontier`] is the single piece of mutable state shared between all
//! workers: the sets of pending, in-flight, handled and invalid URLs, plus
//! the per-host policy table. All set mutations happen under one coarse
//! lock, and every composite check-then-act is a single method, so workers
//! cannot race each other into duplicate or lost work.

mod host_policy;

pub use host_policy::HostPolicy;

use crate::url::extract_host;
use reqwest::Client;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// The three URL sets plus the in-flight tracking set
///
/// Invariant: the four sets are pairwise disjoint. A URL in `handled` or
/// `invalid` is terminal and never re-enters `pending`; a URL in
/// `in_flight` is owned by exactly one worker.
#[derive(Debug, Default)]
struct UrlSets {
    pending: HashSet<Url>,
    in_flight: HashSet<Url>,
    handled: HashSet<Url>,
    invalid: HashSet<Url>,
}

impl UrlSets {
    fn knows(&self, url: &Url) -> bool {
        self.pending.contains(url)
            || self.in_flight.contains(url)
            || self.handled.contains(url)
            || self.invalid.contains(url)
    }
}

/// Shared URL frontier and host-policy table
///
/// The URL sets live behind one mutex; the host table behind another. The
/// sets lock is never held across an await, and host policy construction
/// (which fetches robots.txt) happens with no lock held at all.
pub struct Frontier {
    sets: Mutex<UrlSets>,
    hosts: Mutex<HashMap<String, Arc<HostPolicy>>>,
    stopping: AtomicBool,
    client: Client,
    user_agent: String,
    host_delay: Duration,
}

impl Frontier {
    /// Creates an empty frontier
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client (used for robots.txt fetches)
    /// * `user_agent` - The crawler user-agent, checked against robots rules
    /// * `host_delay` - Minimum delay between requests to one host
    pub fn new(client: Client, user_agent: String, host_delay: Duration) -> Self {
        Self {
            sets: Mutex::new(UrlSets::default()),
            hosts: Mutex::new(HashMap::new()),
            stopping: AtomicBool::new(false),
            client,
            user_agent,
            host_delay,
        }
    }

    /// Adds discovered URLs to the pending set
    ///
    /// Each URL is skipped if it is already known in any set. Otherwise its
    /// host policy is resolved (fetching robots.txt on first contact with
    /// the host, outside any lock) and the URL is inserted into `pending`
    /// only if the robots rules allow it.
    pub async fn add_urls<I>(&self, urls: I)
    where
        I: IntoIterator<Item = Url>,
    {
        for url in urls {
            let host = match extract_host(&url) {
                Some(h) => h,
                None => {
                    tracing::debug!("No host in {}, skipping", url);
                    continue;
                }
            };

            // Cheap membership check first so known URLs never trigger a
            // robots fetch.
            if self.sets.lock().unwrap().knows(&url) {
                continue;
            }

            let policy = self.resolve_host(&host).await;

            if !policy.allowed(&url, &self.user_agent) {
                tracing::debug!("{} disallowed by robots.txt", url);
                continue;
            }

            let mut sets = self.sets.lock().unwrap();
            // Re-check: another worker may have added or processed the URL
            // while the robots fetch was in progress.
            if !sets.knows(&url) {
                sets.pending.insert(url);
            }
        }
    }

    /// Returns the policy for a host, creating it on first use
    ///
    /// Two workers hitting a brand-new host at the same time both fetch its
    /// robots.txt; the first insert wins and the loser's copy is dropped.
    /// Harmless, since robots.txt is immutable within a run.
    async fn resolve_host(&self, host: &str) -> Arc<HostPolicy> {
        if let Some(policy) = self.hosts.lock().unwrap().get(host) {
            return Arc::clone(policy);
        }

        let fresh = Arc::new(HostPolicy::resolve(&self.client, host, self.host_delay).await);

        let mut hosts = self.hosts.lock().unwrap();
        Arc::clone(hosts.entry(host.to_string()).or_insert(fresh))
    }

    /// Looks up the policy for a URL's host
    ///
    /// Returns `None` only for URLs that never went through [`add_urls`].
    pub fn host_policy(&self, url: &Url) -> Option<Arc<HostPolicy>> {
        let host = extract_host(url)?;
        self.hosts.lock().unwrap().get(&host).map(Arc::clone)
    }

    /// Removes and returns one pending URL
    ///
    /// Returns `None` when the crawl is stopping or no URL is pending right
    /// now. The latter does not mean the crawl is finished: another worker
    /// may still discover links. Selection order is unspecified.
    ///
    /// The returned URL is moved to the in-flight set, so no second worker
    /// can claim it.
    pub fn dequeue(&self) -> Option<Url> {
        if self.is_stopping() {
            return None;
        }

        let mut sets = self.sets.lock().unwrap();
        let url = sets.pending.iter().next().cloned()?;
        sets.pending.remove(&url);
        sets.in_flight.insert(url.clone());
        Some(url)
    }

    /// Returns a dequeued URL to the pending set
    ///
    /// Used for the politeness retry: the worker could not acquire the
    /// host's access slot and no fetch has started yet.
    pub fn requeue(&self, url: Url) {
        let mut sets = self.sets.lock().unwrap();
        sets.in_flight.remove(&url);
        if !sets.handled.contains(&url) && !sets.invalid.contains(&url) {
            sets.pending.insert(url);
        }
    }

    /// Moves a URL into the handled set
    ///
    /// Idempotent; a URL already terminal stays where it is.
    pub fn mark_handled(&self, url: &Url) {
        let mut sets = self.sets.lock().unwrap();
        sets.in_flight.remove(url);
        sets.pending.remove(url);
        if !sets.invalid.contains(url) {
            sets.handled.insert(url.clone());
        }
    }

    /// Moves a URL into the invalid set
    ///
    /// Idempotent; invalid URLs are never retried within a run.
    pub fn mark_invalid(&self, url: &Url) {
        let mut sets = self.sets.lock().unwrap();
        sets.in_flight.remove(url);
        sets.pending.remove(url);
        if !sets.handled.contains(url) {
            sets.invalid.insert(url.clone());
        }
    }

    /// Records a URL as handled in a previous run
    ///
    /// Used to preload persisted pages at startup so they are never fetched
    /// again.
    pub fn note_previously_handled(&self, url: Url) {
        let mut sets = self.sets.lock().unwrap();
        if !sets.knows(&url) {
            sets.handled.insert(url);
        }
    }

    /// Number of handled URLs (consistent snapshot)
    pub fn handled_count(&self) -> u64 {
        self.sets.lock().unwrap().handled.len() as u64
    }

    /// Number of pending URLs
    pub fn pending_count(&self) -> u64 {
        self.sets.lock().unwrap().pending.len() as u64
    }

    /// Number of invalid URLs
    pub fn invalid_count(&self) -> u64 {
        self.sets.lock().unwrap().invalid.len() as u64
    }

    /// Snapshot of all handled URLs, for the processed-URL log
    pub fn handled_snapshot(&self) -> Vec<String> {
        let sets = self.sets.lock().unwrap();
        let mut urls: Vec<String> = sets.handled.iter().map(|u| u.to_string()).collect();
        urls.sort();
        urls
    }

    /// Checks whether a URL is in the pending set
    pub fn is_pending(&self, url: &Url) -> bool {
        self.sets.lock().unwrap().pending.contains(url)
    }

    /// Checks whether a URL is in the invalid set
    pub fn is_invalid(&self, url: &Url) -> bool {
        self.sets.lock().unwrap().invalid.contains(url)
    }

    /// Checks whether a URL is in the handled set
    pub fn is_handled(&self, url: &Url) -> bool {
        self.sets.lock().unwrap().handled.contains(url)
    }

    /// The shared HTTP client (clones share one connection pool)
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Signals workers to stop claiming new work
    pub fn request_stop(&self) {
        self.stopping.store(true, Ordering::SeqCst);
    }

    /// Whether stop has been requested
    pub fn is_stopping(&self) -> bool {
        self.stopping.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    pub(crate) fn install_policy(&self, policy: HostPolicy) {
        self.hosts
            .lock()
            .unwrap()
            .insert(policy.hostname().to_string(), Arc::new(policy));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robots::ParsedRobots;

    fn test_frontier() -> Frontier {
        Frontier::new(
            Client::new(),
            "InkseekBot/0.1".to_string(),
            Duration::ZERO,
        )
    }

    fn frontier_with_host(host: &str, robots: ParsedRobots) -> Frontier {
        let frontier = test_frontier();
        frontier.install_policy(HostPolicy::from_rules(host, robots, Duration::ZERO));
        frontier
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_add_and_dequeue() {
        let frontier = frontier_with_host("a.test", ParsedRobots::allow_all());
        frontier.add_urls([url("http://a.test/")]).await;

        assert_eq!(frontier.pending_count(), 1);
        let got = frontier.dequeue().unwrap();
        assert_eq!(got.as_str(), "http://a.test/");
        assert_eq!(frontier.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_dequeue_empty() {
        let frontier = test_frontier();
        assert!(frontier.dequeue().is_none());
    }

    #[tokio::test]
    async fn test_dequeue_refused_when_stopping() {
        let frontier = frontier_with_host("a.test", ParsedRobots::allow_all());
        frontier.add_urls([url("http://a.test/")]).await;

        frontier.request_stop();
        assert!(frontier.dequeue().is_none());
        // The URL is still pending, just not claimable
        assert_eq!(frontier.pending_count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_add_is_ignored() {
        let frontier = frontier_with_host("a.test", ParsedRobots::allow_all());
        frontier.add_urls([url("http://a.test/p")]).await;
        frontier.add_urls([url("http://a.test/p")]).await;

        assert_eq!(frontier.pending_count(), 1);
    }

    #[tokio::test]
    async fn test_handled_url_never_readded() {
        let frontier = frontier_with_host("a.test", ParsedRobots::allow_all());
        let u = url("http://a.test/p");

        frontier.add_urls([u.clone()]).await;
        let got = frontier.dequeue().unwrap();
        frontier.mark_handled(&got);

        frontier.add_urls([u.clone()]).await;
        assert_eq!(frontier.pending_count(), 0);
        assert!(frontier.is_handled(&u));
    }

    #[tokio::test]
    async fn test_invalid_url_never_readded() {
        let frontier = frontier_with_host("a.test", ParsedRobots::allow_all());
        let u = url("http://a.test/broken");

        frontier.add_urls([u.clone()]).await;
        let got = frontier.dequeue().unwrap();
        frontier.mark_invalid(&got);

        frontier.add_urls([u.clone()]).await;
        assert_eq!(frontier.pending_count(), 0);
        assert!(frontier.is_invalid(&u));
    }

    #[tokio::test]
    async fn test_in_flight_url_not_readded() {
        let frontier = frontier_with_host("a.test", ParsedRobots::allow_all());
        let u = url("http://a.test/p");

        frontier.add_urls([u.clone()]).await;
        let _got = frontier.dequeue().unwrap();

        // Discovery of the same URL while a worker holds it must not queue
        // a second copy.
        frontier.add_urls([u.clone()]).await;
        assert_eq!(frontier.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_requeue_returns_url_to_pending() {
        let frontier = frontier_with_host("a.test", ParsedRobots::allow_all());
        let u = url("http://a.test/p");

        frontier.add_urls([u.clone()]).await;
        let got = frontier.dequeue().unwrap();
        frontier.requeue(got);

        assert!(frontier.is_pending(&u));
    }

    #[tokio::test]
    async fn test_robots_disallow_keeps_url_out_of_pending() {
        let robots = ParsedRobots::from_content("User-agent: *\nDisallow: /private");
        let frontier = frontier_with_host("h.test", robots);

        frontier
            .add_urls([url("http://h.test/private/x"), url("http://h.test/ok")])
            .await;

        assert_eq!(frontier.pending_count(), 1);
        assert!(frontier.is_pending(&url("http://h.test/ok")));
        assert!(!frontier.is_pending(&url("http://h.test/private/x")));
    }

    #[tokio::test]
    async fn test_marks_are_idempotent() {
        let frontier = frontier_with_host("a.test", ParsedRobots::allow_all());
        let u = url("http://a.test/p");

        frontier.add_urls([u.clone()]).await;
        let got = frontier.dequeue().unwrap();
        frontier.mark_handled(&got);
        frontier.mark_handled(&got);
        // A later mark_invalid must not pull it out of handled
        frontier.mark_invalid(&got);

        assert_eq!(frontier.handled_count(), 1);
        assert_eq!(frontier.invalid_count(), 0);
    }

    #[tokio::test]
    async fn test_note_previously_handled() {
        let frontier = frontier_with_host("a.test", ParsedRobots::allow_all());
        let u = url("http://a.test/old");

        frontier.note_previously_handled(u.clone());
        frontier.add_urls([u.clone()]).await;

        assert_eq!(frontier.pending_count(), 0);
        assert_eq!(frontier.handled_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_add_urls_no_duplicates() {
        let frontier = Arc::new(frontier_with_host("a.test", ParsedRobots::allow_all()));
        let urls: Vec<Url> = (0..50)
            .map(|i| url(&format!("http://a.test/page{}", i)))
            .collect();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let frontier = Arc::clone(&frontier);
            let urls = urls.clone();
            handles.push(tokio::spawn(async move {
                frontier.add_urls(urls).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(frontier.pending_count(), 50);

        // Drain and mark everything handled; each URL must come out once
        let mut seen = HashSet::new();
        while let Some(u) = frontier.dequeue() {
            assert!(seen.insert(u.clone()), "URL dequeued twice: {}", u);
            frontier.mark_handled(&u);
        }
        assert_eq!(seen.len(), 50);
        assert_eq!(frontier.handled_count(), 50);
    }

    #[tokio::test]
    async fn test_handled_snapshot_sorted() {
        let frontier = frontier_with_host("a.test", ParsedRobots::allow_all());
        for path in ["/b", "/a", "/c"] {
            let u = url(&format!("http://a.test{}", path));
            frontier.add_urls([u.clone()]).await;
            let got = frontier.dequeue().unwrap();
            frontier.mark_handled(&got);
        }

        let snapshot = frontier.handled_snapshot();
        assert_eq!(
            snapshot,
            vec!["http://a.test/a", "http://a.test/b", "http://a.test/c"]
        );
    }
}
