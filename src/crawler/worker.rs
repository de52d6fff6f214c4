//! Fetch-parse worker loop
//!
//! Each worker repeatedly claims a URL from the frontier (subject to the
//! host's politeness slot), fetches and parses it, and reports the outcome
//! back: handled + discovered links + persisted content on success, invalid
//! on any terminal failure. Workers run until stop is signaled and no work
//! is claimable.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::parse_page;
use crate::frontier::Frontier;
use crate::storage::{SqliteStorage, Storage};
use reqwest::Client;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Sleep while no URL is claimable at all
const IDLE_SLEEP: Duration = Duration::from_millis(100);

/// Sleep after a denied politeness slot, so workers don't busy-spin while
/// every pending host is in cooldown
const COOLDOWN_SLEEP: Duration = Duration::from_millis(25);

/// Runs one worker until the crawl stops
///
/// The loop per iteration:
/// 1. Dequeue a URL; none available and stop signaled means exit, none
///    available otherwise means idle briefly and recheck.
/// 2. Claim the host's access slot; denied means the URL goes back to
///    pending (no fetch has started) and the worker backs off briefly.
/// 3. Fetch, parse, report. Per-URL failures never leave this function.
pub async fn run_worker(
    id: u32,
    frontier: Arc<Frontier>,
    storage: Arc<Mutex<SqliteStorage>>,
    client: Client,
) {
    loop {
        let url = match frontier.dequeue() {
            Some(url) => url,
            None => {
                if frontier.is_stopping() {
                    break;
                }
                tokio::time::sleep(IDLE_SLEEP).await;
                continue;
            }
        };

        if let Some(policy) = frontier.host_policy(&url) {
            if !policy.try_acquire_slot(Instant::now()) {
                frontier.requeue(url);
                tokio::time::sleep(COOLDOWN_SLEEP).await;
                continue;
            }
        }

        process_url(&frontier, &storage, &client, &url).await;
    }

    tracing::debug!("Worker {} stopped", id);
}

/// Fetches, parses and reports a single URL
async fn process_url(
    frontier: &Frontier,
    storage: &Mutex<SqliteStorage>,
    client: &Client,
    url: &url::Url,
) {
    tracing::debug!("Fetching {}", url);

    let page = match fetch_page(client, url).await {
        Ok(page) => page,
        Err(e) => {
            tracing::debug!("Invalid {}: {}", url, e);
            frontier.mark_invalid(url);
            return;
        }
    };

    let parsed = match parse_page(&page.body, &page.final_url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!("Invalid {}: {}", url, e);
            frontier.mark_invalid(url);
            return;
        }
    };

    frontier.mark_handled(url);

    if !parsed.links.is_empty() {
        frontier.add_urls(parsed.links).await;
    }

    if let Some(title) = parsed.title.as_deref() {
        if !parsed.content.is_empty() {
            let result = {
                let mut storage = storage.lock().unwrap();
                storage.insert_page(url.as_str(), title, &parsed.content)
            };
            if let Err(e) = result {
                // The page stays handled; a storage hiccup is not a crawl error
                tracing::warn!("Failed to persist {}: {}", url, e);
            }
        }
    }
}
