//! Crawl administrator - lifecycle, worker pool and statistics
//!
//! The [`Administrator`] owns the frontier and the storage handle, spawns
//! and joins the worker pool, and answers the statistics questions the CLI
//! asks when a crawl is interrupted.

use crate::config::Config;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::worker::run_worker;
use crate::frontier::Frontier;
use crate::output::RunStatistics;
use crate::storage::{open_storage, SqliteStorage, Storage};
use crate::url::normalize_url;
use crate::InkseekError;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::task::JoinHandle;
use url::Url;

/// Administrates one crawl run
///
/// Construction is the only fatal failure path of the whole crawl: if the
/// storage backend cannot be opened, the error surfaces to the caller
/// before any worker starts. Everything after that is per-URL state
/// transitions and aggregate statistics.
pub struct Administrator {
    config: Arc<Config>,
    frontier: Arc<Frontier>,
    storage: Arc<Mutex<SqliteStorage>>,
    workers: Vec<JoinHandle<()>>,
    started_at: Option<Instant>,
    baseline_handled: u64,
}

impl Administrator {
    /// Creates an administrator and seeds the frontier
    ///
    /// Opens (or creates) the storage database, makes sure the word index
    /// exists, preloads the URLs persisted by previous runs into the
    /// handled set, records the baseline count for this run's statistics,
    /// and seeds the frontier with the configured URLs (normalized).
    pub async fn new(config: Config) -> Result<Self, InkseekError> {
        let mut storage = open_storage(Path::new(&config.output.database_path))?;
        storage.ensure_word_index()?;

        let baseline_handled = storage.count_handled()?;
        let previous_urls = storage.load_handled_urls()?;

        let user_agent = config.user_agent.ua_string();
        let client = build_http_client(&user_agent, config.crawler.fetch_timeout())?;
        let frontier = Arc::new(Frontier::new(
            client,
            user_agent,
            config.crawler.host_delay(),
        ));

        for url in previous_urls {
            match Url::parse(&url) {
                Ok(url) => frontier.note_previously_handled(url),
                Err(e) => tracing::warn!("Ignoring stored URL {}: {}", url, e),
            }
        }

        let mut seeds = Vec::new();
        for seed in &config.seeds {
            match normalize_url(seed) {
                Ok(url) => seeds.push(url),
                Err(e) => tracing::warn!("Skipping seed {}: {}", seed, e),
            }
        }
        frontier.add_urls(seeds).await;

        tracing::info!(
            "Administrator ready: {} seed URLs pending, {} pages from previous runs",
            frontier.pending_count(),
            baseline_handled
        );

        Ok(Self {
            config: Arc::new(config),
            frontier,
            storage: Arc::new(Mutex::new(storage)),
            workers: Vec::new(),
            started_at: None,
            baseline_handled,
        })
    }

    /// Starts the worker pool and returns immediately
    ///
    /// The crawl proceeds in the background; progress is visible through
    /// the statistics accessors and stops via [`Administrator::stop`].
    pub fn crawl(&mut self) {
        self.started_at = Some(Instant::now());

        for id in 0..self.config.crawler.workers {
            let handle = tokio::spawn(run_worker(
                id,
                Arc::clone(&self.frontier),
                Arc::clone(&self.storage),
                self.frontier_client(),
            ));
            self.workers.push(handle);
        }

        tracing::info!("Crawl started with {} workers", self.config.crawler.workers);
    }

    /// Signals stop and waits for every worker to exit
    ///
    /// In-flight fetches run to completion; no new work is claimed once the
    /// flag is set. After this returns, no further frontier mutations
    /// happen.
    pub async fn stop(&mut self) {
        self.frontier.request_stop();

        for handle in self.workers.drain(..) {
            if let Err(e) = handle.await {
                tracing::error!("Worker task failed: {}", e);
            }
        }

        tracing::info!(
            "Crawl stopped: {} pages this run, {} invalid, {} still pending",
            self.handled_this_run(),
            self.frontier.invalid_count(),
            self.frontier.pending_count()
        );
    }

    /// Seconds since the crawl started, 0.0 if it hasn't
    pub fn runtime_seconds(&self) -> f64 {
        self.started_at
            .map(|start| start.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Pages handled by this run, excluding previous runs' pages
    pub fn handled_this_run(&self) -> u64 {
        self.frontier
            .handled_count()
            .saturating_sub(self.baseline_handled)
    }

    /// Average processing rate; 0.0 before the crawl starts
    pub fn pages_per_second(&self) -> f64 {
        let runtime = self.runtime_seconds();
        if runtime == 0.0 {
            return 0.0;
        }
        self.handled_this_run() as f64 / runtime
    }

    /// Snapshot of this run's statistics for the summary log
    pub fn statistics(&self) -> RunStatistics {
        let processed_urls = self
            .config
            .output
            .log_processed_urls
            .then(|| self.frontier.handled_snapshot());

        RunStatistics {
            runtime_secs: self.runtime_seconds(),
            pages_processed: self.handled_this_run(),
            pages_per_second: self.pages_per_second(),
            processed_urls,
        }
    }

    /// The shared frontier (exposed for tests and progress reporting)
    pub fn frontier(&self) -> &Arc<Frontier> {
        &self.frontier
    }

    fn frontier_client(&self) -> reqwest::Client {
        // Workers and robots fetches share one connection pool
        self.frontier.client().clone()
    }
}
