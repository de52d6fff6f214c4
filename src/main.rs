//! Inkseek main entry point
//!
//! Command-line interface for the Inkseek crawler and its search backend.

use anyhow::Context;
use clap::{Parser, Subcommand};
use inkseek::config::load_config;
use inkseek::crawler::Administrator;
use inkseek::output::write_log;
use inkseek::storage::{open_storage, Storage};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Inkseek: a polite concurrent web crawler with word-index search
#[derive(Parser, Debug)]
#[command(name = "inkseek")]
#[command(version)]
#[command(about = "A polite concurrent web crawler with word-index search", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl from the configured seed URLs until interrupted
    Crawl,

    /// Count the stored pages matching any of the given words
    Search {
        /// Words to look up in the index
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Remove all stored pages and word counts
    Clear,

    /// Create the word index if it does not exist yet
    Index,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    match cli.command {
        Command::Crawl => handle_crawl(config).await?,
        Command::Search { words } => handle_search(&config, &words)?,
        Command::Clear => handle_clear(&config)?,
        Command::Index => handle_index(&config)?,
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("inkseek=info,warn"),
            1 => EnvFilter::new("inkseek=debug,info"),
            2 => EnvFilter::new("inkseek=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Runs a crawl until Ctrl-C, then drains workers and writes the summary
async fn handle_crawl(config: inkseek::Config) -> anyhow::Result<()> {
    let log_path = config.output.log_path.clone();

    tracing::info!(
        "Starting crawl: {} seeds, {} workers",
        config.seeds.len(),
        config.crawler.workers
    );

    let mut admin = Administrator::new(config)
        .await
        .context("failed to initialize crawl")?;

    admin.crawl();

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;

    println!("\nInterrupted, draining workers...");
    admin.stop().await;

    let stats = admin.statistics();
    print!("{}", stats.summary());

    write_log(&stats, Path::new(&log_path))
        .with_context(|| format!("failed to write crawl log to {}", log_path))?;
    println!("Summary written to {}", log_path);

    Ok(())
}

/// Prints the number of stored pages matching any of the given words
fn handle_search(config: &inkseek::Config, words: &[String]) -> anyhow::Result<()> {
    let storage = open_storage(Path::new(&config.output.database_path))?;
    let count = storage.search(words)?;
    println!("{} page(s) match", count);
    Ok(())
}

/// Wipes all stored pages and word counts
fn handle_clear(config: &inkseek::Config) -> anyhow::Result<()> {
    let mut storage = open_storage(Path::new(&config.output.database_path))?;
    storage.clear_pages()?;
    println!("Cleared all stored pages");
    Ok(())
}

/// Creates the word index
fn handle_index(config: &inkseek::Config) -> anyhow::Result<()> {
    let mut storage = open_storage(Path::new(&config.output.database_path))?;
    storage.ensure_word_index()?;
    println!("Word index is in place");
    Ok(())
}
