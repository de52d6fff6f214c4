//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// This trait defines all database operations needed by the crawler and
/// the search CLI.
pub trait Storage {
    /// Persists and indexes a page
    ///
    /// Stores URL, title and content, tokenizes the content and records
    /// per-word counts. Re-inserting the same URL replaces the stored page
    /// and its word counts.
    fn insert_page(&mut self, url: &str, title: &str, content: &str) -> StorageResult<()>;

    /// Counts the pages containing any of the given words
    ///
    /// Query words are matched against the word index after the same
    /// lowercasing applied at indexing time.
    fn search(&self, query_words: &[String]) -> StorageResult<u64>;

    /// Removes all stored pages and their word counts
    fn clear_pages(&mut self) -> StorageResult<()>;

    /// Creates the word index if it does not exist yet
    fn ensure_word_index(&mut self) -> StorageResult<()>;

    /// Number of pages persisted by this and all previous runs
    fn count_handled(&self) -> StorageResult<u64>;

    /// URLs of all persisted pages
    ///
    /// Used at startup to seed the frontier's handled set so prior runs'
    /// pages are never fetched again.
    fn load_handled_urls(&self) -> StorageResult<Vec<String>>;
}
