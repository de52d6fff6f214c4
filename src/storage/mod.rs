//! Storage module for persisting crawl results
//!
//! This module handles all database operations for the crawler:
//! - SQLite database initialization and schema management
//! - Page persistence (URL, title, content)
//! - The per-word index used by search
//! - Handled-page counts for run statistics

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::InkseekError;
use std::path::Path;

/// Initializes or opens a storage database
pub fn open_storage(path: &Path) -> Result<SqliteStorage, InkseekError> {
    SqliteStorage::new(path)
}
