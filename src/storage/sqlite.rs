//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageResult};
use crate::words::count_words;
use crate::InkseekError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    pub fn new(path: &Path) -> Result<Self, InkseekError> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, InkseekError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl Storage for SqliteStorage {
    fn insert_page(&mut self, url: &str, title: &str, content: &str) -> StorageResult<()> {
        let words = count_words(content);
        let now = Utc::now().to_rfc3339();

        let tx = self.conn.transaction()?;

        // Replace any previous version of the page; the word rows of the
        // old version go with it (ON DELETE CASCADE)
        let existing: Option<i64> = tx
            .query_row("SELECT id FROM pages WHERE url = ?1", params![url], |row| {
                row.get(0)
            })
            .optional()?;
        if let Some(id) = existing {
            tx.execute("DELETE FROM pages WHERE id = ?1", params![id])?;
        }

        tx.execute(
            "INSERT INTO pages (url, title, content, crawled_at) VALUES (?1, ?2, ?3, ?4)",
            params![url, title, content, now],
        )?;
        let page_id = tx.last_insert_rowid();

        {
            let mut stmt =
                tx.prepare("INSERT INTO words (page_id, word, tally) VALUES (?1, ?2, ?3)")?;
            for (word, tally) in &words {
                stmt.execute(params![page_id, word, tally])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn search(&self, query_words: &[String]) -> StorageResult<u64> {
        if query_words.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; query_words.len()].join(", ");
        let sql = format!(
            "SELECT COUNT(DISTINCT page_id) FROM words WHERE word IN ({})",
            placeholders
        );

        let lowered: Vec<String> = query_words.iter().map(|w| w.to_lowercase()).collect();
        let count: i64 = self.conn.query_row(
            &sql,
            rusqlite::params_from_iter(lowered.iter()),
            |row| row.get(0),
        )?;

        Ok(count as u64)
    }

    fn clear_pages(&mut self) -> StorageResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM words", [])?;
        tx.execute("DELETE FROM pages", [])?;
        tx.commit()?;
        Ok(())
    }

    fn ensure_word_index(&mut self) -> StorageResult<()> {
        self.conn
            .execute("CREATE INDEX IF NOT EXISTS idx_words_word ON words(word)", [])?;
        Ok(())
    }

    fn count_handled(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn load_handled_urls(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT url FROM pages")?;
        let urls = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(urls)
    }
}
