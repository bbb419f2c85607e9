//! SQLite-backed [`VerseStore`] implementation.
//!
//! Reads the `book` / `verse` schema created by [`crate::migrate`]. Every
//! query joins the verse to its book so callers always see the stored book
//! name, never the book id.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use scripture_core::models::{normalize_book, Verse};
use scripture_core::store::{StoreError, VerseStore};

use crate::config::Config;
use crate::db;

const VERSE_COLUMNS: &str = r#"
    SELECT v.id, b.name AS book, v.chapter, v.verse, v.text
    FROM verse v
    JOIN book b ON v.book_id = b.id
"#;

/// SQLite implementation of the [`VerseStore`] trait.
///
/// Wraps a [`SqlitePool`]; cloning the pool is cheap, so one store is
/// shared by every request for the lifetime of the server.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the configured database.
    pub async fn open(config: &Config) -> Result<Self> {
        Ok(Self::new(db::connect(config).await?))
    }

    /// Close the underlying pool, waiting for in-flight queries.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Resolve a book name to its id, matching case-insensitively after
    /// trimming. Matching happens here rather than with SQL `LOWER()`,
    /// which only folds ASCII letters.
    async fn find_book_id(&self, book: &str) -> Result<Option<i64>, StoreError> {
        let wanted = normalize_book(book);
        let rows = sqlx::query("SELECT id, name FROM book ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::storage)?;

        for row in &rows {
            let name: String = row.try_get("name").map_err(StoreError::storage)?;
            if normalize_book(&name) == wanted {
                return row.try_get("id").map(Some).map_err(StoreError::storage);
            }
        }
        Ok(None)
    }
}

fn verse_from_row(row: &SqliteRow) -> Result<Verse, StoreError> {
    let read = || -> Result<Verse, sqlx::Error> {
        Ok(Verse {
            id: row.try_get("id")?,
            book: row.try_get("book")?,
            chapter: row.try_get("chapter")?,
            verse: row.try_get("verse")?,
            text: row.try_get("text")?,
        })
    };
    read().map_err(StoreError::storage)
}

#[async_trait]
impl VerseStore for SqliteStore {
    async fn get_verse(&self, id: i64) -> Result<Option<Verse>, StoreError> {
        let row = sqlx::query(&format!("{} WHERE v.id = ?", VERSE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::storage)?;

        row.as_ref().map(verse_from_row).transpose()
    }

    async fn next_verse(&self, after_id: i64) -> Result<Option<Verse>, StoreError> {
        let row = sqlx::query(&format!(
            "{} WHERE v.id > ? ORDER BY v.id ASC LIMIT 1",
            VERSE_COLUMNS
        ))
        .bind(after_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::storage)?;

        row.as_ref().map(verse_from_row).transpose()
    }

    async fn verses_in_range(
        &self,
        book: &str,
        chapter: i64,
        start: i64,
        end: i64,
    ) -> Result<Vec<Verse>, StoreError> {
        let book_id = match self.find_book_id(book).await? {
            Some(id) => id,
            None => return Ok(Vec::new()),
        };

        let rows = sqlx::query(&format!(
            "{} WHERE v.book_id = ? AND v.chapter = ? AND v.verse BETWEEN ? AND ? ORDER BY v.verse ASC",
            VERSE_COLUMNS
        ))
        .bind(book_id)
        .bind(chapter)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::storage)?;

        rows.iter().map(verse_from_row).collect()
    }
}
