//! Corpus import.
//!
//! Loads a JSON array of verses into the `book` / `verse` tables:
//!
//! ```json
//! [
//!   { "book": "Gênesis", "chapter": 1, "verse": 1, "text": "No princípio ..." },
//!   { "book": "Gênesis", "chapter": 1, "verse": 2, "text": "E a terra ..." }
//! ]
//! ```
//!
//! Entries must be in canonical order; ids are assigned `1..=N` in file
//! order by [`scripture_core::corpus::number_entries`]. The whole import
//! runs in a single transaction, so a failed import leaves the database
//! untouched.

use anyhow::{bail, Context, Result};
use sqlx::SqlitePool;
use std::path::Path;

use scripture_core::corpus::number_entries;
use scripture_core::models::{normalize_book, CorpusEntry};

use crate::config::Config;
use crate::db;
use crate::migrate;

/// Counts reported after an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    pub books: usize,
    pub verses: usize,
}

/// Parse an import file into corpus entries.
pub fn read_entries(path: &Path) -> Result<Vec<CorpusEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse corpus file: {}", path.display()))
}

/// Insert `entries` into an already-migrated database.
///
/// Refuses to touch a non-empty corpus unless `replace` is set, in which
/// case the existing books and verses are deleted first.
pub async fn import_entries(
    pool: &SqlitePool,
    entries: Vec<CorpusEntry>,
    replace: bool,
) -> Result<ImportStats> {
    let verses = number_entries(entries).context("Invalid corpus")?;

    let mut tx = pool.begin().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM verse")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        if !replace {
            bail!(
                "database already holds {} verses; use --replace to overwrite",
                existing
            );
        }
        sqlx::query("DELETE FROM verse").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM book").execute(&mut *tx).await?;
    }

    let mut book_id: i64 = 0;
    let mut current_book: Option<String> = None;

    for verse in &verses {
        let key = normalize_book(&verse.book);
        if current_book.as_deref() != Some(key.as_str()) {
            book_id += 1;
            sqlx::query("INSERT INTO book (id, name) VALUES (?, ?)")
                .bind(book_id)
                .bind(&verse.book)
                .execute(&mut *tx)
                .await?;
            current_book = Some(key);
        }

        sqlx::query("INSERT INTO verse (id, book_id, chapter, verse, text) VALUES (?, ?, ?, ?, ?)")
            .bind(verse.id)
            .bind(book_id)
            .bind(verse.chapter)
            .bind(verse.verse)
            .bind(&verse.text)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(ImportStats {
        books: book_id as usize,
        verses: verses.len(),
    })
}

/// CLI entry point: migrate, import, and print a summary.
pub async fn run_import(config: &Config, path: &Path, replace: bool) -> Result<()> {
    let entries = read_entries(path)?;

    let pool = db::connect(config).await?;
    migrate::apply(&pool).await?;
    let result = import_entries(&pool, entries, replace).await;
    pool.close().await;

    let stats = result?;
    println!("Import {}", path.display());
    println!("  books:  {}", stats.books);
    println!("  verses: {}", stats.verses);
    println!("ok");
    Ok(())
}
