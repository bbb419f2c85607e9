//! Database schema migrations.
//!
//! Creates the `book` and `verse` tables. Every statement is
//! `IF NOT EXISTS`, so running `scripture init` repeatedly is safe.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    apply(&pool).await?;
    pool.close().await;
    Ok(())
}

/// Apply the schema to an open pool.
pub async fn apply(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS book (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS verse (
            id INTEGER PRIMARY KEY,
            book_id INTEGER NOT NULL,
            chapter INTEGER NOT NULL CHECK (chapter > 0),
            verse INTEGER NOT NULL CHECK (verse > 0),
            text TEXT NOT NULL,
            UNIQUE(book_id, chapter, verse),
            FOREIGN KEY (book_id) REFERENCES book(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
