//! Storage abstraction for the scripture corpus.
//!
//! The [`VerseStore`] trait defines the read-only operations needed by the
//! passage resolver and the lookup entry points, enabling pluggable
//! backends (SQLite in the application crate, in-memory here).
//!
//! Implementations must be `Send + Sync` to be shared across concurrent
//! requests.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Verse;

/// Failure reported by a store backend.
///
/// Backends never return partial data: any fault while reading surfaces
/// as this error and fails the whole operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Storage(String),
}

impl StoreError {
    pub fn storage(err: impl std::fmt::Display) -> Self {
        StoreError::Storage(err.to_string())
    }
}

/// Read-only access to the verse corpus.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`get_verse`](VerseStore::get_verse) | Verse with exactly this id |
/// | [`next_verse`](VerseStore::next_verse) | Forward cursor: first verse after an id |
/// | [`verses_in_range`](VerseStore::verses_in_range) | Verses of one chapter between two verse numbers |
#[async_trait]
pub trait VerseStore: Send + Sync {
    /// Look up a verse by its global id.
    async fn get_verse(&self, id: i64) -> Result<Option<Verse>, StoreError>;

    /// Return the verse with the smallest id strictly greater than `after_id`.
    ///
    /// On a gap-free corpus this is the verse at `after_id + 1`.
    async fn next_verse(&self, after_id: i64) -> Result<Option<Verse>, StoreError>;

    /// Return the verses of `book` / `chapter` whose verse numbers fall in
    /// `start..=end`, ascending by verse number.
    ///
    /// `book` is matched case-insensitively after trimming whitespace.
    async fn verses_in_range(
        &self,
        book: &str,
        chapter: i64,
        start: i64,
        end: i64,
    ) -> Result<Vec<Verse>, StoreError>;
}
