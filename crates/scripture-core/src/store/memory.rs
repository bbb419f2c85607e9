//! In-memory [`VerseStore`] implementation for tests and small corpora.
//!
//! Verses are kept in a `BTreeMap` keyed by id, so the forward cursor is a
//! range query. The store is built once and never mutated, so no locking
//! is needed.

use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;

use crate::models::{normalize_book, Verse};

use super::{StoreError, VerseStore};

/// In-memory, read-only verse store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    verses: BTreeMap<i64, Verse>,
}

impl InMemoryStore {
    pub fn new(verses: impl IntoIterator<Item = Verse>) -> Self {
        Self {
            verses: verses.into_iter().map(|v| (v.id, v)).collect(),
        }
    }
}

#[async_trait]
impl VerseStore for InMemoryStore {
    async fn get_verse(&self, id: i64) -> Result<Option<Verse>, StoreError> {
        Ok(self.verses.get(&id).cloned())
    }

    async fn next_verse(&self, after_id: i64) -> Result<Option<Verse>, StoreError> {
        Ok(self
            .verses
            .range((Bound::Excluded(after_id), Bound::Unbounded))
            .next()
            .map(|(_, v)| v.clone()))
    }

    async fn verses_in_range(
        &self,
        book: &str,
        chapter: i64,
        start: i64,
        end: i64,
    ) -> Result<Vec<Verse>, StoreError> {
        let book = normalize_book(book);
        let mut found: Vec<Verse> = self
            .verses
            .values()
            .filter(|v| {
                v.chapter == chapter
                    && (start..=end).contains(&v.verse)
                    && normalize_book(&v.book) == book
            })
            .cloned()
            .collect();
        found.sort_by_key(|v| v.verse);
        Ok(found)
    }
}
