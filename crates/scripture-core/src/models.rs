//! Core data models for the scripture corpus.
//!
//! A corpus is a flat, id-ordered list of [`Verse`]s. Books and chapters
//! are not separate types: they are coordinates carried on every verse.

use serde::{Deserialize, Serialize};

/// A single verse as stored in the corpus.
///
/// `id` is global and follows canonical corpus order (book, chapter,
/// verse). The serialized form is the "full" verse shape returned by the
/// range endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub id: i64,
    pub book: String,
    pub chapter: i64,
    pub verse: i64,
    pub text: String,
}

impl Verse {
    /// True when both verses belong to the same book and chapter.
    pub fn same_chapter(&self, other: &Verse) -> bool {
        self.chapter == other.chapter && self.book == other.book
    }

    /// True when the trimmed text ends with a full stop.
    pub fn ends_sentence(&self) -> bool {
        self.text.trim().ends_with('.')
    }
}

/// Lowercased, trimmed book name used for case-insensitive matching.
pub fn normalize_book(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A verse read from an import file, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub book: String,
    pub chapter: i64,
    pub verse: i64,
    pub text: String,
}
