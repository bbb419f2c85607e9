//! Response Builder.
//!
//! Shapes resolved verses into the JSON bodies returned by the HTTP server
//! and printed by the CLI. The two endpoints deliberately use different
//! verse shapes: a passage lists `{verse, text}` pairs under a hoisted
//! book and chapter, while a range lookup returns full [`Verse`] records.

use serde::{Deserialize, Serialize};

use crate::models::Verse;

/// A verse inside a [`PassageResponse`], stripped of the fields already
/// hoisted to the passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseText {
    pub verse: i64,
    pub text: String,
}

/// Body of `GET /{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassageResponse {
    pub book: String,
    pub chapter: i64,
    /// `"{chapter}:{verse}"` or `"{chapter}:{first}-{last}"`.
    pub chapter_verse_range: String,
    pub verses: Vec<VerseText>,
    /// One past the id of the last verse. Not guaranteed to exist.
    pub next_id: i64,
}

/// Body of `GET /verses/{book}/{chapter}/{range}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeResponse {
    pub book: String,
    pub chapter: i64,
    pub verse_range: String,
    pub verses: Vec<Verse>,
}

/// `"3"` for a single verse, `"1-3"` otherwise.
pub fn range_label(first: i64, last: i64) -> String {
    if first == last {
        first.to_string()
    } else {
        format!("{}-{}", first, last)
    }
}

/// Build the passage body for `initial` and its resolved `passage`.
///
/// `passage` is expected to start with `initial`; when it is empty the
/// passage is taken to be `initial` alone.
pub fn build_passage(initial: &Verse, passage: &[Verse]) -> PassageResponse {
    let first = passage.first().unwrap_or(initial);
    let last = passage.last().unwrap_or(initial);
    let label = range_label(first.verse, last.verse);

    let verses = if passage.is_empty() {
        vec![VerseText {
            verse: initial.verse,
            text: initial.text.clone(),
        }]
    } else {
        passage
            .iter()
            .map(|v| VerseText {
                verse: v.verse,
                text: v.text.clone(),
            })
            .collect()
    };

    PassageResponse {
        book: initial.book.clone(),
        chapter: initial.chapter,
        chapter_verse_range: format!("{}:{}", initial.chapter, label),
        verses,
        next_id: last.id + 1,
    }
}

/// Build the range body. The label reflects the requested bounds, not the
/// verses that were actually found.
pub fn build_range(chapter: i64, start: i64, end: i64, verses: Vec<Verse>) -> RangeResponse {
    let book = verses.first().map(|v| v.book.clone()).unwrap_or_default();
    RangeResponse {
        book,
        chapter,
        verse_range: range_label(start, end),
        verses,
    }
}
