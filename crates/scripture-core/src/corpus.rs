//! Corpus numbering.
//!
//! Turns the entries of an import file into [`Verse`]s with global ids
//! `1..=N` in file order, and rejects files that would break the corpus
//! invariants the resolver depends on: every chapter numbers its verses
//! contiguously from 1, chapters of a book ascend, and a book never
//! resumes after another one has started.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{normalize_book, CorpusEntry, Verse};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorpusError {
    #[error("entry {index}: book name must not be empty")]
    EmptyBook { index: usize },

    #[error("{book} {chapter}:{verse}: text must not be empty")]
    EmptyText {
        book: String,
        chapter: i64,
        verse: i64,
    },

    #[error("{book} {chapter}:{verse}: chapter and verse must be positive")]
    InvalidCoordinate {
        book: String,
        chapter: i64,
        verse: i64,
    },

    #[error("{book} {chapter}: expected verse {expected}, found {found}")]
    VerseOutOfSequence {
        book: String,
        chapter: i64,
        expected: i64,
        found: i64,
    },

    #[error("book {0} appears again after another book started")]
    BookReopened(String),

    #[error("{book} {chapter}: chapter follows chapter {previous}")]
    ChapterOutOfOrder {
        book: String,
        chapter: i64,
        previous: i64,
    },
}

/// Assign ids to `entries` in order, validating corpus ordering.
pub fn number_entries(entries: Vec<CorpusEntry>) -> Result<Vec<Verse>, CorpusError> {
    let mut verses: Vec<Verse> = Vec::with_capacity(entries.len());
    let mut closed_books: HashSet<String> = HashSet::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let book = entry.book.trim().to_string();
        if book.is_empty() {
            return Err(CorpusError::EmptyBook { index });
        }
        if entry.chapter <= 0 || entry.verse <= 0 {
            return Err(CorpusError::InvalidCoordinate {
                book,
                chapter: entry.chapter,
                verse: entry.verse,
            });
        }
        if entry.text.trim().is_empty() {
            return Err(CorpusError::EmptyText {
                book,
                chapter: entry.chapter,
                verse: entry.verse,
            });
        }

        let expected = match verses.last() {
            Some(prev) if normalize_book(&prev.book) == normalize_book(&book) => {
                if entry.chapter == prev.chapter {
                    prev.verse + 1
                } else if entry.chapter < prev.chapter {
                    return Err(CorpusError::ChapterOutOfOrder {
                        book,
                        chapter: entry.chapter,
                        previous: prev.chapter,
                    });
                } else {
                    1
                }
            }
            Some(prev) => {
                closed_books.insert(normalize_book(&prev.book));
                if closed_books.contains(&normalize_book(&book)) {
                    return Err(CorpusError::BookReopened(book));
                }
                1
            }
            None => 1,
        };

        if entry.verse != expected {
            return Err(CorpusError::VerseOutOfSequence {
                book,
                chapter: entry.chapter,
                expected,
                found: entry.verse,
            });
        }

        verses.push(Verse {
            id: verses.len() as i64 + 1,
            book,
            chapter: entry.chapter,
            verse: entry.verse,
            text: entry.text,
        });
    }

    Ok(verses)
}
