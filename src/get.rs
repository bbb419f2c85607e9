//! Passage and range retrieval for the CLI.
//!
//! `scripture get` and `scripture range` resolve through the same
//! [`scripture_core::lookup`] functions as the HTTP server and print the
//! result as plain text.

use anyhow::Result;

use scripture_core::lookup::{self, LookupError, RangeQuery};
use scripture_core::passage::{PassageResponse, RangeResponse};

use crate::config::Config;
use crate::sqlite_store::SqliteStore;

/// CLI entry point for `scripture get <id> [--find-end]`.
pub async fn run_get(config: &Config, id: &str, find_end: bool) -> Result<()> {
    if let Err(e) = lookup::parse_verse_id(id) {
        return exit_with(e);
    }

    let store = SqliteStore::open(config).await?;
    let result = lookup::passage_by_id(&store, id, find_end).await;
    store.close().await;

    match result {
        Ok(passage) => {
            print!("{}", format_passage(&passage));
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}

/// CLI entry point for `scripture range <book> <chapter> <range>`.
pub async fn run_range(config: &Config, book: &str, chapter: &str, range: &str) -> Result<()> {
    let query = match RangeQuery::parse(book, chapter, range) {
        Ok(q) => q,
        Err(e) => return exit_with(e),
    };

    let store = SqliteStore::open(config).await?;
    let result = lookup::verses_by_range(&store, &query).await;
    store.close().await;

    match result {
        Ok(range) => {
            print!("{}", format_range(&range));
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}

/// Storage faults are returned as errors; every other lookup failure is a
/// user-facing message and a non-zero exit.
fn exit_with(err: LookupError) -> Result<()> {
    if let LookupError::Storage(e) = err {
        return Err(e.into());
    }
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

pub fn format_passage(p: &PassageResponse) -> String {
    let mut out = format!("{} {}\n", p.book, p.chapter_verse_range);
    for v in &p.verses {
        out.push_str(&format!("{:>3}  {}\n", v.verse, v.text));
    }
    out.push_str(&format!("next id: {}\n", p.next_id));
    out
}

pub fn format_range(r: &RangeResponse) -> String {
    let mut out = format!("{} {}:{}\n", r.book, r.chapter, r.verse_range);
    for v in &r.verses {
        out.push_str(&format!("{:>3}  {}  [id {}]\n", v.verse, v.text, v.id));
    }
    out
}
