//! # Scripture
//!
//! A read-only HTTP API over a scripture corpus organized into books,
//! chapters and verses.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ corpus.json │──▶│ import       │──▶│ SQLite       │
//! └─────────────┘   └──────────────┘   │ book / verse │
//!                                      └──────┬───────┘
//!                                             │ VerseStore
//!                        ┌────────────────────┤
//!                        ▼                    ▼
//!                   ┌──────────┐        ┌──────────┐
//!                   │   CLI    │        │   HTTP   │
//!                   │scripture │        │  (Axum)  │
//!                   └──────────┘        └──────────┘
//! ```
//!
//! Passage resolution, response shaping and request validation live in
//! the `scripture-core` crate; this crate supplies the SQLite store, the
//! CLI and the server.
//!
//! ## Quick Start
//!
//! ```bash
//! scripture init                         # create database
//! scripture import ./data/corpus.json    # load verses
//! scripture get 1 --find-end             # passage starting at verse 1
//! scripture range genesis 1 2-4          # Genesis 1:2-4
//! scripture serve                        # start HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`db`] | SQLite connection pool with WAL mode |
//! | [`migrate`] | Database schema migrations (idempotent) |
//! | [`sqlite_store`] | `VerseStore` over SQLite |
//! | [`import`] | JSON corpus import |
//! | [`get`] | CLI passage and range output |
//! | [`server`] | HTTP server (Axum) with CORS and request logging |

pub mod config;
pub mod db;
pub mod get;
pub mod import;
pub mod migrate;
pub mod server;
pub mod sqlite_store;

pub use scripture_core::{corpus, lookup, models, passage, resolve, store};
