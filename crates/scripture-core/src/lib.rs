//! # Scripture Core
//!
//! Shared logic for the scripture passage API: verse models, the
//! read-only store abstraction, passage resolution and response shaping.
//!
//! This crate contains no tokio, sqlx, filesystem I/O, or other
//! native-only dependencies. The SQLite-backed store and the HTTP server
//! live in the `scripture` application crate.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | `Verse` and `CorpusEntry` |
//! | [`corpus`] | Assigns ids to an import file and checks corpus ordering |
//! | [`store`] | `VerseStore` trait and the in-memory implementation |
//! | [`resolve`] | Range Resolver: extends a verse to the end of its passage |
//! | [`passage`] | Response Builder: range labels and response bodies |
//! | [`lookup`] | Request validation and the two lookup entry points |

pub mod corpus;
pub mod lookup;
pub mod models;
pub mod passage;
pub mod resolve;
pub mod store;
