//! Storage module for persistent records
//!
//! Provides SQLite-based persistence for documents and citizen submissions.

mod database;

pub use database::{Record, RecordStore, SUBMISSIONS_LIMIT, WATCHLIST_LIMIT};
