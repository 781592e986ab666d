//! suvidhaa: civic-engagement backend with AI-assisted document summaries
//!
//! Government documents are uploaded, reduced to plain text, stored (remote
//! object store when available, inline base-64 always) and structured by an
//! LLM into summaries, key points, affected groups, dates and responsible
//! offices. Citizens can file questions, suggestions and grievances against
//! them and keep watchlists.

pub mod analysis;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod storage;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use types::{Document, DocumentAnalysis, Grievance, Question, StoredBlob, Suggestion, Watchlist};
