//! Core record types

pub mod dashboard;
pub mod document;
pub mod submission;
pub mod watchlist;

pub use dashboard::{DashboardStats, UserSubmissions};
pub use document::{DocumentAnalysis, Document, StoredBlob};
pub use submission::{
    CoSignature, Evidence, Grievance, GrievanceCreate, GrievanceStatus, Question, QuestionCreate,
    QuestionStatus, Suggestion, SuggestionCreate, SuggestionStatus,
};
pub use watchlist::{NotificationFrequency, Watchlist, WatchlistCreate};
