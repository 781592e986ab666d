//! API routes for the Suvidhaa server

pub mod dashboard;
pub mod documents;
pub mod form;
pub mod grievances;
pub mod questions;
pub mod suggestions;
pub mod watchlists;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Documents - with larger body limit for file uploads
        .route(
            "/documents/upload",
            post(documents::upload_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/documents", get(documents::list_documents))
        .route("/documents/:id", get(documents::get_document))
        // Citizen submissions
        .route(
            "/questions",
            post(questions::create_question).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/suggestions", post(suggestions::create_suggestion))
        .route("/suggestions/:id/cosign", post(suggestions::cosign_suggestion))
        .route(
            "/grievances",
            post(grievances::create_grievance).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Watchlists
        .route(
            "/watchlists",
            get(watchlists::list_watchlists).post(watchlists::create_watchlist),
        )
        // Aggregates
        .route("/dashboard/stats", get(dashboard::dashboard_stats))
        .route("/submissions", get(dashboard::user_submissions))
}
