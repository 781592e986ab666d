//! Dashboard and per-user views

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::error::Result;
use crate::server::routes::watchlists::OwnerParams;
use crate::server::state::AppState;
use crate::types::{DashboardStats, UserSubmissions};

/// GET /api/ - Welcome message
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Suvidhaa API - Your Bridge to Transparent Governance"
    }))
}

/// GET /api/dashboard/stats - Aggregate counters
pub async fn dashboard_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    Ok(Json(state.store().dashboard_stats()?))
}

/// GET /api/submissions - Everything filed under `user_email`
pub async fn user_submissions(
    State(state): State<AppState>,
    Query(params): Query<OwnerParams>,
) -> Result<Json<UserSubmissions>> {
    Ok(Json(state.store().submissions_by_email(&params.user_email)?))
}
