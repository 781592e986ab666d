//! Watchlist endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{Operation, Result};
use crate::server::state::AppState;
use crate::types::{Watchlist, WatchlistCreate};

/// Owner filter shared by per-user lookups
#[derive(Debug, Deserialize)]
pub struct OwnerParams {
    pub user_email: String,
}

/// POST /api/watchlists - Save a watchlist
pub async fn create_watchlist(
    State(state): State<AppState>,
    Json(input): Json<WatchlistCreate>,
) -> Result<Json<Watchlist>> {
    let watchlist = Watchlist::new(input);
    state
        .store()
        .insert(&watchlist)
        .map_err(|e| e.with_operation(Operation::Creation))?;
    Ok(Json(watchlist))
}

/// GET /api/watchlists - Watchlists owned by `user_email`
pub async fn list_watchlists(
    State(state): State<AppState>,
    Query(params): Query<OwnerParams>,
) -> Result<Json<Vec<Watchlist>>> {
    Ok(Json(state.store().list_watchlists(&params.user_email)?))
}
