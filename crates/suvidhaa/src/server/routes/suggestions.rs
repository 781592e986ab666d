//! Public suggestion endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{Error, Operation, Result};
use crate::server::routes::form::FormInput;
use crate::server::state::AppState;
use crate::types::{CoSignature, Suggestion, SuggestionCreate};

/// POST /api/suggestions - Create a public suggestion
pub async fn create_suggestion(
    State(state): State<AppState>,
    Json(input): Json<SuggestionCreate>,
) -> Result<Json<Suggestion>> {
    let suggestion = Suggestion::new(input);
    state
        .store()
        .insert(&suggestion)
        .map_err(|e| e.with_operation(Operation::Submission))?;

    tracing::info!("Suggestion {} created ({})", suggestion.id, suggestion.category);
    Ok(Json(suggestion))
}

/// POST /api/suggestions/:id/cosign - Add a co-signature
pub async fn cosign_suggestion(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormInput,
) -> Result<Json<Value>> {
    let id = Uuid::parse_str(&id).map_err(|_| Error::NotFound("Suggestion".to_string()))?;
    let signature = CoSignature::new(form.required("signer_name")?, form.required("signer_email")?);

    state
        .store()
        .add_cosignature(id, signature)
        .map_err(|e| e.with_operation(Operation::CoSignature))?;

    Ok(Json(json!({ "message": "Co-signature added successfully" })))
}
