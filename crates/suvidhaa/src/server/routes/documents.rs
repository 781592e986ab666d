//! Government document endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{Error, Operation, Result};
use crate::ingestion::DocumentUpload;
use crate::server::routes::form::FormInput;
use crate::server::state::AppState;
use crate::types::Document;

/// Content type assumed when a file part declares none
const UNKNOWN_CONTENT_TYPE: &str = "application/octet-stream";

/// Paging parameters for document listing
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    20
}

/// POST /api/documents/upload - Upload and process a document
pub async fn upload_document(
    State(state): State<AppState>,
    form: FormInput,
) -> Result<Json<Document>> {
    let upload = read_upload(&form)?;

    let document = state
        .pipeline()
        .process(upload)
        .await
        .map_err(|e| e.with_operation(Operation::Upload))?;

    Ok(Json(document))
}

fn read_upload(form: &FormInput) -> Result<DocumentUpload> {
    let file = form.file("file")?;
    Ok(DocumentUpload {
        title: form.required("title")?,
        document_type: form.required("document_type")?,
        content_type: file
            .content_type
            .clone()
            .unwrap_or_else(|| UNKNOWN_CONTENT_TYPE.to_string()),
        data: file.data.clone(),
    })
}

/// GET /api/documents - List documents, newest first
pub async fn list_documents(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Document>>> {
    let documents = state.store().list(params.skip, params.limit)?;
    Ok(Json(documents))
}

/// GET /api/documents/:id - Get a single document
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>> {
    // A malformed id cannot name a stored document
    let id = Uuid::parse_str(&id).map_err(|_| Error::NotFound("Document".to_string()))?;

    state
        .store()
        .get(id)?
        .map(Json)
        .ok_or_else(|| Error::NotFound("Document".to_string()))
}
