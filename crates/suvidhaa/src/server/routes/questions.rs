//! Citizen question endpoint

use axum::{extract::State, Json};

use crate::error::{Operation, Result};
use crate::ingestion::{collect_evidence, QUESTION_EVIDENCE_PREFIX};
use crate::server::routes::form::FormInput;
use crate::server::state::AppState;
use crate::types::{Question, QuestionCreate};

/// POST /api/questions - Submit a question with optional evidence files
pub async fn create_question(
    State(state): State<AppState>,
    form: FormInput,
) -> Result<Json<Question>> {
    let input = QuestionCreate {
        user_name: form.required("user_name")?,
        email: form.required("email")?,
        phone: form.optional("phone"),
        question_text: form.required("question_text")?,
        category: form.required("category")?,
        related_document_id: form.optional("related_document_id"),
        government_office: form.required("government_office")?,
    };

    let files: Vec<&[u8]> = form
        .named_files("evidence_files")
        .into_iter()
        .map(|f| f.data.as_ref())
        .collect();
    let evidence = collect_evidence(state.object_store(), QUESTION_EVIDENCE_PREFIX, &files).await;

    let question = Question::new(input, evidence);
    state
        .store()
        .insert(&question)
        .map_err(|e| e.with_operation(Operation::Submission))?;

    tracing::info!(
        "Question {} filed for {} with {} evidence file(s)",
        question.id,
        question.government_office,
        question.evidence.len()
    );
    Ok(Json(question))
}
