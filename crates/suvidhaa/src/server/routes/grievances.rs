//! Grievance filing endpoint

use axum::{extract::State, Json};

use crate::error::{Operation, Result};
use crate::ingestion::{collect_evidence, GRIEVANCE_EVIDENCE_PREFIX};
use crate::server::routes::form::FormInput;
use crate::server::state::AppState;
use crate::types::{Grievance, GrievanceCreate};

/// POST /api/grievances - File a grievance with optional evidence files
pub async fn create_grievance(
    State(state): State<AppState>,
    form: FormInput,
) -> Result<Json<Grievance>> {
    let input = GrievanceCreate {
        user_name: form.required("user_name")?,
        email: form.required("email")?,
        phone: form.required("phone")?,
        grievance_text: form.required("grievance_text")?,
        category: form.required("category")?,
        affected_area: form.required("affected_area")?,
        government_office: form.required("government_office")?,
    };

    let files: Vec<&[u8]> = form
        .named_files("evidence_files")
        .into_iter()
        .map(|f| f.data.as_ref())
        .collect();
    let evidence = collect_evidence(state.object_store(), GRIEVANCE_EVIDENCE_PREFIX, &files).await;

    let grievance = Grievance::new(input, evidence);
    state
        .store()
        .insert(&grievance)
        .map_err(|e| e.with_operation(Operation::Filing))?;

    tracing::info!(
        "Grievance {} filed against {} ({})",
        grievance.id,
        grievance.government_office,
        grievance.affected_area
    );
    Ok(Json(grievance))
}
