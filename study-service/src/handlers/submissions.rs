use crate::dtos::{InsertAcknowledgment, SubmissionListParams, UpdateAcknowledgment};
use crate::models::{document_from_json, document_to_json, parse_object_id, SUBMITTER_EMAIL_FIELD};
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use mongodb::bson::{doc, Document};
use serde_json::{Map, Value};
use service_core::error::AppError;

pub async fn create_submission(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<InsertAcknowledgment>, AppError> {
    let document = document_from_json(payload)?;
    let id = state.submissions.insert_one(document).await?;

    tracing::info!(submission_id = %id, "Submission created");

    Ok(Json(InsertAcknowledgment::new(id)))
}

pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Value>>, AppError> {
    let id = parse_object_id(&id)?;
    let found = state.submissions.find_by_id(id).await?;
    Ok(Json(found.map(document_to_json)))
}

/// `$set` of the given fields. Unknown ids match nothing and create nothing.
pub async fn update_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<UpdateAcknowledgment>, AppError> {
    let id = parse_object_id(&id)?;
    let fields = document_from_json(payload)?;
    let outcome = state.submissions.set_fields(id, fields, false).await?;

    tracing::info!(
        submission_id = %id,
        matched = outcome.matched_count,
        modified = outcome.modified_count,
        "Submission updated"
    );

    Ok(Json(UpdateAcknowledgment::from(outcome)))
}

pub async fn list_submissions(
    State(state): State<AppState>,
    Query(params): Query<SubmissionListParams>,
) -> Result<Json<Vec<Value>>, AppError> {
    let filter = match params.user_email() {
        Some(email) => doc! { SUBMITTER_EMAIL_FIELD: email },
        None => Document::new(),
    };

    let documents = state.submissions.find(filter, None).await?;
    Ok(Json(documents.into_iter().map(document_to_json).collect()))
}
