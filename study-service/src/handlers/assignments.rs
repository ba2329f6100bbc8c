use crate::dtos::{
    CountResponse, DeleteAcknowledgment, DeleteAssignmentRequest, InsertAcknowledgment,
    MessageResponse, PageParams, UpdateAcknowledgment,
};
use crate::models::{document_from_json, document_to_json, parse_object_id, OWNER_EMAIL_FIELD};
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use mongodb::bson::Document;
use serde_json::{Map, Value};
use service_core::error::AppError;
use validator::Validate;

pub const DELETE_REFUSED_MESSAGE: &str = "You cannot delete this assignment";

pub async fn assignment_count(
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.assignments.estimated_count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn create_assignment(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<InsertAcknowledgment>, AppError> {
    let document = document_from_json(payload)?;
    let id = state.assignments.insert_one(document).await?;

    tracing::info!(assignment_id = %id, "Assignment created");

    Ok(Json(InsertAcknowledgment::new(id)))
}

/// One page of assignments in natural order. The total is served separately
/// by `/assignmentCount`.
pub async fn list_assignments(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Value>>, AppError> {
    params.validate()?;
    let window = params.window()?;

    let documents = state.assignments.find(Document::new(), window).await?;
    Ok(Json(documents.into_iter().map(document_to_json).collect()))
}

pub async fn get_assignment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Value>>, AppError> {
    let id = parse_object_id(&id)?;
    let found = state.assignments.find_by_id(id).await?;
    Ok(Json(found.map(document_to_json)))
}

/// Deletes only when the claimed email equals the stored owner email. A
/// mismatch answers 200 with a refusal message rather than an error status.
pub async fn delete_assignment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<DeleteAssignmentRequest>,
) -> Result<Response, AppError> {
    let id = parse_object_id(&id)?;
    request.validate()?;

    let assignment = state
        .assignments
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Assignment {} not found", id)))?;

    let owner_email = assignment.get_str(OWNER_EMAIL_FIELD).ok();
    if owner_email != Some(request.email.as_str()) {
        tracing::warn!(assignment_id = %id, "Refused assignment delete: owner email mismatch");
        return Ok(Json(MessageResponse {
            message: DELETE_REFUSED_MESSAGE.to_string(),
        })
        .into_response());
    }

    let deleted_count = state.assignments.delete_by_id(id).await?;

    tracing::info!(assignment_id = %id, deleted = deleted_count, "Assignment deleted");

    Ok(Json(DeleteAcknowledgment::new(deleted_count)).into_response())
}

/// `$set` with upsert: a missing assignment is created under the path id.
pub async fn upsert_assignment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<UpdateAcknowledgment>, AppError> {
    let id = parse_object_id(&id)?;
    let fields = document_from_json(payload)?;
    let outcome = state.assignments.set_fields(id, fields, true).await?;

    tracing::info!(
        assignment_id = %id,
        matched = outcome.matched_count,
        modified = outcome.modified_count,
        upserted = outcome.upserted_id.is_some(),
        "Assignment upserted"
    );

    Ok(Json(UpdateAcknowledgment::from(outcome)))
}
