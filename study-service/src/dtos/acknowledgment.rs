use crate::services::UpdateOutcome;
use mongodb::bson::oid::ObjectId;
use serde::Serialize;

/// Result of an insert, shaped like the MongoDB driver's acknowledgment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAcknowledgment {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl InsertAcknowledgment {
    pub fn new(inserted_id: ObjectId) -> Self {
        Self {
            acknowledged: true,
            inserted_id: inserted_id.to_hex(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAcknowledgment {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

impl From<UpdateOutcome> for UpdateAcknowledgment {
    fn from(outcome: UpdateOutcome) -> Self {
        Self {
            acknowledged: true,
            matched_count: outcome.matched_count,
            modified_count: outcome.modified_count,
            upserted_count: u64::from(outcome.upserted_id.is_some()),
            upserted_id: outcome.upserted_id.map(|id| id.to_hex()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAcknowledgment {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteAcknowledgment {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
