//! Free-form documents at the HTTP boundary.
//!
//! Clients send arbitrary JSON objects; they are stored as BSON documents
//! keyed by a storage-assigned ObjectId.

use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use serde_json::{Map, Value};
use service_core::error::AppError;

pub const ID_FIELD: &str = "_id";

/// Owner email on an assignment, compared on delete.
pub const OWNER_EMAIL_FIELD: &str = "email";

/// Submitter email on a submission, used by the list filter.
pub const SUBMITTER_EMAIL_FIELD: &str = "userEmail";

/// Parses a path identifier. Identifiers are strict 24-char hex ObjectIds.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw)
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid id: {}", raw)))
}

/// Converts a client payload into a BSON document suitable for an insert or
/// a `$set`. `_id` is dropped; field names that Mongo would treat as
/// operators or dotted paths are rejected.
pub fn document_from_json(payload: Map<String, Value>) -> Result<Document, AppError> {
    let mut fields = Map::with_capacity(payload.len());
    for (key, value) in payload {
        if key == ID_FIELD {
            continue;
        }
        if key.is_empty() || key.starts_with('$') || key.contains('.') {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Invalid field name: {:?}",
                key
            )));
        }
        fields.insert(key, value);
    }

    bson::to_document(&fields).map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Unsupported document value: {}", e))
    })
}

/// Renders a stored document as JSON with ObjectIds as hex strings.
pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or(Value::Null),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
