pub mod document;

pub use document::{
    document_from_json, document_to_json, parse_object_id, ID_FIELD, OWNER_EMAIL_FIELD,
    SUBMITTER_EMAIL_FIELD,
};
