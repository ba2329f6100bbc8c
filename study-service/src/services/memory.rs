use crate::dtos::PageWindow;
use crate::models::ID_FIELD;
use crate::services::store::{DocumentStore, UpdateOutcome};
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use service_core::error::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process collection kept in insertion order, which stands in for
/// MongoDB's natural order.
#[derive(Clone, Default)]
pub struct MemoryCollection {
    documents: Arc<RwLock<Vec<Document>>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

fn id_of(document: &Document) -> Option<ObjectId> {
    document.get_object_id(ID_FIELD).ok()
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

fn with_id(id: ObjectId, fields: Document) -> Document {
    let mut document = Document::new();
    document.insert(ID_FIELD, id);
    document.extend(fields);
    document
}

#[async_trait]
impl DocumentStore for MemoryCollection {
    async fn insert_one(&self, document: Document) -> Result<ObjectId, AppError> {
        let id = ObjectId::new();
        self.documents.write().await.push(with_id(id, document));
        Ok(id)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, AppError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|d| id_of(d) == Some(id)).cloned())
    }

    async fn find(
        &self,
        filter: Document,
        window: Option<PageWindow>,
    ) -> Result<Vec<Document>, AppError> {
        let documents = self.documents.read().await;
        let matching = documents.iter().filter(|d| matches(d, &filter));

        let found = match window {
            Some(w) => matching
                .skip(usize::try_from(w.skip).unwrap_or(usize::MAX))
                .take(usize::try_from(w.limit).unwrap_or(usize::MAX))
                .cloned()
                .collect(),
            None => matching.cloned().collect(),
        };
        Ok(found)
    }

    async fn set_fields(
        &self,
        id: ObjectId,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, AppError> {
        let mut documents = self.documents.write().await;

        if let Some(existing) = documents.iter_mut().find(|d| id_of(d) == Some(id)) {
            let mut modified = false;
            for (key, value) in fields {
                if existing.get(&key) != Some(&value) {
                    existing.insert(key, value);
                    modified = true;
                }
            }
            return Ok(UpdateOutcome {
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_id: None,
            });
        }

        if !upsert {
            return Ok(UpdateOutcome {
                matched_count: 0,
                modified_count: 0,
                upserted_id: None,
            });
        }

        documents.push(with_id(id, fields));
        Ok(UpdateOutcome {
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(id),
        })
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, AppError> {
        let mut documents = self.documents.write().await;
        match documents.iter().position(|d| id_of(d) == Some(id)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn estimated_count(&self) -> Result<u64, AppError> {
        Ok(self.documents.read().await.len() as u64)
    }
}
