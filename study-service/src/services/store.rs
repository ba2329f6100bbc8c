use crate::dtos::PageWindow;
use crate::models::ID_FIELD;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::{FindOptions, UpdateOptions},
    Collection,
};
use service_core::error::AppError;

/// Outcome of a `$set` on a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<ObjectId>,
}

/// One collection of free-form documents. Every operation is a single
/// storage round trip; conflicting writes are serialized by the backend.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts `document` under a freshly generated id and returns it.
    async fn insert_one(&self, document: Document) -> Result<ObjectId, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, AppError>;

    /// Documents whose top-level fields equal every entry of `filter`, in
    /// natural order, optionally windowed.
    async fn find(
        &self,
        filter: Document,
        window: Option<PageWindow>,
    ) -> Result<Vec<Document>, AppError>;

    /// Overwrites the given top-level fields. With `upsert` a missing
    /// document is created under `id`.
    async fn set_fields(
        &self,
        id: ObjectId,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, AppError>;

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, AppError>;

    /// Fast metadata count, not a transactional one.
    async fn estimated_count(&self) -> Result<u64, AppError>;
}

#[derive(Clone)]
pub struct MongoCollection {
    inner: Collection<Document>,
}

impl MongoCollection {
    pub fn new(inner: Collection<Document>) -> Self {
        Self { inner }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }
}

#[async_trait]
impl DocumentStore for MongoCollection {
    async fn insert_one(&self, document: Document) -> Result<ObjectId, AppError> {
        let result = self.inner.insert_one(document, None).await.map_err(|e| {
            tracing::error!(collection = %self.name(), "Insert failed: {}", e);
            AppError::from(e)
        })?;

        match result.inserted_id {
            Bson::ObjectId(id) => Ok(id),
            other => Err(AppError::InternalError(anyhow::anyhow!(
                "Unexpected inserted id type: {}",
                other
            ))),
        }
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, AppError> {
        self.inner
            .find_one(doc! { ID_FIELD: id }, None)
            .await
            .map_err(|e| {
                tracing::error!(collection = %self.name(), id = %id, "Find failed: {}", e);
                AppError::from(e)
            })
    }

    async fn find(
        &self,
        filter: Document,
        window: Option<PageWindow>,
    ) -> Result<Vec<Document>, AppError> {
        let options = window.map(|w| {
            FindOptions::builder()
                .skip(w.skip)
                .limit(w.limit as i64)
                .build()
        });

        let cursor = self.inner.find(filter, options).await.map_err(|e| {
            tracing::error!(collection = %self.name(), "Find failed: {}", e);
            AppError::from(e)
        })?;

        cursor.try_collect().await.map_err(AppError::from)
    }

    async fn set_fields(
        &self,
        id: ObjectId,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, AppError> {
        let options = UpdateOptions::builder().upsert(upsert).build();
        let result = self
            .inner
            .update_one(doc! { ID_FIELD: id }, doc! { "$set": fields }, options)
            .await
            .map_err(|e| {
                tracing::error!(collection = %self.name(), id = %id, "Update failed: {}", e);
                AppError::from(e)
            })?;

        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.and_then(|id| id.as_object_id()),
        })
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, AppError> {
        let result = self
            .inner
            .delete_one(doc! { ID_FIELD: id }, None)
            .await
            .map_err(|e| {
                tracing::error!(collection = %self.name(), id = %id, "Delete failed: {}", e);
                AppError::from(e)
            })?;
        Ok(result.deleted_count)
    }

    async fn estimated_count(&self) -> Result<u64, AppError> {
        self.inner
            .estimated_document_count(None)
            .await
            .map_err(AppError::from)
    }
}
