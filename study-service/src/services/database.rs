use crate::config::{DatabaseBackend, DatabaseConfig};
use crate::services::memory::MemoryCollection;
use crate::services::store::{DocumentStore, MongoCollection};
use mongodb::{bson::doc, Client as MongoClient, Database as MongoDatabase};
use service_core::error::AppError;
use std::sync::Arc;

pub const ASSIGNMENTS_COLLECTION: &str = "assignments";
pub const SUBMISSIONS_COLLECTION: &str = "takeAssignments";

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: MongoDatabase,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn collection(&self, name: &str) -> MongoCollection {
        MongoCollection::new(self.db.collection(name))
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[derive(Clone, Default)]
pub struct MemoryDb {
    assignments: MemoryCollection,
    submissions: MemoryCollection,
}

/// The storage handle opened once at startup and shared by every request.
#[derive(Clone)]
pub enum Database {
    Mongo(MongoDb),
    Memory(MemoryDb),
}

impl Database {
    pub async fn open(config: &DatabaseConfig) -> Result<Self, AppError> {
        match config.backend {
            DatabaseBackend::Mongodb => {
                let db = MongoDb::connect(&config.uri, &config.name).await?;
                db.health_check().await?;
                tracing::info!("Pinged MongoDB deployment");
                Ok(Database::Mongo(db))
            }
            DatabaseBackend::Memory => {
                tracing::info!("Using in-memory document store");
                Ok(Database::Memory(MemoryDb::default()))
            }
        }
    }

    pub fn assignments(&self) -> Arc<dyn DocumentStore> {
        match self {
            Database::Mongo(db) => Arc::new(db.collection(ASSIGNMENTS_COLLECTION)),
            Database::Memory(db) => Arc::new(db.assignments.clone()),
        }
    }

    pub fn submissions(&self) -> Arc<dyn DocumentStore> {
        match self {
            Database::Mongo(db) => Arc::new(db.collection(SUBMISSIONS_COLLECTION)),
            Database::Memory(db) => Arc::new(db.submissions.clone()),
        }
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        match self {
            Database::Mongo(db) => db.health_check().await,
            Database::Memory(_) => Ok(()),
        }
    }

    /// Releases driver resources. Called once the server has drained.
    pub async fn close(self) {
        if let Database::Mongo(db) = self {
            tracing::info!("Closing MongoDB client");
            db.shutdown().await;
        }
    }
}
