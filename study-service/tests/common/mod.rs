#![allow(dead_code)]

use reqwest::Client;
use secrecy::Secret;
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use study_service::config::{
    CorsConfig, DatabaseBackend, DatabaseConfig, StudyConfig, TokenConfig,
};
use study_service::startup::Application;
use uuid::Uuid;

pub const TEST_TOKEN_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: Client,
    database: Option<DatabaseConfig>,
}

pub fn test_config() -> StudyConfig {
    StudyConfig {
        common: CoreConfig { port: 0 }, // Random port for testing
        database: DatabaseConfig {
            backend: DatabaseBackend::Memory,
            uri: String::new(),
            name: "study_test".to_string(),
        },
        token: TokenConfig {
            secret: Secret::new(TEST_TOKEN_SECRET.to_string()),
            ttl_minutes: 60,
        },
        cors: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        log_level: "error".to_string(),
    }
}

/// Same as [`test_config`] but against a real MongoDB server, each run in
/// its own throwaway database.
pub fn mongodb_test_config() -> StudyConfig {
    let mut config = test_config();
    config.database = DatabaseConfig {
        backend: DatabaseBackend::Mongodb,
        uri: std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
        name: format!("study_test_{}", Uuid::new_v4().simple()),
    };
    config
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(test_config()).await
    }

    pub async fn spawn_with_mongodb() -> Self {
        Self::spawn_with(mongodb_test_config()).await
    }

    async fn spawn_with(config: StudyConfig) -> Self {
        let database = match config.database.backend {
            DatabaseBackend::Mongodb => Some(config.database.clone()),
            DatabaseBackend::Memory => None,
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
            database,
        }
    }

    /// Drops the per-test MongoDB database. No-op on the memory backend.
    pub async fn cleanup(&self) {
        if let Some(database) = &self.database {
            let client = mongodb::Client::with_uri_str(&database.uri)
                .await
                .expect("Failed to connect to MongoDB");
            client
                .database(&database.name)
                .drop(None)
                .await
                .expect("Failed to drop test database");
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// POSTs `body` and returns the generated id from the insert acknowledgment.
    pub async fn insert(&self, path: &str, body: &Value) -> String {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request");
        assert!(response.status().is_success());

        let ack: Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(ack["acknowledged"], true);
        ack["insertedId"]
            .as_str()
            .expect("insertedId should be a string")
            .to_string()
    }

    pub async fn get_json(&self, path: &str) -> Value {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request");
        assert!(response.status().is_success(), "GET {} failed", path);
        response.json().await.expect("Failed to parse JSON")
    }
}
