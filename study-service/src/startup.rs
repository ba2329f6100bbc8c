use crate::config::StudyConfig;
use crate::handlers;
use crate::services::{Database, DocumentStore, TokenIssuer};
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, security_headers_middleware};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: StudyConfig,
    pub db: Database,
    pub assignments: Arc<dyn DocumentStore>,
    pub submissions: Arc<dyn DocumentStore>,
    pub tokens: TokenIssuer,
}

impl AppState {
    pub fn new(config: StudyConfig, db: Database) -> Result<Self, AppError> {
        let tokens = TokenIssuer::new(&config.token)?;
        Ok(Self {
            assignments: db.assignments(),
            submissions: db.submissions(),
            config,
            db,
            tokens,
        })
    }
}

pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, AppError> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid CORS origin {}: {}", origin, e))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]))
}

pub fn build_router(state: AppState) -> Result<Router, AppError> {
    let cors = cors_layer(&state.config.cors.allowed_origins)?;

    Ok(Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/access-token", post(handlers::issue_access_token))
        .route("/assignmentCount", get(handlers::assignment_count))
        .route(
            "/take-assignment",
            post(handlers::create_submission).get(handlers::list_submissions),
        )
        .route(
            "/take-assignment/:id",
            get(handlers::get_submission).patch(handlers::update_submission),
        )
        .route(
            "/create-assignment",
            post(handlers::create_assignment).get(handlers::list_assignments),
        )
        .route(
            "/create-assignment/:id",
            get(handlers::get_assignment)
                .delete(handlers::delete_assignment)
                .put(handlers::upsert_assignment),
        )
        .layer(cors)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state))
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    state: AppState,
}

impl Application {
    pub async fn build(config: StudyConfig) -> Result<Self, AppError> {
        let db = Database::open(&config.database).await.map_err(|e| {
            tracing::error!("Failed to open database: {}", e);
            e
        })?;

        let state = AppState::new(config.clone(), db)?;
        let router = build_router(state.clone())?;

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            port,
            listener,
            router,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_until(std::future::pending::<()>()).await
    }

    /// Serves until `shutdown` resolves, drains in-flight requests, then
    /// releases the database handle.
    pub async fn run_until<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Application {
            listener,
            router,
            state,
            ..
        } = self;

        let served = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await;

        let AppState { db, .. } = state;
        db.close().await;

        served
    }
}
