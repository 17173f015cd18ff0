//! FarmConnect - Backend Server
//!
//! HTTP API connecting farmers and distributors: registration with Aadhaar
//! OCR, name-based sign-in and a searchable profile directory kept in flat
//! JSON documents.

use std::sync::Arc;

use axum::{routing::get, Router};
use shared::store::{ProfileStore, StorageBackend};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult};

use services::OcrService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: ProfileStore,
    pub config: Arc<Config>,
    pub ocr: OcrService,
}

impl AppState {
    /// State over `backend`, with OCR wired from the configuration
    pub fn new(config: Config, backend: Arc<dyn StorageBackend>) -> AppResult<Self> {
        let ocr = OcrService::from_config(&config.document_ai)?;
        let store = ProfileStore::new(backend);
        store.ensure_initialized();

        Ok(Self {
            store,
            config: Arc::new(config),
            ocr,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "FarmConnect API v1.0"
}
