//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use super::run_blocking;
use crate::error::AppResult;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: String,
    pub ocr: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let store = state.store.clone();
    let writable = run_blocking(move || Ok(store.is_available())).await?;
    let storage = if writable {
        "writable"
    } else {
        "unavailable"
    };
    let ocr = if state.ocr.is_configured() {
        "document_ai"
    } else {
        "mock"
    };

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: storage.to_string(),
        ocr: ocr.to_string(),
    }))
}
