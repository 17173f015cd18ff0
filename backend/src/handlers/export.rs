//! Full data export

use axum::{extract::State, Json};
use chrono::Utc;
use shared::store::ExportSnapshot;

use super::run_blocking;
use crate::error::AppResult;
use crate::services::DirectoryService;
use crate::AppState;

/// Dump both profile collections
pub async fn export_all(State(state): State<AppState>) -> AppResult<Json<ExportSnapshot>> {
    let directory = DirectoryService::new(state.store.clone());
    let snapshot = run_blocking(move || Ok(directory.export(Utc::now()))).await?;
    Ok(Json(snapshot))
}
