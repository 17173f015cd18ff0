//! HTTP handlers for FarmConnect
//!
//! Profile documents are read and written with blocking file I/O, so store
//! work runs on tokio's blocking pool through [`run_blocking`].

pub mod auth;
pub mod export;
pub mod health;
pub mod ocr;
pub mod users;

pub use auth::{login, register};
pub use export::export_all;
pub use health::health_check;
pub use ocr::{extract_aadhar, process_document_ai};
pub use users::{delete_user, get_user, search_users};

use crate::error::{AppError, AppResult};

/// Run synchronous store work off the async worker threads
pub async fn run_blocking<T, F>(work: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(format!("Store task failed: {}", e)))?
}
