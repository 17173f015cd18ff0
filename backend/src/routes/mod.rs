//! Route definitions for FarmConnect

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Two card images at the 5 MB upload limit plus multipart overhead
const OCR_BODY_LIMIT: usize = 12 * 1024 * 1024;

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/ocr", ocr_routes())
        .route("/export", get(handlers::export_all))
}

/// Registration and login
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
}

/// Profile directory
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(handlers::search_users))
        .route(
            "/:role/:id",
            get(handlers::get_user).delete(handlers::delete_user),
        )
}

/// Aadhaar card uploads
fn ocr_routes() -> Router<AppState> {
    Router::new()
        .route("/document-ai", post(handlers::process_document_ai))
        .route("/extract-aadhar", post(handlers::extract_aadhar))
        .layer(DefaultBodyLimit::max(OCR_BODY_LIMIT))
}
