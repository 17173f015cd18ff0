//! Error handling for the FarmConnect server
//!
//! Every error renders as a flat `{ "error": "<message>" }` body.

use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::store::StoreError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid role specified")]
    InvalidRole,

    #[error("{0}")]
    Validation(String),

    #[error("User not found. Please check your name and role.")]
    UserNotFound,

    #[error("{0} not found")]
    NotFound(String),

    #[error("{action} failed: {source}")]
    Storage {
        action: &'static str,
        #[source]
        source: StoreError,
    },

    // Never surfaced to clients: OCR failures fall back to demo data
    #[error("OCR provider error: {0}")]
    OcrProvider(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRole | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UserNotFound | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::OcrProvider(_) => StatusCode::BAD_GATEWAY,
            AppError::Storage { .. } | AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the client; internal details stay in the logs
    fn public_message(&self) -> String {
        match self {
            AppError::Storage { action, .. } => format!("{} failed. Please try again.", action),
            AppError::Configuration(_) | AppError::Internal(_) => {
                "An internal server error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Validation(format!("Invalid upload: {}", err.body_text()))
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::InvalidRole.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::UserNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::OcrProvider("timeout".into()).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_storage_message_is_generic() {
        let err = AppError::Storage {
            action: "Registration",
            source: StoreError::Backend("disk full".into()),
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Registration failed. Please try again.");
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(AppError::NotFound("User".into()).public_message(), "User not found");
        assert_eq!(
            AppError::UserNotFound.public_message(),
            "User not found. Please check your name and role."
        );
    }
}
