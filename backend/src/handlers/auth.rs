//! Registration and login handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::types::Role;
use validator::Validate;

use super::run_blocking;
use crate::error::{AppError, AppResult};
use crate::models::{RegisteredUser, SessionUser};
use crate::services::{AuthService, RegistrationInput};
use crate::AppState;

const MISSING_CREDENTIALS: &str = "Name and role are required";

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Name and role are required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Name and role are required"))]
    pub role: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user: RegisteredUser,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: SessionUser,
}

/// Register a farmer or distributor from `{ role, ...fields }`
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<RegisterResponse>> {
    let Json(body) = payload?;
    let Value::Object(body) = body else {
        return Err(AppError::InvalidRole);
    };

    let input = RegistrationInput::from_body(body)?;
    let role = input.role();

    let auth_service = AuthService::new(state.store.clone());
    let user = run_blocking(move || auth_service.register(input, Utc::now())).await?;

    let message = match role {
        Role::Farmer => "Farmer registered successfully",
        Role::Distributor => "Distributor registered successfully",
    };

    Ok(Json(RegisterResponse {
        success: true,
        message: message.to_string(),
        user,
    }))
}

/// Sign in by name and role
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(body) = payload?;
    body.validate()
        .map_err(|_| AppError::Validation(MISSING_CREDENTIALS.to_string()))?;

    let role: Role = body.role.parse().map_err(|_| AppError::InvalidRole)?;

    let auth_service = AuthService::new(state.store.clone());
    let name = body.name;
    let user = run_blocking(move || auth_service.login(&name, role)).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        user,
    }))
}
