//! Directory handlers: search, fetch and delete profiles

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::types::Role;

use super::run_blocking;
use crate::error::{AppError, AppResult};
use crate::models::ProfileRecord;
use crate::services::{DirectoryQuery, DirectoryService, SearchResults};
use crate::AppState;

/// Query parameters for `/users/search`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub user_role: Option<String>,
    pub crop_type: Option<String>,
    pub location: Option<String>,
    pub organic: Option<String>,
    pub business_type: Option<String>,
}

impl SearchParams {
    /// `true` keeps organic farmers, any other value keeps the rest and an
    /// absent or empty value disables the filter
    fn organic_filter(&self) -> Option<bool> {
        self.organic
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(|value| value == "true")
    }
}

#[derive(Serialize)]
pub struct SearchResponse<T> {
    pub success: bool,
    pub results: Vec<T>,
    pub count: usize,
}

impl<T: Serialize> SearchResponse<T> {
    fn new(results: Vec<T>) -> Self {
        Self {
            success: true,
            count: results.len(),
            results,
        }
    }
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// Browse profiles of the other role
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Response> {
    let viewer: Role = params
        .user_role
        .as_deref()
        .and_then(|role| role.parse().ok())
        .ok_or_else(|| AppError::Validation("Invalid user role".to_string()))?;

    let query = DirectoryQuery {
        organic: params.organic_filter(),
        crop_type: params.crop_type,
        location: params.location,
        business_type: params.business_type,
    };

    let directory = DirectoryService::new(state.store.clone());
    let results = run_blocking(move || Ok(directory.search(viewer, query))).await?;
    let response = match results {
        SearchResults::Farmers(found) => Json(SearchResponse::new(found)).into_response(),
        SearchResults::Distributors(found) => Json(SearchResponse::new(found)).into_response(),
    };
    Ok(response)
}

/// Fetch one profile
pub async fn get_user(
    State(state): State<AppState>,
    Path((role, id)): Path<(String, String)>,
) -> AppResult<Json<ProfileRecord>> {
    let role = parse_role(&role)?;
    let directory = DirectoryService::new(state.store.clone());
    let record = run_blocking(move || directory.get(role, &id)).await?;
    Ok(Json(record))
}

/// Delete one profile
pub async fn delete_user(
    State(state): State<AppState>,
    Path((role, id)): Path<(String, String)>,
) -> AppResult<Json<DeleteResponse>> {
    let role = parse_role(&role)?;
    let directory = DirectoryService::new(state.store.clone());
    run_blocking(move || directory.delete(role, &id)).await?;

    Ok(Json(DeleteResponse {
        success: true,
        message: "User deleted".to_string(),
    }))
}

fn parse_role(role: &str) -> AppResult<Role> {
    role.parse().map_err(|_| AppError::InvalidRole)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organic_filter() {
        let params = |organic: Option<&str>| SearchParams {
            organic: organic.map(str::to_string),
            ..Default::default()
        };
        assert_eq!(params(None).organic_filter(), None);
        assert_eq!(params(Some("")).organic_filter(), None);
        assert_eq!(params(Some("true")).organic_filter(), Some(true));
        assert_eq!(params(Some("false")).organic_filter(), Some(false));
        assert_eq!(params(Some("yes")).organic_filter(), Some(false));
    }
}
