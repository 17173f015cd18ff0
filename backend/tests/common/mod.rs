//! Helpers shared by the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use farmconnect_backend::{
    config::{Config, DocumentAiConfig}, create_app, services::OcrService, storage::FileBackend, AppState,
};
use serde_json::Value;
use shared::store::ProfileStore;
use tower::ServiceExt;

pub const BOUNDARY: &str = "farmconnect-test-boundary";

/// Router over an in-memory store with OCR unconfigured
pub fn test_app() -> (Router, ProfileStore) {
    let store = ProfileStore::in_memory();
    let state = AppState {
        store: store.clone(),
        config: Arc::new(Config::default()),
        ocr: OcrService::default(),
    };
    (create_app(state), store)
}

/// Router over an in-memory store with OCR wired from `document_ai`
pub fn app_with_document_ai(document_ai: DocumentAiConfig) -> (Router, ProfileStore) {
    let store = ProfileStore::in_memory();
    let config = Config {
        document_ai,
        ..Config::default()
    };
    let state = AppState {
        store: store.clone(),
        ocr: OcrService::from_config(&config.document_ai).unwrap(),
        config: Arc::new(config),
    };
    (create_app(state), store)
}

/// Router over JSON documents in `data_dir` with OCR unconfigured
pub fn file_app(data_dir: &std::path::Path) -> (Router, ProfileStore) {
    let backend = FileBackend::new(data_dir).unwrap();
    let state = AppState::new(Config::default(), Arc::new(backend)).unwrap();
    let store = state.store.clone();
    (create_app(state), store)
}

/// Send a request and decode the JSON body (`Null` when not JSON)
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// A file part of a multipart upload
pub struct FilePart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

pub fn multipart_request(uri: &str, parts: &[FilePart<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.field, part.file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", part.content_type).as_bytes());
        body.extend_from_slice(part.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}
