//! Aadhaar OCR upload handlers
//!
//! Both endpoints take multipart uploads with `frontImage` and `backImage`
//! file fields.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use shared::models::{ExtractedAadhaarData, OcrOutcome};

use crate::error::{AppError, AppResult};
use crate::services::{DocumentImage, SimulatedScan};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrResponse {
    pub success: bool,
    pub data: ExtractedAadhaarData,
    pub message: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_mock_data: bool,
}

/// Card images pulled from a multipart body
#[derive(Debug, Default)]
struct CardUpload {
    front: Option<DocumentImage>,
    back: Option<DocumentImage>,
}

impl CardUpload {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut upload = CardUpload::default();

        while let Some(field) = multipart.next_field().await? {
            let slot = match field.name() {
                Some("frontImage") => &mut upload.front,
                Some("backImage") => &mut upload.back,
                _ => continue,
            };

            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await?;
            if bytes.is_empty() {
                continue;
            }

            let image = DocumentImage {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            };
            image.validate()?;
            *slot = Some(image);
        }

        Ok(upload)
    }
}

/// Extract card fields with Document AI, falling back to demo data when the
/// provider is unavailable or fails
pub async fn process_document_ai(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<OcrResponse>> {
    let upload = CardUpload::read(multipart).await?;
    let front = upload
        .front
        .ok_or_else(|| AppError::Validation("Front image is required".to_string()))?;

    tracing::debug!(
        front = %front.file_name,
        back = upload.back.as_ref().map(|b| b.file_name.as_str()).unwrap_or("-"),
        "processing Aadhaar upload"
    );

    let today = Utc::now().date_naive();
    let outcome = state
        .ocr
        .process_aadhaar(&front, upload.back.as_ref(), today)
        .await;
    let message = match &outcome {
        OcrOutcome::Ok { .. } => "Aadhaar card processed successfully",
        OcrOutcome::Unavailable => "Using mock OCR data (Document AI not configured)",
        OcrOutcome::Error { .. } => "Using mock OCR data (Document AI request failed)",
    };
    let (data, is_mock_data) = outcome.fields_or_demo(today);
    if is_mock_data {
        tracing::info!("falling back to mock OCR data");
    }

    Ok(Json(OcrResponse {
        success: true,
        data,
        message: message.to_string(),
        is_mock_data,
    }))
}

/// Simulated scanner requiring both sides of the card
pub async fn extract_aadhar(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<SimulatedScan>> {
    let upload = CardUpload::read(multipart).await?;
    if upload.front.is_none() || upload.back.is_none() {
        return Err(AppError::Validation(
            "Both front and back images are required".to_string(),
        ));
    }

    Ok(Json(state.ocr.simulated_scan()))
}
