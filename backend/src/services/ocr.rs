//! Aadhaar card OCR
//!
//! Runs Document AI over the uploaded card images when a processor is
//! configured and turns the text into card fields. Callers decide what to
//! do with an unavailable or failed provider.

use chrono::NaiveDate;
use serde::Serialize;
use shared::aadhaar::extract_aadhaar_fields;
use shared::models::{
    OcrOutcome, DEMO_AADHAAR_NUMBER, DEMO_ADDRESS, DEMO_DATE_OF_BIRTH, DEMO_NAME,
};
use shared::validation::validate_document_upload;
use uuid::Uuid;

use crate::config::DocumentAiConfig;
use crate::error::{AppError, AppResult};
use crate::external::DocumentAiClient;

/// An uploaded card image
#[derive(Debug, Clone)]
pub struct DocumentImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentImage {
    /// Reject images of the wrong type or over the size limit
    pub fn validate(&self) -> AppResult<()> {
        validate_document_upload(&self.content_type, self.bytes.len() as u64)
            .map_err(|message| AppError::Validation(message.to_string()))
    }
}

/// Card fields from the simulated scanner
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedScan {
    pub name: String,
    pub aadhar_number: String,
    pub date_of_birth: String,
    pub address: String,
    pub confidence: u8,
}

#[derive(Clone, Default)]
pub struct OcrService {
    client: Option<DocumentAiClient>,
}

impl OcrService {
    pub fn new(client: Option<DocumentAiClient>) -> Self {
        Self { client }
    }

    /// Service for the configured processor, or a disabled one
    pub fn from_config(config: &DocumentAiConfig) -> AppResult<Self> {
        let client = DocumentAiClient::from_config(config)?;
        if client.is_none() {
            tracing::warn!("Document AI is not configured; OCR requests will use demo data");
        }
        Ok(Self::new(client))
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Read both sides of a card
    pub async fn process_aadhaar(
        &self,
        front: &DocumentImage,
        back: Option<&DocumentImage>,
        today: NaiveDate,
    ) -> OcrOutcome {
        let Some(client) = &self.client else {
            return OcrOutcome::Unavailable;
        };

        let front_document = match client.process_document(&front.bytes, &front.content_type).await {
            Ok(document) => document,
            Err(e) => return failed(e),
        };
        let back_document = match back {
            Some(image) => match client.process_document(&image.bytes, &image.content_type).await {
                Ok(document) => Some(document),
                Err(e) => return failed(e),
            },
            None => None,
        };

        let back_text = back_document
            .as_ref()
            .map(|document| document.text.as_str())
            .unwrap_or_default();
        let entities: Vec<_> = front_document
            .entities
            .iter()
            .chain(back_document.iter().flat_map(|document| document.entities.iter()))
            .cloned()
            .collect();

        let fields = extract_aadhaar_fields(&front_document.text, back_text, &entities, today);
        tracing::debug!(confidence = fields.confidence, "processed Aadhaar card");
        OcrOutcome::Ok { fields }
    }

    /// Demo card with a confidence between 80 and 99
    pub fn simulated_scan(&self) -> SimulatedScan {
        let jitter = Uuid::new_v4().as_bytes()[0] % 20;
        SimulatedScan {
            name: DEMO_NAME.to_string(),
            aadhar_number: DEMO_AADHAAR_NUMBER.to_string(),
            date_of_birth: DEMO_DATE_OF_BIRTH.to_string(),
            address: DEMO_ADDRESS.to_string(),
            confidence: 80 + jitter,
        }
    }
}

fn failed(err: AppError) -> OcrOutcome {
    tracing::warn!(error = %err, "Document AI request failed");
    OcrOutcome::Error {
        message: err.to_string(),
    }
}
