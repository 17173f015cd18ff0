//! Google Document AI client
//!
//! Calls the processor's REST `:process` method with the image inlined as
//! base64 and returns the recognized text and entities.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::models::OcrEntity;

use crate::config::DocumentAiConfig;
use crate::error::{AppError, AppResult};

/// Client for one Document AI processor
#[derive(Clone)]
pub struct DocumentAiClient {
    process_url: String,
    access_token: String,
    http_client: Client,
}

/// Request body for `processors/*:process`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub raw_document: RawDocument,
    pub skip_human_review: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    pub content: String,
    pub mime_type: String,
}

#[derive(Debug, Deserialize)]
pub struct ProcessResponse {
    #[serde(default)]
    pub document: Option<ProcessedDocument>,
}

/// Text and entities recognized on one image
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessedDocument {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub entities: Vec<OcrEntity>,
}

impl DocumentAiClient {
    pub fn new(process_url: String, access_token: String) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            process_url,
            access_token,
            http_client,
        })
    }

    /// Create a client from configuration; `None` when the processor is not
    /// fully configured
    pub fn from_config(config: &DocumentAiConfig) -> AppResult<Option<Self>> {
        let (Some(project_id), Some(processor_id), Some(access_token)) = (
            config.project_id.as_deref(),
            config.processor_id.as_deref(),
            config.access_token.as_deref(),
        ) else {
            return Ok(None);
        };

        let url = process_url(config, project_id, processor_id);
        Self::new(url, access_token.to_string()).map(Some)
    }

    pub fn process_url(&self) -> &str {
        &self.process_url
    }

    /// Run OCR over one image
    pub async fn process_document(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> AppResult<ProcessedDocument> {
        let request = ProcessRequest {
            raw_document: RawDocument {
                content: BASE64.encode(image),
                mime_type: mime_type.to_string(),
            },
            skip_human_review: true,
        };

        let response = self
            .http_client
            .post(&self.process_url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::OcrProvider(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::OcrProvider(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let result: ProcessResponse = response
            .json()
            .await
            .map_err(|e| AppError::OcrProvider(format!("Failed to parse response: {}", e)))?;

        Ok(result.document.unwrap_or_default())
    }
}

fn process_url(config: &DocumentAiConfig, project_id: &str, processor_id: &str) -> String {
    let base = config
        .endpoint
        .clone()
        .unwrap_or_else(|| format!("https://{}-documentai.googleapis.com", config.location));

    format!(
        "{}/v1/projects/{}/locations/{}/processors/{}:process",
        base.trim_end_matches('/'),
        project_id,
        config.location,
        processor_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> DocumentAiConfig {
        DocumentAiConfig {
            project_id: Some("farmconnect".to_string()),
            processor_id: Some("abc123".to_string()),
            access_token: Some("token".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_unconfigured_yields_none() {
        assert!(DocumentAiClient::from_config(&DocumentAiConfig::default())
            .unwrap()
            .is_none());

        let partial = DocumentAiConfig {
            access_token: None,
            ..configured()
        };
        assert!(DocumentAiClient::from_config(&partial).unwrap().is_none());
    }

    #[test]
    fn test_process_url() {
        let client = DocumentAiClient::from_config(&configured()).unwrap().unwrap();
        assert_eq!(
            client.process_url(),
            "https://us-documentai.googleapis.com/v1/projects/farmconnect/locations/us/processors/abc123:process"
        );

        let local = DocumentAiConfig {
            endpoint: Some("http://localhost:9090/".to_string()),
            location: "eu".to_string(),
            ..configured()
        };
        let client = DocumentAiClient::from_config(&local).unwrap().unwrap();
        assert_eq!(
            client.process_url(),
            "http://localhost:9090/v1/projects/farmconnect/locations/eu/processors/abc123:process"
        );
    }

    #[test]
    fn test_request_shape() {
        let request = ProcessRequest {
            raw_document: RawDocument {
                content: BASE64.encode(b"img"),
                mime_type: "image/png".to_string(),
            },
            skip_human_review: true,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["rawDocument"]["content"], "aW1n");
        assert_eq!(json["rawDocument"]["mimeType"], "image/png");
        assert_eq!(json["skipHumanReview"], true);
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{
            "document": {
                "text": "Name: Ram Kumar\nDOB: 15/08/1985",
                "entities": [{ "type": "PERSON", "mentionText": "Ram Kumar", "confidence": 0.9 }]
            }
        }"#;
        let response: ProcessResponse = serde_json::from_str(raw).unwrap();
        let document = response.document.unwrap();
        assert!(document.text.starts_with("Name:"));
        assert_eq!(document.entities[0].entity_type, "PERSON");
        assert_eq!(document.entities[0].mention_text.as_deref(), Some("Ram Kumar"));
    }
}
