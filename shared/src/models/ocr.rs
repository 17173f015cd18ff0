//! Aadhaar OCR results

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aadhaar::age_from_dob;
use crate::address::parse_address;

/// Fields read from the front and back of an Aadhaar card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedAadhaarData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aadhaar_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    /// Percentage, capped below 100 for real extractions
    pub confidence: u8,
    #[serde(default)]
    pub raw_text: String,
}

/// An entity detected by the OCR provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default)]
    pub mention_text: Option<String>,
}

/// Outcome of asking the OCR provider to read a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OcrOutcome {
    Ok { fields: ExtractedAadhaarData },
    /// No provider is configured
    Unavailable,
    Error { message: String },
}

pub const DEMO_NAME: &str = "राम कुमार शर्मा";
pub const DEMO_AADHAAR_NUMBER: &str = "1234 5678 9012";
pub const DEMO_DATE_OF_BIRTH: &str = "15/08/1985";
pub const DEMO_ADDRESS: &str =
    "Village Rampur, Tehsil Kharkhoda, District Sonipat, Haryana - 131001";

impl ExtractedAadhaarData {
    /// Fixed demo card used whenever no real extraction is available
    pub fn demo(today: NaiveDate) -> Self {
        Self::simulated(85, today).with_raw_text("Mock OCR data for development")
    }

    /// Demo card with a caller-chosen confidence
    pub fn simulated(confidence: u8, today: NaiveDate) -> Self {
        let components = parse_address(DEMO_ADDRESS);
        Self {
            full_name: Some(DEMO_NAME.to_string()),
            aadhaar_number: Some(DEMO_AADHAAR_NUMBER.to_string()),
            date_of_birth: Some(DEMO_DATE_OF_BIRTH.to_string()),
            age: age_from_dob(DEMO_DATE_OF_BIRTH, today),
            address: Some(DEMO_ADDRESS.to_string()),
            location: components.location,
            state: components.state,
            district: components.district,
            pincode: components.pincode,
            confidence,
            raw_text: String::new(),
        }
    }

    fn with_raw_text(mut self, raw_text: &str) -> Self {
        self.raw_text = raw_text.to_string();
        self
    }
}

impl OcrOutcome {
    /// Extracted fields, or the demo card when the provider gave nothing.
    /// The flag is true when demo data was substituted.
    pub fn fields_or_demo(self, today: NaiveDate) -> (ExtractedAadhaarData, bool) {
        match self {
            OcrOutcome::Ok { fields } => (fields, false),
            OcrOutcome::Unavailable | OcrOutcome::Error { .. } => {
                (ExtractedAadhaarData::demo(today), true)
            }
        }
    }
}
