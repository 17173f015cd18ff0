//! Farmer profile models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aadhaar::age_from_dob;

/// A registered farmer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FarmerProfile {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spoken_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aadhaar_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Free text, pre-filled from the Aadhaar address and editable by the farmer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_district: Option<String>,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub crops: Vec<String>,
    #[serde(default)]
    pub farm_size: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub organic_certified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_confidence: Option<u8>,
    pub registration_date: DateTime<Utc>,
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

/// Farmer fields submitted at registration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FarmerRegistration {
    pub name: Option<String>,
    pub spoken_name: Option<String>,
    #[serde(alias = "aadharNumber")]
    pub aadhaar_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub location: Option<String>,
    pub extracted_location: Option<String>,
    pub extracted_state: Option<String>,
    pub extracted_district: Option<String>,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub phone: String,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub crops: Vec<String>,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub farm_size: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub experience: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub organic_certified: bool,
    pub description: Option<String>,
    pub ocr_confidence: Option<u8>,
    pub profile_photo: Option<String>,
}

impl FarmerProfile {
    /// Build the stored profile for a new registration.
    ///
    /// The display name falls back to the spoken name, age is derived from
    /// the date of birth, and the profile is marked verified.
    pub fn register(input: FarmerRegistration, id: String, now: DateTime<Utc>) -> Self {
        let name = input
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .or_else(|| input.spoken_name.clone())
            .unwrap_or_default();
        let age = input
            .date_of_birth
            .as_deref()
            .and_then(|dob| age_from_dob(dob, now.date_naive()));

        Self {
            id,
            name,
            spoken_name: input.spoken_name,
            aadhaar_number: input.aadhaar_number,
            date_of_birth: input.date_of_birth,
            age,
            address: input.address,
            location: input.location,
            extracted_location: input.extracted_location,
            extracted_state: input.extracted_state,
            extracted_district: input.extracted_district,
            phone: input.phone,
            email: input.email,
            whatsapp: input.whatsapp,
            crops: input.crops,
            farm_size: input.farm_size,
            experience: input.experience,
            organic_certified: input.organic_certified,
            description: input.description,
            ocr_confidence: input.ocr_confidence,
            registration_date: now,
            verified: true,
            profile_photo: input.profile_photo,
        }
    }
}
