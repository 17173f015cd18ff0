//! Distributor profile models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered distributor business
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DistributorProfile {
    pub id: String,
    pub business_name: String,
    pub owner_name: String,
    pub business_type: String,
    pub state: String,
    pub district: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub crops_interested: Vec<String>,
    #[serde(default)]
    pub min_order_quantity: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub registration_date: DateTime<Utc>,
    pub verified: bool,
}

/// Distributor fields submitted at registration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DistributorRegistration {
    pub business_name: String,
    pub owner_name: String,
    pub business_type: String,
    pub state: String,
    pub district: String,
    pub phone: String,
    pub email: String,
    pub whatsapp: Option<String>,
    pub address: Option<String>,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub crops_interested: Vec<String>,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub min_order_quantity: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub experience: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub certifications: Vec<String>,
    pub description: Option<String>,
}

impl DistributorProfile {
    pub fn register(input: DistributorRegistration, id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            business_name: input.business_name,
            owner_name: input.owner_name,
            business_type: input.business_type,
            state: input.state,
            district: input.district,
            phone: input.phone,
            email: input.email,
            whatsapp: input.whatsapp,
            address: input.address,
            crops_interested: input.crops_interested,
            min_order_quantity: input.min_order_quantity,
            experience: input.experience,
            certifications: input.certifications,
            description: input.description,
            registration_date: now,
            verified: true,
        }
    }

    /// "district, state" as shown on cards and login responses
    pub fn display_location(&self) -> String {
        format!("{}, {}", self.district, self.state)
    }
}
