//! Response models for the FarmConnect API
//!
//! Re-exports models from the shared crate and adds the user projections
//! returned by the auth and directory endpoints.

use serde::Serialize;

pub use shared::models::*;
pub use shared::types::Role;

/// User summary returned after registration
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegisteredUser {
    pub id: String,
    pub role: Role,
    pub name: String,
}

/// Session view of a farmer
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FarmerSession {
    pub id: String,
    pub role: Role,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spoken_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub crops: Vec<String>,
    pub verified: bool,
}

/// Session view of a distributor; `name` is the owner's name
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DistributorSession {
    pub id: String,
    pub role: Role,
    pub name: String,
    pub business_name: String,
    pub location: String,
    pub crops_interested: Vec<String>,
    pub verified: bool,
}

/// User returned by login
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum SessionUser {
    Farmer(FarmerSession),
    Distributor(DistributorSession),
}

/// A stored profile of either role
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ProfileRecord {
    Farmer(FarmerProfile),
    Distributor(DistributorProfile),
}

impl From<&FarmerProfile> for RegisteredUser {
    fn from(farmer: &FarmerProfile) -> Self {
        Self {
            id: farmer.id.clone(),
            role: Role::Farmer,
            name: farmer.name.clone(),
        }
    }
}

impl From<&DistributorProfile> for RegisteredUser {
    fn from(distributor: &DistributorProfile) -> Self {
        Self {
            id: distributor.id.clone(),
            role: Role::Distributor,
            name: distributor.owner_name.clone(),
        }
    }
}

impl From<FarmerProfile> for SessionUser {
    fn from(farmer: FarmerProfile) -> Self {
        SessionUser::Farmer(FarmerSession {
            id: farmer.id,
            role: Role::Farmer,
            name: farmer.name,
            spoken_name: farmer.spoken_name,
            location: farmer.location,
            crops: farmer.crops,
            verified: farmer.verified,
        })
    }
}

impl From<DistributorProfile> for SessionUser {
    fn from(distributor: DistributorProfile) -> Self {
        let location = distributor.display_location();
        SessionUser::Distributor(DistributorSession {
            id: distributor.id,
            role: Role::Distributor,
            name: distributor.owner_name,
            business_name: distributor.business_name,
            location,
            crops_interested: distributor.crops_interested,
            verified: distributor.verified,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_distributor_session_projection() {
        let profile = DistributorProfile::register(
            DistributorRegistration {
                business_name: "Green Traders".to_string(),
                owner_name: "Amit".to_string(),
                state: "Punjab".to_string(),
                district: "Ludhiana".to_string(),
                ..Default::default()
            },
            "distributor_1".to_string(),
            Utc::now(),
        );

        let json = serde_json::to_value(SessionUser::from(profile)).unwrap();
        assert_eq!(json["role"], "distributor");
        assert_eq!(json["name"], "Amit");
        assert_eq!(json["businessName"], "Green Traders");
        assert_eq!(json["location"], "Ludhiana, Punjab");
        assert_eq!(json["verified"], true);
    }

    #[test]
    fn test_farmer_session_omits_missing_fields() {
        let profile = FarmerProfile::register(
            FarmerRegistration {
                name: Some("Ram".to_string()),
                crops: vec!["Rice".to_string()],
                ..Default::default()
            },
            "farmer_1".to_string(),
            Utc::now(),
        );

        let json = serde_json::to_value(SessionUser::from(profile)).unwrap();
        assert_eq!(json["role"], "farmer");
        assert_eq!(json["crops"], serde_json::json!(["Rice"]));
        assert!(json.get("spokenName").is_none());
        assert!(json.get("location").is_none());
    }
}
