//! Registration and name-based sign-in
//!
//! There are no credentials: a user signs in by giving a name and a role,
//! and the first stored profile whose name contains it is returned.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use shared::models::{new_profile_id, DistributorProfile, DistributorRegistration, FarmerProfile, FarmerRegistration};
use shared::store::ProfileStore;
use shared::types::Role;

use crate::error::{AppError, AppResult};
use crate::models::{RegisteredUser, SessionUser};

/// Registration payload for either role
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationInput {
    Farmer(FarmerRegistration),
    Distributor(DistributorRegistration),
}

impl RegistrationInput {
    /// Split a `{ "role": ..., ...fields }` body into a typed registration
    pub fn from_body(mut body: Map<String, Value>) -> AppResult<Self> {
        let role = body
            .remove("role")
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|role| role.parse::<Role>().ok())
            .ok_or(AppError::InvalidRole)?;

        let fields = Value::Object(body);
        let invalid = |e: serde_json::Error| {
            AppError::Validation(format!("Invalid registration data: {}", e))
        };

        match role {
            Role::Farmer => serde_json::from_value(fields)
                .map(RegistrationInput::Farmer)
                .map_err(invalid),
            Role::Distributor => serde_json::from_value(fields)
                .map(RegistrationInput::Distributor)
                .map_err(invalid),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            RegistrationInput::Farmer(_) => Role::Farmer,
            RegistrationInput::Distributor(_) => Role::Distributor,
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    store: ProfileStore,
}

impl AuthService {
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }

    /// Create and save a verified profile
    pub fn register(&self, input: RegistrationInput, now: DateTime<Utc>) -> AppResult<RegisteredUser> {
        let id = new_profile_id(input.role(), now);
        let storage_error = |source| AppError::Storage {
            action: "Registration",
            source,
        };

        let user = match input {
            RegistrationInput::Farmer(registration) => {
                let profile = FarmerProfile::register(registration, id, now);
                let user = RegisteredUser::from(&profile);
                self.store.farmers.save(profile).map_err(storage_error)?;
                user
            }
            RegistrationInput::Distributor(registration) => {
                let profile = DistributorProfile::register(registration, id, now);
                let user = RegisteredUser::from(&profile);
                self.store.distributors.save(profile).map_err(storage_error)?;
                user
            }
        };

        tracing::info!(user_id = %user.id, role = %user.role, "registered user");
        Ok(user)
    }

    /// Find the user of `role` whose name contains `name`
    pub fn login(&self, name: &str, role: Role) -> AppResult<SessionUser> {
        let user = match role {
            Role::Farmer => self.store.farmers.get_by_name(name).map(SessionUser::from),
            Role::Distributor => self.store.distributors.get_by_name(name).map(SessionUser::from),
        };

        user.ok_or(AppError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    #[test]
    fn test_role_is_required() {
        let err = RegistrationInput::from_body(body(json!({ "name": "Ram" }))).unwrap_err();
        assert!(matches!(err, AppError::InvalidRole));

        let err = RegistrationInput::from_body(body(json!({ "role": "admin" }))).unwrap_err();
        assert!(matches!(err, AppError::InvalidRole));
    }

    #[test]
    fn test_farmer_body_accepts_legacy_aadhar_key() {
        let input = RegistrationInput::from_body(body(json!({
            "role": "farmer",
            "name": "Ram Kumar",
            "aadharNumber": "1234 5678 9012",
            "crops": ["Rice"]
        })))
        .unwrap();

        match input {
            RegistrationInput::Farmer(registration) => {
                assert_eq!(registration.aadhaar_number.as_deref(), Some("1234 5678 9012"));
                assert_eq!(registration.crops, vec!["Rice"]);
            }
            other => panic!("expected farmer, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_field_type_is_validation_error() {
        let err = RegistrationInput::from_body(body(json!({
            "role": "distributor",
            "cropsInterested": "Rice"
        })))
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_register_then_login() {
        let service = AuthService::new(ProfileStore::in_memory());
        let input = RegistrationInput::from_body(body(json!({
            "role": "farmer",
            "spokenName": "Ram Kumar",
            "phone": "9999999999"
        })))
        .unwrap();

        let user = service.register(input, Utc::now()).unwrap();
        assert_eq!(user.name, "Ram Kumar");
        assert!(user.id.starts_with("farmer_"));

        match service.login("ram", Role::Farmer).unwrap() {
            SessionUser::Farmer(session) => {
                assert_eq!(session.id, user.id);
                assert!(session.verified);
            }
            other => panic!("expected farmer session, got {:?}", other),
        }

        assert!(matches!(
            service.login("ram", Role::Distributor),
            Err(AppError::UserNotFound)
        ));
    }
}
