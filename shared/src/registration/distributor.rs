//! Distributor registration wizard
//!
//! Steps: 1 voice assistant, 2 business basics, 3 contact details,
//! 4 trading area and crops, 5 profile completion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{no_checks, non_empty, toggle_selection, RegistrationForm, StepValidator};
use crate::models::{DistributorProfile, DistributorRegistration};
use crate::types::Role;
use crate::validation::{check_optional_email, require_selection, require_text};

pub const BUSINESS_TYPES: &[&str] = &[
    "wholesale",
    "retail",
    "export",
    "processing",
    "cooperative",
    "individual",
];

pub const CERTIFICATION_OPTIONS: &[&str] = &[
    "FSSAI License",
    "Import/Export License",
    "Organic Certification",
    "ISO Certification",
    "HACCP Certification",
];

/// Everything the distributor wizard collects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DistributorDraft {
    pub voice_assistant: bool,

    pub business_name: String,
    pub owner_name: String,
    pub business_type: String,

    pub phone: String,
    pub email: String,
    pub whatsapp: String,
    pub address: String,

    pub state: String,
    pub district: String,
    pub crops_interested: Vec<String>,
    pub min_order_quantity: String,

    pub experience: String,
    pub description: String,
    pub certifications: Vec<String>,
}

static DISTRIBUTOR_STEPS: [StepValidator<DistributorDraft>; 5] = [
    no_checks,
    check_business,
    check_contact,
    check_trading_area,
    check_profile,
];

fn check_business(form: &DistributorDraft, errors: &mut Vec<String>) {
    require_text(&form.business_name, "Business name is required", errors);
    require_text(&form.owner_name, "Owner name is required", errors);
    require_text(&form.business_type, "Please select a business type", errors);
}

fn check_contact(form: &DistributorDraft, errors: &mut Vec<String>) {
    require_text(&form.phone, "Phone number is required", errors);
    check_optional_email(&form.email, errors);
}

fn check_trading_area(form: &DistributorDraft, errors: &mut Vec<String>) {
    require_text(&form.state, "State is required", errors);
    require_text(&form.district, "District is required", errors);
    require_selection(
        &form.crops_interested,
        "Please select at least one crop",
        errors,
    );
}

fn check_profile(form: &DistributorDraft, errors: &mut Vec<String>) {
    require_text(&form.experience, "Experience is required", errors);
}

impl DistributorDraft {
    pub fn toggle_crop(&mut self, crop: &str) {
        toggle_selection(&mut self.crops_interested, crop);
    }

    pub fn toggle_certification(&mut self, certification: &str) {
        toggle_selection(&mut self.certifications, certification);
    }

    pub fn to_registration(&self) -> DistributorRegistration {
        let draft = self.clone();
        DistributorRegistration {
            business_name: draft.business_name,
            owner_name: draft.owner_name,
            business_type: draft.business_type,
            state: draft.state,
            district: draft.district,
            phone: draft.phone,
            email: draft.email,
            whatsapp: non_empty(draft.whatsapp),
            address: non_empty(draft.address),
            crops_interested: draft.crops_interested,
            min_order_quantity: draft.min_order_quantity,
            experience: draft.experience,
            certifications: draft.certifications,
            description: non_empty(draft.description),
        }
    }
}

impl RegistrationForm for DistributorDraft {
    type Profile = DistributorProfile;

    const ROLE: Role = Role::Distributor;

    fn steps() -> &'static [StepValidator<Self>] {
        &DISTRIBUTOR_STEPS
    }

    fn into_profile(self, id: String, now: DateTime<Utc>) -> DistributorProfile {
        DistributorProfile::register(self.to_registration(), id, now)
    }
}
