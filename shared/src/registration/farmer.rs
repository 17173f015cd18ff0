//! Farmer registration wizard
//!
//! Steps: 1 voice assistant, 2 Aadhaar upload, 3 card details,
//! 4 location and crops, 5 contact details, 6 farm profile.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{no_checks, non_empty, toggle_selection, RegistrationForm, Step, StepValidator};
use crate::models::{ExtractedAadhaarData, FarmerProfile, FarmerRegistration};
use crate::types::{DocumentSide, DocumentUpload, Role};
use crate::validation::{check_optional_email, require_selection, require_text};

/// Crops offered on the farmer crop picker
pub const CROP_OPTIONS: &[&str] = &[
    "Rice",
    "Wheat",
    "Sugarcane",
    "Cotton",
    "Maize",
    "Pulses",
    "Oilseeds",
    "Vegetables",
    "Fruits",
    "Spices",
    "Tea",
    "Coffee",
];

/// Everything the farmer wizard collects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FarmerDraft {
    pub voice_assistant: bool,

    pub aadhaar_front: Option<DocumentUpload>,
    pub aadhaar_back: Option<DocumentUpload>,

    pub name: String,
    pub aadhaar_number: String,
    pub date_of_birth: String,
    pub address: String,
    pub extracted_location: String,
    pub extracted_state: String,
    pub extracted_district: String,
    pub ocr_confidence: u8,

    pub spoken_name: String,
    pub location: String,
    pub crops: Vec<String>,

    pub phone: String,
    pub email: String,
    pub whatsapp: String,

    pub farm_size: String,
    pub experience: String,
    pub organic_certified: bool,
    pub description: String,
}

/// Step where both sides of the card are uploaded
const UPLOAD_STEP: u8 = 2;

static FARMER_STEPS: [StepValidator<FarmerDraft>; 6] = [
    no_checks,
    check_documents,
    check_card_details,
    check_location_and_crops,
    check_contact,
    check_farm_profile,
];

fn check_documents(form: &FarmerDraft, errors: &mut Vec<String>) {
    if form.aadhaar_front.is_none() {
        errors.push("Please upload Aadhar front image".to_string());
    }
    if form.aadhaar_back.is_none() {
        errors.push("Please upload Aadhar back image".to_string());
    }
}

fn check_card_details(form: &FarmerDraft, errors: &mut Vec<String>) {
    require_text(&form.name, "Name is required", errors);
    require_text(&form.aadhaar_number, "Aadhar number is required", errors);
}

fn check_location_and_crops(form: &FarmerDraft, errors: &mut Vec<String>) {
    require_text(&form.location, "Location is required", errors);
    require_selection(&form.crops, "Please select at least one crop", errors);
}

fn check_contact(form: &FarmerDraft, errors: &mut Vec<String>) {
    require_text(&form.phone, "Phone number is required", errors);
    check_optional_email(&form.email, errors);
}

fn check_farm_profile(form: &FarmerDraft, errors: &mut Vec<String>) {
    require_text(&form.farm_size, "Farm size is required", errors);
    require_text(&form.experience, "Experience is required", errors);
}

impl FarmerDraft {
    pub fn attach_document(&mut self, side: DocumentSide, upload: DocumentUpload) {
        match side {
            DocumentSide::Front => self.aadhaar_front = Some(upload),
            DocumentSide::Back => self.aadhaar_back = Some(upload),
        }
    }

    pub fn remove_document(&mut self, side: DocumentSide) {
        match side {
            DocumentSide::Front => self.aadhaar_front = None,
            DocumentSide::Back => self.aadhaar_back = None,
        }
    }

    pub fn toggle_crop(&mut self, crop: &str) {
        toggle_selection(&mut self.crops, crop);
    }

    /// Pre-fill card details and location from an OCR extraction. The
    /// location stays editable afterwards.
    pub fn apply_ocr(&mut self, data: &ExtractedAadhaarData) {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        self.name = text(&data.full_name);
        self.aadhaar_number = text(&data.aadhaar_number);
        self.date_of_birth = text(&data.date_of_birth);
        self.address = text(&data.address);
        self.extracted_location = text(&data.location);
        self.extracted_state = text(&data.state);
        self.extracted_district = text(&data.district);
        self.location = text(&data.location);
        self.ocr_confidence = data.confidence;
    }

    /// Registration payload for this draft
    pub fn to_registration(&self) -> FarmerRegistration {
        let draft = self.clone();
        FarmerRegistration {
            name: non_empty(draft.name),
            spoken_name: non_empty(draft.spoken_name),
            aadhaar_number: non_empty(draft.aadhaar_number),
            date_of_birth: non_empty(draft.date_of_birth),
            address: non_empty(draft.address),
            location: non_empty(draft.location),
            extracted_location: non_empty(draft.extracted_location),
            extracted_state: non_empty(draft.extracted_state),
            extracted_district: non_empty(draft.extracted_district),
            phone: draft.phone,
            email: non_empty(draft.email),
            whatsapp: non_empty(draft.whatsapp),
            crops: draft.crops,
            farm_size: draft.farm_size,
            experience: draft.experience,
            organic_certified: draft.organic_certified,
            description: non_empty(draft.description),
            ocr_confidence: Some(draft.ocr_confidence).filter(|c| *c > 0),
            profile_photo: None,
        }
    }
}

impl RegistrationForm for FarmerDraft {
    type Profile = FarmerProfile;

    const ROLE: Role = Role::Farmer;

    fn steps() -> &'static [StepValidator<Self>] {
        &FARMER_STEPS
    }

    /// Leaving the upload step without an extraction fills in the demo card
    fn on_advance(&mut self, from: Step, today: NaiveDate) {
        if from.number() == UPLOAD_STEP && self.ocr_confidence == 0 {
            tracing::info!("no OCR extraction for uploaded card, using demo data");
            self.apply_ocr(&ExtractedAadhaarData::demo(today));
        }
    }

    fn into_profile(self, id: String, now: DateTime<Utc>) -> FarmerProfile {
        FarmerProfile::register(self.to_registration(), id, now)
    }
}
