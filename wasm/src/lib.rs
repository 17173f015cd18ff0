//! WebAssembly module for FarmConnect
//!
//! Provides the browser side of the platform:
//! - Farmer and distributor registration wizards
//! - Address parsing for OCR results
//! - Profile storage in `localStorage`
//! - Image previews for Aadhaar uploads

mod local_storage;
mod preview;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::address::parse_address;
use shared::models::{DistributorProfile, ExtractedAadhaarData, FarmerProfile};
use shared::registration::{DistributorDraft, FarmerDraft, RegistrationFlow, RegistrationForm};
use shared::store::{DistributorFilter, FarmerFilter, ProfileStore};
use shared::types::{DocumentSide, Role};
use shared::validation::validate_document_upload;
use wasm_bindgen::prelude::*;

pub use local_storage::LocalStorageBackend;
pub use preview::{DocumentPreview, DocumentSlots};

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn now() -> DateTime<Utc> {
    #[cfg(target_arch = "wasm32")]
    {
        DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Utc::now()
    }
}

fn browser_store() -> ProfileStore {
    ProfileStore::new(Arc::new(LocalStorageBackend))
}

/// Summary kept in the session after registering
#[derive(Debug, Serialize)]
struct SessionSummary<'a> {
    id: &'a str,
    role: Role,
    name: &'a str,
}

/// Parse an Indian address into its components, as JSON
#[wasm_bindgen]
pub fn parse_address_json(address: &str) -> Result<String, JsValue> {
    serde_json::to_string(&parse_address(address)).map_err(to_js)
}

/// Error message for an unacceptable upload, if any
#[wasm_bindgen]
pub fn check_document_upload(content_type: &str, size_bytes: f64) -> Option<String> {
    validate_document_upload(content_type, size_bytes as u64)
        .err()
        .map(str::to_string)
}

/// Signed-in user as JSON, if any
#[wasm_bindgen]
pub fn current_user() -> Option<String> {
    local_storage::load_session()
}

#[wasm_bindgen]
pub fn logout() -> Result<(), JsValue> {
    local_storage::clear_session().map_err(to_js)
}

/// Both collections with counts and a timestamp, as JSON
#[wasm_bindgen]
pub fn export_data() -> Result<String, JsValue> {
    let snapshot = browser_store().export_all(now());
    serde_json::to_string_pretty(&snapshot).map_err(to_js)
}

/// Replace a collection (`farmers` or `distributors`) from a JSON array
#[wasm_bindgen]
pub fn import_collection(collection: &str, json: &str) -> Result<bool, JsValue> {
    let store = browser_store();
    let imported = match collection {
        "farmers" => store.farmers.import_json(json),
        "distributors" => store.distributors.import_json(json),
        other => return Err(JsValue::from_str(&format!("unknown collection: {}", other))),
    };
    imported.map_err(to_js)
}

/// Profiles a user of `viewer_role` can browse, filtered by `filter_json`
#[wasm_bindgen]
pub fn search_profiles(viewer_role: &str, filter_json: &str) -> Result<String, JsValue> {
    let viewer: Role = viewer_role.parse().map_err(to_js)?;
    let store = browser_store();
    let filter_json = if filter_json.trim().is_empty() { "{}" } else { filter_json };

    match viewer.counterpart() {
        Role::Farmer => {
            let filter: FarmerFilter = serde_json::from_str(filter_json).map_err(to_js)?;
            serde_json::to_string(&store.farmers.search(&filter)).map_err(to_js)
        }
        Role::Distributor => {
            let filter: DistributorFilter = serde_json::from_str(filter_json).map_err(to_js)?;
            serde_json::to_string(&store.distributors.search(&filter)).map_err(to_js)
        }
    }
}

/// Wizard state shared by both registration flows
struct Wizard<F> {
    flow: RegistrationFlow<F>,
    store: ProfileStore,
}

impl<F> Wizard<F>
where
    F: RegistrationForm + Default + Serialize + DeserializeOwned,
{
    fn new(store: ProfileStore) -> Self {
        Self {
            flow: RegistrationFlow::new(F::default()),
            store,
        }
    }

    fn form_json(&self) -> Result<String, String> {
        serde_json::to_string(self.flow.form()).map_err(|e| e.to_string())
    }

    /// Overwrite the form fields present in `patch_json`
    fn update(&mut self, patch_json: &str) -> Result<(), String> {
        let patch: Value = serde_json::from_str(patch_json).map_err(|e| e.to_string())?;
        let Value::Object(patch) = patch else {
            return Err("form update must be a JSON object".to_string());
        };

        let mut current = serde_json::to_value(self.flow.form()).map_err(|e| e.to_string())?;
        if let Value::Object(fields) = &mut current {
            fields.extend(patch);
        }
        *self.flow.form_mut() = serde_json::from_value(current).map_err(|e| e.to_string())?;
        Ok(())
    }

    fn errors_json(&self) -> String {
        serde_json::to_string(self.flow.errors()).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Register the new user as the signed-in user
fn start_session(id: &str, role: Role, name: &str) -> Result<(), JsValue> {
    let summary = serde_json::to_string(&SessionSummary { id, role, name }).map_err(to_js)?;
    local_storage::save_session(&summary).map_err(to_js)
}

/// Six-step farmer registration
#[wasm_bindgen]
pub struct FarmerWizard {
    inner: Wizard<FarmerDraft>,
    previews: DocumentSlots<DocumentPreview>,
}

impl FarmerWizard {
    fn with_store(store: ProfileStore) -> Self {
        Self {
            inner: Wizard::new(store),
            previews: DocumentSlots::default(),
        }
    }

    fn complete(&mut self, at: DateTime<Utc>) -> Result<FarmerProfile, String> {
        let store = self.inner.store.farmers.clone();
        self.inner.flow.submit(&store, at).map_err(|e| e.to_string())
    }
}

#[wasm_bindgen]
impl FarmerWizard {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FarmerWizard {
        Self::with_store(browser_store())
    }

    pub fn step(&self) -> u8 {
        self.inner.flow.step().number()
    }

    pub fn total_steps(&self) -> u8 {
        self.inner.flow.total_steps()
    }

    pub fn progress(&self) -> u8 {
        self.inner.flow.progress_percent()
    }

    pub fn is_final_step(&self) -> bool {
        self.inner.flow.is_final_step()
    }

    pub fn form_json(&self) -> Result<String, JsValue> {
        self.inner.form_json().map_err(to_js)
    }

    pub fn update(&mut self, patch_json: &str) -> Result<(), JsValue> {
        self.inner.update(patch_json).map_err(to_js)
    }

    pub fn toggle_crop(&mut self, crop: &str) {
        self.inner.flow.form_mut().toggle_crop(crop);
    }

    /// Attach a card image after checking its type and size; returns the
    /// preview URL. A previous image on the same side has its URL revoked.
    pub fn attach_document(&mut self, side: &str, file: &web_sys::File) -> Result<String, JsValue> {
        let side: DocumentSide = side.parse().map_err(to_js)?;
        let upload = preview::upload_from_file(file);
        validate_document_upload(&upload.content_type, upload.size_bytes).map_err(to_js)?;

        let preview = DocumentPreview::new(file)?;
        let url = preview.url();
        self.previews.replace(side, preview);
        self.inner.flow.form_mut().attach_document(side, upload);
        Ok(url)
    }

    pub fn remove_document(&mut self, side: &str) -> Result<(), JsValue> {
        let side: DocumentSide = side.parse().map_err(to_js)?;
        self.previews.clear(side);
        self.inner.flow.form_mut().remove_document(side);
        Ok(())
    }

    /// Object URL of the image attached on `side`, if any
    pub fn preview_url(&self, side: &str) -> Result<Option<String>, JsValue> {
        let side: DocumentSide = side.parse().map_err(to_js)?;
        Ok(self.previews.get(side).map(DocumentPreview::url))
    }

    /// Pre-fill from the `data` of an OCR response
    pub fn apply_ocr_json(&mut self, data_json: &str) -> Result<(), JsValue> {
        let data: ExtractedAadhaarData = serde_json::from_str(data_json).map_err(to_js)?;
        self.inner.flow.form_mut().apply_ocr(&data);
        Ok(())
    }

    /// Pre-fill from the demo card when no OCR service is reachable
    pub fn apply_demo_ocr(&mut self) {
        let demo = ExtractedAadhaarData::demo(now().date_naive());
        self.inner.flow.form_mut().apply_ocr(&demo);
    }

    /// Validate the current step and advance; false when it has errors.
    /// Leaving the upload step without OCR data fills in the demo card.
    pub fn next(&mut self) -> bool {
        self.inner.flow.next_on(now().date_naive()).is_ok()
    }

    pub fn previous(&mut self) -> u8 {
        self.inner.flow.previous().number()
    }

    pub fn errors_json(&self) -> String {
        self.inner.errors_json()
    }

    /// Save the profile and sign the farmer in; returns the profile JSON
    pub fn submit(&mut self) -> Result<String, JsValue> {
        let profile = self.complete(now()).map_err(to_js)?;
        start_session(&profile.id, Role::Farmer, &profile.name)?;
        serde_json::to_string(&profile).map_err(to_js)
    }
}

impl Default for FarmerWizard {
    fn default() -> Self {
        Self::new()
    }
}

/// Five-step distributor registration
#[wasm_bindgen]
pub struct DistributorWizard {
    inner: Wizard<DistributorDraft>,
}

impl DistributorWizard {
    fn with_store(store: ProfileStore) -> Self {
        Self {
            inner: Wizard::new(store),
        }
    }

    fn complete(&mut self, at: DateTime<Utc>) -> Result<DistributorProfile, String> {
        let store = self.inner.store.distributors.clone();
        self.inner.flow.submit(&store, at).map_err(|e| e.to_string())
    }
}

#[wasm_bindgen]
impl DistributorWizard {
    #[wasm_bindgen(constructor)]
    pub fn new() -> DistributorWizard {
        Self::with_store(browser_store())
    }

    pub fn step(&self) -> u8 {
        self.inner.flow.step().number()
    }

    pub fn total_steps(&self) -> u8 {
        self.inner.flow.total_steps()
    }

    pub fn progress(&self) -> u8 {
        self.inner.flow.progress_percent()
    }

    pub fn is_final_step(&self) -> bool {
        self.inner.flow.is_final_step()
    }

    pub fn form_json(&self) -> Result<String, JsValue> {
        self.inner.form_json().map_err(to_js)
    }

    pub fn update(&mut self, patch_json: &str) -> Result<(), JsValue> {
        self.inner.update(patch_json).map_err(to_js)
    }

    pub fn toggle_crop(&mut self, crop: &str) {
        self.inner.flow.form_mut().toggle_crop(crop);
    }

    pub fn toggle_certification(&mut self, certification: &str) {
        self.inner.flow.form_mut().toggle_certification(certification);
    }

    pub fn next(&mut self) -> bool {
        self.inner.flow.next_on(now().date_naive()).is_ok()
    }

    pub fn previous(&mut self) -> u8 {
        self.inner.flow.previous().number()
    }

    pub fn errors_json(&self) -> String {
        self.inner.errors_json()
    }

    /// Save the profile and sign the distributor in; returns the profile JSON
    pub fn submit(&mut self) -> Result<String, JsValue> {
        let profile = self.complete(now()).map_err(to_js)?;
        start_session(&profile.id, Role::Distributor, &profile.owner_name)?;
        serde_json::to_string(&profile).map_err(to_js)
    }
}

impl Default for DistributorWizard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use shared::types::DocumentUpload;

    use super::*;

    fn upload() -> DocumentUpload {
        DocumentUpload {
            file_name: "card.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            size_bytes: 2048,
        }
    }

    #[test]
    fn test_update_merges_fields() {
        let mut wizard = FarmerWizard::with_store(ProfileStore::in_memory());
        wizard
            .inner
            .update(r#"{ "name": "Ram Kumar", "crops": ["Rice"] }"#)
            .unwrap();
        wizard.inner.update(r#"{ "phone": "9999999999" }"#).unwrap();

        let form = wizard.inner.flow.form();
        assert_eq!(form.name, "Ram Kumar");
        assert_eq!(form.crops, vec!["Rice"]);
        assert_eq!(form.phone, "9999999999");
    }

    #[test]
    fn test_update_rejects_bad_patches() {
        let mut wizard = DistributorWizard::with_store(ProfileStore::in_memory());
        assert!(wizard.inner.update("[1]").is_err());
        assert!(wizard.inner.update(r#"{ "cropsInterested": "Rice" }"#).is_err());
        assert_eq!(wizard.inner.flow.form(), &DistributorDraft::default());
    }

    #[test]
    fn test_farmer_wizard_end_to_end() {
        let store = ProfileStore::in_memory();
        let mut wizard = FarmerWizard::with_store(store.clone());

        assert!(wizard.next());
        assert!(!wizard.next());
        assert!(wizard.errors_json().contains("Please upload Aadhar front image"));

        wizard.inner.flow.form_mut().attach_document(DocumentSide::Front, upload());
        wizard.inner.flow.form_mut().attach_document(DocumentSide::Back, upload());
        assert!(wizard.next());
        assert_eq!(wizard.inner.flow.form().ocr_confidence, 85);
        assert!(wizard.next());

        wizard.toggle_crop("Wheat");
        assert!(wizard.next());

        wizard.inner.update(r#"{ "phone": "9999999999" }"#).unwrap();
        assert!(wizard.next());
        assert!(wizard.is_final_step());

        wizard
            .inner
            .update(r#"{ "farmSize": "3 acres", "experience": "20 years" }"#)
            .unwrap();
        let profile = wizard.complete(Utc::now()).unwrap();

        assert_eq!(profile.extracted_state.as_deref(), Some("Haryana"));
        assert_eq!(profile.ocr_confidence, Some(85));
        assert_eq!(store.farmers.get_all(), vec![profile]);
    }

    #[test]
    fn test_distributor_wizard_back_navigation() {
        let mut wizard = DistributorWizard::with_store(ProfileStore::in_memory());
        assert!(wizard.next());
        assert_eq!(wizard.step(), 2);
        assert!(!wizard.next());
        assert_eq!(wizard.previous(), 1);
        assert_eq!(wizard.errors_json(), "[]");
        assert_eq!(wizard.previous(), 1);
        assert_eq!(wizard.total_steps(), 5);
    }

    #[test]
    fn test_upload_check_messages() {
        assert_eq!(check_document_upload("image/png", 1024.0), None);
        assert_eq!(
            check_document_upload("image/gif", 1024.0).as_deref(),
            Some("Invalid file type. Please upload JPEG, PNG, or WebP images.")
        );
    }

    #[test]
    fn test_parse_address_json() {
        let json = parse_address_json("Village Rampur, District Sonipat, Haryana - 131001").unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["state"], "Haryana");
        assert_eq!(value["pincode"], "131001");
        assert_eq!(value["location"], "Rampur, Sonipat, Haryana");
    }
}
