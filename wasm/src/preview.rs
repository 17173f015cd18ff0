//! Object URLs for previewing uploaded card images

use shared::types::{DocumentSide, DocumentUpload};
use wasm_bindgen::prelude::*;
use web_sys::{File, Url};

/// Metadata the wizard keeps for an uploaded file
pub fn upload_from_file(file: &File) -> DocumentUpload {
    DocumentUpload {
        file_name: file.name(),
        content_type: file.type_(),
        size_bytes: file.size() as u64,
    }
}

/// An object URL for an image; the URL is revoked when the preview is
/// dropped or freed from JavaScript
#[wasm_bindgen]
pub struct DocumentPreview {
    url: String,
}

#[wasm_bindgen]
impl DocumentPreview {
    #[wasm_bindgen(constructor)]
    pub fn new(file: &File) -> Result<DocumentPreview, JsValue> {
        let url = Url::create_object_url_with_blob(file)?;
        Ok(Self { url })
    }

    #[wasm_bindgen(getter)]
    pub fn url(&self) -> String {
        self.url.clone()
    }
}

impl Drop for DocumentPreview {
    fn drop(&mut self) {
        if Url::revoke_object_url(&self.url).is_err() {
            web_sys::console::warn_1(&JsValue::from_str("failed to revoke preview URL"));
        }
    }
}

/// One value per card side. Replacing or clearing a side drops what it
/// held, which for previews revokes the old URL.
#[derive(Debug)]
pub struct DocumentSlots<T> {
    front: Option<T>,
    back: Option<T>,
}

impl<T> Default for DocumentSlots<T> {
    fn default() -> Self {
        Self {
            front: None,
            back: None,
        }
    }
}

impl<T> DocumentSlots<T> {
    fn slot_mut(&mut self, side: DocumentSide) -> &mut Option<T> {
        match side {
            DocumentSide::Front => &mut self.front,
            DocumentSide::Back => &mut self.back,
        }
    }

    pub fn get(&self, side: DocumentSide) -> Option<&T> {
        match side {
            DocumentSide::Front => self.front.as_ref(),
            DocumentSide::Back => self.back.as_ref(),
        }
    }

    pub fn replace(&mut self, side: DocumentSide, value: T) {
        *self.slot_mut(side) = Some(value);
    }

    pub fn clear(&mut self, side: DocumentSide) {
        *self.slot_mut(side) = None;
    }
}
