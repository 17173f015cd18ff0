//! Browser `localStorage` persistence
//!
//! Collections are stored under `farmconnect_<collection>`; the signed-in
//! user lives under `farmconnect_user`.

use shared::store::{StorageBackend, StoreError, StoreResult};
use wasm_bindgen::JsValue;
use web_sys::Storage;

pub const KEY_PREFIX: &str = "farmconnect_";

/// Key holding the signed-in user's summary
pub const SESSION_KEY: &str = "farmconnect_user";

pub fn storage_key(collection: &str) -> String {
    format!("{}{}", KEY_PREFIX, collection)
}

/// Storage backend over `window.localStorage`. The handle is looked up on
/// every call, so the backend itself holds no JS objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageBackend;

fn js_error(context: &str, err: JsValue) -> StoreError {
    StoreError::Backend(format!("{}: {:?}", context, err))
}

fn local_storage() -> StoreResult<Storage> {
    let window = web_sys::window()
        .ok_or_else(|| StoreError::Backend("no window available".to_string()))?;
    window
        .local_storage()
        .map_err(|e| js_error("localStorage access denied", e))?
        .ok_or_else(|| StoreError::Backend("localStorage unavailable".to_string()))
}

impl StorageBackend for LocalStorageBackend {
    fn read(&self, collection: &str) -> StoreResult<Option<String>> {
        local_storage()?
            .get_item(&storage_key(collection))
            .map_err(|e| js_error("localStorage read failed", e))
    }

    fn write(&self, collection: &str, contents: &str) -> StoreResult<()> {
        local_storage()?
            .set_item(&storage_key(collection), contents)
            .map_err(|e| js_error("localStorage write failed", e))
    }

    fn is_available(&self) -> bool {
        local_storage().is_ok()
    }
}

pub fn save_session(user_json: &str) -> StoreResult<()> {
    local_storage()?
        .set_item(SESSION_KEY, user_json)
        .map_err(|e| js_error("failed to save session", e))
}

pub fn load_session() -> Option<String> {
    local_storage().ok()?.get_item(SESSION_KEY).ok().flatten()
}

pub fn clear_session() -> StoreResult<()> {
    local_storage()?
        .remove_item(SESSION_KEY)
        .map_err(|e| js_error("failed to clear session", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys() {
        assert_eq!(storage_key("farmers"), "farmconnect_farmers");
        assert_eq!(storage_key("distributors"), "farmconnect_distributors");
        assert!(SESSION_KEY.starts_with(KEY_PREFIX));
    }
}
