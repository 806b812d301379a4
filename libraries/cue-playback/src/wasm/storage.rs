//! `localStorage` backed [`KeyValueStore`]

use cue_document::{DocumentError, KeyValueStore, Result};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// The window's `localStorage`
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn new() -> Result<Self> {
        let storage = web_sys::window()
            .ok_or_else(|| DocumentError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(storage_error)?
            .ok_or_else(|| DocumentError::Storage("localStorage unavailable".to_string()))?;

        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(storage_error)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(storage_error)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(storage_error)
    }
}

fn storage_error(e: JsValue) -> DocumentError {
    DocumentError::Storage(format!("{e:?}"))
}
