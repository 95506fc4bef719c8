use wasm_bindgen::prelude::*;
use web_sys::{window, Storage};

use crate::core::database::is_blog_key;
use crate::core::error::StorageError;
use crate::core::storage::KeyValueStore;

/// The browser's `localStorage` for the current origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn get_storage() -> Result<Storage, JsValue> {
        window()
            .ok_or_else(|| JsValue::from_str("No window available"))?
            .local_storage()?
            .ok_or_else(|| JsValue::from_str("Local storage not available"))
    }
}

fn unavailable(err: JsValue) -> StorageError {
    StorageError::Unavailable(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::get_storage()
            .and_then(|storage| storage.get_item(key))
            .map_err(unavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::get_storage()
            .and_then(|storage| storage.set_item(key, value))
            .map_err(unavailable)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::get_storage()
            .and_then(|storage| storage.remove_item(key))
            .map_err(unavailable)
    }

    /// The origin's storage is shared with the rest of the site, so only
    /// blog keys are removed.
    fn clear(&self) -> Result<(), StorageError> {
        let storage = Self::get_storage().map_err(unavailable)?;
        let len = storage.length().map_err(unavailable)?;
        let mut keys = Vec::new();
        for index in 0..len {
            if let Some(key) = storage.key(index).map_err(unavailable)? {
                if is_blog_key(&key) {
                    keys.push(key);
                }
            }
        }
        for key in keys {
            storage.remove_item(&key).map_err(unavailable)?;
        }
        Ok(())
    }
}
