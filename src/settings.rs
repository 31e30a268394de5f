//! Browser persistence of the provider credential.

use gloo::storage::{errors::StorageError, LocalStorage, Storage};

use crate::config::ApiKey;

/// localStorage key holding the user's API key
pub const API_KEY_STORAGE_KEY: &str = "GEMINI_API_KEY";

/// Reads, writes and forgets the API key in `localStorage`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyStore;

impl KeyStore {
    /// The stored key, if any. Blank or unreadable entries count as absent.
    pub fn load(&self) -> Option<ApiKey> {
        match LocalStorage::get::<String>(API_KEY_STORAGE_KEY) {
            Ok(raw) => ApiKey::new(raw),
            Err(StorageError::KeyNotFound(_)) => None,
            Err(err) => {
                log::warn!("could not read stored API key: {}", err);
                None
            }
        }
    }

    pub fn save(&self, key: &ApiKey) -> Result<(), StorageError> {
        LocalStorage::set(API_KEY_STORAGE_KEY, key.expose())?;
        log::info!("API key saved ({})", key.masked());
        Ok(())
    }

    pub fn remove(&self) {
        LocalStorage::delete(API_KEY_STORAGE_KEY);
        log::info!("API key removed");
    }
}
