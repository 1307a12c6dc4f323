//! `localStorage`-backed [`KeyValueStore`].
//!
//! Every call looks the storage object up again: private browsing modes can
//! revoke it mid-session and the ledger treats that as a tolerated fault.

use crate::utils::js::js_error_message;
use lib_core::error::StorageError;
use lib_core::model::store::KeyValueStore;
use web_sys::Storage;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| StorageError::Unavailable(js_error_message(&e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read(js_error_message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(js_error_message(&e)))
    }
}
