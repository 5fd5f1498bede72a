//! Key-value persistence for the stores.
//!
//! Every store owns exactly one key and rewrites the full JSON value of its
//! collection on each mutation. Backends only move strings around; encoding
//! lives in [`load_json`] and [`save_json`].
//!
//! ## Keys
//!
//! - `token` - placeholder session token
//! - `userData` - current identity
//! - `registeredUsers` - credential roster
//! - `classifications` - classification records
//! - `marketplaceItems` - marketplace listings
//! - `carbonCalculator_<userId>` - per-user calculator state
//!
//! ## Backends
//!
//! - [`MemoryStorage`] - process-local map, used by tests and `EWASTE_STORAGE=memory`
//! - [`FileStorage`] - one `<key>.json` file per key inside a data directory

mod file;
mod memory;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key contains characters the backend cannot store.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A string key-value store.
///
/// Implementations use interior mutability so a single backend can be shared
/// between stores behind an [`Arc`].
pub trait Storage: Send + Sync {
    /// Read the value under `key`, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Shared handle to a storage backend.
pub type SharedStorage = Arc<dyn Storage>;

/// Read and decode the JSON value under `key`.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the stored value is not valid
/// JSON for `T`, or the backend's read error.
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    storage
        .get(key)?
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(StorageError::from)
}

/// Encode `value` as JSON and write it under `key`.
///
/// # Errors
///
/// Returns `StorageError` if encoding or the backend write fails.
pub fn save_json<T: Serialize + ?Sized>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)
}

/// Read `key`, treating a missing, unreadable or corrupt value as absent.
///
/// Failures are logged and swallowed; callers fall back to their defaults.
pub fn load_or_none<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    match load_json(storage, key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unreadable persisted state");
            None
        }
    }
}

/// Write `value` under `key`, logging instead of returning failures.
///
/// Persistence is best-effort: the in-memory state stays authoritative for
/// the rest of the process even when the write is lost.
pub fn persist<T: Serialize + ?Sized>(storage: &dyn Storage, key: &str, value: &T) {
    if let Err(e) = save_json(storage, key, value) {
        tracing::warn!(key, error = %e, "Failed to persist state");
    }
}

/// Delete `key`, logging instead of returning failures.
pub fn forget(storage: &dyn Storage, key: &str) {
    if let Err(e) = storage.remove(key) {
        tracing::warn!(key, error = %e, "Failed to remove persisted state");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_json_missing_key() {
        let storage = MemoryStorage::new();
        let value: Option<Vec<String>> = load_json(&storage, "absent").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_load_json_corrupt_value_is_error() {
        let storage = MemoryStorage::new();
        storage.set("items", "{not json").unwrap();
        let result: Result<Option<Vec<String>>, _> = load_json(&storage, "items");
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_load_or_none_swallows_corruption() {
        let storage = MemoryStorage::new();
        storage.set("items", "[1, 2").unwrap();
        let value: Option<Vec<u32>> = load_or_none(&storage, "items");
        assert!(value.is_none());
    }

    #[test]
    fn test_persist_then_load() {
        let storage = MemoryStorage::new();
        persist(&storage, "items", &["a", "b"]);
        let value: Option<Vec<String>> = load_json(&storage, "items").unwrap();
        assert_eq!(value.unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_forget_missing_key_is_silent() {
        let storage = MemoryStorage::new();
        forget(&storage, "never-written");
        assert!(storage.get("never-written").unwrap().is_none());
    }
}
