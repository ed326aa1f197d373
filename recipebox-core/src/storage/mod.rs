//! Durable key-value storage used by the favorites and shopping list stores.
//!
//! Each store owns exactly one key and writes its whole collection as a
//! JSON string on every mutation. Backends:
//! - [`MemoryStore`]: in-process map, optionally with a byte quota
//! - [`FileStore`]: one `<key>.json` file per key in a data directory

mod file;
mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key holding the favorited recipes.
pub const FAVORITES_KEY: &str = "recipe-favorites";

/// Storage key holding the shopping list items.
pub const SHOPPING_LIST_KEY: &str = "shopping-list";

/// Errors that can occur while reading or writing durable storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error for {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage quota exceeded writing '{key}': need {needed} bytes, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),
}

/// A string key-value store that survives restarts.
pub trait KeyValueStore {
    /// Returns `Ok(None)` when the key has never been written or was deleted.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Deleting an absent key succeeds.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}

/// Keys double as file names, so only a conservative character set is allowed.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
