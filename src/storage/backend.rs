//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait: a string key-value store with the
//! get/set/remove shape of browser local storage. The favorites list and the typeahead
//! selection marker are the only things persisted, each under its own key as a JSON
//! document.
//!
//! # Implementations
//!
//! - [`FileStorage`](crate::storage::FileStorage): one file per key with atomic writes (default)
//! - [`MemoryStorage`](crate::storage::MemoryStorage): process-local map, used in tests and as
//!   the fallback when the data directory is unavailable

use crate::domain::error::{MovieDeckError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Abstraction over persistent key-value backends.
///
/// # Examples
///
/// ```
/// use moviedeck::storage::{MemoryStorage, Storage};
///
/// let mut storage = MemoryStorage::new();
/// storage.set_item("imdbFavorites", "[]")?;
/// assert_eq!(storage.get_item("imdbFavorites")?.as_deref(), Some("[]"));
/// # Ok::<(), moviedeck::MovieDeckError>(())
/// ```
pub trait Storage: Send {
    /// Reads the raw value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored under the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. The previous value must remain intact.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Deletes the value under `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be modified.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Reads and deserializes the JSON document stored under `key`.
///
/// # Errors
///
/// Returns [`MovieDeckError::Persistence`] if the stored value is not valid JSON for `T`,
/// or the backend error if the read fails.
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>> {
    let Some(raw) = storage.get_item(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| MovieDeckError::Persistence(format!("corrupt value under '{key}': {e}")))
}

/// Serializes `value` as JSON and stores it under `key`.
///
/// # Errors
///
/// Returns [`MovieDeckError::Persistence`] if serialization fails, or the backend error if
/// the write fails.
pub fn save_json<T: Serialize + ?Sized>(
    storage: &mut dyn Storage,
    key: &str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value)
        .map_err(|e| MovieDeckError::Persistence(format!("failed to serialize '{key}': {e}")))?;
    storage.set_item(key, &json)
}
