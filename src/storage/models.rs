//! Persisted record shapes and the keys they live under.
//!
//! The favorites list is stored as a JSON array of [`MovieRecord`](crate::MovieRecord)s;
//! its shape is owned by the domain type. This module holds the storage-only records.

use crate::domain::error::Result;
use crate::storage::backend::{load_json, save_json, Storage};
use serde::{Deserialize, Serialize};

/// Key holding the ordered favorites array.
pub const FAVORITES_KEY: &str = "imdbFavorites";

/// Key holding the one-shot typeahead selection marker.
pub const SELECTION_KEY: &str = "last_selected_movie";

/// The suggestion the user picked, kept until the next full search consumes it.
///
/// The next result list moves the record with this `id` to the front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionMarker {
    pub id: String,
    pub title: String,
}

impl SelectionMarker {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// Stores the marker under [`SELECTION_KEY`], replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save(&self, storage: &mut dyn Storage) -> Result<()> {
        save_json(storage, SELECTION_KEY, self)
    }

    /// Reads the marker and deletes it, found or not.
    ///
    /// A corrupt marker is treated as absent. The delete is attempted even when the read
    /// fails, so a bad value is never consumed twice.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails; the read result is lost in that case.
    pub fn take(storage: &mut dyn Storage) -> Result<Option<Self>> {
        let marker = match load_json::<Self>(storage, SELECTION_KEY) {
            Ok(marker) => marker,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable selection marker");
                None
            }
        };
        storage.remove_item(SELECTION_KEY)?;
        Ok(marker)
    }
}
