//! The favorites store.
//!
//! [`FavoritesStore`] owns the ordered favorites list and its persisted copy. Every
//! successful mutation writes the whole list back under
//! [`FAVORITES_KEY`](crate::storage::FAVORITES_KEY). Persistence faults never reach the
//! caller: they are logged, the in-memory list stays authoritative, and the pending write
//! is retried on the next mutation or at shutdown.

use crate::domain::error::Result;
use crate::domain::MovieRecord;
use crate::storage::{load_json, save_json, Storage, FAVORITES_KEY};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Ordered, id-unique list of favorite movies backed by a [`Storage`].
///
/// # Examples
///
/// ```
/// use moviedeck::favorites::FavoritesStore;
/// use moviedeck::storage::MemoryStorage;
/// use moviedeck::MovieRecord;
///
/// let mut store = FavoritesStore::open(Box::new(MemoryStorage::new()));
/// assert!(store.add(MovieRecord::new("tt0133093", "The Matrix"))?);
/// assert!(!store.add(MovieRecord::new("tt0133093", "The Matrix"))?);
/// assert_eq!(store.list().len(), 1);
/// # Ok::<(), moviedeck::MovieDeckError>(())
/// ```
pub struct FavoritesStore {
    storage: Option<Box<dyn Storage>>,
    favorites: Vec<MovieRecord>,

    /// Set when the last persist attempt failed.
    dirty: bool,
}

impl FavoritesStore {
    /// Loads the favorites list from `storage`.
    ///
    /// An absent or unreadable payload yields an empty list. Entries are decoded one at a
    /// time: those that do not decode, lack an id or title, or repeat an id are dropped
    /// with a warning and the rest are kept.
    #[must_use]
    pub fn open(storage: Box<dyn Storage>) -> Self {
        let _span = tracing::debug_span!("favorites_open").entered();

        let favorites = match load_json::<Vec<Value>>(&*storage, FAVORITES_KEY) {
            Ok(Some(stored)) => decode_entries(stored),
            Ok(None) => {
                tracing::debug!("no stored favorites");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load favorites, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(count = favorites.len(), "favorites loaded");

        Self {
            storage: Some(storage),
            favorites,
            dirty: false,
        }
    }

    /// Appends `movie` unless a favorite with the same id exists.
    ///
    /// Returns whether the list changed.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRecord`](crate::MovieDeckError::MalformedRecord) if the record
    /// has no id or title.
    pub fn add(&mut self, movie: MovieRecord) -> Result<bool> {
        movie.validate()?;

        if self.contains(&movie.id) {
            tracing::debug!(id = %movie.id, "already a favorite");
            return Ok(false);
        }

        tracing::debug!(id = %movie.id, title = %movie.title, "adding favorite");
        self.favorites.push(movie);
        self.persist();
        Ok(true)
    }

    /// Removes the favorite with `id`. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|m| m.id != id);

        if self.favorites.len() == before {
            return false;
        }

        tracing::debug!(id = %id, "removed favorite");
        self.persist();
        true
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.favorites.iter().any(|m| m.id == id)
    }

    /// Favorites in display order.
    #[must_use]
    pub fn list(&self) -> &[MovieRecord] {
        &self.favorites
    }

    /// Owned copy of the list, safe to hold across mutations.
    #[must_use]
    pub fn snapshot(&self) -> Vec<MovieRecord> {
        self.favorites.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Index of the favorite with `id`.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.favorites.iter().position(|m| m.id == id)
    }

    /// Rearranges the list to follow `ids`.
    ///
    /// Favorites whose id does not appear in `ids` are dropped. Unknown ids are ignored
    /// and repeated ids are taken once. The result is persisted.
    pub fn reorder<S: AsRef<str>>(&mut self, ids: &[S]) {
        let _span = tracing::debug_span!("favorites_reorder", requested = ids.len()).entered();

        let mut seen = HashSet::with_capacity(ids.len());
        let mut remaining = std::mem::take(&mut self.favorites);
        let mut ordered = Vec::with_capacity(remaining.len());

        for id in ids {
            let id = id.as_ref();
            if !seen.insert(id.to_string()) {
                continue;
            }
            if let Some(idx) = remaining.iter().position(|m| m.id == id) {
                ordered.push(remaining.swap_remove(idx));
            } else {
                tracing::debug!(id = %id, "ignoring unknown id in reorder");
            }
        }

        if !remaining.is_empty() {
            tracing::debug!(dropped = remaining.len(), "favorites dropped by reorder");
        }

        self.favorites = ordered;
        self.persist();
    }

    /// Moves the favorite with `id` by `offset` slots, clamped to the list bounds.
    ///
    /// Returns whether the position changed.
    pub fn move_by(&mut self, id: &str, offset: isize) -> bool {
        let Some(from) = self.position(id) else {
            return false;
        };

        let last = self.favorites.len() - 1;
        let to = from.saturating_add_signed(offset).min(last);
        if to == from {
            return false;
        }

        let mut ids: Vec<String> = self.favorites.iter().map(|m| m.id.clone()).collect();
        let moved = ids.remove(from);
        ids.insert(to, moved);
        self.reorder(ids.as_slice());
        true
    }

    /// Whether the last persist attempt failed and a write is pending.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Shared storage handle, also used for the typeahead selection marker.
    ///
    /// Returns `None` after [`shutdown`](Self::shutdown).
    pub fn storage_mut(&mut self) -> Option<&mut (dyn Storage + 'static)> {
        self.storage.as_deref_mut()
    }

    /// Retries a pending write and releases the storage handle.
    ///
    /// The in-memory list remains readable afterwards; later mutations are kept in memory
    /// only.
    pub fn shutdown(&mut self) {
        if self.dirty {
            tracing::debug!("retrying pending favorites write before shutdown");
            self.persist();
        }
        if self.storage.take().is_some() {
            tracing::debug!(pending = self.dirty, "favorites store shut down");
        }
    }

    fn persist(&mut self) {
        let Some(storage) = self.storage.as_deref_mut() else {
            tracing::warn!("favorites storage released, change kept in memory only");
            self.dirty = true;
            return;
        };

        match save_json(storage, FAVORITES_KEY, &self.favorites) {
            Ok(()) => {
                self.dirty = false;
                tracing::debug!(count = self.favorites.len(), "favorites persisted");
            }
            Err(e) => {
                self.dirty = true;
                tracing::warn!(error = %e, "failed to persist favorites");
            }
        }
    }
}

impl Drop for FavoritesStore {
    fn drop(&mut self) {
        if self.dirty && self.storage.is_some() {
            tracing::debug!("saving pending favorites on drop");
            self.persist();
        }
    }
}

impl fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("favorites", &self.favorites)
            .field("dirty", &self.dirty)
            .field("open", &self.storage.is_some())
            .finish()
    }
}

fn decode_entries(stored: Vec<Value>) -> Vec<MovieRecord> {
    let mut seen = HashSet::new();
    stored
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let movie = match serde_json::from_value::<MovieRecord>(entry) {
                Ok(movie) => movie,
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping undecodable stored favorite");
                    return None;
                }
            };
            if let Err(e) = movie.validate() {
                tracing::warn!(index, error = %e, "skipping stored favorite");
                return None;
            }
            if !seen.insert(movie.id.clone()) {
                tracing::debug!(id = %movie.id, "skipping repeated stored favorite");
                return None;
            }
            Some(movie)
        })
        .collect()
}
