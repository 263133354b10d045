//! File-backed key-value storage.
//!
//! Each key is stored as its own file inside the plugin data directory. Writes go to a
//! temporary file which is then renamed over the target, so a crash mid-write never leaves
//! a half-written value behind.
//!
//! # Layout
//!
//! ```text
//! /host/.local/share/zellij/moviedeck/
//! ├── imdbFavorites.json
//! └── last_selected_movie.json
//! ```

use crate::domain::error::{MovieDeckError, Result};
use crate::storage::backend::Storage;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Directory-of-files storage backend.
///
/// This type is `Send` but not `Sync`; the plugin touches it from its single event thread.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens a storage directory, creating it (and parents) if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use moviedeck::storage::FileStorage;
    ///
    /// let storage = FileStorage::open("/tmp/moviedeck")?;
    /// # Ok::<(), moviedeck::MovieDeckError>(())
    /// ```
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tracing::debug!(dir = ?dir, "opening file storage");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(MovieDeckError::Persistence(format!("invalid storage key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let _span = tracing::debug_span!("file_get_item", key = %key).entered();

        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(bytes = contents.len(), "value loaded");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no stored value");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("file_set_item", key = %key, bytes = value.len()).entered();

        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, value)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!("value saved");
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("file_remove_item", key = %key).entered();

        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
