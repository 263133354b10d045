//! In-memory key-value storage.
//!
//! Clones share the same underlying map, so a test can hand one handle to the
//! favorites store and keep another to inspect what was persisted.

use crate::domain::error::{MovieDeckError, Result};
use crate::storage::backend::Storage;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `set_item`/`remove_item` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| MovieDeckError::Persistence("memory storage lock poisoned".to_string()))
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(MovieDeckError::Persistence("storage is read-only".to_string()));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.check_writable()?;
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_contents() {
        let mut writer = MemoryStorage::new();
        let reader = writer.clone();

        writer.set_item("k", "v").unwrap();
        assert_eq!(reader.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn failing_writes_keep_previous_value() {
        let mut storage = MemoryStorage::new();
        storage.set_item("k", "old").unwrap();

        storage.set_fail_writes(true);
        assert!(storage.set_item("k", "new").is_err());
        assert!(storage.remove_item("k").is_err());
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("old"));
    }
}
