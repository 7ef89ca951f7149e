//! State storage backends.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// Storage key for the persisted auth slice.
pub const AUTH_STATE_KEY: &str = "authState";

/// Trait for persisted key-value state backends.
pub trait StateStorage: Send + Sync + std::fmt::Debug {
    /// Load a value by key. Absent keys return `None`.
    fn load(&self, key: &str) -> Option<String>;

    /// Store a value under a key, replacing any previous value.
    fn store(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed storage, one JSON file per key.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at a directory. The directory is created on
    /// first write if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing a key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StateStorage for FileStorage {
    fn load(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path(key)).ok()
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Error::storage(format!("create {}: {}", self.dir.display(), e)))?;
        let path = self.path(key);
        std::fs::write(&path, value)
            .map_err(|e| Error::storage(format!("write {}: {}", path.display(), e)))
    }
}

/// In-memory storage for tests, with a write counter.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: RwLock<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage preloaded with one key.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage
            .data
            .write()
            .expect("storage lock poisoned")
            .insert(key.to_owned(), value.to_owned());
        storage
    }

    /// Number of writes performed.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl StateStorage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.data
            .read()
            .expect("storage lock poisoned")
            .get(key)
            .cloned()
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        self.data
            .write()
            .expect("storage lock poisoned")
            .insert(key.to_owned(), value.to_owned());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_memory_storage_counts_writes() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.write_count(), 0);

        storage.store(AUTH_STATE_KEY, "{}").unwrap();
        storage.store(AUTH_STATE_KEY, "{}").unwrap();

        assert_eq!(storage.write_count(), 2);
        assert_eq!(storage.load(AUTH_STATE_KEY).as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = std::env::temp_dir().join(format!("catalog-store-{}", std::process::id()));
        let storage = FileStorage::new(&dir);

        assert_eq!(storage.load(AUTH_STATE_KEY), None);
        storage.store(AUTH_STATE_KEY, r#"{"token":"t"}"#).unwrap();
        assert_eq!(
            storage.load(AUTH_STATE_KEY).as_deref(),
            Some(r#"{"token":"t"}"#)
        );

        std::fs::remove_dir_all(&dir).ok();
    }
}
