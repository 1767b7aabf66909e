//! File-backed key-value store adapter.
//!
//! Persists the whole store as one JSON object in a single file inside a
//! capability-scoped directory. Reads and writes go through `cap_std::fs::Dir`
//! rather than ambient `std::fs` access. Every `set` and `remove` rewrites the
//! file; the store holds small session blobs, not bulk data.

use std::collections::BTreeMap;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use cap_std::fs::Dir;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

/// Durable [`KeyValueStore`] over a single JSON file.
pub struct FileStore {
    dir: Dir,
    file_name: String,
    // Serialises read-modify-write cycles within this process.
    write_guard: Mutex<()>,
}

impl FileStore {
    /// Open a store persisting to `file_name` inside `dir`.
    ///
    /// The file is created on first write; a missing file reads as an empty
    /// store.
    #[must_use]
    pub fn new(dir: Dir, file_name: impl Into<String>) -> Self {
        Self {
            dir,
            file_name: file_name.into(),
            write_guard: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, KeyValueStoreError> {
        let raw = match self.dir.read_to_string(&self.file_name) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(error) => return Err(KeyValueStoreError::backend(error.to_string())),
        };
        serde_json::from_str(&raw)
            .map_err(|error| KeyValueStoreError::serialization(error.to_string()))
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), KeyValueStoreError> {
        let raw = serde_json::to_string(entries)
            .map_err(|error| KeyValueStoreError::serialization(error.to_string()))?;
        self.dir
            .write(&self.file_name, raw.as_bytes())
            .map_err(|error| KeyValueStoreError::backend(error.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        Ok(self.load()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let _guard = self
            .write_guard
            .lock()
            .map_err(|_| KeyValueStoreError::backend("store lock poisoned"))?;
        let mut entries = self.load()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries)
    }

    async fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        let _guard = self
            .write_guard
            .lock()
            .map_err(|_| KeyValueStoreError::backend("store lock poisoned"))?;
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}
