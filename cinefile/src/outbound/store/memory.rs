//! In-memory key-value store adapter.
//!
//! Backs tests and ephemeral runs. Contents vanish with the process.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

/// Process-local [`KeyValueStore`] over a mutex-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| KeyValueStoreError::backend("store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| KeyValueStoreError::backend("store lock poisoned"))?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| KeyValueStoreError::backend("store lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = InMemoryStore::new();
        store.set("k", "v").await.expect("set succeeds");
        assert_eq!(store.get("k").await.expect("get succeeds"), Some("v".to_owned()));
    }

    #[tokio::test]
    async fn set_replaces_the_previous_value() {
        let store = InMemoryStore::new();
        store.set("k", "old").await.expect("set succeeds");
        store.set("k", "new").await.expect("set succeeds");
        assert_eq!(
            store.get("k").await.expect("get succeeds"),
            Some("new".to_owned())
        );
    }

    #[tokio::test]
    async fn removing_an_absent_key_succeeds() {
        let store = InMemoryStore::new();
        store.remove("missing").await.expect("remove succeeds");
        assert_eq!(store.get("missing").await.expect("get succeeds"), None);
    }
}
