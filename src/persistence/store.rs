//! Key-value storage contract and the in-memory implementation.

use std::sync::RwLock;

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors raised at the storage boundary.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// String key-value storage for profile and run data.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Whether `key` holds a value.
    fn contains(&self, key: &str) -> bool {
        matches!(self.get(key), Ok(Some(_)))
    }
}

/// In-memory store for tests and local runs.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    values: RwLock<FxHashMap<String, String>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().map_err(|_| StorageError::LockPoisoned)?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().map_err(|_| StorageError::LockPoisoned)?;
        values.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_roundtrip() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("arcane_dust").unwrap(), None);
        assert!(!store.contains("arcane_dust"));

        store.set("arcane_dust", "12").unwrap();
        assert_eq!(store.get("arcane_dust").unwrap().as_deref(), Some("12"));
        assert!(store.contains("arcane_dust"));

        store.set("arcane_dust", "30").unwrap();
        assert_eq!(store.get("arcane_dust").unwrap().as_deref(), Some("30"));

        store.remove("arcane_dust").unwrap();
        store.remove("arcane_dust").unwrap();
        assert!(!store.contains("arcane_dust"));
    }

    #[test]
    fn test_store_by_reference() {
        let store = InMemoryStore::new();
        let borrowed: &InMemoryStore = &store;
        borrowed.set("longest_run", "3").unwrap();
        assert_eq!(store.get("longest_run").unwrap().as_deref(), Some("3"));
    }
}
