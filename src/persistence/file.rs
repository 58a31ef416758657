//! File-backed key-value store.

use std::fs;
use std::path::{Path, PathBuf};

use super::store::{KeyValueStore, Result, StorageError};

/// One file per key under a base directory.
///
/// # File Format
///
/// Each key is stored as `{key}.val` holding the raw value. Writes go to
/// `{key}.val.tmp` first and are renamed into place, so a crash never
/// leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn value_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.base_dir.join(format!("{key}.val")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)?;
        tracing::debug!(key, path = %path.display(), "loaded value");
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key)?;
        let temp_path = path.with_extension("val.tmp");

        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(key, bytes = value.len(), path = %path.display(), "saved value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.value_path(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(key, "removed value");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        assert_eq!(store.get("owned_artefacts").unwrap(), None);
        store.set("owned_artefacts", r#"["Ring"]"#).unwrap();
        assert_eq!(store.get("owned_artefacts").unwrap().as_deref(), Some(r#"["Ring"]"#));
        assert!(dir.path().join("owned_artefacts.val").exists());
        assert!(!dir.path().join("owned_artefacts.val.tmp").exists());

        store.remove("owned_artefacts").unwrap();
        assert_eq!(store.get("owned_artefacts").unwrap(), None);
        store.remove("owned_artefacts").unwrap();
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        FileStore::new(dir.path()).unwrap().set("longest_run", "4").unwrap();

        let reopened = FileStore::new(dir.path()).unwrap();
        assert_eq!(reopened.get("longest_run").unwrap().as_deref(), Some("4"));
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        assert!(matches!(store.set("../escape", "x"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(store.get(""), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_creates_nested_base_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("profiles").join("default");
        let store = FileStore::new(&nested).unwrap();
        store.set("arcane_dust", "1").unwrap();
        assert_eq!(store.base_dir(), nested.as_path());
    }
}
