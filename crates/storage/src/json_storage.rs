//! JSON file storage implementation.
//!
//! Each key is stored as a single file `<root>/<key>.json` holding the raw
//! value. The directory plays the role of the browser's local storage for one
//! client installation.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use super::{KeyValueStore, StorageError, Result};

/// File-based key-value backend.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create storage rooted at `root`, creating the directory if needed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory holding the key files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn item_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || key.contains(|c: char| c == '/' || c == '\\')
            || key.starts_with('.')
        {
            return Err(StorageError::Other(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.item_path(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;
        fs::write(&path, value.as_bytes())?;
        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        fs::remove_file(self.item_path(key)?).or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        assert_eq!(store.get_item("exerciseCompletion").unwrap(), None);
    }

    #[test]
    fn test_set_item_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested")).unwrap();
        store.set_item("exerciseCompletion", "{}").unwrap();

        let reopened = JsonFileStore::new(dir.path().join("nested")).unwrap();
        assert_eq!(
            reopened.get_item("exerciseCompletion").unwrap().as_deref(),
            Some("{}")
        );
        assert!(dir.path().join("nested").join("exerciseCompletion.json").exists());
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path()).unwrap();
        store.set_item("k", "v").unwrap();
        store.remove_item("k").unwrap();
        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path()).unwrap();
        assert!(matches!(store.set_item("../escape", "v"), Err(StorageError::Other(_))));
        assert!(matches!(store.get_item(""), Err(StorageError::Other(_))));
    }
}
