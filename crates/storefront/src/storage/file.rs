//! File-backed key-value store.
//!
//! Each key is a file named after the key inside the store directory.
//! Writes go to `{key}.tmp` first and are renamed into place, so a crash
//! mid-write leaves the previous value intact.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, instrument};

use super::{KeyValueStore, StorageError, validate_key};

/// Key-value store persisting each key to its own file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`.
    ///
    /// The directory is created lazily on the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the store's files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;

        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored value");
                Ok(None)
            }
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    #[instrument(skip(self, value), fields(dir = %self.dir.display(), bytes = value.len()))]
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let final_path = self.slot_path(key)?;
        let temp_path = self.dir.join(format!("{key}.tmp"));

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::io(&self.dir, e))?;

        fs::write(&temp_path, value.as_bytes())
            .await
            .map_err(|e| StorageError::io(&temp_path, e))?;

        fs::rename(&temp_path, &final_path)
            .await
            .map_err(|e| StorageError::io(&final_path, e))?;

        Ok(())
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp_dir: &TempDir) -> FileStore {
        FileStore::new(temp_dir.path().join("store"))
    }

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        assert!(store.get("cart").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_creates_directory_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.set("cart", "[]").await.unwrap();

        assert!(store.dir().is_dir());
        assert_eq!(store.get("cart").await.unwrap().as_deref(), Some("[]"));
        assert!(!store.dir().join("cart.tmp").exists());
    }

    #[tokio::test]
    async fn set_replaces_previous_value() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.set("accessToken", "first").await.unwrap();
        store.set("accessToken", "second").await.unwrap();

        assert_eq!(
            store.get("accessToken").await.unwrap().as_deref(),
            Some("second")
        );
    }

    #[tokio::test]
    async fn values_survive_a_new_store_instance() {
        let temp_dir = TempDir::new().unwrap();
        store_in(&temp_dir).set("cart", "[1]").await.unwrap();

        let reopened = store_in(&temp_dir);
        assert_eq!(reopened.get("cart").await.unwrap().as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.set("accessToken", "token").await.unwrap();
        store.remove("accessToken").await.unwrap();
        store.remove("accessToken").await.unwrap();

        assert!(store.get("accessToken").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let result = store.set("../outside", "x").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
