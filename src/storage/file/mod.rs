//! File-based storage backend.
//!
//! Stores the registry as a JSON array in `{data_dir}/{key}.json`. Writes go
//! to a temporary file that is fsynced and renamed over the target, so a
//! crash mid-write leaves the previous list intact.
//!
//! Directory structure:
//! ```text
//! data/
//! ├── {key}.json
//! └── {key}.lock
//! ```

mod lock;

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config::FileStorageConfig;
use crate::domain::PhoneNumber;
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::NumberStore;

pub use lock::FileLock;

/// File-based number store.
#[derive(Debug)]
pub struct FileStore {
    /// Base data directory.
    base_dir: PathBuf,
    /// Registry file.
    data_path: PathBuf,
    /// Lock file guarding `data_path`.
    lock_path: PathBuf,
}

impl FileStore {
    /// Create a new file store for the given key.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn new(config: &FileStorageConfig, key: &str) -> StorageResult<Self> {
        let base_dir = config.data_dir.clone();

        std::fs::create_dir_all(&base_dir).map_err(|e| {
            StorageError::FileIO(format!(
                "Failed to create directory {}: {e}",
                base_dir.display()
            ))
        })?;

        Ok(Self {
            data_path: base_dir.join(format!("{key}.json")),
            lock_path: base_dir.join(format!("{key}.lock")),
            base_dir,
        })
    }

    /// Path of the registry file.
    #[must_use]
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    fn read_list(&self) -> StorageResult<Option<Vec<PhoneNumber>>> {
        let _guard = FileLock::shared(&self.lock_path)?;

        let bytes = match std::fs::read(&self.data_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let numbers: Vec<PhoneNumber> = serde_json::from_slice(&bytes)?;
        Ok(Some(numbers))
    }

    fn write_list(&self, numbers: &[PhoneNumber]) -> StorageResult<()> {
        let _guard = FileLock::exclusive(&self.lock_path)?;

        let tmp_path = self.data_path.with_extension("json.tmp");
        {
            let mut file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&tmp_path)?;
            serde_json::to_writer_pretty(&file, numbers)?;
            file.write_all(b"\n")?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp_path, &self.data_path)?;

        // Make the rename itself durable
        #[cfg(unix)]
        std::fs::File::open(&self.base_dir)?.sync_all()?;

        Ok(())
    }
}

#[async_trait]
impl NumberStore for FileStore {
    async fn load(&self) -> StorageResult<Option<Vec<PhoneNumber>>> {
        self.read_list()
    }

    async fn save(&self, numbers: &[PhoneNumber]) -> StorageResult<()> {
        self.write_list(numbers)
    }

    async fn health_check(&self) -> StorageResult<()> {
        if !self.base_dir.exists() {
            return Err(StorageError::Unavailable);
        }

        let test_file = self.base_dir.join(".health_check");
        tokio::fs::write(&test_file, b"ok")
            .await
            .map_err(|e| StorageError::FileIO(format!("Health check failed: {e}")))?;
        tokio::fs::remove_file(&test_file)
            .await
            .map_err(|e| StorageError::FileIO(format!("Health check cleanup failed: {e}")))?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_all;
    use tempfile::TempDir;

    fn create_test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = FileStorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
        };
        let store = FileStore::new(&config, "numbers").unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_health_check() {
        let (store, _temp) = create_test_store();
        assert!(store.health_check().await.is_ok());
        assert_eq!(store.backend_name(), "file");
    }

    #[tokio::test]
    async fn test_missing_file_loads_as_unset() {
        let (store, _temp) = create_test_store();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let (store, temp) = create_test_store();
        let numbers = parse_all(["+15550001", "+15550002"]).unwrap();

        store.save(&numbers).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(numbers.clone()));

        // A second store over the same directory sees the same list
        let config = FileStorageConfig {
            data_dir: temp.path().to_path_buf(),
        };
        let reopened = FileStore::new(&config, "numbers").unwrap();
        assert_eq!(reopened.load().await.unwrap(), Some(numbers));
        assert!(!store.data_path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_is_plain_json_array() {
        let (store, _temp) = create_test_store();
        store.save(&parse_all(["+1555"]).unwrap()).await.unwrap();

        let raw = std::fs::read_to_string(store.data_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!(["+1555"]));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let (store, _temp) = create_test_store();
        std::fs::write(store.data_path(), b"not json").unwrap();

        assert!(matches!(
            store.load().await,
            Err(StorageError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_save_fails_when_directory_is_gone() {
        let (store, temp) = create_test_store();
        let path = temp.path().to_path_buf();
        drop(temp);
        assert!(!path.exists());

        assert!(store.save(&parse_all(["+1555"]).unwrap()).await.is_err());
    }
}
