//! Storage backend factory.
//!
//! Creates the appropriate storage backend based on configuration.

use std::sync::Arc;

use tracing::info;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::AppError;
use crate::storage::file::FileStore;
use crate::storage::memory::MemoryStore;
use crate::storage::traits::NumberStore;

/// Create a storage backend based on configuration.
///
/// # Errors
///
/// Returns an error if the storage backend cannot be initialized or fails
/// its first health check.
pub async fn create_storage(config: &StorageConfig) -> Result<Arc<dyn NumberStore>, AppError> {
    let store: Arc<dyn NumberStore> = match config.backend {
        StorageBackend::File => {
            let store = FileStore::new(&config.file, &config.key)?;
            info!(path = %store.data_path().display(), "Using file storage");
            Arc::new(store)
        }
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };

    store.health_check().await?;

    Ok(store)
}
