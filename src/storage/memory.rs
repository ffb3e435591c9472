//! In-memory storage backend.
//!
//! Keeps the list in process memory only. Useful for tests and for
//! deployments where the registry is seeded from configuration on every
//! start.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::PhoneNumber;
use crate::error::StorageResult;
use crate::storage::traits::NumberStore;

/// Volatile number store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    numbers: RwLock<Option<Vec<PhoneNumber>>>,
}

impl MemoryStore {
    /// Create an empty store with no list saved.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a saved list.
    #[must_use]
    pub fn with_numbers(numbers: Vec<PhoneNumber>) -> Self {
        Self {
            numbers: RwLock::new(Some(numbers)),
        }
    }
}

#[async_trait]
impl NumberStore for MemoryStore {
    async fn load(&self) -> StorageResult<Option<Vec<PhoneNumber>>> {
        Ok(self.numbers.read().clone())
    }

    async fn save(&self, numbers: &[PhoneNumber]) -> StorageResult<()> {
        *self.numbers.write() = Some(numbers.to_vec());
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
