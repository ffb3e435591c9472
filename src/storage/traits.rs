//! Storage trait definitions.
//!
//! The number registry is persisted as one list-valued key. Backends only
//! need to load and overwrite that list; ordering and de-duplication are the
//! registry's concern.

use async_trait::async_trait;

use crate::domain::PhoneNumber;
use crate::error::StorageResult;

/// Persistence for the number registry.
#[async_trait]
pub trait NumberStore: Send + Sync {
    /// Load the persisted list.
    ///
    /// Returns `None` if nothing has been stored under the key yet, which is
    /// different from an empty list that an administrator saved on purpose.
    async fn load(&self) -> StorageResult<Option<Vec<PhoneNumber>>>;

    /// Durably overwrite the persisted list.
    ///
    /// Must not return `Ok` before the data would survive a process restart.
    async fn save(&self, numbers: &[PhoneNumber]) -> StorageResult<()>;

    /// Check if the storage backend is healthy and reachable.
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend name.
    fn backend_name(&self) -> &'static str;
}
