//! Storage layer module.
//!
//! Trait-based persistence for the number registry so the backend can be
//! swapped without touching routing or API code.

pub mod factory;
pub mod file;
pub mod memory;
pub mod traits;

pub use crate::error::StorageError;
pub use factory::create_storage;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::NumberStore;
