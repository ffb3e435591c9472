//! Advisory file locks.
//!
//! Uses `flock` via `fs2` so that two processes pointed at the same data
//! directory never interleave a read with a half-finished write.
//! Note: file locks may not work correctly on all network filesystems.

use std::fs::{File, OpenOptions};
use std::path::Path;

use fs2::FileExt;

use crate::error::{StorageError, StorageResult};

/// Held lock on a lock file; released on drop.
#[derive(Debug)]
pub struct FileLock {
    file: File,
}

impl FileLock {
    /// Block until an exclusive lock on `path` is held.
    pub fn exclusive(path: &Path) -> StorageResult<Self> {
        let file = open_lock_file(path)?;
        file.lock_exclusive()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;
        Ok(Self { file })
    }

    /// Block until a shared lock on `path` is held.
    pub fn shared(path: &Path) -> StorageResult<Self> {
        let file = open_lock_file(path)?;
        file.lock_shared()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;
        Ok(Self { file })
    }

    /// Try to take an exclusive lock without waiting.
    ///
    /// Returns `None` if another handle holds the lock.
    #[cfg(test)]
    pub fn try_exclusive(path: &Path) -> StorageResult<Option<Self>> {
        let file = open_lock_file(path)?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self { file })),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(StorageError::LockFailed(e.to_string())),
        }
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Closing the descriptor releases the lock anyway
        let _ = FileExt::unlock(&self.file);
    }
}

fn open_lock_file(path: &Path) -> StorageResult<File> {
    Ok(OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exclusive_blocks_try() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("numbers.lock");

        let guard = FileLock::exclusive(&path).unwrap();
        assert!(FileLock::try_exclusive(&path).unwrap().is_none());

        drop(guard);
        assert!(FileLock::try_exclusive(&path).unwrap().is_some());
    }

    #[test]
    fn test_shared_locks_coexist() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("numbers.lock");

        let _a = FileLock::shared(&path).unwrap();
        let _b = FileLock::shared(&path).unwrap();
        assert!(FileLock::try_exclusive(&path).unwrap().is_none());
    }
}
