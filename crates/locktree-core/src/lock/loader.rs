//! Lockfile byte loading.
//!
//! Validates that a path refers to a readable regular file before any
//! read attempt.

use std::fs;
use std::path::Path;

use super::error::LockError;

/// Read the raw bytes of a lockfile from `path`.
///
/// The path must be non-empty and resolve to a regular file; directories,
/// devices, and dangling symlinks are rejected before any read attempt.
///
/// # Errors
/// Returns `LockError` when the path is empty, cannot be resolved, is not
/// a regular file, or cannot be read.
pub fn load_lock_bytes(path: &Path) -> Result<Vec<u8>, LockError> {
    if path.as_os_str().is_empty() {
        return Err(LockError::PathEmpty);
    }

    let metadata = fs::metadata(path).map_err(|e| LockError::PathUnresolved {
        path: path.to_path_buf(),
        source: e,
    })?;

    if !metadata.is_file() {
        return Err(LockError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    fs::read(path).map_err(|e| LockError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
