//! Lockfile error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Lockfile error codes.
pub mod codes {
    /// Lockfile path is empty.
    pub const LOCK_PATH_EMPTY: &str = "LOCK_PATH_EMPTY";
    /// Lockfile path cannot be resolved.
    pub const LOCK_PATH_UNRESOLVED: &str = "LOCK_PATH_UNRESOLVED";
    /// Lockfile path does not refer to a regular file.
    pub const LOCK_PATH_NOT_A_FILE: &str = "LOCK_PATH_NOT_A_FILE";
    /// Reading the lockfile failed.
    pub const LOCK_READ_FAILED: &str = "LOCK_READ_FAILED";
    /// Lockfile has invalid JSON.
    pub const LOCK_JSON_INVALID: &str = "LOCK_JSON_INVALID";
}

/// Error produced while loading or decoding a lockfile.
///
/// The flattening engine itself defines no error kind: a declared
/// dependency missing from the resolved table is a silent omission, not a
/// failure.
#[derive(Error, Debug)]
pub enum LockError {
    #[error("{}: lockfile path cannot be an empty value", codes::LOCK_PATH_EMPTY)]
    PathEmpty,

    #[error("{}: unable to resolve path '{path}': {source}", codes::LOCK_PATH_UNRESOLVED)]
    PathUnresolved {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: '{path}' is not a regular file", codes::LOCK_PATH_NOT_A_FILE)]
    NotAFile { path: PathBuf },

    #[error("{}: error reading file '{path}': {source}", codes::LOCK_READ_FAILED)]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: invalid lockfile JSON: {source}", codes::LOCK_JSON_INVALID)]
    InvalidJson {
        #[from]
        source: serde_json::Error,
    },
}

impl LockError {
    /// Get the stable error code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::PathEmpty => codes::LOCK_PATH_EMPTY,
            Self::PathUnresolved { .. } => codes::LOCK_PATH_UNRESOLVED,
            Self::NotAFile { .. } => codes::LOCK_PATH_NOT_A_FILE,
            Self::ReadFailed { .. } => codes::LOCK_READ_FAILED,
            Self::InvalidJson { .. } => codes::LOCK_JSON_INVALID,
        }
    }
}
