//! Lockfile ingestion and dependency-tree flattening.
//!
//! Provides utilities for:
//! - Loading lockfile bytes from disk with path validation
//! - Decoding `package-lock.json` into a typed document model
//! - Flattening the resolved dependency graph into `(name, version)`
//!   occurrences

pub mod document;
pub mod error;
pub mod flatten;
pub mod loader;

pub use document::{LockDocument, NestedDependency, PackageEntry, RootDependency, LOCKFILE_NAME};
pub use error::{codes as lock_codes, LockError};
pub use flatten::{
    flatten, flatten_with_options, FlattenOptions, FlattenReport, Occurrence,
    FLATTEN_SCHEMA_VERSION,
};
pub use loader::load_lock_bytes;
