#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod lock;
pub mod version;

pub use lock::{
    flatten, flatten_with_options, load_lock_bytes, lock_codes, FlattenOptions, FlattenReport,
    LockDocument, LockError, NestedDependency, Occurrence, PackageEntry, RootDependency,
    FLATTEN_SCHEMA_VERSION, LOCKFILE_NAME,
};
pub use version::VERSION;
