//! Lockfile document model.
//!
//! Typed view of npm's `package-lock.json`: a flat table of resolved
//! packages plus a nested tree of per-package dependency edges.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "name": "my-project",
//!   "version": "1.0.0",
//!   "lockfileVersion": 2,
//!   "requires": true,
//!   "packages": { "": { "dependencies": { ... }, "devDependencies": { ... } } },
//!   "dependencies": { "react": { "version": "18.2.0", "requires": { ... } } }
//! }
//! ```
//!
//! Missing keys decode to empty values; a present key of the wrong JSON
//! type is a decode error. The document is immutable once decoded and is
//! passed by shared reference into the flattening engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::error::LockError;
use super::loader::load_lock_bytes;

/// Default lockfile filename.
pub const LOCKFILE_NAME: &str = "package-lock.json";

/// The decoded lockfile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LockDocument {
    /// Project name.
    #[serde(default)]
    pub name: String,
    /// Project version.
    #[serde(default)]
    pub version: String,
    /// Lockfile schema version number.
    #[serde(default)]
    pub lockfile_version: u32,
    /// Legacy npm flag; decoded but not consulted.
    #[serde(default)]
    pub requires: bool,
    /// Flat mapping from package path to entry. Only the root entry,
    /// keyed by the empty path, is consulted by the flattening engine.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub packages: BTreeMap<String, PackageEntry>,
    /// The resolved, flattened table the package manager produced; the
    /// lookup table the flattening engine traverses against.
    #[serde(default, rename = "dependencies", skip_serializing_if = "BTreeMap::is_empty")]
    pub root_dependencies: BTreeMap<String, RootDependency>,
}

/// One entry in the `packages` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PackageEntry {
    /// Package name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Package version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Declared dependencies (name -> version range).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,
    /// Declared development dependencies (name -> version range).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dev_dependencies: BTreeMap<String, String>,
    /// Declared requirement edges (name -> version range).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requires: BTreeMap<String, String>,
}

/// One entry in the flat resolved table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RootDependency {
    /// Resolved version string.
    #[serde(default)]
    pub version: String,
    /// This package's own nested sub-tree, present when the package
    /// manager nested rather than hoisted a transitive dependency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<BTreeMap<String, NestedDependency>>,
    /// Development dependency ranges; decoded for shape fidelity, not
    /// consulted by the traversal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<BTreeMap<String, String>>,
    /// Requirement edges: names this package declares a need for,
    /// resolved elsewhere in the flat table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<BTreeMap<String, String>>,
}

/// A dependency nested inside another package's sub-tree.
///
/// Structurally a [`RootDependency`] minus the devDependencies concept;
/// nested sub-maps recurse to unbounded depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NestedDependency {
    /// Resolved version string.
    #[serde(default)]
    pub version: String,
    /// Nested sub-tree of this dependency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<BTreeMap<String, NestedDependency>>,
    /// Requirement edges, resolved against the flat root table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<BTreeMap<String, String>>,
}

impl LockDocument {
    /// Get the project's own entry: the `packages` entry at the empty path.
    #[must_use]
    pub fn root_entry(&self) -> Option<&PackageEntry> {
        self.packages.get("")
    }

    /// Look up a package in the flat resolved table.
    #[must_use]
    pub fn root_dependency(&self, name: &str) -> Option<&RootDependency> {
        self.root_dependencies.get(name)
    }

    /// Decode a lockfile from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not structurally valid JSON or
    /// carry wrongly-typed fields.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, LockError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Decode a lockfile from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn from_json(json: &str) -> Result<Self, LockError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load and decode a lockfile from a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn read_from(path: &Path) -> Result<Self, LockError> {
        let bytes = load_lock_bytes(path)?;
        Self::from_slice(&bytes)
    }

    /// Serialize to JSON string.
    ///
    /// # Panics
    /// Panics if serialization fails (should not happen with valid data).
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("LockDocument serialization should not fail")
    }
}
