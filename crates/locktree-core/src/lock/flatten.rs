//! Dependency graph flattening.
//!
//! Walks the nested requirement/dependency tree of a decoded lockfile and
//! produces the ordered list of every package reachable from the
//! project's direct and development dependencies, each tagged with its
//! resolved version.
//!
//! Two traversal rules apply and are deliberately distinct:
//! - root and `requires` edges are explored once per name (first visit);
//! - nested-dependency edges are explored on every encounter, because a
//!   name can be visited from one path while its edges at a different
//!   path are still unexplored.
//!
//! The visited set tracks names, not `(name, version)` pairs. A name
//! already visited still contributes an occurrence from a nested edge
//! when it carries a version not seen for that name yet; this is how a
//! second, differently-versioned installation of the same package at a
//! different tree position is represented.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::document::{LockDocument, NestedDependency};

/// Schema version for flatten output.
pub const FLATTEN_SCHEMA_VERSION: u32 = 1;

/// One confirmed reachable package instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Package name (e.g., "react" or "@types/node").
    pub name: String,
    /// Resolved version, copied verbatim from the table or nested node
    /// that produced it.
    pub version: String,
}

impl Occurrence {
    /// Create a new occurrence.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Options for the flattening traversal.
#[derive(Debug, Clone)]
pub struct FlattenOptions {
    /// Include the root `devDependencies` set (default true).
    pub include_dev: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self { include_dev: true }
    }
}

/// Result of one flattening traversal.
#[derive(Debug, Clone, Default)]
pub struct FlattenReport {
    /// Reachable packages in first-discovery order. Not a set: the same
    /// name may appear more than once with differing versions.
    pub occurrences: Vec<Occurrence>,
    /// Names queued for edge exploration at least once.
    pub visited: HashSet<String>,
}

impl FlattenReport {
    /// Check whether a name was visited during the traversal.
    #[must_use]
    pub fn is_visited(&self, name: &str) -> bool {
        self.visited.contains(name)
    }
}

/// Flatten the reachable dependency tree of `doc` with default options.
#[must_use]
pub fn flatten(doc: &LockDocument) -> Vec<Occurrence> {
    flatten_with_options(doc, &FlattenOptions::default()).occurrences
}

/// Flatten the reachable dependency tree of `doc`.
///
/// Starts from the root entry's `dependencies` names, then (when enabled)
/// its `devDependencies` names. Each top-level name's reachable subtree
/// is fully explored depth-first before the next name is started. A
/// document without a root entry yields an empty report.
#[must_use]
pub fn flatten_with_options(doc: &LockDocument, opts: &FlattenOptions) -> FlattenReport {
    let mut visited: HashSet<String> = HashSet::new();
    let mut occurrences: Vec<Occurrence> = Vec::new();

    let Some(root) = doc.root_entry() else {
        return FlattenReport::default();
    };

    for name in root.dependencies.keys() {
        resolve_root(name, doc, &mut visited, &mut occurrences);
    }

    if opts.include_dev {
        for name in root.dev_dependencies.keys() {
            resolve_root(name, doc, &mut visited, &mut occurrences);
        }
    }

    FlattenReport {
        occurrences,
        visited,
    }
}

/// Resolve one name against the flat root table.
///
/// Root edges are explored once: a name already visited, or absent from
/// the table, is skipped without an occurrence.
fn resolve_root(
    name: &str,
    doc: &LockDocument,
    visited: &mut HashSet<String>,
    occurrences: &mut Vec<Occurrence>,
) {
    if visited.contains(name) {
        return;
    }
    let Some(entry) = doc.root_dependency(name) else {
        return;
    };

    visited.insert(name.to_string());
    occurrences.push(Occurrence::new(name, entry.version.as_str()));

    if let Some(requires) = &entry.requires {
        resolve_requirements(requires, doc, visited, occurrences);
    }
    if let Some(nested) = &entry.dependencies {
        resolve_nested(nested, doc, visited, occurrences);
    }
}

/// Resolve the `requires` edges of one package.
///
/// Requirement edges resolve exclusively against the flat root table,
/// never against a sibling's nested sub-tree. The range strings are not
/// consulted.
fn resolve_requirements(
    requires: &BTreeMap<String, String>,
    doc: &LockDocument,
    visited: &mut HashSet<String>,
    occurrences: &mut Vec<Occurrence>,
) {
    for name in requires.keys() {
        if !visited.contains(name) {
            resolve_root(name, doc, visited, occurrences);
        }
    }
}

/// Walk a nested-dependency sub-tree.
///
/// Runs for every occurrence of a name, visited or not: the membership
/// decision only controls whether an occurrence is recorded, while the
/// node's own `requires` and nested edges are always explored.
fn resolve_nested(
    nested: &BTreeMap<String, NestedDependency>,
    doc: &LockDocument,
    visited: &mut HashSet<String>,
    occurrences: &mut Vec<Occurrence>,
) {
    for (name, node) in nested {
        if visited.insert(name.clone()) {
            occurrences.push(Occurrence::new(name.as_str(), node.version.as_str()));
        } else {
            // Same name seen before: suppress only an exact name+version
            // duplicate.
            let seen = occurrences
                .iter()
                .any(|o| o.name == *name && o.version == node.version);
            if !seen {
                occurrences.push(Occurrence::new(name.as_str(), node.version.as_str()));
            }
        }

        if let Some(requires) = &node.requires {
            resolve_requirements(requires, doc, visited, occurrences);
        }
        if let Some(sub) = &node.dependencies {
            resolve_nested(sub, doc, visited, occurrences);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(value: serde_json::Value) -> LockDocument {
        serde_json::from_value(value).unwrap()
    }

    fn names(occurrences: &[Occurrence]) -> Vec<&str> {
        occurrences.iter().map(|o| o.name.as_str()).collect()
    }

    #[test]
    fn test_requires_cycle_terminates() {
        let doc = doc(serde_json::json!({
            "packages": { "": { "dependencies": { "a": "^1.0.0" } } },
            "dependencies": {
                "a": { "version": "1.0.0", "requires": { "b": "^2.0.0" } },
                "b": { "version": "2.0.0", "requires": { "a": "^1.0.0" } }
            }
        }));

        let report = flatten_with_options(&doc, &FlattenOptions::default());

        assert_eq!(
            report.occurrences,
            vec![
                Occurrence::new("a", "1.0.0"),
                Occurrence::new("b", "2.0.0"),
            ]
        );
        assert_eq!(report.visited.len(), 2);
    }

    #[test]
    fn test_root_reachability() {
        let doc = doc(serde_json::json!({
            "packages": { "": { "dependencies": { "a": "^1.0.0", "b": "^2.0.0" } } },
            "dependencies": {
                "a": { "version": "1.0.0" },
                "b": { "version": "2.0.0" }
            }
        }));

        let occurrences = flatten(&doc);
        assert!(occurrences.contains(&Occurrence::new("a", "1.0.0")));
        assert!(occurrences.contains(&Occurrence::new("b", "2.0.0")));
    }

    #[test]
    fn test_missing_root_dependency_skipped() {
        let doc = doc(serde_json::json!({
            "packages": { "": { "dependencies": { "a": "^1.0.0", "ghost": "^9.0.0" } } },
            "dependencies": {
                "a": { "version": "1.0.0" }
            }
        }));

        let report = flatten_with_options(&doc, &FlattenOptions::default());
        assert_eq!(names(&report.occurrences), vec!["a"]);
        assert!(!report.is_visited("ghost"));
    }

    #[test]
    fn test_nested_same_version_deduplicated() {
        let doc = doc(serde_json::json!({
            "packages": { "": { "dependencies": { "a": "^1.0.0", "b": "^1.0.0" } } },
            "dependencies": {
                "a": {
                    "version": "1.0.0",
                    "dependencies": { "shared": { "version": "1.0.0" } }
                },
                "b": {
                    "version": "1.0.0",
                    "dependencies": { "shared": { "version": "1.0.0" } }
                }
            }
        }));

        let occurrences = flatten(&doc);
        let shared: Vec<_> = occurrences.iter().filter(|o| o.name == "shared").collect();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].version, "1.0.0");
    }

    #[test]
    fn test_nested_multi_version_preserved() {
        let doc = doc(serde_json::json!({
            "packages": { "": { "dependencies": { "a": "^1.0.0", "b": "^1.0.0" } } },
            "dependencies": {
                "a": {
                    "version": "1.0.0",
                    "dependencies": { "shared": { "version": "1.0.0" } }
                },
                "b": {
                    "version": "1.0.0",
                    "dependencies": { "shared": { "version": "2.0.0" } }
                }
            }
        }));

        let occurrences = flatten(&doc);
        let shared: Vec<_> = occurrences
            .iter()
            .filter(|o| o.name == "shared")
            .map(|o| o.version.as_str())
            .collect();
        assert_eq!(shared, vec!["1.0.0", "2.0.0"]);
    }

    #[test]
    fn test_requires_resolved_against_root_table_only() {
        // "hidden" exists only inside a's nested sub-tree; a itself is
        // never traversed, so b's requires edge finds nothing.
        let doc = doc(serde_json::json!({
            "packages": { "": { "dependencies": { "b": "^1.0.0" } } },
            "dependencies": {
                "a": {
                    "version": "1.0.0",
                    "dependencies": { "hidden": { "version": "1.0.0" } }
                },
                "b": { "version": "1.0.0", "requires": { "hidden": "^1.0.0" } }
            }
        }));

        let report = flatten_with_options(&doc, &FlattenOptions::default());
        assert_eq!(names(&report.occurrences), vec!["b"]);
        assert!(!report.is_visited("hidden"));
    }

    #[test]
    fn test_requires_chain_from_root_table() {
        let doc = doc(serde_json::json!({
            "packages": { "": { "dependencies": { "a": "^1.0.0" } } },
            "dependencies": {
                "a": { "version": "1.0.0", "requires": { "b": "^2.0.0" } },
                "b": { "version": "2.0.0" }
            }
        }));

        assert_eq!(
            flatten(&doc),
            vec![
                Occurrence::new("a", "1.0.0"),
                Occurrence::new("b", "2.0.0"),
            ]
        );
    }

    #[test]
    fn test_nested_self_reference_not_duplicated() {
        let doc = doc(serde_json::json!({
            "packages": { "": { "dependencies": { "a": "^1.0.0" } } },
            "dependencies": {
                "a": {
                    "version": "1.0.0",
                    "dependencies": {
                        "c": {
                            "version": "3.0.0",
                            "dependencies": { "a": { "version": "1.0.0" } }
                        }
                    }
                }
            }
        }));

        assert_eq!(
            flatten(&doc),
            vec![
                Occurrence::new("a", "1.0.0"),
                Occurrence::new("c", "3.0.0"),
            ]
        );
    }

    #[test]
    fn test_nested_edges_explored_on_revisit() {
        // "a" is visited at the top level before b's nested copy of it is
        // reached; the copy's own sub-tree must still be explored.
        let doc = doc(serde_json::json!({
            "packages": { "": { "dependencies": { "a": "^1.0.0", "b": "^2.0.0" } } },
            "dependencies": {
                "a": { "version": "1.0.0" },
                "b": {
                    "version": "2.0.0",
                    "dependencies": {
                        "a": {
                            "version": "1.0.0",
                            "dependencies": { "leaf": { "version": "4.0.0" } }
                        }
                    }
                }
            }
        }));

        let occurrences = flatten(&doc);
        assert_eq!(
            occurrences,
            vec![
                Occurrence::new("a", "1.0.0"),
                Occurrence::new("b", "2.0.0"),
                Occurrence::new("leaf", "4.0.0"),
            ]
        );
    }

    #[test]
    fn test_nested_requires_resolved() {
        let doc = doc(serde_json::json!({
            "packages": { "": { "dependencies": { "a": "^1.0.0" } } },
            "dependencies": {
                "a": {
                    "version": "1.0.0",
                    "dependencies": {
                        "inner": { "version": "1.5.0", "requires": { "b": "^2.0.0" } }
                    }
                },
                "b": { "version": "2.0.0" }
            }
        }));

        assert_eq!(
            flatten(&doc),
            vec![
                Occurrence::new("a", "1.0.0"),
                Occurrence::new("inner", "1.5.0"),
                Occurrence::new("b", "2.0.0"),
            ]
        );
    }

    #[test]
    fn test_dev_dependencies_follow_runtime() {
        let doc = doc(serde_json::json!({
            "packages": {
                "": {
                    "dependencies": { "a": "^1.0.0" },
                    "devDependencies": { "z": "^5.0.0" }
                }
            },
            "dependencies": {
                "a": { "version": "1.0.0" },
                "z": { "version": "5.0.0" }
            }
        }));

        assert_eq!(
            flatten(&doc),
            vec![
                Occurrence::new("a", "1.0.0"),
                Occurrence::new("z", "5.0.0"),
            ]
        );

        let no_dev = flatten_with_options(&doc, &FlattenOptions { include_dev: false });
        assert_eq!(names(&no_dev.occurrences), vec!["a"]);
        assert!(!no_dev.is_visited("z"));
    }

    #[test]
    fn test_dev_name_already_visited_not_repeated() {
        let doc = doc(serde_json::json!({
            "packages": {
                "": {
                    "dependencies": { "a": "^1.0.0" },
                    "devDependencies": { "a": "^1.0.0" }
                }
            },
            "dependencies": { "a": { "version": "1.0.0" } }
        }));

        assert_eq!(flatten(&doc), vec![Occurrence::new("a", "1.0.0")]);
    }

    #[test]
    fn test_missing_root_entry_yields_empty_report() {
        let doc = doc(serde_json::json!({
            "packages": {},
            "dependencies": { "a": { "version": "1.0.0" } }
        }));

        let report = flatten_with_options(&doc, &FlattenOptions::default());
        assert!(report.occurrences.is_empty());
        assert!(report.visited.is_empty());
    }

    #[test]
    fn test_empty_document() {
        let report = flatten_with_options(&LockDocument::default(), &FlattenOptions::default());
        assert!(report.occurrences.is_empty());
    }
}
