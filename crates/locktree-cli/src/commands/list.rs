//! `locktree list` command implementation.

use locktree_core::lock::{
    flatten_with_options, FlattenOptions, LockDocument, Occurrence, FLATTEN_SCHEMA_VERSION,
};
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

/// List command action.
#[derive(Debug, Clone)]
pub struct ListAction {
    pub path: PathBuf,
    pub include_dev: bool,
}

/// List result for JSON output.
#[derive(Serialize)]
struct ListResult {
    ok: bool,
    schema_version: u32,
    lockfile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    root: Option<RootInfo>,
    packages: Vec<Occurrence>,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Root project info for JSON output.
#[derive(Serialize)]
struct RootInfo {
    name: String,
    version: String,
}

pub fn run(action: &ListAction, json: bool) -> Result<()> {
    let doc = match LockDocument::read_from(&action.path) {
        Ok(doc) => doc,
        Err(e) => {
            if json {
                let result = ListResult {
                    ok: false,
                    schema_version: FLATTEN_SCHEMA_VERSION,
                    lockfile: action.path.display().to_string(),
                    root: None,
                    packages: Vec::new(),
                    count: 0,
                    code: Some(e.code()),
                    error: Some(e.to_string()),
                };
                println!("{}", serde_json::to_string_pretty(&result).unwrap());
            } else {
                eprintln!("error: {e}");
            }
            std::process::exit(1);
        }
    };

    let opts = FlattenOptions {
        include_dev: action.include_dev,
    };
    let report = flatten_with_options(&doc, &opts);

    tracing::debug!(
        packages = report.occurrences.len(),
        visited = report.visited.len(),
        "flattened lockfile"
    );

    if json {
        let count = report.occurrences.len();
        let result = ListResult {
            ok: true,
            schema_version: FLATTEN_SCHEMA_VERSION,
            lockfile: action.path.display().to_string(),
            root: Some(RootInfo {
                name: doc.name.clone(),
                version: doc.version.clone(),
            }),
            packages: report.occurrences,
            count,
            code: None,
            error: None,
        };
        println!("{}", serde_json::to_string_pretty(&result).unwrap());
    } else {
        for occ in &report.occurrences {
            println!("{}@{}", occ.name, occ.version);
        }
        let count = report.occurrences.len();
        if count == 1 {
            println!("\n1 package");
        } else {
            println!("\n{count} packages");
        }
    }

    Ok(())
}
