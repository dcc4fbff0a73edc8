//! Import graph snapshot schema.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Schema tag of the persisted graph; bump on any breaking change.
pub const GRAPH_VERSION: u32 = 1;

/// Per-file forward edges.
///
/// `imports` holds relative paths of in-tree files this file imports,
/// deduplicated and sorted. External/library imports are never recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub imports: Vec<String>,
}

/// Versioned, immutable import-graph snapshot.
///
/// All paths in `files` (keys and edge targets) are relative to `root_dir`.
/// Every edge target is also a key of `files`; the graph may contain cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportGraph {
    pub version: u32,
    pub root_dir: String,
    pub generated_at: String,
    pub files: BTreeMap<String, FileNode>,
}

impl ImportGraph {
    /// Total number of edges, mostly for reporting.
    pub fn edge_count(&self) -> usize {
        self.files.values().map(|n| n.imports.len()).sum()
    }

    /// Check the no-dangling-edges invariant; returns offending targets.
    pub fn dangling_edges(&self) -> Vec<&str> {
        let keys: BTreeSet<&str> = self.files.keys().map(String::as_str).collect();
        self.files
            .values()
            .flat_map(|n| n.imports.iter())
            .filter(|t| !keys.contains(t.as_str()))
            .map(String::as_str)
            .collect()
    }
}
