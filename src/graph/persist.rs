//! Graph persistence: one JSON snapshot per project root.

use crate::graph::{ImportGraph, GRAPH_DIR, GRAPH_FILE, GRAPH_VERSION};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Well-known location of the persisted graph for a project root.
pub fn graph_path(root: &Path) -> PathBuf {
    root.join(GRAPH_DIR).join(GRAPH_FILE)
}

/// Persist a snapshot, atomically replacing any previous graph for the root.
///
/// The snapshot is written to a sibling temp file and renamed into place, so
/// readers only ever observe a complete document.
pub fn save_graph(root: &Path, graph: &ImportGraph) -> Result<PathBuf> {
    let path = graph_path(root);
    let dir = path.parent().expect("graph path has a parent");
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed creating graph directory {}", dir.display()))?;

    let json = serde_json::to_string_pretty(graph).context("Failed serializing import graph")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)
        .with_context(|| format!("Failed writing graph temp file {}", tmp.display()))?;
    fs::rename(&tmp, &path)
        .with_context(|| format!("Failed replacing graph file {}", path.display()))?;
    Ok(path)
}

/// Load the persisted graph for a root, if one exists.
///
/// A missing graph is a normal condition (`Ok(None)`); the orchestrator falls
/// back to an entry-only candidate set. A present-but-unreadable or
/// wrong-version graph is an error.
pub fn load_graph(root: &Path) -> Result<Option<ImportGraph>> {
    let path = graph_path(root);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed reading graph file {}", path.display()))
        }
    };

    let graph: ImportGraph = serde_json::from_str(&content)
        .with_context(|| format!("Invalid graph file {}", path.display()))?;
    if graph.version != GRAPH_VERSION {
        bail!(
            "Unsupported import graph version {} in {}; expected {GRAPH_VERSION}. Re-run `repo-edit index`.",
            graph.version,
            path.display()
        );
    }
    Ok(Some(graph))
}
