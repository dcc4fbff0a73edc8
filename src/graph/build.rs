//! Graph construction over an enumerated candidate set.

use crate::graph::resolve::is_source_file;
use crate::graph::{extract_imports, resolve_import, FileNode, ImportGraph, GRAPH_VERSION};
use crate::scan::CandidateFile;
use crate::util::normalize_path;
use anyhow::Result;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::Path;

/// Build an [`ImportGraph`] snapshot for `root` over the enumerated candidates.
///
/// Only files whose extension marks them as source are read; a read failure
/// omits that one file from the graph rather than failing the build. Edges are
/// kept only when they resolve to another source candidate, so every edge
/// target is itself a graph key; targets are then deduplicated and sorted, so
/// the output is fully deterministic for identical inputs apart from
/// `generated_at`.
pub fn build_graph(root: &Path, candidates: &[CandidateFile]) -> Result<ImportGraph> {
    // Only source candidates become graph keys, so only they may be edge
    // targets; an asset import like `./styles.css` resolves but is dropped.
    let by_abs: HashMap<&Path, &str> = candidates
        .iter()
        .filter(|c| is_source_file(&c.path))
        .map(|c| (c.path.as_path(), c.relative_path.as_str()))
        .collect();

    // Reads fan out across the rayon pool; collecting into a BTreeMap restores
    // key order so completion order never leaks into the output.
    let files: BTreeMap<String, FileNode> = candidates
        .par_iter()
        .filter(|c| is_source_file(&c.path))
        .filter_map(|candidate| {
            let source = match fs::read_to_string(&candidate.path) {
                Ok(text) => text,
                Err(err) => {
                    tracing::debug!(
                        "skipping unreadable file {}: {err}",
                        candidate.relative_path
                    );
                    return None;
                }
            };

            let mut imports = BTreeSet::new();
            for specifier in extract_imports(&source) {
                let Some(target) = resolve_import(&candidate.path, &specifier) else {
                    continue;
                };
                if let Some(rel) = by_abs.get(target.as_path()) {
                    if *rel != candidate.relative_path {
                        imports.insert(rel.to_string());
                    }
                } else if let Ok(rel) = target.strip_prefix(root) {
                    // Resolution can land on a path the scanner spelled
                    // differently; fall back to a root-relative key when the
                    // candidate set contains it.
                    let rel = normalize_path(&rel.to_string_lossy());
                    if rel != candidate.relative_path
                        && candidates
                            .iter()
                            .any(|c| c.relative_path == rel && is_source_file(&c.path))
                    {
                        imports.insert(rel);
                    }
                }
            }

            Some((
                candidate.relative_path.clone(),
                FileNode {
                    imports: imports.into_iter().collect(),
                },
            ))
        })
        .collect();

    Ok(ImportGraph {
        version: GRAPH_VERSION,
        root_dir: root.to_string_lossy().into_owned(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        files,
    })
}
