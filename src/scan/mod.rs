//! File enumeration with gitignore support.
//!
//! Produces the candidate set the graph builder and the edit orchestrator work
//! over: every file under the root except known non-source directories, in
//! deterministic sorted order.

use crate::util::normalize_path;
use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Directories that never contain editable source and are skipped outright.
const SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "target",
    "__pycache__",
    ".venv",
    "venv",
    crate::graph::GRAPH_DIR,
];

/// One enumerated candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub relative_path: String,
}

/// Walks a project root and returns candidate files sorted by relative path.
pub struct FileScanner {
    root: PathBuf,
    respect_gitignore: bool,
}

impl FileScanner {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            respect_gitignore: true,
        }
    }

    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Enumerate candidate files under the root.
    ///
    /// Unreadable directory entries are skipped, not fatal. Output order is
    /// deterministic regardless of walk order.
    pub fn scan(&self) -> Result<Vec<CandidateFile>> {
        let dir_filter = |entry: &ignore::DirEntry| -> bool {
            if entry.file_type().is_some_and(|t| t.is_dir()) {
                if let Some(name) = entry.file_name().to_str() {
                    if SKIP_DIRS.contains(&name) {
                        return false;
                    }
                }
            }
            true
        };

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .hidden(false)
            .parents(false)
            .filter_entry(dir_filter);

        let mut files = Vec::new();
        for entry in builder.build().flatten() {
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            let Ok(rel) = path.strip_prefix(&self.root) else {
                continue;
            };
            let Some(rel) = rel.to_str() else {
                tracing::debug!("skipping non-UTF-8 path under {}", self.root.display());
                continue;
            };
            files.push(CandidateFile {
                path: path.to_path_buf(),
                relative_path: normalize_path(rel),
            });
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }
}

/// Convenience wrapper used by the CLI and the graph builder.
pub fn list_files(root: &Path) -> Result<Vec<CandidateFile>> {
    FileScanner::new(root.to_path_buf()).scan()
}
