//! Path normalization

use std::path::{Component, Path, PathBuf};

/// Convert backslashes to forward slashes so graph keys are stable across platforms.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Resolve `.` and `..` components lexically, without touching the filesystem.
///
/// Import specifiers routinely point at paths that do not exist yet in any
/// canonical form (the resolver appends extensions afterwards), so
/// `fs::canonicalize` is not an option here.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}
