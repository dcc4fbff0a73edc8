//! Relative-import resolution with a fixed probe order.

use crate::util::lexical_normalize;
use std::path::{Path, PathBuf};

/// Source-file extensions appended when probing a relative specifier.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs"];

/// Index filenames probed when the specifier names a directory.
const INDEX_FILES: &[&str] = &["index.ts", "index.tsx", "index.js", "index.jsx"];

/// True when the extension marks a file the graph builder should read.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Resolve a raw specifier from the importing file to an absolute in-tree path.
///
/// Non-relative specifiers are external by definition and return `None`.
/// Relative specifiers probe, in order: the literal joined path, the joined
/// path with each source extension appended, then the joined path as a
/// directory with each index filename. The first existing file wins, so a flat
/// `foo.ts` always beats `foo/index.ts`. No probe hit means the import is
/// dropped by the caller; this is never an error.
pub fn resolve_import(from_file: &Path, specifier: &str) -> Option<PathBuf> {
    if !specifier.starts_with('.') {
        return None;
    }

    let from_dir = from_file.parent()?;
    let base = lexical_normalize(&from_dir.join(specifier));

    let mut candidates = Vec::with_capacity(1 + SOURCE_EXTENSIONS.len() + INDEX_FILES.len());
    candidates.push(base.clone());
    for ext in SOURCE_EXTENSIONS {
        let mut probe = base.as_os_str().to_owned();
        probe.push(".");
        probe.push(ext);
        candidates.push(PathBuf::from(probe));
    }
    for index in INDEX_FILES {
        candidates.push(base.join(index));
    }

    // Path::is_file returns false on any stat error; absence never panics.
    candidates.into_iter().find(|c| c.is_file())
}
