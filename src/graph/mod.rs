//! Import graph over in-tree source files.
//!
//! The graph is a versioned, immutable snapshot built on explicit reindex
//! requests and persisted as JSON under the project root. Edges come from a
//! deliberately regex-level extractor ([`extract`]) and a fixed-probe-order
//! resolver ([`resolve`]); a future language-aware engine can replace either
//! without changing the schema or the expansion query.

pub mod build;
pub mod extract;
pub mod persist;
pub mod related;
pub mod resolve;
pub mod schema;

pub use build::build_graph;
pub use extract::extract_imports;
pub use persist::{graph_path, load_graph, save_graph};
pub use related::related_files;
pub use resolve::resolve_import;
pub use schema::{FileNode, ImportGraph, GRAPH_VERSION};

/// Dot-directory under the project root holding the persisted graph.
pub const GRAPH_DIR: &str = ".repo-edit";

/// File name of the persisted graph inside [`GRAPH_DIR`].
pub const GRAPH_FILE: &str = "import-graph.json";
