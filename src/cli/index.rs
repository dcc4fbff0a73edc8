//! Index command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::graph::{build_graph, save_graph};
use crate::scan::FileScanner;

#[derive(Args)]
pub struct IndexArgs {
    /// Project root to index
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Also index files matched by gitignore rules
    #[arg(long)]
    pub no_gitignore: bool,
}

pub fn run(args: IndexArgs) -> Result<()> {
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("Failed resolving project root {}", args.path.display()))?;

    let files = FileScanner::new(root.clone())
        .respect_gitignore(!args.no_gitignore)
        .scan()?;
    let graph = build_graph(&root, &files)?;
    let path = save_graph(&root, &graph)?;

    println!(
        "Indexed {} source file(s), {} import edge(s)",
        graph.files.len(),
        graph.edge_count()
    );
    println!("Graph written to {}", path.display());
    Ok(())
}
