//! Related command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::graph::{load_graph, related_files};
use crate::util::normalize_path;

#[derive(Args)]
pub struct RelatedArgs {
    /// Project root containing the persisted graph
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// File to expand from, relative to the project root
    #[arg(value_name = "FILE")]
    pub file: String,

    /// BFS depth
    #[arg(long, value_name = "COUNT", default_value_t = 2)]
    pub hops: usize,

    /// Max results
    #[arg(short = 'n', long, value_name = "COUNT", default_value_t = 20)]
    pub limit: usize,
}

pub fn run(args: RelatedArgs) -> Result<()> {
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("Failed resolving project root {}", args.path.display()))?;

    let Some(graph) = load_graph(&root)? else {
        bail!(
            "No import graph found under {}. Run `repo-edit index` first.",
            root.display()
        );
    };

    let start = normalize_path(&args.file);
    let related = related_files(&graph, &start, args.hops, args.limit);
    if related.is_empty() {
        println!("No related files found for {start}");
        return Ok(());
    }
    for path in related {
        println!("{path}");
    }
    Ok(())
}
