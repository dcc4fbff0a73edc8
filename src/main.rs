//! repo-edit: instruction-driven multi-file edits over a lightweight import graph

use anyhow::Result;

fn main() -> Result<()> {
    repo_edit::cli::run()
}
