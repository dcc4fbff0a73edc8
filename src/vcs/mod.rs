//! Commit collaborator backed by git.
//!
//! The orchestrator only needs an opaque "commit everything" capability;
//! branch management and history inspection stay outside this crate.

use anyhow::{Context, Result};
use git2::{IndexAddOption, Repository, Signature, StatusOptions};
use std::path::Path;

const COMMIT_AUTHOR: &str = "repo-edit";
const COMMIT_EMAIL: &str = "repo-edit@localhost";

/// Result of one commit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOutcome {
    pub committed: bool,
}

pub trait Vcs {
    /// Stage every change under `root` and commit it as a single commit.
    ///
    /// Idempotent no-op (`committed = false`) when the tree is clean.
    fn commit_all(&self, root: &Path, message: &str) -> Result<CommitOutcome>;
}

/// git2-backed implementation used by the CLI.
#[derive(Debug, Default)]
pub struct GitVcs;

impl GitVcs {
    /// Open the repository at `root`, initializing an empty one when none
    /// exists yet.
    pub fn open_or_init(root: &Path) -> Result<Repository> {
        if let Ok(repo) = Repository::open(root) {
            return Ok(repo);
        }
        Repository::init(root)
            .with_context(|| format!("Failed initializing git repository at {}", root.display()))
    }
}

impl Vcs for GitVcs {
    fn commit_all(&self, root: &Path, message: &str) -> Result<CommitOutcome> {
        let repo = Self::open_or_init(root)?;

        let mut status_opts = StatusOptions::new();
        status_opts.include_untracked(true).recurse_untracked_dirs(true);
        let statuses = repo
            .statuses(Some(&mut status_opts))
            .context("Failed reading git status")?;
        if statuses.is_empty() {
            return Ok(CommitOutcome { committed: false });
        }

        let mut index = repo.index().context("Failed opening git index")?;
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .context("Failed staging changes")?;
        index.write().context("Failed writing git index")?;
        let tree_id = index.write_tree().context("Failed writing tree")?;
        let tree = repo.find_tree(tree_id)?;

        let sig = signature()?;
        let parent = repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .context("Failed creating commit")?;
        Ok(CommitOutcome { committed: true })
    }
}

fn signature() -> Result<Signature<'static>> {
    // Prefer the user's configured identity; fall back to a tool identity so
    // commits work in bare environments (CI, containers).
    match git2::Config::open_default().and_then(|config| {
        let name = config.get_string("user.name")?;
        let email = config.get_string("user.email")?;
        Signature::now(&name, &email)
    }) {
        Ok(sig) => Ok(sig),
        Err(_) => Signature::now(COMMIT_AUTHOR, COMMIT_EMAIL)
            .context("Failed building commit signature"),
    }
}
