//! Apply phase: write every proposal, then one commit.

use crate::edit::generate::FileEditProposal;
use crate::error::EditError;
use crate::vcs::Vcs;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Longest instruction prefix carried into the commit message.
const COMMIT_SUBJECT_LIMIT: usize = 72;

/// What the apply step actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    /// Relative paths written to disk, in write order.
    pub written: Vec<String>,
    /// False when the tree was already clean (nothing to commit).
    pub committed: bool,
}

/// Build the `[AI] …` commit message from the instruction.
pub fn commit_message(instruction: &str) -> String {
    let subject: String = instruction.chars().take(COMMIT_SUBJECT_LIMIT).collect();
    format!("[AI] {subject}")
}

/// Write every proposal's new content, then commit the lot as one commit.
///
/// Writes run as a tight sequence with no rollback: the file-write primitive
/// has no transaction support, so a failure partway leaves earlier writes on
/// disk and surfaces [`EditError::PartialApply`] naming the failed file and
/// the exact set already written. The commit fires only after every write
/// succeeded, so it can never cover a file set the caller does not know about.
pub fn apply_edits(
    root: &Path,
    proposals: &[FileEditProposal],
    vcs: &dyn Vcs,
    message: &str,
) -> Result<ApplyReport, EditError> {
    let mut written: Vec<String> = Vec::with_capacity(proposals.len());

    for proposal in proposals {
        let path = root.join(&proposal.path);
        let result = fs::write(&path, &proposal.after)
            .with_context(|| format!("Failed writing {}", path.display()));
        match result {
            Ok(()) => written.push(proposal.path.clone()),
            Err(source) => {
                return Err(EditError::PartialApply {
                    written,
                    failed: proposal.path.clone(),
                    source,
                });
            }
        }
    }

    match vcs.commit_all(root, message) {
        Ok(outcome) => Ok(ApplyReport {
            written,
            committed: outcome.committed,
        }),
        Err(source) => Err(EditError::PartialApply {
            written,
            failed: "commit".to_string(),
            source,
        }),
    }
}
