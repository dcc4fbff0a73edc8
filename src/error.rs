//! Error taxonomy for the edit pipeline.
//!
//! Import specifiers that fail to resolve are not represented here: they are
//! dropped silently during graph construction and never surface as errors.

use std::path::PathBuf;
use thiserror::Error;

/// Pipeline phase in which an external call failed, used for error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Planning,
    Generation,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Planning => write!(f, "planning"),
            Phase::Generation => write!(f, "generation"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EditError {
    /// A required file or persisted artifact is missing.
    #[error("not found: {0}")]
    NotFound(PathBuf),

    /// The orchestration request was rejected before leaving `Idle`.
    #[error("invalid edit request: {0}")]
    InvalidRequest(String),

    /// A session method was called out of phase order.
    #[error("invalid session state: expected {expected}, found {found}")]
    InvalidState {
        expected: &'static str,
        found: &'static str,
    },

    /// A generator response failed to parse as the expected structure.
    ///
    /// Recoverable during planning (entry-only fallback); generation-phase
    /// content is passed through to the caller instead of raising this.
    #[error("malformed {phase} response: {reason}")]
    MalformedResponse { phase: Phase, reason: String },

    /// A generator call itself failed. Fatal to the current phase; commit
    /// failures surface as [`EditError::PartialApply`] instead.
    #[error("{phase} call failed for {target}: {source}")]
    ExternalFailure {
        phase: Phase,
        target: String,
        #[source]
        source: anyhow::Error,
    },

    /// Some files were written before a later write or the commit failed.
    ///
    /// `written` lists exactly the files already on disk so the caller can
    /// reconcile manually; no rollback is attempted.
    #[error("apply failed at {failed} after writing {} file(s): {source}", .written.len())]
    PartialApply {
        written: Vec<String>,
        failed: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, EditError>;
