//! Edit orchestration: candidate selection, planning, generation, apply.
//!
//! One orchestration request is an [`session::EditSession`] driven through
//! `Idle → CandidatesSelected → Planned → Generated → (Applied | Discarded)`.
//! The generator and commit capabilities stay behind traits
//! ([`crate::llm::Generator`], [`crate::vcs::Vcs`]).

pub mod apply;
pub mod candidates;
pub mod diff;
pub mod generate;
pub mod plan;
pub mod prompts;
pub mod session;

pub use apply::{apply_edits, commit_message, ApplyReport};
pub use candidates::{select_candidates, CandidateSet};
pub use diff::{diff_lines, has_changes, DiffSegment, SegmentKind};
pub use generate::{generate_edits, FileEditProposal};
pub use plan::{plan_edit, PlanOutcome, PlannedFile, DEFAULT_PLAN_FILE_LIMIT, MAX_PLAN_FILE_LIMIT};
pub use session::{EditRequest, EditSession};
