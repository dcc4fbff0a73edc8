//! repo-edit: instruction-driven multi-file edits over a lightweight import graph
//!
//! The crate indexes a project's relative-import graph, expands a bounded set of
//! files related to an entry point, and orchestrates an LLM-backed plan/generate
//! pipeline that produces reviewable per-file diffs and a single commit on apply.

pub mod cli;
pub mod config;
pub mod edit;
pub mod error;
pub mod graph;
pub mod llm;
pub mod scan;
pub mod util;
pub mod vcs;
