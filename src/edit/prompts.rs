//! Prompt construction for the planning and generation phases.
//!
//! The marker strings are part of the contract with [`crate::llm::MockGenerator`],
//! which parses prompts instead of reasoning over them.

use crate::edit::plan::PlanOutcome;

pub const PLAN_SYSTEM: &str = "You are a senior engineer planning a multi-file code change.\n\
Pick the smallest set of files that must change to satisfy the instruction.\n\
Respond with JSON only: {\"files\": [{\"path\": \"...\", \"reason\": \"...\"}], \"notes\": \"...\"}\n\
Only name files from the candidate list.";

pub const GENERATE_SYSTEM: &str = "You are an AI code editor. Return ONLY the full updated file content.\n\
Follow existing style. Do not add unrelated changes.";

pub const CONTENT_BEGIN: &str = "--- CURRENT CONTENT ---";
pub const CONTENT_END: &str = "--- END ---";

const FILE_BEGIN: &str = "=== FILE:";
const FILE_END: &str = "=== END FILE ===";

/// User prompt for the planning call: paths only, no file content.
pub fn plan_user(instruction: &str, entry: &str, candidates: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Instruction: {instruction}\n"));
    out.push_str(&format!("Entry file: {entry}\n"));
    out.push_str("Candidate files:\n");
    for path in candidates {
        out.push_str(&format!("- {path}\n"));
    }
    out
}

/// User prompt for one per-file generation call.
pub fn generate_user(
    instruction: &str,
    target: &str,
    target_content: &str,
    plan: &PlanOutcome,
    context_block: &str,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("Instruction: {instruction}\n"));
    out.push_str(&format!("Target file: {target}\n"));
    out.push_str(&format!("Plan:\n{}\n", summarize_plan(plan)));
    if !context_block.is_empty() {
        out.push_str("Related files, read-only context:\n");
        out.push_str(context_block);
    }
    out.push_str(&format!(
        "{CONTENT_BEGIN}\n{target_content}\n{CONTENT_END}\n"
    ));
    out
}

/// One context-block entry for a candidate file.
pub fn context_entry(path: &str, capped_content: &str) -> String {
    format!("{FILE_BEGIN} {path} ===\n{capped_content}\n{FILE_END}\n")
}

/// Compact plan serialization carried into every generation prompt.
pub fn summarize_plan(plan: &PlanOutcome) -> String {
    match plan {
        PlanOutcome::Plan { files, notes } => {
            let mut out = String::new();
            for file in files {
                out.push_str(&format!("- {}: {}\n", file.path, file.reason));
            }
            if !notes.is_empty() {
                out.push_str(&format!("Notes: {notes}\n"));
            }
            out
        }
        PlanOutcome::Fallback { reason } => {
            format!("- entry file only (planner fallback: {reason})\n")
        }
    }
}
