//! Planning phase: one generator call choosing the files to edit.

use crate::edit::candidates::CandidateSet;
use crate::edit::prompts;
use crate::error::{EditError, Phase};
use crate::llm::Generator;
use serde::Deserialize;

/// Hard ceiling on files per request, regardless of configuration.
pub const MAX_PLAN_FILE_LIMIT: usize = 12;

/// Default per-request file limit.
pub const DEFAULT_PLAN_FILE_LIMIT: usize = 6;

/// One planned target file with the planner's rationale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: String,
    pub reason: String,
}

/// Outcome of the planning phase.
///
/// `Fallback` is a recoverable degradation: the generator answered, but not
/// with the expected structure, so the request proceeds on the entry file
/// alone with the reason recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    Plan {
        files: Vec<PlannedFile>,
        notes: String,
    },
    Fallback {
        reason: String,
    },
}

#[derive(Debug, Deserialize)]
struct PlanResponse {
    #[serde(default)]
    files: Vec<PlanResponseFile>,
    #[serde(default)]
    notes: String,
}

#[derive(Debug, Deserialize)]
struct PlanResponseFile {
    path: String,
    #[serde(default)]
    reason: String,
}

/// Issue the planning call and derive the final generation file list.
///
/// The list is the intersection of `{entry} ∪ planned paths` with the
/// candidate set — a plan naming files outside the candidates cannot smuggle
/// them in — truncated to `file_limit` (clamped to the hard ceiling), entry
/// first. A transport failure is fatal to the phase; an unparsable response
/// is not.
pub fn plan_edit(
    generator: &dyn Generator,
    instruction: &str,
    candidates: &CandidateSet,
    file_limit: usize,
) -> Result<(PlanOutcome, Vec<String>), EditError> {
    let user = prompts::plan_user(instruction, &candidates.entry, &candidates.paths);
    let response = generator
        .complete(prompts::PLAN_SYSTEM, &user)
        .map_err(|source| EditError::ExternalFailure {
            phase: Phase::Planning,
            target: candidates.entry.clone(),
            source,
        })?;

    let outcome = match parse_plan(&response) {
        Ok(plan) => plan,
        Err(err) => {
            // Recoverable degradation: proceed on the entry file alone.
            tracing::warn!("{err}; falling back to entry file");
            PlanOutcome::Fallback {
                reason: err.to_string(),
            }
        }
    };

    let files = final_file_list(&outcome, candidates, file_limit);
    Ok((outcome, files))
}

/// Parse the planner's response, tolerating surrounding prose or code fences.
fn parse_plan(response: &str) -> Result<PlanOutcome, EditError> {
    let parsed = serde_json::from_str::<PlanResponse>(response)
        .or_else(|first_err| {
            // Models routinely wrap JSON in fences or a sentence; retry on the
            // outermost brace span before giving up.
            match (response.find('{'), response.rfind('}')) {
                (Some(start), Some(end)) if start < end => {
                    serde_json::from_str::<PlanResponse>(&response[start..=end])
                        .map_err(|e| e.to_string())
                }
                _ => Err(first_err.to_string()),
            }
        })
        .map_err(|reason| EditError::MalformedResponse {
            phase: Phase::Planning,
            reason,
        })?;

    Ok(PlanOutcome::Plan {
        files: parsed
            .files
            .into_iter()
            .map(|f| PlannedFile {
                path: f.path,
                reason: f.reason,
            })
            .collect(),
        notes: parsed.notes,
    })
}

fn final_file_list(
    outcome: &PlanOutcome,
    candidates: &CandidateSet,
    file_limit: usize,
) -> Vec<String> {
    let limit = file_limit.clamp(1, MAX_PLAN_FILE_LIMIT);
    let mut files = vec![candidates.entry.clone()];
    if let PlanOutcome::Plan { files: planned, .. } = outcome {
        for file in planned {
            if files.len() >= limit {
                break;
            }
            if candidates.contains(&file.path) && !files.contains(&file.path) {
                files.push(file.path.clone());
            }
        }
    }
    files
}
