//! Generation phase: independent per-file content generation with shared context.

use crate::edit::candidates::CandidateSet;
use crate::edit::diff::{diff_lines, DiffSegment};
use crate::edit::plan::PlanOutcome;
use crate::edit::prompts;
use crate::error::{EditError, Phase};
use crate::llm::Generator;
use std::fs;
use std::path::Path;

/// One reviewable file edit: original content, proposed replacement, and the
/// line-level diff between them. Files with empty diffs are kept; the apply
/// decision belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEditProposal {
    pub path: String,
    pub before: String,
    pub after: String,
    pub patches: Vec<DiffSegment>,
}

/// Generate replacement content for every file in `files`.
///
/// Each target gets its own generator call carrying the instruction, its
/// current content, the compact plan, and a shared context block of every
/// candidate's content capped to `context_file_cap` bytes. Calls are
/// independent: there is no cross-file consistency enforcement beyond the
/// shared context. An empty or malformed response is passed through as the
/// proposed content so the caller can see and reject it; only transport
/// errors fail the phase, naming the file they occurred on.
pub fn generate_edits(
    generator: &dyn Generator,
    root: &Path,
    instruction: &str,
    candidates: &CandidateSet,
    plan: &PlanOutcome,
    files: &[String],
    context_file_cap: usize,
    extra_context: Option<&str>,
) -> Result<Vec<FileEditProposal>, EditError> {
    let context_block = build_context_block(root, candidates, context_file_cap, extra_context);

    let mut proposals = Vec::with_capacity(files.len());
    for path in files {
        let before = fs::read_to_string(root.join(path))
            .map_err(|_| EditError::NotFound(root.join(path)))?;

        let user = prompts::generate_user(instruction, path, &before, plan, &context_block);
        let after = generator
            .complete(prompts::GENERATE_SYSTEM, &user)
            .map_err(|source| EditError::ExternalFailure {
                phase: Phase::Generation,
                target: path.clone(),
                source,
            })?;

        let patches = diff_lines(&before, &after);
        proposals.push(FileEditProposal {
            path: path.clone(),
            before,
            after,
            patches,
        });
    }
    Ok(proposals)
}

/// Concatenate every candidate's content, each capped, plus any externally
/// supplied retrieval context. Unreadable candidates are skipped; they only
/// served as context.
fn build_context_block(
    root: &Path,
    candidates: &CandidateSet,
    context_file_cap: usize,
    extra_context: Option<&str>,
) -> String {
    let mut block = String::new();
    for path in &candidates.paths {
        let content = match fs::read_to_string(root.join(path)) {
            Ok(content) => content,
            Err(err) => {
                tracing::debug!("skipping context file {path}: {err}");
                continue;
            }
        };
        block.push_str(&prompts::context_entry(path, cap_bytes(&content, context_file_cap)));
    }
    if let Some(extra) = extra_context {
        if !extra.is_empty() {
            block.push_str(extra);
            if !extra.ends_with('\n') {
                block.push('\n');
            }
        }
    }
    block
}

/// Truncate to at most `cap` bytes on a char boundary.
fn cap_bytes(text: &str, cap: usize) -> &str {
    if text.len() <= cap {
        return text;
    }
    let mut end = cap;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::diff::has_changes;
    use anyhow::anyhow;
    use std::cell::RefCell;
    use tempfile::TempDir;

    struct EchoGenerator;

    impl Generator for EchoGenerator {
        fn complete(&self, system: &str, user: &str) -> anyhow::Result<String> {
            crate::llm::MockGenerator.complete(system, user)
        }
    }

    /// Fails on a specific target, recording every prompt it saw.
    struct SelectiveGenerator {
        fail_on: String,
        prompts: RefCell<Vec<String>>,
    }

    impl Generator for SelectiveGenerator {
        fn complete(&self, _system: &str, user: &str) -> anyhow::Result<String> {
            self.prompts.borrow_mut().push(user.to_string());
            if user.contains(&format!("Target file: {}", self.fail_on)) {
                return Err(anyhow!("boom"));
            }
            Ok(String::new())
        }
    }

    fn fixture() -> (TempDir, CandidateSet) {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.ts"), "const a = 1;\n").unwrap();
        fs::write(tmp.path().join("b.ts"), "const b = 2;\n").unwrap();
        let candidates = CandidateSet {
            entry: "a.ts".to_string(),
            paths: vec!["a.ts".to_string(), "b.ts".to_string()],
        };
        (tmp, candidates)
    }

    #[test]
    fn proposals_carry_diffs() {
        let (tmp, candidates) = fixture();
        let plan = PlanOutcome::Fallback {
            reason: "test".to_string(),
        };
        let proposals = generate_edits(
            &EchoGenerator,
            tmp.path(),
            "add marker",
            &candidates,
            &plan,
            &["a.ts".to_string()],
            16 * 1024,
            None,
        )
        .unwrap();

        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].path, "a.ts");
        assert!(proposals[0].after.contains("[MOCK_AI_EDIT] add marker"));
        assert!(has_changes(&proposals[0].patches));
    }

    #[test]
    fn empty_response_is_passed_through_not_hidden() {
        let (tmp, candidates) = fixture();
        let generator = SelectiveGenerator {
            fail_on: "never".to_string(),
            prompts: RefCell::new(Vec::new()),
        };
        let plan = PlanOutcome::Fallback {
            reason: "test".to_string(),
        };
        let proposals = generate_edits(
            &generator,
            tmp.path(),
            "wipe",
            &candidates,
            &plan,
            &["a.ts".to_string()],
            16 * 1024,
            None,
        )
        .unwrap();

        assert_eq!(proposals[0].after, "");
        assert!(has_changes(&proposals[0].patches));
    }

    #[test]
    fn transport_failure_names_the_file() {
        let (tmp, candidates) = fixture();
        let generator = SelectiveGenerator {
            fail_on: "b.ts".to_string(),
            prompts: RefCell::new(Vec::new()),
        };
        let plan = PlanOutcome::Fallback {
            reason: "test".to_string(),
        };
        let err = generate_edits(
            &generator,
            tmp.path(),
            "edit",
            &candidates,
            &plan,
            &["a.ts".to_string(), "b.ts".to_string()],
            16 * 1024,
            None,
        )
        .expect_err("must fail on b.ts");

        match err {
            EditError::ExternalFailure {
                phase: Phase::Generation,
                target,
                ..
            } => assert_eq!(target, "b.ts"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn context_block_caps_each_file_and_appends_extra() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("big.ts"), "x".repeat(100)).unwrap();
        let candidates = CandidateSet {
            entry: "big.ts".to_string(),
            paths: vec!["big.ts".to_string(), "ghost.ts".to_string()],
        };

        let block = build_context_block(tmp.path(), &candidates, 10, Some("retrieved docs"));
        assert!(block.contains(&"x".repeat(10)));
        assert!(!block.contains(&"x".repeat(11)));
        assert!(!block.contains("ghost.ts"));
        assert!(block.ends_with("retrieved docs\n"));
    }

    #[test]
    fn cap_bytes_respects_char_boundaries() {
        assert_eq!(cap_bytes("héllo", 2), "h");
        assert_eq!(cap_bytes("héllo", 3), "hé");
        assert_eq!(cap_bytes("abc", 10), "abc");
    }
}
