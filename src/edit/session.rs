//! Orchestration state machine for one end-to-end edit request.
//!
//! `Idle → CandidatesSelected → Planned → Generated → (Applied | Discarded)`.
//! Phases run strictly in order; a failed phase surfaces its error and leaves
//! the previously reached state intact, so the caller can retry or discard.

use crate::config::Config;
use crate::edit::apply::{apply_edits, commit_message, ApplyReport};
use crate::edit::candidates::{select_candidates, CandidateSet};
use crate::edit::generate::{generate_edits, FileEditProposal};
use crate::edit::plan::{plan_edit, PlanOutcome};
use crate::error::{EditError, Result};
use crate::graph::ImportGraph;
use crate::llm::Generator;
use crate::vcs::Vcs;
use std::path::PathBuf;

/// Inputs of one orchestration request.
#[derive(Debug, Clone)]
pub struct EditRequest {
    /// Project root the graph and all relative paths refer to.
    pub root: PathBuf,
    /// Entry file, relative to `root`.
    pub entry: String,
    /// User instruction driving the change.
    pub instruction: String,
    /// Externally supplied retrieval context appended to the shared block.
    pub extra_context: Option<String>,
}

enum State {
    Idle,
    CandidatesSelected {
        candidates: CandidateSet,
    },
    Planned {
        candidates: CandidateSet,
        plan: PlanOutcome,
        files: Vec<String>,
    },
    Generated {
        proposals: Vec<FileEditProposal>,
    },
    Applied {
        report: ApplyReport,
    },
    Discarded,
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::Idle => "Idle",
            State::CandidatesSelected { .. } => "CandidatesSelected",
            State::Planned { .. } => "Planned",
            State::Generated { .. } => "Generated",
            State::Applied { .. } => "Applied",
            State::Discarded => "Discarded",
        }
    }
}

pub struct EditSession<'a> {
    request: EditRequest,
    config: Config,
    generator: &'a dyn Generator,
    state: State,
}

impl<'a> EditSession<'a> {
    pub fn new(request: EditRequest, config: Config, generator: &'a dyn Generator) -> Self {
        Self {
            request,
            config,
            generator,
            state: State::Idle,
        }
    }

    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    /// `Idle → CandidatesSelected`.
    ///
    /// Refuses to leave `Idle` on an empty instruction or a missing entry
    /// file. The graph is optional: without one the set is just the entry.
    pub fn select_candidates(&mut self, graph: Option<&ImportGraph>) -> Result<&CandidateSet> {
        self.expect_state("Idle", matches!(self.state, State::Idle))?;

        if self.request.instruction.trim().is_empty() {
            return Err(EditError::InvalidRequest("instruction is empty".to_string()));
        }
        let entry_abs = self.request.root.join(&self.request.entry);
        if !entry_abs.is_file() {
            return Err(EditError::NotFound(entry_abs));
        }

        let candidates = select_candidates(
            graph,
            &self.request.entry,
            self.config.hops,
            self.config.related_limit,
            self.config.candidate_cap,
        );
        tracing::debug!(
            "selected {} candidate file(s) for {}",
            candidates.len(),
            self.request.entry
        );
        self.state = State::CandidatesSelected { candidates };
        match &self.state {
            State::CandidatesSelected { candidates } => Ok(candidates),
            _ => unreachable!(),
        }
    }

    /// `CandidatesSelected → Planned`. One generator call; an unparsable
    /// response degrades to an entry-only fallback plan instead of failing.
    pub fn plan(&mut self) -> Result<(&PlanOutcome, &[String])> {
        let candidates = match &self.state {
            State::CandidatesSelected { candidates } => candidates.clone(),
            other => return self.wrong_state("CandidatesSelected", other.name()),
        };

        let (plan, files) = plan_edit(
            self.generator,
            &self.request.instruction,
            &candidates,
            self.config.max_plan_files,
        )?;
        tracing::debug!("planned {} file(s) for generation", files.len());
        self.state = State::Planned {
            candidates,
            plan,
            files,
        };
        match &self.state {
            State::Planned { plan, files, .. } => Ok((plan, files.as_slice())),
            _ => unreachable!(),
        }
    }

    /// `Planned → Generated`. All per-file calls must complete before the
    /// state advances; a failure leaves the plan intact for retry.
    pub fn generate(&mut self) -> Result<&[FileEditProposal]> {
        let (candidates, plan, files) = match &self.state {
            State::Planned {
                candidates,
                plan,
                files,
            } => (candidates.clone(), plan.clone(), files.clone()),
            other => return self.wrong_state("Planned", other.name()),
        };

        let proposals = generate_edits(
            self.generator,
            &self.request.root,
            &self.request.instruction,
            &candidates,
            &plan,
            &files,
            self.config.context_file_cap,
            self.request.extra_context.as_deref(),
        )?;
        self.state = State::Generated { proposals };
        match &self.state {
            State::Generated { proposals } => Ok(proposals),
            _ => unreachable!(),
        }
    }

    /// `Generated → Applied`: write every proposal, then one commit.
    pub fn apply(&mut self, vcs: &dyn Vcs) -> Result<&ApplyReport> {
        let proposals = match &self.state {
            State::Generated { proposals } => proposals.clone(),
            other => return self.wrong_state("Generated", other.name()),
        };

        let message = commit_message(&self.request.instruction);
        let report = apply_edits(&self.request.root, &proposals, vcs, &message)?;
        self.state = State::Applied { report };
        match &self.state {
            State::Applied { report } => Ok(report),
            _ => unreachable!(),
        }
    }

    /// Drop all proposals with no side effects. Valid from
    /// `CandidatesSelected`, `Planned`, or `Generated`.
    pub fn discard(&mut self) -> Result<()> {
        match self.state {
            State::CandidatesSelected { .. } | State::Planned { .. } | State::Generated { .. } => {
                self.state = State::Discarded;
                Ok(())
            }
            ref other => Err(EditError::InvalidState {
                expected: "CandidatesSelected, Planned or Generated",
                found: other.name(),
            }),
        }
    }

    fn expect_state(&self, expected: &'static str, ok: bool) -> Result<()> {
        if ok {
            Ok(())
        } else {
            Err(EditError::InvalidState {
                expected,
                found: self.state.name(),
            })
        }
    }

    fn wrong_state<T>(&self, expected: &'static str, found: &'static str) -> Result<T> {
        Err(EditError::InvalidState { expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_graph, load_graph, save_graph};
    use crate::llm::MockGenerator;
    use crate::scan::list_files;
    use crate::vcs::GitVcs;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("a.ts"), "import { b } from './b';\nconst a = 1;\n").unwrap();
        fs::write(root.join("b.ts"), "import { c } from './c';\nconst b = 2;\n").unwrap();
        fs::write(root.join("c.ts"), "const c = 3;\n").unwrap();
        let candidates = list_files(root).unwrap();
        let graph = build_graph(root, &candidates).unwrap();
        save_graph(root, &graph).unwrap();
        tmp
    }

    fn request(root: &std::path::Path, entry: &str, instruction: &str) -> EditRequest {
        EditRequest {
            root: root.to_path_buf(),
            entry: entry.to_string(),
            instruction: instruction.to_string(),
            extra_context: None,
        }
    }

    #[test]
    fn full_pipeline_reaches_applied() {
        let tmp = fixture();
        let graph = load_graph(tmp.path()).unwrap();
        let generator = MockGenerator;
        let mut session = EditSession::new(
            request(tmp.path(), "a.ts", "add a marker"),
            Config::default(),
            &generator,
        );

        let candidates = session.select_candidates(graph.as_ref()).unwrap();
        assert_eq!(candidates.paths, vec!["a.ts", "b.ts", "c.ts"]);

        let (_, files) = session.plan().unwrap();
        assert_eq!(files, vec!["a.ts"]);

        let proposals = session.generate().unwrap();
        assert_eq!(proposals.len(), 1);
        assert!(proposals[0].after.contains("[MOCK_AI_EDIT] add a marker"));

        let report = session.apply(&GitVcs).unwrap();
        assert_eq!(report.written, vec!["a.ts"]);
        assert!(report.committed);
        assert_eq!(session.state_name(), "Applied");

        let on_disk = fs::read_to_string(tmp.path().join("a.ts")).unwrap();
        similar_asserts::assert_eq!(
            on_disk,
            "import { b } from './b';\nconst a = 1;\n// [MOCK_AI_EDIT] add a marker\n"
        );
    }

    #[test]
    fn empty_instruction_refuses_to_leave_idle() {
        let tmp = fixture();
        let generator = MockGenerator;
        let mut session = EditSession::new(
            request(tmp.path(), "a.ts", "   "),
            Config::default(),
            &generator,
        );
        let err = session.select_candidates(None).expect_err("must refuse");
        assert!(matches!(err, EditError::InvalidRequest(_)));
        assert_eq!(session.state_name(), "Idle");
    }

    #[test]
    fn missing_entry_refuses_to_leave_idle() {
        let tmp = fixture();
        let generator = MockGenerator;
        let mut session = EditSession::new(
            request(tmp.path(), "ghost.ts", "do something"),
            Config::default(),
            &generator,
        );
        let err = session.select_candidates(None).expect_err("must refuse");
        assert!(matches!(err, EditError::NotFound(_)));
        assert_eq!(session.state_name(), "Idle");
    }

    #[test]
    fn missing_graph_degrades_to_entry_only() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("solo.ts"), "const s = 1;\n").unwrap();
        let generator = MockGenerator;
        let mut session = EditSession::new(
            request(tmp.path(), "solo.ts", "tweak"),
            Config::default(),
            &generator,
        );
        let candidates = session.select_candidates(None).unwrap();
        assert_eq!(candidates.paths, vec!["solo.ts"]);
    }

    #[test]
    fn phases_enforce_ordering() {
        let tmp = fixture();
        let generator = MockGenerator;
        let mut session = EditSession::new(
            request(tmp.path(), "a.ts", "edit"),
            Config::default(),
            &generator,
        );

        assert!(matches!(
            session.plan(),
            Err(EditError::InvalidState { .. })
        ));
        assert!(matches!(
            session.generate(),
            Err(EditError::InvalidState { .. })
        ));
        assert!(matches!(
            session.apply(&GitVcs),
            Err(EditError::InvalidState { .. })
        ));
        assert!(matches!(
            session.discard(),
            Err(EditError::InvalidState { .. })
        ));
    }

    #[test]
    fn discard_from_generated_leaves_tree_untouched() {
        let tmp = fixture();
        let graph = load_graph(tmp.path()).unwrap();
        let generator = MockGenerator;
        let mut session = EditSession::new(
            request(tmp.path(), "a.ts", "throwaway"),
            Config::default(),
            &generator,
        );
        session.select_candidates(graph.as_ref()).unwrap();
        session.plan().unwrap();
        session.generate().unwrap();
        session.discard().unwrap();

        assert_eq!(session.state_name(), "Discarded");
        let on_disk = fs::read_to_string(tmp.path().join("a.ts")).unwrap();
        assert!(!on_disk.contains("MOCK_AI_EDIT"));
    }

    #[test]
    fn failed_generation_leaves_plan_intact_for_retry() {
        struct FlakyGenerator {
            calls: std::cell::Cell<usize>,
        }
        impl Generator for FlakyGenerator {
            fn complete(&self, system: &str, user: &str) -> anyhow::Result<String> {
                let n = self.calls.get();
                self.calls.set(n + 1);
                // plan call succeeds (garbage → fallback), first generation
                // call fails, retry succeeds
                match n {
                    0 => Ok("not json".to_string()),
                    1 => Err(anyhow::anyhow!("transient")),
                    _ => MockGenerator.complete(system, user),
                }
            }
        }

        let tmp = fixture();
        let generator = FlakyGenerator {
            calls: std::cell::Cell::new(0),
        };
        let mut session = EditSession::new(
            request(tmp.path(), "a.ts", "retry me"),
            Config::default(),
            &generator,
        );
        session.select_candidates(None).unwrap();
        session.plan().unwrap();

        let err = session.generate().expect_err("first generate fails");
        assert!(matches!(err, EditError::ExternalFailure { .. }));
        assert_eq!(session.state_name(), "Planned");

        let proposals = session.generate().expect("retry succeeds");
        assert!(proposals[0].after.contains("MOCK_AI_EDIT"));
    }
}
