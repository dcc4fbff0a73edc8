//! Edit command implementation

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::fs;
use std::path::PathBuf;

use crate::config::load_config;
use crate::edit::{
    has_changes, EditRequest, EditSession, FileEditProposal, PlanOutcome, SegmentKind,
};
use crate::graph::load_graph;
use crate::llm::{self, OpenAiSettings};
use crate::util::normalize_path;
use crate::vcs::GitVcs;

#[derive(Args)]
pub struct EditArgs {
    /// Project root
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Entry file, relative to the project root
    #[arg(short, long, value_name = "FILE")]
    pub file: String,

    /// Instruction describing the change
    #[arg(short, long, value_name = "TEXT")]
    pub instruction: String,

    /// Write the proposed files and commit them (default: dry run)
    #[arg(long)]
    pub apply: bool,

    /// Max files the plan may select for this request
    #[arg(long, value_name = "COUNT")]
    pub max_files: Option<usize>,

    /// Extra retrieval context file appended to every generation prompt
    #[arg(long, value_name = "FILE")]
    pub context: Option<PathBuf>,

    /// Explicit config file (default: repo-edit.toml under the root)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn run(args: EditArgs) -> Result<()> {
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("Failed resolving project root {}", args.path.display()))?;

    let mut config = load_config(&root, args.config.as_deref())?;
    if let Some(max_files) = args.max_files {
        config.max_plan_files = max_files;
    }

    let extra_context = match &args.context {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("Failed reading context file {}", path.display()))?,
        ),
        None => None,
    };

    let graph = load_graph(&root)?;
    if graph.is_none() {
        tracing::info!("no import graph found; candidates limited to the entry file");
    }

    let settings = OpenAiSettings::from_env(config.model.as_deref(), config.base_url.as_deref());
    let generator = llm::from_env(settings)?;

    let request = EditRequest {
        root: root.clone(),
        entry: normalize_path(&args.file),
        instruction: args.instruction.clone(),
        extra_context,
    };
    let mut session = EditSession::new(request, config, generator.as_ref());

    let candidates = session.select_candidates(graph.as_ref())?;
    println!("Candidates ({}):", candidates.len());
    for path in &candidates.paths {
        println!("  {path}");
    }

    let (plan, files) = session.plan()?;
    match plan {
        PlanOutcome::Plan { files: planned, notes } => {
            println!("\nPlan:");
            for file in planned {
                println!("  {}: {}", file.path, file.reason);
            }
            if !notes.is_empty() {
                println!("  Notes: {notes}");
            }
        }
        PlanOutcome::Fallback { reason } => {
            println!("\nPlanner fallback ({reason}); editing the entry file only.");
        }
    }
    println!(
        "Generating {} file(s): {}",
        files.len(),
        files.join(", ")
    );

    let proposals = session.generate()?;
    let mut changed = 0usize;
    for proposal in proposals {
        print_proposal(proposal);
        if has_changes(&proposal.patches) {
            changed += 1;
        }
    }

    if changed == 0 {
        println!("\nNo changes proposed.");
    }

    if args.apply {
        let report = session.apply(&GitVcs)?;
        println!(
            "\nApplied {} file(s); {}",
            report.written.len(),
            if report.committed {
                "committed"
            } else {
                "nothing to commit"
            }
        );
    } else {
        session.discard()?;
        println!("\nDry run. Re-run with --apply to write and commit.");
    }
    Ok(())
}

fn print_proposal(proposal: &FileEditProposal) {
    println!("\n--- {} ---", style(&proposal.path).bold());
    if !has_changes(&proposal.patches) {
        println!("{}", style("No changes.").dim());
        return;
    }
    for segment in &proposal.patches {
        for line in segment.text.lines() {
            match segment.kind {
                SegmentKind::Added => println!("{}", style(format!("+ {line}")).green()),
                SegmentKind::Removed => println!("{}", style(format!("- {line}")).red()),
                SegmentKind::Unchanged => println!("  {line}"),
            }
        }
    }
}
