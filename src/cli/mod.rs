//! Command-line interface for repo-edit
//!
//! Provides `index`, `related` and `edit` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod edit;
mod index;
mod related;

/// Propose, review and commit AI-generated multi-file edits
#[derive(Parser)]
#[command(name = "repo-edit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and persist the import graph for a project root
    Index(index::IndexArgs),

    /// Show files related to a file, per the persisted import graph
    Related(related::RelatedArgs),

    /// Run one instruction-driven edit request (plan, generate, diff, apply)
    Edit(Box<edit::EditArgs>),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Index(args) => index::run(args),
        Commands::Related(args) => related::run(args),
        Commands::Edit(args) => edit::run(*args),
    }
}
