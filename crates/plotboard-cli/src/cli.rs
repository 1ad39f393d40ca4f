//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Plotboard: turn a flat manuscript into a structured story board.
#[derive(Debug, Parser)]
#[command(name = "plotboard", version, about)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (equivalent to RUST_LOG=debug)
    #[arg(long, global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import a markdown manuscript into a new project file
    Import(ImportArgs),

    /// Run entity extraction for a project file
    Extract(ExtractArgs),

    /// Show a summary of a project file
    Status(StatusArgs),
}

/// Arguments for the import command.
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to the markdown manuscript
    pub manuscript: PathBuf,

    /// Path of the project file to create
    #[arg(short, long)]
    pub output: PathBuf,

    /// Book type: "novel" or "collection"
    #[arg(long, default_value = "novel")]
    pub book_type: String,
}

/// Arguments for the extract command.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Path to the project file (updated in place)
    pub project: PathBuf,

    /// Generation service endpoint (overrides config)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Model name (overrides config)
    #[arg(long)]
    pub model: Option<String>,
}

/// Arguments for the status command.
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Path to the project file
    pub project: PathBuf,
}
