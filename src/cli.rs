//! CLI argument parsing module for pkgpulse

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// npm dependency update checker
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pkgpulse",
    version,
    about = "Check npm dependencies for available updates"
)]
pub struct CliArgs {
    /// Target directory containing package.json (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Skip packages matching a pattern: exact name, glob, or regex
    /// (can be specified multiple times or comma-separated)
    #[arg(short = 's', long = "skip", action = ArgAction::Append, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Enable quiet mode - summary only, no per-package output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Report only - never offer the interactive upgrade prompt
    #[arg(long)]
    pub no_prompt: bool,

    /// Skip the check for a newer pkgpulse release
    #[arg(long)]
    pub no_self_check: bool,
}
