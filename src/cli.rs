//! CLI argument parser for codest.

#![deny(missing_docs)]

use crate::config::DocumentFormat;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Collect project source files into a single document.
#[derive(Parser, Debug)]
#[command(
    name = "codest",
    version,
    about = "Collect project source files into a single document",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors (overrides -v).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Directory selection shared by the scanning subcommands.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Directories to scan. Defaults to ".".
    #[arg(value_name = "DIR", default_value = ".")]
    pub dirs: Vec<PathBuf>,

    /// Directory to leave out entirely (repeatable).
    #[arg(short, long = "exclude", value_name = "DIR")]
    pub exclude: Vec<PathBuf>,

    /// File suffix to collect, e.g. `.py` (repeatable; replaces the defaults).
    #[arg(long = "ext", value_name = "SUFFIX")]
    pub extensions: Vec<String>,
}

/// Top-level subcommands supported by the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default `.codest.toml`.
    Init {
        /// Directory where configuration should live (defaults to pwd).
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite existing configuration if present.
        #[arg(long)]
        force: bool,
    },

    /// Collect files and write the document.
    Collect {
        /// Directories and filters.
        #[command(flatten)]
        scan: ScanArgs,

        /// Output file; `-` writes to stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Largest file rendered inline, in KB (default: 1000).
        #[arg(long = "max-size", value_name = "KB")]
        max_size: Option<u64>,

        /// Document format.
        #[arg(short, long, value_enum)]
        format: Option<DocumentFormat>,
    },

    /// Print the files that would be collected, one per line.
    List {
        /// Directories and filters.
        #[command(flatten)]
        scan: ScanArgs,
    },
}
