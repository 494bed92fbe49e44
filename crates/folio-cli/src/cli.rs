//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::commands::{
    EncodeArgs, ExposureArgs, FlattenArgs, LeavesArgs, LookupArgs, ShowArgs, ValidateArgs,
};

/// Folio - inspect hierarchical allocation trees
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (TOML). Defaults to <config dir>/folio/config.toml
    #[arg(short, long, global = true, env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Pretty-print a tree
    Show(ShowArgs),

    /// Check that a document describes a valid tree
    Validate(ValidateArgs),

    /// List every leaf path with its share of the root
    Flatten(FlattenArgs),

    /// List the distinct instruments in a tree
    Leaves(LeavesArgs),

    /// Total share of each instrument across all paths
    Exposure(ExposureArgs),

    /// Resolve a `/`-separated path below the root
    Lookup(LookupArgs),

    /// Re-emit the canonical JSON encoding
    Encode(EncodeArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the values)
    Minimal,
}
