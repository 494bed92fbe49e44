//! Folio CLI - Command-line interface for allocation trees.
//!
//! # Usage
//!
//! ```bash
//! # Pretty-print a tree
//! folio show retirement.json
//!
//! # Leaf paths with their share of the root
//! folio flatten retirement.json --format csv
//!
//! # Navigate to a sub-allocation
//! folio lookup retirement.json Stocks/International
//!
//! # Validate a document read from stdin
//! cat retirement.json | folio validate -
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;
    let format = cli.format;

    // Execute command
    match cli.command {
        Commands::Show(args) => commands::show::execute(args, &config, format)?,
        Commands::Validate(args) => commands::validate::execute(args, &config, format)?,
        Commands::Flatten(args) => commands::flatten::execute(args, &config, format)?,
        Commands::Leaves(args) => commands::leaves::execute(args, &config, format)?,
        Commands::Exposure(args) => commands::exposure::execute(args, &config, format)?,
        Commands::Lookup(args) => commands::lookup::execute(args, &config, format)?,
        Commands::Encode(args) => commands::encode::execute(args, &config)?,
    }

    Ok(())
}

/// Logs go to stderr so they never mix with command output.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,folio_core=debug,folio_cli=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
