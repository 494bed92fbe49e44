//! Show command implementation.
//!
//! Pretty-prints a tree.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use folio_core::FolioConfig;

use crate::cli::OutputFormat;
use crate::commands::load_node;

/// Arguments for the show command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// JSON document to read (`-` for stdin)
    pub input: PathBuf,

    /// Base indentation level
    #[arg(long, default_value = "0")]
    pub indent: usize,
}

/// Execute the show command.
pub fn execute(args: ShowArgs, config: &FolioConfig, format: OutputFormat) -> Result<()> {
    let node = load_node(&args.input, config)?;

    match format {
        OutputFormat::Json => crate::output::print_json(&node)?,
        OutputFormat::Table | OutputFormat::Csv | OutputFormat::Minimal => {
            println!("{}", node.pretty_with(args.indent, &config.render));
        }
    }

    Ok(())
}
