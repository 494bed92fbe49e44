//! Lookup command implementation.
//!
//! Resolves a `/`-separated path of child names below the root.

use anyhow::Result;
use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use folio_core::{FolioConfig, Node};

use crate::cli::OutputFormat;
use crate::commands::load_node;
use crate::error::CliError;
use crate::output::{format_percent, print_header, KeyValue};

/// Arguments for the lookup command.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// JSON document to read (`-` for stdin)
    pub input: PathBuf,

    /// Child names separated by `/`, e.g. `Stocks/US/VTI`
    pub path: String,
}

/// Execute the lookup command.
pub fn execute(args: LookupArgs, config: &FolioConfig, format: OutputFormat) -> Result<()> {
    let root = load_node(&args.input, config)?;
    let (node, share) = root
        .resolve(&args.path)?
        .ok_or_else(|| CliError::PathNotFound(args.path.clone()))?;

    let kind = match node {
        Node::Instrument(_) => "instrument",
        Node::Allocation(_) => "allocation",
    };

    match format {
        OutputFormat::Json => {
            let output = json!({
                "path": args.path,
                "name": node.name(),
                "kind": kind,
                "share": share,
                "node": node,
            });
            crate::output::print_json(&output)?;
        }
        OutputFormat::Minimal => println!("{}", share),
        OutputFormat::Table | OutputFormat::Csv => {
            let rows = vec![
                KeyValue::new("Path", &args.path),
                KeyValue::new("Name", node.name()),
                KeyValue::new("Kind", kind),
                KeyValue::new("Share of root", share),
                KeyValue::new("Percent of root", format_percent(share.as_decimal())),
            ];
            if format == OutputFormat::Table {
                print_header(&format!("{} in {}", node.name(), root.name()));
            }
            crate::output::print_rows(&rows, format, |row| row.value.clone())?;
            if format == OutputFormat::Table && !node.is_leaf() {
                println!("\n{}", node.pretty_with(0, &config.render));
            }
        }
    }

    Ok(())
}
