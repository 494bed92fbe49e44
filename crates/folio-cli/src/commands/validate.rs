//! Validate command implementation.
//!
//! Decodes a document, which checks every allocation invariant, and
//! summarizes the tree.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use folio_core::{FolioConfig, Node};

use crate::cli::OutputFormat;
use crate::commands::load_node;
use crate::output::{print_header, print_success, KeyValue};

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON document to read (`-` for stdin)
    pub input: PathBuf,
}

/// Structural summary of a valid tree.
#[derive(Debug, Serialize)]
struct Summary {
    valid: bool,
    root: String,
    kind: &'static str,
    children: usize,
    leaf_positions: usize,
    distinct_instruments: usize,
    depth: usize,
}

impl Summary {
    fn of(node: &Node) -> Self {
        let (kind, children, leaf_positions, distinct_instruments) = match node {
            Node::Instrument(_) => ("instrument", 0, 1, 1),
            Node::Allocation(allocation) => (
                "allocation",
                allocation.len(),
                allocation.leaf_count(),
                allocation.all_leaf_instruments().len(),
            ),
        };

        Self {
            valid: true,
            root: node.name().to_string(),
            kind,
            children,
            leaf_positions,
            distinct_instruments,
            depth: node.depth(),
        }
    }
}

/// Execute the validate command.
pub fn execute(args: ValidateArgs, config: &FolioConfig, format: OutputFormat) -> Result<()> {
    let node = load_node(&args.input, config)?;
    let summary = Summary::of(&node);

    match format {
        OutputFormat::Json => crate::output::print_json(&summary)?,
        OutputFormat::Minimal => println!("valid"),
        OutputFormat::Table | OutputFormat::Csv => {
            let rows = vec![
                KeyValue::new("Root", &summary.root),
                KeyValue::new("Kind", summary.kind),
                KeyValue::new("Children", summary.children),
                KeyValue::new("Leaf positions", summary.leaf_positions),
                KeyValue::new("Distinct instruments", summary.distinct_instruments),
                KeyValue::new("Depth", summary.depth),
            ];
            if format == OutputFormat::Table {
                print_header("Tree Summary");
            }
            crate::output::print_rows(&rows, format, |row| row.value.clone())?;
            if format == OutputFormat::Table {
                print_success(&format!("{} is valid", args.input.display()));
            }
        }
    }

    Ok(())
}
