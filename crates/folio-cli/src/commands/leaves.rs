//! Leaves command implementation.
//!
//! Lists the distinct instruments of a tree in ticker order.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

use folio_core::{FolioConfig, Instrument, Node};

use crate::cli::OutputFormat;
use crate::commands::load_node;

/// Arguments for the leaves command.
#[derive(Args, Debug)]
pub struct LeavesArgs {
    /// JSON document to read (`-` for stdin)
    pub input: PathBuf,
}

#[derive(Debug, Serialize, Tabled)]
struct LeafRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
}

/// Execute the leaves command.
pub fn execute(args: LeavesArgs, config: &FolioConfig, format: OutputFormat) -> Result<()> {
    let node = load_node(&args.input, config)?;

    let mut leaves: Vec<&Instrument> = match &node {
        Node::Instrument(instrument) => vec![instrument],
        Node::Allocation(allocation) => allocation.all_leaf_instruments().into_iter().collect(),
    };
    leaves.sort();

    let rows: Vec<LeafRow> = leaves
        .into_iter()
        .map(|instrument| LeafRow {
            ticker: instrument.ticker().to_string(),
        })
        .collect();

    crate::output::print_rows(&rows, format, |row| row.ticker.clone())
}
