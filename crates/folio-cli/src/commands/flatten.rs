//! Flatten command implementation.
//!
//! Lists every leaf path below the root with its share of the root.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

use folio_core::types::total;
use folio_core::FolioConfig;

use crate::cli::OutputFormat;
use crate::commands::load_allocation;
use crate::output::{format_percent, print_header};

/// Arguments for the flatten command.
#[derive(Args, Debug)]
pub struct FlattenArgs {
    /// JSON document of an allocation (`-` for stdin)
    pub input: PathBuf,
}

#[derive(Debug, Serialize, Tabled)]
struct FlatRow {
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Percent")]
    percent: String,
}

/// Execute the flatten command.
pub fn execute(args: FlattenArgs, config: &FolioConfig, format: OutputFormat) -> Result<()> {
    let allocation = load_allocation(&args.input, config)?;
    let flat = allocation.flatten();

    if format == OutputFormat::Json {
        return crate::output::print_json(&flat);
    }

    let rows: Vec<FlatRow> = flat
        .iter()
        .map(|(path, weight)| FlatRow {
            path: path.clone(),
            weight: weight.to_string(),
            percent: format_percent(weight.as_decimal()),
        })
        .collect();

    if format == OutputFormat::Table {
        print_header(&format!("Flattened {}", allocation.name()));
    }
    crate::output::print_rows(&rows, format, |row| format!("{} {}", row.path, row.weight))?;
    if format == OutputFormat::Table {
        println!("Total: {}", total(flat.values()));
    }

    Ok(())
}
