//! Exposure command implementation.
//!
//! Sums each instrument's share of the root over every path reaching it.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

use folio_core::FolioConfig;

use crate::cli::OutputFormat;
use crate::commands::load_allocation;
use crate::output::{format_percent, print_header};

/// Arguments for the exposure command.
#[derive(Args, Debug)]
pub struct ExposureArgs {
    /// JSON document of an allocation (`-` for stdin)
    pub input: PathBuf,

    /// Sort by share, largest first, instead of by ticker
    #[arg(long)]
    pub by_share: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ExposureRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Percent")]
    percent: String,
}

/// Execute the exposure command.
pub fn execute(args: ExposureArgs, config: &FolioConfig, format: OutputFormat) -> Result<()> {
    let allocation = load_allocation(&args.input, config)?;

    let mut exposures: Vec<_> = allocation.exposures().into_iter().collect();
    if args.by_share {
        exposures.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    }

    let rows: Vec<ExposureRow> = exposures
        .into_iter()
        .map(|(instrument, share)| ExposureRow {
            ticker: instrument.ticker().to_string(),
            share: share.normalize().to_string(),
            percent: format_percent(share),
        })
        .collect();

    if format == OutputFormat::Table {
        print_header(&format!("Exposure of {}", allocation.name()));
    }
    crate::output::print_rows(&rows, format, |row| format!("{} {}", row.ticker, row.share))
}
