//! Encode command implementation.
//!
//! Decodes a document and writes back its canonical JSON text.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use folio_core::FolioConfig;

use crate::commands::load_node;

/// Arguments for the encode command.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// JSON document to read (`-` for stdin)
    pub input: PathBuf,

    /// Indent the output regardless of configuration
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the encode command.
pub fn execute(args: EncodeArgs, config: &FolioConfig) -> Result<()> {
    let node = load_node(&args.input, config)?;
    let codec = config
        .codec
        .with_pretty_json(args.pretty || config.codec.pretty_json);
    println!("{}", node.to_text_with(&codec));
    Ok(())
}
