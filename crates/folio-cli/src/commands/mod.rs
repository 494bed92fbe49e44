//! CLI command implementations.

pub mod encode;
pub mod exposure;
pub mod flatten;
pub mod leaves;
pub mod lookup;
pub mod show;
pub mod validate;

// Re-export submodules for convenience
pub use encode::EncodeArgs;
pub use exposure::ExposureArgs;
pub use flatten::FlattenArgs;
pub use leaves::LeavesArgs;
pub use lookup::LookupArgs;
pub use show::ShowArgs;
pub use validate::ValidateArgs;

use std::io::Read;
use std::path::{Path, PathBuf};

use folio_core::{Allocation, FolioConfig, Node};

use crate::error::{CliError, CliResult};

/// Input path meaning standard input.
pub const STDIN: &str = "-";

/// Reads the input document from a file, or stdin for `-`.
pub fn read_input(path: &Path) -> CliResult<String> {
    let display = path.display().to_string();
    let read_err = |source| CliError::Read {
        path: display.clone(),
        source,
    };

    if path.as_os_str() == STDIN {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(read_err)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).map_err(read_err)
    }
}

/// Reads and decodes a node.
pub fn load_node(path: &Path, config: &FolioConfig) -> CliResult<Node> {
    let text = read_input(path)?;
    let node = Node::from_text_with(&text, &config.codec)?;
    tracing::debug!(input = %path.display(), root = node.name(), "loaded tree");
    Ok(node)
}

/// Reads and decodes a node that must be an allocation.
pub fn load_allocation(path: &Path, config: &FolioConfig) -> CliResult<Allocation> {
    Ok(Allocation::try_from(load_node(path, config)?)?)
}

/// Loads the configuration from an explicit path, or from the default
/// location when that file exists, or falls back to defaults.
pub fn load_config(explicit: Option<&Path>) -> CliResult<FolioConfig> {
    if let Some(path) = explicit {
        return Ok(FolioConfig::from_file(path)?);
    }

    match default_config_path() {
        Some(path) if path.exists() => Ok(FolioConfig::from_file(path)?),
        _ => Ok(FolioConfig::default()),
    }
}

/// Get the default config file path.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join("folio").join("config.toml"))
}
