//! CLI error types.

use folio_core::FolioError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// The input path, `-` for stdin.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The input does not describe a valid tree.
    #[error(transparent)]
    Model(#[from] FolioError),

    /// A lookup path did not match any node.
    #[error("No node at path '{0}'")]
    PathNotFound(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
