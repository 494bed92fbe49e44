//! Rendering and codec settings.
//!
//! Settings deserialize from TOML with every field optional:
//!
//! ```toml
//! [render]
//! indent_width = 4
//!
//! [codec]
//! max_depth = 32
//! pretty_json = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FolioError, FolioResult};

/// Spaces per indentation level used by `pretty`.
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// Deepest nesting accepted by the decoder.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Pretty-printing settings.
    pub render: RenderConfig,

    /// Structured and text codec settings.
    pub codec: CodecConfig,
}

impl FolioConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::ConfigError` if the text is not valid TOML or
    /// contains mistyped fields.
    pub fn from_toml_str(text: &str) -> FolioResult<Self> {
        toml::from_str(text).map_err(|e| FolioError::config_error(e.to_string()))
    }

    /// Loads a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::ConfigError` if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> FolioResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| FolioError::config_error(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loading configuration");
        Self::from_toml_str(&content)
    }

    /// Sets the render settings.
    #[must_use]
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    /// Sets the codec settings.
    #[must_use]
    pub fn with_codec(mut self, codec: CodecConfig) -> Self {
        self.codec = codec;
        self
    }
}

/// Pretty-printing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Spaces per indentation level.
    pub indent_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

impl RenderConfig {
    /// Sets the indentation width.
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Leading whitespace for the given level.
    #[must_use]
    pub fn pad(&self, level: usize) -> String {
        " ".repeat(level * self.indent_width)
    }
}

/// Codec settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Deepest node nesting accepted when decoding. The root is level 1.
    pub max_depth: usize,

    /// Emit indented JSON text.
    pub pretty_json: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            pretty_json: false,
        }
    }
}

impl CodecConfig {
    /// Sets the nesting limit.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets whether text output is indented.
    #[must_use]
    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }
}
