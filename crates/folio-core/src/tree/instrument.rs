//! Leaf nodes.

use serde_json::Value;
use std::fmt;

use crate::config::RenderConfig;
use crate::error::{FolioError, FolioResult};

/// A tradable instrument, identified by its ticker.
///
/// Two instruments with the same ticker are the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Instrument {
    ticker: String,
}

impl Instrument {
    /// Creates an instrument from a ticker.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::InvalidTicker` if the ticker is empty.
    pub fn new(ticker: impl Into<String>) -> FolioResult<Self> {
        let ticker = ticker.into();
        if ticker.is_empty() {
            return Err(FolioError::InvalidTicker {
                reason: "ticker must not be empty".into(),
            });
        }
        Ok(Self { ticker })
    }

    /// Returns the ticker.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Returns the display name, which is the ticker.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.ticker
    }

    /// Renders the instrument at the given indentation level.
    #[must_use]
    pub fn pretty(&self, indent: usize) -> String {
        self.pretty_with(indent, &RenderConfig::default())
    }

    /// Renders the instrument with explicit render settings.
    #[must_use]
    pub fn pretty_with(&self, indent: usize, render: &RenderConfig) -> String {
        format!("{}Instrument(ticker='{}')", render.pad(indent), self.ticker)
    }

    /// Encodes the instrument as `{"type": "EQUITY", "ticker": ...}`.
    #[must_use]
    pub fn to_structured(&self) -> Value {
        crate::codec::encode_instrument(self)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty(0))
    }
}
