//! Error types for allocation trees.
//!
//! Every failure in the crate is reported through [`FolioError`]. Nothing is
//! retried or recovered locally; construction errors leave no partially built
//! value behind.

use rust_decimal::Decimal;
use thiserror::Error;

/// A specialized Result type for Folio operations.
pub type FolioResult<T> = Result<T, FolioError>;

/// The main error type for Folio operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FolioError {
    /// Child weights of an allocation do not add up to exactly one.
    #[error("Weights of allocation '{allocation}' sum to {sum}, expected exactly 1")]
    WeightSum {
        /// Name of the allocation being built.
        allocation: String,
        /// The actual sum of the child weights.
        sum: Decimal,
    },

    /// Two immediate children of an allocation share a name.
    #[error("Allocation '{allocation}' has more than one child named '{name}'")]
    DuplicateChildName {
        /// Name of the allocation being built.
        allocation: String,
        /// The repeated child name.
        name: String,
    },

    /// A weight could not be parsed or lies outside (0, 1].
    #[error("Invalid weight '{value}': {reason}")]
    InvalidWeight {
        /// The offending weight, as given.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Flattened weights below an allocation would need more decimal places
    /// than the decimal type holds.
    #[error("Allocation '{allocation}' needs {scale} decimal places for its flattened weights, more than the supported 28")]
    PrecisionExceeded {
        /// Name of the allocation being built.
        allocation: String,
        /// Decimal places its deepest path product would need.
        scale: u32,
    },

    /// A ticker was rejected.
    #[error("Invalid ticker: {reason}")]
    InvalidTicker {
        /// Why it was rejected.
        reason: String,
    },

    /// The `type` discriminant of a document is missing or unknown.
    #[error("Invalid node type {} at {context}", found.as_deref().unwrap_or("<missing>"))]
    InvalidNodeType {
        /// The discriminant found, if any.
        found: Option<String>,
        /// Location of the offending document.
        context: String,
    },

    /// A document has missing or mistyped fields.
    #[error("Malformed structure at {context}: {reason}")]
    MalformedStructure {
        /// Location of the offending field.
        context: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The text could not be parsed as JSON.
    #[error("Parse error: {reason}")]
    ParseError {
        /// Parser diagnostic.
        reason: String,
    },

    /// Name lookup was attempted on an instrument.
    #[error("Instrument '{ticker}' has no children to look up")]
    NotSliceable {
        /// Ticker of the instrument.
        ticker: String,
    },

    /// A document nests deeper than the configured limit.
    #[error("Document nesting exceeds the limit of {limit} levels")]
    DepthExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// Configuration could not be loaded.
    #[error("Configuration error: {reason}")]
    ConfigError {
        /// Description of the configuration error.
        reason: String,
    },
}

impl FolioError {
    /// Creates a weight sum error.
    #[must_use]
    pub fn weight_sum(allocation: impl Into<String>, sum: Decimal) -> Self {
        Self::WeightSum {
            allocation: allocation.into(),
            sum,
        }
    }

    /// Creates a duplicate child name error.
    #[must_use]
    pub fn duplicate_child(allocation: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateChildName {
            allocation: allocation.into(),
            name: name.into(),
        }
    }

    /// Creates an invalid weight error.
    #[must_use]
    pub fn invalid_weight(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidWeight {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates a precision exceeded error.
    #[must_use]
    pub fn precision_exceeded(allocation: impl Into<String>, scale: u32) -> Self {
        Self::PrecisionExceeded {
            allocation: allocation.into(),
            scale,
        }
    }

    /// Creates an invalid node type error.
    #[must_use]
    pub fn invalid_node_type(found: Option<String>, context: impl Into<String>) -> Self {
        Self::InvalidNodeType {
            found,
            context: context.into(),
        }
    }

    /// Creates a malformed structure error.
    #[must_use]
    pub fn malformed(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedStructure {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Self::ParseError {
            reason: reason.into(),
        }
    }

    /// Creates a not sliceable error.
    #[must_use]
    pub fn not_sliceable(ticker: impl Into<String>) -> Self {
        Self::NotSliceable {
            ticker: ticker.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config_error(reason: impl Into<String>) -> Self {
        Self::ConfigError {
            reason: reason.into(),
        }
    }
}
