//! Allocation tree model.
//!
//! - [`Node`]: closed union over the two node kinds
//! - [`Instrument`]: leaf identified by a ticker
//! - [`Allocation`]: named interior node whose child weights sum to one
//! - [`AllocationBuilder`]: fluent construction of allocations

mod allocation;
mod builder;
mod instrument;
mod node;

pub use allocation::Allocation;
pub use builder::AllocationBuilder;
pub use instrument::Instrument;
pub use node::Node;

/// Separator between names in flattened and resolved paths.
pub const PATH_SEPARATOR: char = '/';
