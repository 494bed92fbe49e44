//! # Folio Core
//!
//! Hierarchical investment allocation trees with exact decimal weights.
//!
//! Leaves are tradable [`Instrument`]s; interior [`Allocation`]s split 100%
//! of their value among uniquely named children. Every allocation is
//! validated when it is built and is immutable afterwards.
//!
//! - **Model**: [`Node`], [`Instrument`], [`Allocation`], [`Weight`]
//! - **Views**: flattening to leaf paths, leaf collection, exposures,
//!   pretty-printing
//! - **Codec**: lossless JSON value and text encoding
//!
//! ## Example
//!
//! ```rust
//! use folio_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let root = Allocation::builder("Root")
//!     .child_str(Instrument::new("AAA")?, "0.5")
//!     .child_str(
//!         Allocation::builder("Sub")
//!             .child_str(Instrument::new("BBB")?, "1")
//!             .build()?,
//!         "0.5",
//!     )
//!     .build()?;
//!
//! let flat = root.flatten();
//! assert_eq!(flat["Root/AAA"].as_decimal(), dec!(0.5));
//!
//! let text = Node::from(root.clone()).to_text();
//! assert_eq!(Allocation::from_text(&text)?, root);
//! # Ok::<(), FolioError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::needless_pass_by_value)]

pub mod codec;
pub mod config;
pub mod error;
pub mod tree;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{CodecConfig, FolioConfig, RenderConfig};
    pub use crate::error::{FolioError, FolioResult};
    pub use crate::tree::{Allocation, AllocationBuilder, Instrument, Node, PATH_SEPARATOR};
    pub use crate::types::Weight;
    pub use rust_decimal::Decimal;
}

// Re-export commonly used types at crate root
pub use config::FolioConfig;
pub use error::{FolioError, FolioResult};
pub use tree::{Allocation, AllocationBuilder, Instrument, Node};
pub use types::Weight;
