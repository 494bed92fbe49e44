//! Value types shared across the crate.
//!
//! - [`Weight`]: exact share of a parent allocation

mod weight;

pub use weight::{total, Weight, MAX_SCALE};
