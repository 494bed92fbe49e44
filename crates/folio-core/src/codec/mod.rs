//! Structured (JSON value) and textual encodings of allocation trees.
//!
//! Decoding is the inverse of encoding: for any valid tree `t`,
//! `from_text(&to_text(&t)) == t`, with weights preserved digit for digit.

mod structured;
mod text;

pub use structured::{
    decode, encode, encode_allocation, encode_instrument, TYPE_EQUITY, TYPE_PORTFOLIO,
};
pub use text::{from_text, to_text};
