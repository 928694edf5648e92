//! Typed CSS length values for style measurement.
//!
//! Computed styles come back from the style engine as serialized strings
//! (`"12px"`, `"1.5em"`, `"normal"`). This crate turns those strings into
//! numbers with an explicit unit and, for the measurement core, provides a
//! pixel parser that never fails loudly.

#![forbid(unsafe_code)]

pub mod dimensions;
pub mod pixels;

pub use dimensions::{Length, LengthUnit, compute_length_px, parse_length, parse_length_str};
pub use pixels::{format_px, parse_px};

/// Parse error for the length parsing utilities in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The next token did not match the expected grammar.
    UnexpectedToken,
    /// A value parsed, but more input followed it.
    TrailingInput,
}
