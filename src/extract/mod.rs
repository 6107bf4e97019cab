//! Turning recognized text and spreadsheet cells into typed values.
//!
//! Every parser is total: bad input yields an [`ExtractError`] naming the
//! step that rejected it, never a panic.

pub mod cell;
pub mod power;
pub mod seed;

pub use cell::cell_text;
pub use power::parse_power;
pub use seed::parse_seed_count;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("parse failure: {text:?} is not a power value")]
    Power { text: String },
    #[error("seed text has no '剩余' prefix: {text:?}")]
    SeedMissingPrefix { text: String },
    #[error("seed text has no colon after '剩余': {text:?}")]
    SeedMissingColon { text: String },
    #[error("seed text has no '/' separator: {text:?}")]
    SeedMissingSlash { text: String },
    #[error("seed count {count:?} is not a number (text {text:?})")]
    SeedNotNumeric { count: String, text: String },
}

/// Maps an ASCII or full-width (`０`-`９`) decimal digit to its ASCII form.
fn ascii_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        '０'..='９' => char::from_u32(u32::from(c) - u32::from('０') + u32::from('0')),
        _ => None,
    }
}

/// Rewrites a non-empty run of decimal digits as ASCII, so OCR output like
/// `"１２"` parses the same as `"12"`. Anything else yields `None`.
pub(crate) fn normalize_digits(s: &str) -> Option<String> {
    if s.is_empty() {
        return None;
    }
    s.chars().map(ascii_digit).collect()
}
