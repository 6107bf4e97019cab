//! Minimum of two configuration-sourced numbers.

use serde_json::Value;
use thiserror::Error;

use crate::extract::normalize_digits;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompareError {
    #[error("non-numeric first operand: {0}")]
    NonNumericFirst(String),
    #[error("non-numeric second operand: {0}")]
    NonNumericSecond(String),
}

/// Reads a value as a non-negative integer.
///
/// Accepts unsigned JSON integers and strings made only of decimal digits
/// (ASCII or full-width).
/// Anything else (negative, fractional, boolean, `"12a"`, `""`) is rejected.
pub fn as_whole_number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => normalize_digits(s)?.parse().ok(),
        _ => None,
    }
}

/// Returns the smaller of two whole-number operands.
pub fn smaller(a: &Value, b: &Value) -> Result<u64, CompareError> {
    let left = as_whole_number(a).ok_or_else(|| CompareError::NonNumericFirst(a.to_string()))?;
    let right = as_whole_number(b).ok_or_else(|| CompareError::NonNumericSecond(b.to_string()))?;
    Ok(left.min(right))
}
