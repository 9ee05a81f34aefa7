//! Conversion between the chain's unsigned 8-decimal fixed-point strings
//! (`"1.00000000"`) and integer minor-unit strings (`"100000000"`).

use thiserror::Error;

/// Number of fractional digits in the chain's fixed-point format
pub const FRACTION_DIGITS: usize = 8;

/// Scale factor between whole units and minor units
pub const SCALE: u64 = 100_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixedPointError {
    #[error("Empty fixed-point value")]
    Empty,

    #[error("Negative fixed-point value: {0}")]
    Negative(String),

    #[error("Missing fractional part in {0}")]
    MissingFraction(String),

    #[error("Expected {FRACTION_DIGITS} fractional digits, got {got}")]
    FractionDigits { got: usize },

    #[error("Invalid digit in fixed-point value: {0}")]
    InvalidDigit(String),

    #[error("Fixed-point value out of range: {0}")]
    Overflow(String),
}

/// Parse an unsigned fixed-point string into its minor-unit integer value.
pub fn parse_ufix64(input: &str) -> Result<u64, FixedPointError> {
    if input.is_empty() {
        return Err(FixedPointError::Empty);
    }
    if input.starts_with('-') {
        return Err(FixedPointError::Negative(input.to_string()));
    }

    let (integer, fraction) = input
        .split_once('.')
        .ok_or_else(|| FixedPointError::MissingFraction(input.to_string()))?;

    if integer.is_empty() || !integer.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FixedPointError::InvalidDigit(input.to_string()));
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FixedPointError::InvalidDigit(input.to_string()));
    }
    if fraction.len() != FRACTION_DIGITS {
        return Err(FixedPointError::FractionDigits {
            got: fraction.len(),
        });
    }

    let overflow = || FixedPointError::Overflow(input.to_string());

    // Both halves are ASCII digits at this point, so parsing only fails on overflow.
    let whole: u64 = integer.parse().map_err(|_| overflow())?;
    let frac: u64 = fraction.parse().map_err(|_| overflow())?;

    whole
        .checked_mul(SCALE)
        .and_then(|scaled| scaled.checked_add(frac))
        .ok_or_else(overflow)
}

/// Convert `"1.00000000"` into `"100000000"`.
pub fn to_minor_units(input: &str) -> Result<String, FixedPointError> {
    parse_ufix64(input).map(|value| value.to_string())
}

/// Format a minor-unit value back into the chain's fixed-point form.
pub fn format_ufix64(value: u64) -> String {
    format!(
        "{}.{:0width$}",
        value / SCALE,
        value % SCALE,
        width = FRACTION_DIGITS
    )
}
