//! Entry-point validation for user-typed amounts and limits.

use crate::error::{LedgerError, Result};

/// Parses a user-supplied amount or budget limit.
///
/// Leading and trailing whitespace is ignored. The value must be a finite
/// decimal number greater than zero.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidAmount`] carrying the raw input if it does
/// not parse or is not strictly positive.
#[inline]
pub fn parse_amount(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0_f64 => Ok(value),
        Ok(_) | Err(_) => Err(LedgerError::InvalidAmount(input.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_decimals() {
        assert!((parse_amount("1500").unwrap() - 1500.0).abs() < f64::EPSILON);
        assert!((parse_amount(" 12.75 ").unwrap() - 12.75).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert!(matches!(parse_amount("0"), Err(LedgerError::InvalidAmount(_))));
        assert!(matches!(parse_amount("-5"), Err(LedgerError::InvalidAmount(_))));
    }

    #[test]
    fn rejects_garbage_and_non_finite() {
        for input in ["", "abc", "12,5", "NaN", "inf", "1e999"] {
            assert!(parse_amount(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn error_keeps_raw_input() {
        let err = parse_amount(" x ").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(ref raw) if raw == " x "));
    }
}
