//! Error types for the mining crate.

use thiserror::Error;

/// Errors that can occur during itemset mining and rule generation.
///
/// The taxonomy is deliberately small:
/// - `InvalidParameter` is a caller mistake and fatal to the call; the
///   computation is deterministic, so retrying without corrected parameters
///   cannot change the outcome.
/// - `EmptyInput` means the presence matrix has no item columns at all, which
///   is a malformed input rather than merely empty data. A matrix with zero
///   transactions is *not* an error: the miner returns an empty collection.
/// - `InvariantViolation` signals a broken internal precondition (e.g. a rule
///   antecedent with no recorded support). It indicates a logic defect and
///   should not be caught and suppressed.
#[derive(Error, Debug)]
pub enum MiningError {
    /// A threshold parameter was outside the valid range (0, 1]
    #[error("invalid {param}: {value} (must be in (0, 1])")]
    InvalidParameter { param: &'static str, value: f64 },

    /// The presence matrix has no item columns
    #[error("presence matrix has no items")]
    EmptyInput,

    /// An internal precondition that must always hold was violated
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, MiningError>;

/// Validate that a threshold parameter lies in (0, 1].
pub(crate) fn check_fraction(param: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(MiningError::InvalidParameter { param, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_fraction_bounds() {
        assert!(check_fraction("min_support", 0.005).is_ok());
        assert!(check_fraction("min_support", 1.0).is_ok());
        assert!(check_fraction("min_support", 0.0).is_err());
        assert!(check_fraction("min_support", -0.1).is_err());
        assert!(check_fraction("min_support", 1.1).is_err());
        assert!(check_fraction("min_support", f64::NAN).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = MiningError::InvalidParameter {
            param: "min_confidence",
            value: 1.5,
        };
        assert!(err.to_string().contains("min_confidence"));
        assert!(err.to_string().contains("1.5"));
    }
}
