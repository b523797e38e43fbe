//! Error types for dip testing and unimodal clustering
//!
//! Only malformed input structure or unusable parameters surface as errors.
//! Numeric edge cases (too few points, degenerate null distributions) are
//! resolved by the algorithms themselves and never reach this type.

use thiserror::Error;

/// Core error type shared by all unidip crates
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed input: empty data, mismatched lengths, duplicates, NaN
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration value outside its admissible range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operation needs more data than it was given
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for empty input
    pub fn empty_input(context: &str) -> Self {
        Self::InvalidInput(format!("{context} must not be empty"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("alpha must lie in [0, 1]".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: alpha must lie in [0, 1]");

        let err = Error::InvalidInput("support contains duplicates".to_string());
        assert_eq!(err.to_string(), "Invalid input: support contains duplicates");

        let err = Error::InsufficientData { expected: 5, actual: 2 };
        assert_eq!(err.to_string(), "Insufficient data: expected at least 5 samples, got 2");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::empty_input("sample");
        assert_eq!(err.to_string(), "Invalid input: sample must not be empty");

        let err = Error::size_mismatch(7, 6, "histogram weights");
        assert_eq!(
            err.to_string(),
            "Invalid input: Size mismatch in histogram weights: expected 7, got 6"
        );

        let err = Error::non_finite("support");
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("NaN or infinite"));
    }

    #[test]
    fn test_result_type_alias() {
        fn check_alpha(alpha: f64) -> Result<f64> {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(Error::InvalidParameter(format!("alpha {alpha} out of range")));
            }
            Ok(alpha)
        }

        assert_eq!(check_alpha(0.05), Ok(0.05));
        assert!(check_alpha(1.5).is_err());
    }
}
