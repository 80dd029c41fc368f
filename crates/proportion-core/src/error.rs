//! Error types for binomial proportion estimation
//!
//! Provides a unified error type for all proportion-stats crates.

use serde::Serialize;
use thiserror::Error;

/// Core error type for proportion estimation
///
/// The type is `Clone` and `PartialEq` so that a failure of one estimation
/// method can be stored next to the successful results of the others.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum Error {
    /// A request parameter violated its precondition
    #[error("Invalid parameter `{field}`: {reason}")]
    InvalidParameter {
        /// Name of the offending field (`n`, `p`, `confidence_level`, ...)
        field: &'static str,
        /// Human readable description of the violation
        reason: String,
    },

    /// The observed proportion sits on a distribution boundary and the
    /// interval collapsed to a point
    #[error("Degenerate estimate: {0}")]
    DegenerateEstimate(String),

    /// The HDR density threshold could not be bracketed or did not converge
    #[error("Threshold search failed after {iterations} iterations: {reason}")]
    ThresholdSearchFailure { iterations: usize, reason: String },

    /// Numerical computation error reported by a distribution backend
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a violated parameter precondition
    pub fn invalid_parameter(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// Create an error for a success probability outside `(0, 1]`
    pub fn invalid_probability(p: f64) -> Self {
        Self::invalid_parameter("p", format!("probability {p} must be in (0, 1]"))
    }

    /// Create an error for a confidence level outside `(0, 1)`
    pub fn invalid_confidence_level(level: f64) -> Self {
        Self::invalid_parameter(
            "confidence_level",
            format!("confidence level {level} must be in (0, 1)"),
        )
    }

    /// Create an error for a failing distribution constructor
    pub fn distribution(name: &str, err: impl std::fmt::Display) -> Self {
        Self::Computation(format!("Failed to create {name} distribution: {err}"))
    }

    /// Field name for `InvalidParameter` errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_parameter("n", "must be at least 1");
        assert_eq!(err.to_string(), "Invalid parameter `n`: must be at least 1");

        let err = Error::DegenerateEstimate("p_hat = 0".to_string());
        assert_eq!(err.to_string(), "Degenerate estimate: p_hat = 0");

        let err = Error::ThresholdSearchFailure {
            iterations: 10_000,
            reason: "no sign change".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Threshold search failed after 10000 iterations: no sign change"
        );

        let err = Error::Computation("convergence failed".to_string());
        assert_eq!(err.to_string(), "Computation error: convergence failed");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::invalid_probability(1.5);
        assert_eq!(
            err.to_string(),
            "Invalid parameter `p`: probability 1.5 must be in (0, 1]"
        );
        assert_eq!(err.field(), Some("p"));

        let err = Error::invalid_confidence_level(0.0);
        assert_eq!(err.field(), Some("confidence_level"));

        let err = Error::distribution("Beta", "shape must be positive");
        assert_eq!(
            err.to_string(),
            "Computation error: Failed to create Beta distribution: shape must be positive"
        );
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_error_is_comparable() {
        let a = Error::invalid_parameter("n", "zero");
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, Error::invalid_parameter("p", "zero"));
    }

    #[test]
    fn test_error_serializes() {
        let err = Error::ThresholdSearchFailure {
            iterations: 3,
            reason: "cap".to_string(),
        };
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("ThresholdSearchFailure"));
        assert!(json.contains("\"iterations\":3"));
    }
}
