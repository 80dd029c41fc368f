//! Validated estimation requests
//!
//! A request carries the three scalars the presentation layer collects:
//! the trial count `n`, the probability `p` used to simulate the experiment,
//! and the confidence level of the reported intervals.

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Smallest accepted trial count
pub const MIN_TRIALS: u64 = 1;

/// Smallest accepted simulation probability
pub const MIN_PROBABILITY: f64 = 0.001;

/// Smallest accepted expected success count `n * p`
///
/// Below one expected success a single simulated sample carries no usable
/// information about the proportion.
pub const MIN_EXPECTED_SUCCESSES: f64 = 1.0;

/// Confidence level type with validation
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    /// Create a new confidence level
    ///
    /// # Panics
    /// Panics if level is not in (0, 1)
    pub fn new(level: f64) -> Self {
        assert!(
            level > 0.0 && level < 1.0,
            "Confidence level must be in (0, 1)"
        );
        Self(level)
    }

    /// Create a new confidence level, reporting an error instead of panicking
    pub fn try_new(level: f64) -> Result<Self> {
        if level > 0.0 && level < 1.0 {
            Ok(Self(level))
        } else {
            Err(Error::invalid_confidence_level(level))
        }
    }

    /// Get the confidence level value
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Get the alpha level (1 - confidence level)
    pub fn alpha(&self) -> f64 {
        1.0 - self.0
    }

    /// Get the tail probability (alpha/2 for two-tailed)
    pub fn tail_probability(&self) -> f64 {
        self.alpha() / 2.0
    }

    /// Probability of the upper two-sided quantile, `1 - alpha/2`
    pub fn upper_probability(&self) -> f64 {
        1.0 - self.tail_probability()
    }

    /// Common confidence levels
    pub const NINETY: Self = Self(0.90);
    pub const NINETY_FIVE: Self = Self(0.95);
    pub const NINETY_NINE: Self = Self(0.99);
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = Error;

    fn try_from(level: f64) -> Result<Self> {
        Self::try_new(level)
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

/// Inputs of one estimation
///
/// `probability` only parameterizes the synthetic sampling step. It is never
/// used as a parameter of the returned distributions: the experiment is
/// simulated as if its true parameter were unknown, and every estimator works
/// from the observed success count alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EstimationRequest {
    trials: u64,
    probability: f64,
    confidence_level: ConfidenceLevel,
}

impl EstimationRequest {
    /// Create a validated request
    ///
    /// Rejects, in order: `n < 1`, `p` outside `[0.001, 1]`, a confidence
    /// level outside `(0, 1)`, and `n * p < 1`.
    pub fn new(trials: u64, probability: f64, confidence_level: f64) -> Result<Self> {
        if trials < MIN_TRIALS {
            return Err(Error::invalid_parameter(
                "n",
                format!("trial count {trials} must be at least {MIN_TRIALS}"),
            ));
        }
        if !probability.is_finite() || probability <= 0.0 || probability > 1.0 {
            return Err(Error::invalid_probability(probability));
        }
        if probability < MIN_PROBABILITY {
            return Err(Error::invalid_parameter(
                "p",
                format!("probability {probability} is below the minimum {MIN_PROBABILITY}"),
            ));
        }
        let confidence_level = ConfidenceLevel::try_new(confidence_level)?;

        let expected = trials as f64 * probability;
        if expected < MIN_EXPECTED_SUCCESSES {
            return Err(Error::invalid_parameter(
                "n*p",
                format!(
                    "expected number of successes {expected:.3} is below {MIN_EXPECTED_SUCCESSES}"
                ),
            ));
        }

        Ok(Self {
            trials,
            probability,
            confidence_level,
        })
    }

    /// Number of Bernoulli trials `n`
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Probability used to simulate the experiment
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Requested confidence level
    pub fn confidence_level(&self) -> ConfidenceLevel {
        self.confidence_level
    }

    /// Expected success count `n * p`
    pub fn expected_successes(&self) -> f64 {
        self.trials as f64 * self.probability
    }
}
