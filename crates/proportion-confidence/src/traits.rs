//! Core trait for proportion interval estimation
//!
//! Each interval method consumes the same observation and confidence level
//! and produces its own estimate type. The observation is passed in rather
//! than drawn by the estimator, so all methods reason about the same
//! synthetic experiment.

use proportion_core::{ConfidenceLevel, Observation, Result};

/// Interval estimator for a binomial success probability
pub trait ProportionEstimator {
    /// Estimate type produced by the method
    type Output;

    /// Compute the estimate for an observation at the given confidence level
    ///
    /// # Arguments
    /// * `observation` - Observed success count out of `n` trials
    /// * `confidence_level` - Confidence level of the reported interval
    fn estimate(
        &self,
        observation: &Observation,
        confidence_level: ConfidenceLevel,
    ) -> Result<Self::Output>;

    /// Method name for logs and reports
    fn name(&self) -> &'static str;
}
