//! Normal-approximation (Wald) interval

use crate::{Interval, NormalEstimate, ProportionEstimator};
use proportion_core::{ConfidenceLevel, Error, Observation, Result};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::{debug, warn};

/// Wald interval estimator
///
/// The interval is `p_hat ± z·sqrt(p_hat (1 - p_hat) / n)` where `z` is the
/// two-sided standard normal quantile. Bounds are returned as computed and
/// may fall outside `[0, 1]`; clamping for display is left to the caller
/// (see [`Interval::clamped`]).
#[derive(Debug, Clone, Copy)]
pub struct NormalApproximation {
    /// Whether a zero-width interval at `p_hat ∈ {0, 1}` is an error
    reject_degenerate: bool,
}

impl Default for NormalApproximation {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalApproximation {
    /// Create an estimator that returns degenerate intervals
    pub fn new() -> Self {
        Self {
            reject_degenerate: false,
        }
    }

    /// Fail with `DegenerateEstimate` instead of returning a zero-width interval
    pub fn reject_degenerate(mut self) -> Self {
        self.reject_degenerate = true;
        self
    }
}

/// Two-sided standard normal critical value for a confidence level
pub fn z_score(confidence_level: ConfidenceLevel) -> Result<f64> {
    let normal = Normal::new(0.0, 1.0).map_err(|e| Error::distribution("normal", e))?;
    Ok(normal.inverse_cdf(confidence_level.upper_probability()))
}

impl ProportionEstimator for NormalApproximation {
    type Output = NormalEstimate;

    fn estimate(
        &self,
        observation: &Observation,
        confidence_level: ConfidenceLevel,
    ) -> Result<NormalEstimate> {
        let n = observation.trials() as f64;
        let p_hat = observation.p_hat();
        let standard_error = (p_hat * (1.0 - p_hat) / n).sqrt();

        let degenerate = observation.is_boundary();
        if degenerate {
            if self.reject_degenerate {
                return Err(Error::DegenerateEstimate(format!(
                    "p_hat = {p_hat} gives a zero standard error"
                )));
            }
            warn!("Wald interval collapsed to a point at p_hat = {}", p_hat);
        }

        let z = z_score(confidence_level)?;
        let margin = z * standard_error;
        debug!("Wald: p_hat={:.6}, se={:.6}, z={:.4}", p_hat, standard_error, z);

        Ok(NormalEstimate {
            p_hat,
            interval: Interval::new(p_hat - margin, p_hat + margin),
            standard_error,
            z_score: z,
            confidence_level,
            degenerate,
        })
    }

    fn name(&self) -> &'static str {
        "normal"
    }
}

/// Wald interval for `successes` out of `n` trials
pub fn normal_interval(
    trials: u64,
    successes: u64,
    confidence_level: f64,
) -> Result<(f64, Interval)> {
    let observation = Observation::new(trials, successes)?;
    let estimate = NormalApproximation::new()
        .estimate(&observation, ConfidenceLevel::try_new(confidence_level)?)?;
    Ok((estimate.p_hat, estimate.interval))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_z_score() {
        assert_abs_diff_eq!(
            z_score(ConfidenceLevel::NINETY_FIVE).unwrap(),
            1.959964,
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            z_score(ConfidenceLevel::NINETY_NINE).unwrap(),
            2.575829,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_wald_interval() {
        let (p_hat, ci) = normal_interval(100, 30, 0.95).unwrap();
        assert_relative_eq!(p_hat, 0.3);

        let se = (0.3f64 * 0.7 / 100.0).sqrt();
        assert_abs_diff_eq!(ci.lower, 0.3 - 1.959964 * se, epsilon = 1e-5);
        assert_abs_diff_eq!(ci.upper, 0.3 + 1.959964 * se, epsilon = 1e-5);
        assert_relative_eq!(ci.midpoint(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_interval_is_not_clamped() {
        let (_, ci) = normal_interval(50, 1, 0.95).unwrap();
        assert!(ci.lower < 0.0);
        assert!(ci.clamped().lower == 0.0);
    }

    #[test]
    fn test_degenerate_interval_is_returned() {
        let obs = Observation::new(40, 0).unwrap();
        let estimate = NormalApproximation::new()
            .estimate(&obs, ConfidenceLevel::NINETY_FIVE)
            .unwrap();
        assert!(estimate.degenerate);
        assert_eq!(estimate.standard_error, 0.0);
        assert_eq!(estimate.interval, Interval::point(0.0));

        let obs = Observation::new(40, 40).unwrap();
        let estimate = NormalApproximation::new()
            .estimate(&obs, ConfidenceLevel::NINETY_FIVE)
            .unwrap();
        assert_eq!(estimate.interval, Interval::point(1.0));
    }

    #[test]
    fn test_degenerate_interval_can_be_rejected() {
        let obs = Observation::new(40, 40).unwrap();
        let err = NormalApproximation::new()
            .reject_degenerate()
            .estimate(&obs, ConfidenceLevel::NINETY_FIVE)
            .unwrap_err();
        assert!(matches!(err, Error::DegenerateEstimate(_)));
    }

    #[test]
    fn test_confidence_levels() {
        let obs = Observation::new(500, 60).unwrap();
        let estimator = NormalApproximation::new();
        let widths: Vec<f64> = [0.80, 0.90, 0.95, 0.99]
            .iter()
            .map(|&level| {
                estimator
                    .estimate(&obs, ConfidenceLevel::new(level))
                    .unwrap()
                    .interval
                    .width()
            })
            .collect();

        // Higher confidence level should give wider interval
        assert!(widths.windows(2).all(|w| w[0] < w[1]));
    }
}
