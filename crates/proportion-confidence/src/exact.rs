//! Exact binomial interval evaluated at the observed proportion
//!
//! The bounds are quantiles of `Binomial(n, p_hat)` at `alpha/2` and
//! `1 - alpha/2`, divided by `n`. The distribution is parameterized by the
//! observed `p_hat` itself, so this is not the Clopper-Pearson interval
//! (which inverts Beta quantiles); the two report different statistics.

use crate::{ExactEstimate, Interval, ProportionEstimator};
use proportion_core::{ConfidenceLevel, Error, Observation, Result};
use statrs::distribution::{Binomial, DiscreteCDF};
use tracing::{debug, warn};

/// Binomial quantile inversion estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactBinomial {
    reject_degenerate: bool,
}

impl ExactBinomial {
    /// Create an estimator that returns degenerate intervals
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `DegenerateEstimate` instead of returning a zero-width interval
    pub fn reject_degenerate(mut self) -> Self {
        self.reject_degenerate = true;
        self
    }
}

/// Smallest `k` in `0..=n` with `P(X <= k) >= q`
///
/// Binary search over the binomial CDF, which is non-decreasing in `k`.
pub fn binomial_quantile(distribution: &Binomial, trials: u64, q: f64) -> u64 {
    let (mut lo, mut hi) = (0u64, trials);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if distribution.cdf(mid) >= q {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

impl ProportionEstimator for ExactBinomial {
    type Output = ExactEstimate;

    fn estimate(
        &self,
        observation: &Observation,
        confidence_level: ConfidenceLevel,
    ) -> Result<ExactEstimate> {
        let trials = observation.trials();
        let p_hat = observation.p_hat();

        let degenerate = observation.is_boundary();
        if degenerate {
            if self.reject_degenerate {
                return Err(Error::DegenerateEstimate(format!(
                    "Binomial({trials}, {p_hat}) puts all mass on one count"
                )));
            }
            warn!("Exact interval collapsed to a point at p_hat = {}", p_hat);
        }

        let distribution =
            Binomial::new(p_hat, trials).map_err(|e| Error::distribution("binomial", e))?;
        let lower_successes =
            binomial_quantile(&distribution, trials, confidence_level.tail_probability());
        let upper_successes =
            binomial_quantile(&distribution, trials, confidence_level.upper_probability());

        debug!(
            "Exact: p_hat={:.6}, quantile counts [{}, {}] of {}",
            p_hat, lower_successes, upper_successes, trials
        );

        let n = trials as f64;
        Ok(ExactEstimate {
            p_hat,
            interval: Interval::new(lower_successes as f64 / n, upper_successes as f64 / n),
            lower_successes,
            upper_successes,
            confidence_level,
            degenerate,
        })
    }

    fn name(&self) -> &'static str {
        "exact"
    }
}

/// Exact binomial interval for `successes` out of `n` trials
pub fn exact_interval(
    trials: u64,
    successes: u64,
    confidence_level: f64,
) -> Result<(f64, Interval)> {
    let observation = Observation::new(trials, successes)?;
    let estimate = ExactBinomial::new()
        .estimate(&observation, ConfidenceLevel::try_new(confidence_level)?)?;
    Ok((estimate.p_hat, estimate.interval))
}
