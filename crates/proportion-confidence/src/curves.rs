//! Density series behind each estimate
//!
//! These are the numbers a chart of each method would plot. Nothing here
//! renders anything.

use crate::hdr::{beta_density_grid, linspace};
use crate::{Interval, NormalEstimate, PosteriorParameters};
use proportion_core::{Error, Observation, Result};
use serde::Serialize;
use statrs::distribution::{Binomial, Continuous, Discrete, Normal};

/// Paired `x` and `y` values of a curve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl DensityCurve {
    /// Number of points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True when the curve has no points
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Point with the largest `y`
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.x
            .iter()
            .copied()
            .zip(self.y.iter().copied())
            .fold(None, |best, (x, y)| match best {
                Some((_, best_y)) if best_y >= y => best,
                _ => Some((x, y)),
            })
    }
}

/// Default number of curve points for `trials` trials, `10 · n`
pub fn default_curve_points(trials: u64) -> usize {
    (trials.saturating_mul(10)).max(2) as usize
}

/// Plot window around the simulation probability, `p ± 3/sqrt(n)` within `[0, 1]`
pub fn display_window(probability: f64, trials: u64) -> Interval {
    let half_width = 3.0 / (trials as f64).sqrt();
    Interval::new(
        (probability - half_width).max(0.0),
        (probability + half_width).min(1.0),
    )
}

/// Normal density implied by a Wald estimate
///
/// Fails with `DegenerateEstimate` when the standard error is zero.
pub fn normal_curve(estimate: &NormalEstimate, points: usize) -> Result<DensityCurve> {
    if estimate.standard_error <= 0.0 {
        return Err(Error::DegenerateEstimate(format!(
            "no normal density with zero standard error at p_hat = {}",
            estimate.p_hat
        )));
    }
    let normal = Normal::new(estimate.p_hat, estimate.standard_error)
        .map_err(|e| Error::distribution("normal", e))?;
    let x = linspace(points);
    let y = x.iter().map(|&xi| normal.pdf(xi)).collect();
    Ok(DensityCurve { x, y })
}

/// Binomial mass at `p_hat`, rescaled to a density on the proportion axis
///
/// `x = k / n` and `y = n · P(X = k)` for `k` in `0..=n`.
pub fn binomial_mass_curve(observation: &Observation) -> Result<DensityCurve> {
    let trials = observation.trials();
    let binomial = Binomial::new(observation.p_hat(), trials)
        .map_err(|e| Error::distribution("binomial", e))?;
    let n = trials as f64;
    let (x, y) = (0..=trials)
        .map(|k| (k as f64 / n, n * binomial.pmf(k)))
        .unzip();
    Ok(DensityCurve { x, y })
}

/// Beta posterior density
pub fn posterior_curve(posterior: &PosteriorParameters, points: usize) -> Result<DensityCurve> {
    let x = linspace(points);
    let y = beta_density_grid(&x, posterior.alpha, posterior.beta)?;
    Ok(DensityCurve { x, y })
}
