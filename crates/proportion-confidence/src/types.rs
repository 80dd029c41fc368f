//! Common types for proportion intervals

use crate::hdr::HdrEstimate;
use proportion_core::{ConfidenceLevel, Error, Observation, Result};
use serde::Serialize;
use statrs::distribution::Beta;
use std::fmt;

/// A closed interval `[lower, upper]` of proportions
///
/// Produced by each estimator and never mutated afterwards. Bounds normally
/// lie in `[0, 1]`; the Wald interval is the exception and may extend past
/// either end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    /// Lower bound of the interval
    pub lower: f64,
    /// Upper bound of the interval
    pub upper: f64,
}

impl Interval {
    /// Create a new interval
    pub fn new(lower: f64, upper: f64) -> Self {
        debug_assert!(lower <= upper, "interval bounds out of order: [{lower}, {upper}]");
        Self { lower, upper }
    }

    /// Zero-width interval at `value`
    pub fn point(value: f64) -> Self {
        Self::new(value, value)
    }

    /// Width of the interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Margin of error (half-width)
    pub fn margin_of_error(&self) -> f64 {
        self.width() / 2.0
    }

    /// Midpoint of the interval
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Check if a value is contained in the interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Check if intervals overlap
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }

    /// Check if `other` lies entirely inside this interval
    pub fn encloses(&self, other: &Interval) -> bool {
        self.lower <= other.lower && other.upper <= self.upper
    }

    /// Interval with both bounds clamped to `[0, 1]`, for display
    pub fn clamped(&self) -> Self {
        Self::new(self.lower.clamp(0.0, 1.0), self.upper.clamp(0.0, 1.0))
    }

    /// True when the interval collapsed to a single point
    pub fn is_degenerate(&self) -> bool {
        self.lower == self.upper
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.6}, {:.6}]", self.lower, self.upper)
    }
}

/// Result of the normal (Wald) approximation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalEstimate {
    /// Observed proportion
    pub p_hat: f64,
    /// `p_hat ± z·se`, not clamped to `[0, 1]`
    pub interval: Interval,
    /// `sqrt(p_hat (1 - p_hat) / n)`
    pub standard_error: f64,
    /// Two-sided standard normal quantile
    pub z_score: f64,
    /// Confidence level of the interval
    pub confidence_level: ConfidenceLevel,
    /// Set when `p_hat` is 0 or 1 and the interval has zero width
    pub degenerate: bool,
}

/// Result of the exact binomial inversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExactEstimate {
    /// Observed proportion
    pub p_hat: f64,
    /// Quantile bounds divided by `n`
    pub interval: Interval,
    /// `Binomial(n, p_hat)` quantile at `alpha/2`, as a success count
    pub lower_successes: u64,
    /// `Binomial(n, p_hat)` quantile at `1 - alpha/2`, as a success count
    pub upper_successes: u64,
    /// Confidence level of the interval
    pub confidence_level: ConfidenceLevel,
    /// Set when `p_hat` is 0 or 1 and the interval has zero width
    pub degenerate: bool,
}

/// Beta prior on the success probability
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BetaPrior {
    pub alpha: f64,
    pub beta: f64,
}

impl Default for BetaPrior {
    fn default() -> Self {
        Self::JEFFREYS
    }
}

impl BetaPrior {
    /// Jeffreys prior, `Beta(0.5, 0.5)`
    pub const JEFFREYS: Self = Self {
        alpha: 0.5,
        beta: 0.5,
    };

    /// Uniform prior, `Beta(1, 1)`
    pub const UNIFORM: Self = Self {
        alpha: 1.0,
        beta: 1.0,
    };

    /// Improper Haldane prior, `Beta(0, 0)`
    pub const HALDANE: Self = Self {
        alpha: 0.0,
        beta: 0.0,
    };

    /// Create a prior; both shapes must be finite and non-negative
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        if !(alpha.is_finite() && alpha >= 0.0) {
            return Err(Error::invalid_parameter(
                "alpha_prior",
                format!("prior shape {alpha} must be finite and non-negative"),
            ));
        }
        if !(beta.is_finite() && beta >= 0.0) {
            return Err(Error::invalid_parameter(
                "beta_prior",
                format!("prior shape {beta} must be finite and non-negative"),
            ));
        }
        Ok(Self { alpha, beta })
    }

    /// Conjugate update with a binomial observation
    ///
    /// `alpha_post = successes + alpha`, `beta_post = failures + beta`.
    pub fn update(&self, observation: &Observation) -> Result<PosteriorParameters> {
        PosteriorParameters::new(
            observation.successes() as f64 + self.alpha,
            observation.failures() as f64 + self.beta,
        )
    }
}

/// Shape parameters of a Beta posterior
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PosteriorParameters {
    pub alpha: f64,
    pub beta: f64,
}

impl PosteriorParameters {
    /// Create posterior parameters; both shapes must be positive
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        if !(alpha.is_finite() && alpha > 0.0 && beta.is_finite() && beta > 0.0) {
            return Err(Error::invalid_parameter(
                "posterior",
                format!("Beta({alpha}, {beta}) requires positive finite shapes"),
            ));
        }
        Ok(Self { alpha, beta })
    }

    /// Posterior mean `alpha / (alpha + beta)`
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Posterior variance
    pub fn variance(&self) -> f64 {
        let total = self.alpha + self.beta;
        self.alpha * self.beta / (total * total * (total + 1.0))
    }

    /// Posterior mode, defined when both shapes exceed 1
    pub fn mode(&self) -> Option<f64> {
        (self.alpha > 1.0 && self.beta > 1.0)
            .then(|| (self.alpha - 1.0) / (self.alpha + self.beta - 2.0))
    }

    /// The posterior as a `statrs` distribution
    pub fn distribution(&self) -> Result<Beta> {
        Beta::new(self.alpha, self.beta).map_err(|e| Error::distribution("Beta", e))
    }
}

impl fmt::Display for PosteriorParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Beta({}, {})", self.alpha, self.beta)
    }
}

/// Result of the Bayesian posterior estimator
///
/// The HDR outcome is kept separately so that a failed threshold search
/// still leaves the credibility interval available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BayesianEstimate {
    /// Observed proportion
    pub p_hat: f64,
    /// Beta posterior shapes
    pub posterior: PosteriorParameters,
    /// Equal-tailed interval from the posterior quantiles
    pub credibility_interval: Interval,
    /// Highest-density region search outcome
    pub hdr: Result<HdrEstimate>,
    /// Confidence level of both intervals
    pub confidence_level: ConfidenceLevel,
}

impl BayesianEstimate {
    /// Collapsed HDR interval, if the search succeeded
    pub fn hdr_interval(&self) -> Option<Interval> {
        self.hdr.as_ref().ok().map(|hdr| hdr.interval())
    }
}
