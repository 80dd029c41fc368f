//! Highest-density region of a Beta posterior
//!
//! The region is found numerically on an evenly spaced grid over `[0, 1]`:
//!
//! 1. Evaluate the posterior density at every grid point.
//! 2. Bisect on a density threshold `t` in `[0, max density]` until the grid
//!    points with density `>= t` carry the requested probability mass
//!    (trapezoidal quadrature over adjacent selected points).
//! 3. Scan the grid for maximal runs of selected points; each run is one
//!    segment of the region.
//!
//! # Grid resolution
//!
//! The grid holds `grid_points_per_trial · n` points (100·n by default), so
//! memory and the cost of every bisection step grow linearly with `n`. The
//! finer the grid, the smaller the quadrature error that the threshold search
//! inherits. For `n` in the hundreds of thousands this is a resource-sizing
//! decision: lower `grid_points_per_trial` to bound the allocation.
//!
//! # Multimodal regions
//!
//! A Beta posterior is unimodal or monotone, so the search normally finds a
//! single segment. Several segments are still reported faithfully as
//! [`HdrRegion::Multimodal`], but the single-interval view
//! ([`HdrRegion::interval`]) spans from the first segment's lower bound to the
//! last segment's upper bound and so includes the gaps between modes. This is
//! an approximation.

use crate::{Interval, PosteriorParameters};
use proportion_core::{ConfidenceLevel, Error, Result};
use serde::Serialize;
use statrs::distribution::{Beta, ContinuousCDF};
use statrs::function::beta::ln_beta;
use tracing::{debug, instrument, warn};

/// Default grid points per trial
pub const DEFAULT_GRID_POINTS_PER_TRIAL: usize = 100;

/// Default bisection iteration cap
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Default absolute tolerance on the threshold
pub const DEFAULT_XTOL: f64 = 2e-12;

/// Default relative tolerance on the threshold
pub const DEFAULT_RTOL: f64 = 4.0 * f64::EPSILON;

/// Tuning parameters of the threshold search
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HdrConfig {
    /// Grid points per trial; the grid has `grid_points_per_trial · n` points
    pub grid_points_per_trial: usize,
    /// Bisection iteration cap
    pub max_iterations: usize,
    /// Absolute tolerance on the threshold
    pub xtol: f64,
    /// Relative tolerance on the threshold
    pub rtol: f64,
}

impl Default for HdrConfig {
    fn default() -> Self {
        Self {
            grid_points_per_trial: DEFAULT_GRID_POINTS_PER_TRIAL,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            xtol: DEFAULT_XTOL,
            rtol: DEFAULT_RTOL,
        }
    }
}

impl HdrConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of grid points per trial
    pub fn with_grid_points_per_trial(mut self, points: usize) -> Self {
        assert!(points > 0, "Grid points per trial must be positive");
        self.grid_points_per_trial = points;
        self
    }

    /// Set the bisection iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        assert!(max_iterations > 0, "Iteration cap must be positive");
        self.max_iterations = max_iterations;
        self
    }

    /// Set the absolute and relative convergence tolerances
    pub fn with_tolerances(mut self, xtol: f64, rtol: f64) -> Self {
        assert!(xtol >= 0.0 && rtol >= 0.0, "Tolerances must be non-negative");
        self.xtol = xtol;
        self.rtol = rtol;
        self
    }

    /// Number of grid points used for `trials` trials (at least two)
    pub fn grid_size(&self, trials: u64) -> usize {
        (self.grid_points_per_trial as u64)
            .saturating_mul(trials)
            .max(2) as usize
    }
}

/// Segments of a highest-density region, ordered left to right
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HdrRegion {
    /// A single contiguous segment
    Unimodal(Interval),
    /// Two or more disjoint segments
    Multimodal(Vec<Interval>),
}

impl HdrRegion {
    /// Build a region from ordered, disjoint segments
    pub fn from_segments(mut segments: Vec<Interval>) -> Result<Self> {
        match segments.len() {
            0 => Err(Error::Computation(
                "no grid point reaches the density threshold".to_string(),
            )),
            1 => Ok(Self::Unimodal(segments.remove(0))),
            _ => Ok(Self::Multimodal(segments)),
        }
    }

    /// All segments of the region
    pub fn segments(&self) -> &[Interval] {
        match self {
            Self::Unimodal(interval) => std::slice::from_ref(interval),
            Self::Multimodal(segments) => segments,
        }
    }

    /// Single interval view of the region
    ///
    /// For a multimodal region this spans every segment, gaps included.
    pub fn interval(&self) -> Interval {
        match self {
            Self::Unimodal(interval) => *interval,
            Self::Multimodal(segments) => {
                let lower = segments.first().map_or(0.0, |s| s.lower);
                let upper = segments.last().map_or(1.0, |s| s.upper);
                Interval::new(lower, upper)
            }
        }
    }

    /// True when the region has more than one segment
    pub fn is_multimodal(&self) -> bool {
        matches!(self, Self::Multimodal(_))
    }
}

/// Outcome of a converged threshold search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HdrEstimate {
    /// Density threshold defining the region
    pub threshold: f64,
    /// Region segments
    pub region: HdrRegion,
    /// Probability mass captured at the threshold
    pub mass: f64,
    /// Bisection iterations used
    pub iterations: usize,
    /// Number of grid points searched
    pub grid_points: usize,
}

impl HdrEstimate {
    /// Single interval view of the region, see [`HdrRegion::interval`]
    pub fn interval(&self) -> Interval {
        self.region.interval()
    }
}

/// Threshold search over a density grid
#[derive(Debug, Clone, Copy, Default)]
pub struct HdrSearch {
    config: HdrConfig,
}

impl HdrSearch {
    /// Create a search with the given configuration
    pub fn new(config: HdrConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &HdrConfig {
        &self.config
    }

    /// Highest-density region of `Beta(alpha, beta)` holding `confidence_level` mass
    ///
    /// The grid size is derived from `trials`, see [`HdrConfig::grid_size`].
    #[instrument(skip(self), fields(alpha = posterior.alpha, beta = posterior.beta))]
    pub fn search(
        &self,
        posterior: &PosteriorParameters,
        trials: u64,
        confidence_level: ConfidenceLevel,
    ) -> Result<HdrEstimate> {
        let points = self.config.grid_size(trials);
        debug!("Evaluating Beta density on {} grid points", points);

        let x = linspace(points);
        let density = beta_density_grid(&x, posterior.alpha, posterior.beta)?;
        self.search_grid(&x, &density, confidence_level.value())
    }

    /// Highest-density region of an arbitrary density sampled on `x`
    ///
    /// `x` must be increasing and `density` non-negative and finite.
    ///
    /// The captured mass sums trapezoids over adjacent selected points only.
    /// A quadrature over the selected points alone would join the last point
    /// of one segment to the first point of the next and count the gap
    /// between them; this one does not. The two agree for a single segment,
    /// which covers every Beta posterior, but for a multimodal density this
    /// search settles on a lower threshold and wider segments.
    pub fn search_grid(&self, x: &[f64], density: &[f64], mass: f64) -> Result<HdrEstimate> {
        if x.len() != density.len() {
            return Err(Error::invalid_parameter(
                "density",
                format!("{} densities for {} grid points", density.len(), x.len()),
            ));
        }
        if x.len() < 2 {
            return Err(Error::invalid_parameter(
                "grid",
                "at least two grid points are required",
            ));
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(Error::invalid_parameter(
                "mass",
                format!("target mass {mass} must be positive"),
            ));
        }

        let max_density = density.iter().copied().fold(0.0, f64::max);
        let target = |t: f64| mass_above(x, density, t) - mass;
        let (threshold, iterations) = bisect(target, 0.0, max_density, &self.config)?;

        let segments = segments_above(x, density, threshold);
        let region = HdrRegion::from_segments(segments)?;
        let captured = mass_above(x, density, threshold);

        if region.is_multimodal() {
            warn!(
                "HDR has {} disjoint segments; collapsing to a single spanning interval",
                region.segments().len()
            );
        }
        debug!(
            "HDR threshold {:.6e} after {} iterations, mass {:.6}, interval {}",
            threshold,
            iterations,
            captured,
            region.interval()
        );

        Ok(HdrEstimate {
            threshold,
            region,
            mass: captured,
            iterations,
            grid_points: x.len(),
        })
    }
}

/// `points` evenly spaced values over `[0, 1]`, both ends included
pub fn linspace(points: usize) -> Vec<f64> {
    let last = (points.max(2) - 1) as f64;
    (0..points).map(|i| i as f64 / last).collect()
}

/// Beta density at each grid point
///
/// A shape below 1 puts a pole at that end of `[0, 1]`. The endpoint value is
/// then chosen so the trapezoid over the boundary cell carries the exact Beta
/// probability of that cell, which keeps the grid mass close to one.
pub fn beta_density_grid(x: &[f64], alpha: f64, beta: f64) -> Result<Vec<f64>> {
    if x.len() < 2 {
        return Err(Error::invalid_parameter(
            "grid",
            "at least two grid points are required",
        ));
    }
    let ln_norm = ln_beta(alpha, beta);
    let mut density: Vec<f64> = x
        .iter()
        .map(|&xi| {
            let left = if alpha == 1.0 { 0.0 } else { (alpha - 1.0) * xi.ln() };
            let right = if beta == 1.0 { 0.0 } else { (beta - 1.0) * (1.0 - xi).ln() };
            (left + right - ln_norm).exp()
        })
        .collect();

    let last = density.len() - 1;
    if !density[0].is_finite() {
        let cell = Beta::new(alpha, beta)
            .map_err(|e| Error::distribution("Beta", e))?
            .cdf(x[1]);
        density[0] = (2.0 * cell / (x[1] - x[0]) - density[1]).max(density[1]);
    }
    if !density[last].is_finite() {
        let cell = Beta::new(beta, alpha)
            .map_err(|e| Error::distribution("Beta", e))?
            .cdf(1.0 - x[last - 1]);
        density[last] =
            (2.0 * cell / (x[last] - x[last - 1]) - density[last - 1]).max(density[last - 1]);
    }

    if density.iter().any(|d| !d.is_finite()) {
        return Err(Error::Computation(format!(
            "Beta({alpha}, {beta}) density is not finite on the grid"
        )));
    }
    Ok(density)
}

/// Trapezoidal mass of the grid points whose density is at least `threshold`
///
/// Only adjacent pairs of selected points contribute, so the result never
/// bridges a gap between segments and is non-increasing in `threshold`.
fn mass_above(x: &[f64], density: &[f64], threshold: f64) -> f64 {
    x.windows(2)
        .zip(density.windows(2))
        .filter(|(_, d)| d[0] >= threshold && d[1] >= threshold)
        .map(|(x, d)| (x[1] - x[0]) * (d[0] + d[1]) / 2.0)
        .sum()
}

/// Maximal runs of grid points with density at least `threshold`
fn segments_above(x: &[f64], density: &[f64], threshold: f64) -> Vec<Interval> {
    let mut segments = Vec::new();
    let mut start: Option<f64> = None;

    for (i, (&xi, &di)) in x.iter().zip(density).enumerate() {
        if di >= threshold {
            start.get_or_insert(xi);
        } else if let Some(lower) = start.take() {
            segments.push(Interval::new(lower, x[i - 1]));
        }
    }
    if let (Some(lower), Some(&upper)) = (start, x.last()) {
        segments.push(Interval::new(lower, upper));
    }
    segments
}

/// Bisection on `f` over `[a, b]`
///
/// Requires a sign change between the endpoints. Returns the root estimate
/// and the number of iterations used, or `ThresholdSearchFailure` when the
/// root is not bracketed or the iteration cap is reached first.
fn bisect<F>(f: F, a: f64, b: f64, config: &HdrConfig) -> Result<(f64, usize)>
where
    F: Fn(f64) -> f64,
{
    let fa = f(a);
    let fb = f(b);
    if fa * fb > 0.0 {
        return Err(Error::ThresholdSearchFailure {
            iterations: 0,
            reason: format!(
                "threshold not bracketed: f({a:.6e}) = {fa:.6e}, f({b:.6e}) = {fb:.6e}"
            ),
        });
    }
    if fa == 0.0 {
        return Ok((a, 0));
    }
    if fb == 0.0 {
        return Ok((b, 0));
    }

    let mut xa = a;
    let mut dm = b - a;
    for iteration in 1..=config.max_iterations {
        dm *= 0.5;
        let xm = xa + dm;
        let fm = f(xm);
        if fm * fa >= 0.0 {
            xa = xm;
        }
        if fm == 0.0 || dm.abs() < config.xtol + config.rtol * xm.abs() {
            return Ok((xm, iteration));
        }
    }

    Err(Error::ThresholdSearchFailure {
        iterations: config.max_iterations,
        reason: "bisection did not converge within the iteration cap".to_string(),
    })
}

/// Highest-density region of `Beta(alpha, beta)` with the default configuration
pub fn find_hdr(
    trials: u64,
    posterior: &PosteriorParameters,
    confidence_level: f64,
) -> Result<HdrEstimate> {
    HdrSearch::default().search(posterior, trials, ConfidenceLevel::try_new(confidence_level)?)
}
