//! High-level API for proportion intervals
//!
//! This module runs the three estimators over one simulated experiment and
//! bundles their outputs for the presentation layer.

use crate::{
    BayesianEstimate, BetaPrior, ExactBinomial, ExactEstimate, HdrConfig, Interval,
    JeffreysPosterior, NormalApproximation, NormalEstimate, ProportionEstimator,
};
use proportion_core::{BinomialSampler, EstimationRequest, Observation, Result};
use serde::Serialize;
use tracing::{debug, instrument};

/// Outputs of all three methods for one request
///
/// Each method's outcome is kept separately: a failure in one method does
/// not hide the results of the others.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimationResult {
    /// The validated request
    pub request: EstimationRequest,
    /// The simulated observation shared by every method
    pub observation: Observation,
    /// Normal (Wald) approximation
    pub normal: Result<NormalEstimate>,
    /// Exact binomial inversion at `p_hat`
    pub exact: Result<ExactEstimate>,
    /// Beta posterior with credibility interval and HDR
    pub bayesian: Result<BayesianEstimate>,
}

impl EstimationResult {
    /// Point estimate of the normal method
    pub fn p_hat_normal(&self) -> Option<f64> {
        self.normal.as_ref().ok().map(|e| e.p_hat)
    }

    /// Wald interval
    pub fn normal_interval(&self) -> Option<Interval> {
        self.normal.as_ref().ok().map(|e| e.interval)
    }

    /// Point estimate of the exact method
    pub fn p_hat_exact(&self) -> Option<f64> {
        self.exact.as_ref().ok().map(|e| e.p_hat)
    }

    /// Exact binomial interval
    pub fn exact_interval(&self) -> Option<Interval> {
        self.exact.as_ref().ok().map(|e| e.interval)
    }

    /// Posterior `alpha`
    pub fn posterior_alpha(&self) -> Option<f64> {
        self.bayesian.as_ref().ok().map(|e| e.posterior.alpha)
    }

    /// Posterior `beta`
    pub fn posterior_beta(&self) -> Option<f64> {
        self.bayesian.as_ref().ok().map(|e| e.posterior.beta)
    }

    /// Equal-tailed credibility interval
    pub fn credibility_interval(&self) -> Option<Interval> {
        self.bayesian.as_ref().ok().map(|e| e.credibility_interval)
    }

    /// Highest-density region, collapsed to one interval
    pub fn hdr_interval(&self) -> Option<Interval> {
        self.bayesian.as_ref().ok().and_then(|e| e.hdr_interval())
    }

    /// True when every method, HDR included, produced a result
    pub fn is_complete(&self) -> bool {
        self.normal.is_ok() && self.exact.is_ok() && self.hdr_interval().is_some()
    }
}

/// Runs the sampler and the three estimators
///
/// Configuration is held by value; one calculator can serve any number of
/// independent requests, concurrently or not.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalCalculator {
    sampler: BinomialSampler,
    normal: NormalApproximation,
    exact: ExactBinomial,
    bayesian: JeffreysPosterior,
}

impl IntervalCalculator {
    /// Create a calculator with seed [`proportion_core::DEFAULT_SEED`], the
    /// Jeffreys prior and the default HDR search
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the seed of the simulated experiment
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.sampler = BinomialSampler::new(seed);
        self
    }

    /// Set the prior of the Bayesian method
    pub fn with_prior(mut self, prior: BetaPrior) -> Self {
        self.bayesian = self.bayesian.with_prior(prior);
        self
    }

    /// Tune the HDR threshold search
    pub fn with_hdr_config(mut self, config: HdrConfig) -> Self {
        self.bayesian = self.bayesian.with_hdr_config(config);
        self
    }

    /// Report zero-width Wald and exact intervals as `DegenerateEstimate` errors
    pub fn reject_degenerate(mut self) -> Self {
        self.normal = self.normal.reject_degenerate();
        self.exact = self.exact.reject_degenerate();
        self
    }

    /// Seed of the simulated experiment
    pub fn seed(&self) -> u64 {
        self.sampler.seed()
    }

    /// Simulate the experiment and run every method on it
    ///
    /// Only sampling can fail the whole call; estimator failures are stored
    /// in the returned result.
    #[instrument(skip(self), fields(seed = self.seed()))]
    pub fn compute(&self, request: &EstimationRequest) -> Result<EstimationResult> {
        let observation = self.sampler.sample_request(request)?;
        Ok(self.compute_for_observation(request, observation))
    }

    /// Run every method on an already drawn observation
    pub fn compute_for_observation(
        &self,
        request: &EstimationRequest,
        observation: Observation,
    ) -> EstimationResult {
        let level = request.confidence_level();
        debug!(
            "Estimating from {} successes in {} trials at {}",
            observation.successes(),
            observation.trials(),
            level
        );

        EstimationResult {
            request: *request,
            observation,
            normal: self.normal.estimate(&observation, level),
            exact: self.exact.estimate(&observation, level),
            bayesian: self.bayesian.estimate(&observation, level),
        }
    }
}

/// Compute every interval for `(n, p, confidence_level)` with the default seed
///
/// Fails with `InvalidParameter` before any sampling when the request is
/// invalid, see [`EstimationRequest::new`].
///
/// # Example
/// ```rust
/// use proportion_confidence::compute_intervals;
///
/// let result = compute_intervals(1000, 0.01, 0.95)?;
/// let ci = result.credibility_interval().unwrap();
/// assert!(ci.lower <= ci.upper);
/// # Ok::<(), proportion_core::Error>(())
/// ```
pub fn compute_intervals(
    trials: u64,
    probability: f64,
    confidence_level: f64,
) -> Result<EstimationResult> {
    let request = EstimationRequest::new(trials, probability, confidence_level)?;
    IntervalCalculator::new().compute(&request)
}

/// Compute every interval with an explicit seed
pub fn compute_intervals_with_seed(
    trials: u64,
    probability: f64,
    confidence_level: f64,
    seed: u64,
) -> Result<EstimationResult> {
    let request = EstimationRequest::new(trials, probability, confidence_level)?;
    IntervalCalculator::new().with_seed(seed).compute(&request)
}
