//! Interval estimation for a binomial success probability
//!
//! This crate estimates a success probability from one simulated binomial
//! experiment and reports intervals of plausible values with three
//! independent methods:
//!
//! - **Normal approximation**: the Wald interval `p_hat ± z·se`
//! - **Exact binomial**: quantiles of `Binomial(n, p_hat)` divided by `n`
//! - **Bayesian posterior**: a Beta posterior under the Jeffreys prior, with
//!   an equal-tailed credibility interval and a highest-density region (HDR)
//!
//! # Overview
//!
//! A caller supplies `(n, p, confidence_level)`. The experiment is simulated
//! once from `Binomial(n, p)` under a fixed seed and every method works from
//! that single observation; `p` itself never parameterizes a returned
//! distribution. The methods share no state, so a failure in one (typically
//! the HDR threshold search) leaves the others' results intact.
//!
//! # Examples
//!
//! ```rust
//! use proportion_confidence::{compute_intervals, IntervalCalculator, HdrConfig};
//! use proportion_core::EstimationRequest;
//!
//! let result = compute_intervals(1000, 0.05, 0.95)?;
//! println!("Wald:        {:?}", result.normal_interval());
//! println!("Exact:       {:?}", result.exact_interval());
//! println!("Credibility: {:?}", result.credibility_interval());
//! println!("HDR:         {:?}", result.hdr_interval());
//!
//! // A coarser HDR grid for large experiments
//! let calculator = IntervalCalculator::new()
//!     .with_hdr_config(HdrConfig::default().with_grid_points_per_trial(10));
//! let request = EstimationRequest::new(100_000, 0.01, 0.95)?;
//! let result = calculator.compute(&request)?;
//! assert!(result.hdr_interval().is_some());
//! # Ok::<(), proportion_core::Error>(())
//! ```

pub mod api;
mod bayesian;
pub mod curves;
mod exact;
pub mod hdr;
mod normal;
pub mod scenarios;
mod traits;
mod types;

// Re-exports
pub use api::{
    compute_intervals, compute_intervals_with_seed, EstimationResult, IntervalCalculator,
};
pub use bayesian::{bayesian_interval, JeffreysPosterior};
pub use curves::{
    binomial_mass_curve, default_curve_points, display_window, normal_curve, posterior_curve,
    DensityCurve,
};
pub use exact::{binomial_quantile, exact_interval, ExactBinomial};
pub use hdr::{
    find_hdr, HdrConfig, HdrEstimate, HdrRegion, HdrSearch, DEFAULT_GRID_POINTS_PER_TRIAL,
    DEFAULT_MAX_ITERATIONS,
};
pub use normal::{normal_interval, z_score, NormalApproximation};
pub use scenarios::{
    compute_scenarios, reference_scenario, reference_scenarios, Scenario, ScenarioOutcome,
};
pub use traits::ProportionEstimator;
pub use types::{
    BayesianEstimate, BetaPrior, ExactEstimate, Interval, NormalEstimate, PosteriorParameters,
};
