//! Binomial proportion intervals
//!
//! Re-exports the workspace crates under one roof:
//!
//! - [`proportion_core`]: errors, validated requests and seeded sampling
//! - [`proportion_confidence`]: the Wald, exact-binomial and Jeffreys posterior methods
//!
//! ```rust
//! use proportion_stats::prelude::*;
//!
//! let result = compute_intervals(1000, 0.01, 0.95)?;
//! assert_eq!(result.observation.trials(), 1000);
//! # Ok::<(), Error>(())
//! ```

pub use proportion_confidence;
pub use proportion_core;

pub use proportion_confidence::{
    compute_intervals, compute_intervals_with_seed, EstimationResult, Interval,
    IntervalCalculator,
};
pub use proportion_core::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use proportion_confidence::{
        compute_intervals, compute_scenarios, reference_scenarios, BayesianEstimate, BetaPrior,
        EstimationResult, ExactBinomial, HdrConfig, HdrRegion, Interval, IntervalCalculator,
        JeffreysPosterior, NormalApproximation, ProportionEstimator,
    };
    pub use proportion_core::prelude::*;
}
