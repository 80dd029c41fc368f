//! Core types for binomial proportion estimation
//!
//! This crate provides the pieces every estimator in the workspace shares:
//!
//! - **Errors**: a single [`Error`] enum and [`Result`] alias
//! - **Requests**: [`EstimationRequest`] validates `(n, p, confidence_level)`
//! - **Sampling**: [`BinomialSampler`] draws one seeded [`Observation`]
//!
//! # Example
//!
//! ```rust
//! use proportion_core::{BinomialSampler, EstimationRequest, DEFAULT_SEED};
//!
//! let request = EstimationRequest::new(1000, 0.01, 0.95)?;
//! let observation = BinomialSampler::new(DEFAULT_SEED).sample_request(&request)?;
//!
//! assert!(observation.successes() <= 1000);
//! println!("p_hat = {}", observation.p_hat());
//! # Ok::<(), proportion_core::Error>(())
//! ```

pub mod error;
pub mod request;
pub mod sampler;

// Re-export core types
pub use error::{Error, Result};
pub use request::{
    ConfidenceLevel, EstimationRequest, MIN_EXPECTED_SUCCESSES, MIN_PROBABILITY, MIN_TRIALS,
};
pub use sampler::{sample, BinomialSampler, Observation, DEFAULT_SEED};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BinomialSampler, ConfidenceLevel, EstimationRequest, Observation, Result, DEFAULT_SEED,
    };

    pub use crate::error::Error;
}
