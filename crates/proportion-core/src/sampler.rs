//! Seeded binomial sampling
//!
//! Every estimator must reason about the same synthetic experiment, so the
//! generator is re-created from an explicit seed for each draw instead of
//! relying on process-wide generator state. Two draws with the same
//! `(n, p, seed)` always yield the same success count.

use crate::{EstimationRequest, Error, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Binomial, Distribution};
use serde::Serialize;
use tracing::debug;

/// Seed used when the caller does not supply one
pub const DEFAULT_SEED: u64 = 42;

/// Outcome of one simulated binomial experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Observation {
    trials: u64,
    successes: u64,
}

impl Observation {
    /// Create an observation from an explicit success count
    pub fn new(trials: u64, successes: u64) -> Result<Self> {
        if trials == 0 {
            return Err(Error::invalid_parameter("n", "trial count must be at least 1"));
        }
        if successes > trials {
            return Err(Error::invalid_parameter(
                "successes",
                format!("{successes} successes exceed {trials} trials"),
            ));
        }
        Ok(Self { trials, successes })
    }

    /// Number of trials `n`
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Number of observed successes
    pub fn successes(&self) -> u64 {
        self.successes
    }

    /// Number of observed failures
    pub fn failures(&self) -> u64 {
        self.trials - self.successes
    }

    /// Empirical proportion `successes / n`
    pub fn p_hat(&self) -> f64 {
        self.successes as f64 / self.trials as f64
    }

    /// True when `p_hat` is 0 or 1
    pub fn is_boundary(&self) -> bool {
        self.successes == 0 || self.successes == self.trials
    }
}

/// Draws one binomial observation under a fixed seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinomialSampler {
    seed: u64,
}

impl Default for BinomialSampler {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl BinomialSampler {
    /// Create a sampler with the given seed
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed used for every draw
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw one observation from `Binomial(n, p)`
    ///
    /// Fails with `InvalidParameter` if `n < 1` or `p` is not in `(0, 1]`.
    pub fn sample(&self, trials: u64, probability: f64) -> Result<Observation> {
        if trials == 0 {
            return Err(Error::invalid_parameter("n", "trial count must be at least 1"));
        }
        if !(probability > 0.0 && probability <= 1.0) {
            return Err(Error::invalid_probability(probability));
        }

        let binomial =
            Binomial::new(trials, probability).map_err(|e| Error::distribution("Binomial", e))?;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let successes = binomial.sample(&mut rng);

        debug!(
            "Sampled {} successes from Binomial({}, {}) with seed {}",
            successes, trials, probability, self.seed
        );

        Observation::new(trials, successes)
    }

    /// Draw the observation for a validated request
    pub fn sample_request(&self, request: &EstimationRequest) -> Result<Observation> {
        self.sample(request.trials(), request.probability())
    }
}

/// Draw one observation from `Binomial(n, p)` with an explicit seed
pub fn sample(trials: u64, probability: f64, seed: u64) -> Result<Observation> {
    BinomialSampler::new(seed).sample(trials, probability)
}
