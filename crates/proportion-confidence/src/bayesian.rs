//! Bayesian posterior under a Beta prior
//!
//! The binomial likelihood is conjugate to the Beta prior, so the posterior
//! after `k` successes in `n` trials is `Beta(k + alpha0, n - k + beta0)`.
//! With the default Jeffreys prior `alpha0 = beta0 = 0.5`.
//!
//! Two intervals are reported: the equal-tailed credibility interval from
//! the posterior quantiles, and the highest-density region found by
//! [`HdrSearch`].

use crate::{
    BayesianEstimate, BetaPrior, HdrConfig, HdrEstimate, HdrSearch, Interval,
    PosteriorParameters, ProportionEstimator,
};
use proportion_core::{ConfidenceLevel, Error, Observation, Result};
use statrs::distribution::ContinuousCDF;
use tracing::{debug, warn};

/// Beta posterior estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct JeffreysPosterior {
    prior: BetaPrior,
    hdr: HdrSearch,
}

impl JeffreysPosterior {
    /// Create an estimator with the Jeffreys prior and default HDR search
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different Beta prior
    pub fn with_prior(mut self, prior: BetaPrior) -> Self {
        self.prior = prior;
        self
    }

    /// Tune the HDR threshold search
    pub fn with_hdr_config(mut self, config: HdrConfig) -> Self {
        self.hdr = HdrSearch::new(config);
        self
    }

    /// Prior in use
    pub fn prior(&self) -> BetaPrior {
        self.prior
    }

    /// Posterior shapes for an observation
    pub fn posterior(&self, observation: &Observation) -> Result<PosteriorParameters> {
        self.prior.update(observation)
    }

    /// Equal-tailed credibility interval of a posterior
    pub fn credibility_interval(
        &self,
        posterior: &PosteriorParameters,
        confidence_level: ConfidenceLevel,
    ) -> Result<Interval> {
        let distribution = posterior.distribution()?;
        let lower = distribution.inverse_cdf(confidence_level.tail_probability());
        let upper = distribution.inverse_cdf(confidence_level.upper_probability());
        if !(lower.is_finite() && upper.is_finite()) {
            return Err(Error::Computation(format!(
                "non-finite quantiles for {posterior}: [{lower}, {upper}]"
            )));
        }
        Ok(Interval::new(lower, upper))
    }

    /// Highest-density region of a posterior
    pub fn hdr(
        &self,
        posterior: &PosteriorParameters,
        trials: u64,
        confidence_level: ConfidenceLevel,
    ) -> Result<HdrEstimate> {
        self.hdr.search(posterior, trials, confidence_level)
    }
}

impl ProportionEstimator for JeffreysPosterior {
    type Output = BayesianEstimate;

    fn estimate(
        &self,
        observation: &Observation,
        confidence_level: ConfidenceLevel,
    ) -> Result<BayesianEstimate> {
        let posterior = self.posterior(observation)?;
        let credibility_interval = self.credibility_interval(&posterior, confidence_level)?;
        debug!(
            "Posterior {}: credibility interval {}",
            posterior, credibility_interval
        );

        let hdr = self.hdr(&posterior, observation.trials(), confidence_level);
        if let Err(e) = &hdr {
            warn!("HDR search failed for {}: {}", posterior, e);
        }

        Ok(BayesianEstimate {
            p_hat: observation.p_hat(),
            posterior,
            credibility_interval,
            hdr,
            confidence_level,
        })
    }

    fn name(&self) -> &'static str {
        "bayesian"
    }
}

/// Jeffreys posterior and both intervals for `successes` out of `n` trials
///
/// Returns `(alpha_post, beta_post, credibility_interval, hdr_interval)`.
pub fn bayesian_interval(
    trials: u64,
    successes: u64,
    confidence_level: f64,
) -> Result<(f64, f64, Interval, Interval)> {
    let observation = Observation::new(trials, successes)?;
    let estimate = JeffreysPosterior::new()
        .estimate(&observation, ConfidenceLevel::try_new(confidence_level)?)?;
    let hdr = estimate.hdr?;
    Ok((
        estimate.posterior.alpha,
        estimate.posterior.beta,
        estimate.credibility_interval,
        hdr.interval(),
    ))
}
