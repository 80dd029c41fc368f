//! Reference scenarios and batch computation
//!
//! The scenarios cover the cases the presentation layer precomputes: two
//! baselines, low-default portfolios, small samples and large samples.
//! Scenarios are independent, so a batch can run in parallel with the
//! `parallel` feature. Outcomes are returned in input order either way.

use crate::{EstimationResult, IntervalCalculator};
use proportion_core::{EstimationRequest, Result};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, instrument};

/// A named `(n, p, confidence_level)` triple
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub name: String,
    pub trials: u64,
    pub probability: f64,
    pub confidence_level: f64,
}

impl Scenario {
    /// Create a scenario
    pub fn new(
        name: impl Into<String>,
        trials: u64,
        probability: f64,
        confidence_level: f64,
    ) -> Self {
        Self {
            name: name.into(),
            trials,
            probability,
            confidence_level,
        }
    }

    /// Validated request for this scenario
    pub fn request(&self) -> Result<EstimationRequest> {
        EstimationRequest::new(self.trials, self.probability, self.confidence_level)
    }
}

/// The reference scenarios, all at 95% confidence
pub fn reference_scenarios() -> Vec<Scenario> {
    [
        ("baseline 1", 1_000, 0.01),
        ("baseline 2", 1_000, 0.05),
        ("low default portfolio 1", 1_000, 0.001),
        ("low default portfolio 2", 1_000, 0.005),
        ("small sample 1", 100, 0.01),
        ("small sample 2", 100, 0.05),
        ("large sample 1", 100_000, 0.01),
        ("large sample 2", 100_000, 0.05),
        ("large sample 3", 500_000, 0.01),
    ]
    .into_iter()
    .map(|(name, trials, probability)| Scenario::new(name, trials, probability, 0.95))
    .collect()
}

/// Find a reference scenario by name
pub fn reference_scenario(name: &str) -> Option<Scenario> {
    reference_scenarios().into_iter().find(|s| s.name == name)
}

/// A scenario together with its computation outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub result: Result<EstimationResult>,
}

fn run(calculator: &IntervalCalculator, scenario: &Scenario) -> ScenarioOutcome {
    debug!("Computing scenario '{}'", scenario.name);
    let result = scenario
        .request()
        .and_then(|request| calculator.compute(&request));
    ScenarioOutcome {
        scenario: scenario.clone(),
        result,
    }
}

/// Compute every scenario with the same calculator
#[instrument(skip(calculator, scenarios), fields(count = scenarios.len()))]
pub fn compute_scenarios(
    calculator: &IntervalCalculator,
    scenarios: &[Scenario],
) -> Vec<ScenarioOutcome> {
    #[cfg(feature = "parallel")]
    {
        scenarios
            .par_iter()
            .map(|scenario| run(calculator, scenario))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        scenarios
            .iter()
            .map(|scenario| run(calculator, scenario))
            .collect()
    }
}
