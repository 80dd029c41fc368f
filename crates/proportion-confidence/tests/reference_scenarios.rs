//! Reference scenario tests
//!
//! Runs the small and medium reference scenarios end to end and checks the
//! seeded observation is reproduced exactly.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use proportion_confidence::{
    compute_intervals, compute_intervals_with_seed, compute_scenarios, reference_scenario,
    reference_scenarios, IntervalCalculator, Scenario,
};
use proportion_core::{sample, Error, DEFAULT_SEED};

fn quick_scenarios() -> Vec<Scenario> {
    reference_scenarios()
        .into_iter()
        .filter(|s| s.trials <= 1_000)
        .collect()
}

#[test]
fn test_baseline_is_reproducible() {
    let first = compute_intervals(1000, 0.01, 0.95).unwrap();
    let second = IntervalCalculator::new()
        .compute(&reference_scenario("baseline 1").unwrap().request().unwrap())
        .unwrap();

    // Bit-for-bit equality across independent runs
    assert_eq!(first, second);
    assert_eq!(
        first.observation,
        sample(1000, 0.01, DEFAULT_SEED).unwrap()
    );

    let p_hat = first.observation.successes() as f64 / 1000.0;
    assert_eq!(first.p_hat_normal(), Some(p_hat));
    assert_eq!(first.p_hat_exact(), Some(p_hat));
}

#[test]
fn test_baseline_values_are_pinned() {
    // ChaCha8Rng seeded with 42, one rand_distr Binomial(1000, 0.01) draw
    let result = compute_intervals(1000, 0.01, 0.95).unwrap();
    assert_eq!(result.observation.successes(), 7);
    assert_eq!(result.p_hat_normal(), Some(0.007));

    let normal = result.normal_interval().unwrap();
    assert_abs_diff_eq!(normal.lower, 0.0018326041120652597, epsilon = 1e-12);
    assert_abs_diff_eq!(normal.upper, 0.01216739588793474, epsilon = 1e-12);

    // Binomial(1000, 0.007) quantiles are 2 and 13 successes
    let exact = result.exact_interval().unwrap();
    assert_relative_eq!(exact.lower, 0.002);
    assert_relative_eq!(exact.upper, 0.013);

    assert_eq!(result.posterior_alpha(), Some(7.5));
    assert_eq!(result.posterior_beta(), Some(993.5));

    let credibility = result.credibility_interval().unwrap();
    assert_abs_diff_eq!(credibility.lower, 0.0031363593281353882, epsilon = 1e-9);
    assert_abs_diff_eq!(credibility.upper, 0.0136944602423544257, epsilon = 1e-9);

    // 100,000-point grid: bounds are grid points 267 and 1292
    let hdr = result.hdr_interval().unwrap();
    assert_relative_eq!(hdr.lower, 267.0 / 99_999.0, max_relative = 1e-12);
    assert_relative_eq!(hdr.upper, 1292.0 / 99_999.0, max_relative = 1e-12);
}

#[test]
fn test_seed_controls_the_observation() {
    let seeded = compute_intervals_with_seed(1000, 0.3, 0.95, 1234).unwrap();
    assert_eq!(seeded.observation, sample(1000, 0.3, 1234).unwrap());
    assert_eq!(
        seeded,
        compute_intervals_with_seed(1000, 0.3, 0.95, 1234).unwrap()
    );
}

#[test]
fn test_single_trial_at_minimum_probability_is_rejected() {
    let err = compute_intervals(1, 0.001, 0.95).unwrap_err();
    match err {
        Error::InvalidParameter { field, reason } => {
            assert_eq!(field, "n*p");
            assert!(reason.contains("expected number of successes"));
        }
        other => panic!("Wrong error type: {other:?}"),
    }
}

#[test]
fn test_quick_scenarios_complete() {
    let scenarios = quick_scenarios();
    assert_eq!(scenarios.len(), 6);

    let outcomes = compute_scenarios(&IntervalCalculator::new(), &scenarios);
    for outcome in &outcomes {
        let result = outcome
            .result
            .as_ref()
            .unwrap_or_else(|e| panic!("{}: {e}", outcome.scenario.name));

        assert_eq!(result.request.trials(), outcome.scenario.trials);
        assert!(result.bayesian.is_ok(), "{}", outcome.scenario.name);

        let posterior = result.bayesian.as_ref().unwrap().posterior;
        assert_relative_eq!(
            posterior.alpha + posterior.beta,
            outcome.scenario.trials as f64 + 1.0
        );

        let credibility = result.credibility_interval().unwrap();
        assert!(credibility.contains(posterior.mean()));
    }
}

#[test]
fn test_scenario_results_serialize() {
    let scenarios = vec![reference_scenario("small sample 2").unwrap()];
    let outcomes = compute_scenarios(&IntervalCalculator::new(), &scenarios);
    let json = serde_json::to_string(&outcomes).unwrap();
    assert!(json.contains("small sample 2"));
    assert!(json.contains("credibility_interval"));
}
