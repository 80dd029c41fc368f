//! End-to-end tests from request to serialized result

use approx::assert_relative_eq;
use proportion_confidence::{
    compute_intervals, display_window, posterior_curve, Interval, IntervalCalculator,
};
use proportion_core::{EstimationRequest, Error};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_full_pipeline() -> anyhow::Result<()> {
    init_tracing();

    let request = EstimationRequest::new(1000, 0.05, 0.95)?;
    let result = IntervalCalculator::new().compute(&request)?;
    tracing::info!(successes = result.observation.successes(), "observation drawn");

    assert!(result.is_complete());
    let p_hat = result.observation.p_hat();
    for interval in [
        result.normal_interval(),
        result.exact_interval(),
        result.credibility_interval(),
        result.hdr_interval(),
    ] {
        let interval = interval.expect("every method succeeds");
        assert!(interval.contains(p_hat), "{interval} misses {p_hat}");
    }

    assert_relative_eq!(
        result.posterior_alpha().unwrap(),
        result.observation.successes() as f64 + 0.5
    );
    assert_relative_eq!(
        result.posterior_beta().unwrap(),
        result.observation.failures() as f64 + 0.5
    );
    Ok(())
}

#[test]
fn test_all_successes_is_flagged_degenerate() -> anyhow::Result<()> {
    init_tracing();

    let result = compute_intervals(50, 1.0, 0.95)?;
    assert_eq!(result.observation.successes(), 50);

    let normal = result.normal.as_ref().expect("degenerate but reported");
    assert!(normal.degenerate);
    assert_eq!(normal.interval, Interval::point(1.0));

    // the posterior stays proper and the HDR hugs the upper boundary
    let hdr = result.hdr_interval().expect("HDR found");
    assert!(hdr.upper > 0.99);

    let strict = IntervalCalculator::new()
        .reject_degenerate()
        .compute(&EstimationRequest::new(50, 1.0, 0.95)?)?;
    assert!(matches!(strict.normal, Err(Error::DegenerateEstimate(_))));
    assert!(matches!(strict.exact, Err(Error::DegenerateEstimate(_))));
    assert!(strict.bayesian.is_ok());
    Ok(())
}

#[test]
fn test_invalid_requests_fail_before_sampling() {
    for (trials, probability, level, field) in [
        (0, 0.5, 0.95, "n"),
        (100, 0.0005, 0.95, "p"),
        (100, 1.5, 0.95, "p"),
        (100, 0.5, 1.0, "confidence_level"),
        (100, 0.005, 0.95, "n*p"),
    ] {
        let err = compute_intervals(trials, probability, level).unwrap_err();
        assert_eq!(err.field(), Some(field), "{err}");
    }
}

#[test]
fn test_result_round_trips_to_json() -> anyhow::Result<()> {
    let result = compute_intervals(200, 0.3, 0.9)?;
    let json: serde_json::Value = serde_json::to_value(&result)?;

    assert_eq!(json["observation"]["trials"], 200);
    let lower = json["normal"]["Ok"]["interval"]["lower"]
        .as_f64()
        .expect("lower bound serialized");
    assert_relative_eq!(lower, result.normal_interval().unwrap().lower);
    Ok(())
}

#[test]
fn test_posterior_curve_peaks_inside_display_window() -> anyhow::Result<()> {
    let result = compute_intervals(1000, 0.01, 0.95)?;
    let posterior = result.bayesian.as_ref().expect("posterior").posterior;

    let curve = posterior_curve(&posterior, 2_000)?;
    let (peak_x, _) = curve.peak().expect("non-empty curve");
    let window = display_window(0.01, 1000);
    assert!(window.contains(peak_x), "peak {peak_x} outside {window}");
    Ok(())
}
