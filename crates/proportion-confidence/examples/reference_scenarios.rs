//! Compute every quick reference scenario and print the intervals
//!
//! Run with `RUST_LOG=debug` to see the sampler and HDR search diagnostics.
//! Large scenarios use a coarser HDR grid to keep the allocation small.

use proportion_confidence::{
    compute_scenarios, display_window, reference_scenarios, HdrConfig, IntervalCalculator,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Binomial Proportion Intervals ===\n");

    let calculator =
        IntervalCalculator::new().with_hdr_config(HdrConfig::default().with_grid_points_per_trial(10));
    let scenarios = reference_scenarios();

    for outcome in compute_scenarios(&calculator, &scenarios) {
        let scenario = &outcome.scenario;
        println!(
            "{} (n={}, p={}, {:.0}%)",
            scenario.name,
            scenario.trials,
            scenario.probability,
            scenario.confidence_level * 100.0
        );

        let result = match outcome.result {
            Ok(result) => result,
            Err(e) => {
                println!("  failed: {e}\n");
                continue;
            }
        };

        println!(
            "  observed {} successes, p_hat = {:.5}",
            result.observation.successes(),
            result.observation.p_hat()
        );
        match &result.normal {
            Ok(normal) => println!("  normal:      {}", normal.interval),
            Err(e) => println!("  normal:      {e}"),
        }
        match &result.exact {
            Ok(exact) => println!("  exact:       {}", exact.interval),
            Err(e) => println!("  exact:       {e}"),
        }
        match &result.bayesian {
            Ok(bayesian) => {
                println!("  posterior:   {}", bayesian.posterior);
                println!("  credibility: {}", bayesian.credibility_interval);
                match &bayesian.hdr {
                    Ok(hdr) => println!("  hdr:         {}", hdr.interval()),
                    Err(e) => println!("  hdr:         {e}"),
                }
            }
            Err(e) => println!("  bayesian:    {e}"),
        }
        println!(
            "  window:      {}\n",
            display_window(scenario.probability, scenario.trials)
        );
    }

    Ok(())
}
