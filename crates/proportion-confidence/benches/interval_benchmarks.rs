use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use proportion_confidence::{
    HdrConfig, HdrSearch, IntervalCalculator, PosteriorParameters,
};
use proportion_core::{ConfidenceLevel, EstimationRequest};

fn bench_hdr_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("HdrSearch");
    let sizes = [100u64, 1_000, 10_000];

    for &trials in &sizes {
        // posterior of a 1% success rate under the Jeffreys prior
        let successes = (trials as f64 * 0.01).round();
        let posterior =
            PosteriorParameters::new(successes + 0.5, trials as f64 - successes + 0.5).unwrap();
        let search = HdrSearch::default();

        group.bench_with_input(BenchmarkId::new("default_grid", trials), &trials, |b, &n| {
            b.iter(|| search.search(black_box(&posterior), n, ConfidenceLevel::NINETY_FIVE))
        });

        let coarse = HdrSearch::new(HdrConfig::default().with_grid_points_per_trial(10));
        group.bench_with_input(BenchmarkId::new("coarse_grid", trials), &trials, |b, &n| {
            b.iter(|| coarse.search(black_box(&posterior), n, ConfidenceLevel::NINETY_FIVE))
        });
    }

    group.finish();
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("ComputeIntervals");
    let calculator = IntervalCalculator::new();

    for &(trials, probability) in &[(100u64, 0.05), (1_000, 0.01), (1_000, 0.05)] {
        let request = EstimationRequest::new(trials, probability, 0.95).unwrap();
        group.bench_with_input(
            BenchmarkId::new(format!("p={probability}"), trials),
            &request,
            |b, request| b.iter(|| calculator.compute(black_box(request))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_hdr_search, bench_compute);
criterion_main!(benches);
