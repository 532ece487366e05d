//! Parallel evaluation must reproduce the sequential output exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rainmap_classify::Classifier;
use rainmap_grid::Bounds;
use rainmap_index::{DistanceMetric, IndexConfig, SearchStrategy};
use rainmap_pipeline::{PipelineConfig, SamplePoint, SampleSet, run_pipeline};

fn random_samples(seed: u64, n: usize) -> SampleSet {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            SamplePoint::new(
                [
                    rng.random_range(517_624.84..527_273.75),
                    rng.random_range(4_514_740.5..4_524_361.0),
                ],
                rng.random_range(0.0..3.5),
            )
        })
        .collect()
}

fn region() -> Bounds {
    Bounds::new(517_624.843_75, 527_273.75, 4_514_740.5, 4_524_361.0).unwrap()
}

#[test]
fn parallel_matches_sequential() {
    let samples = random_samples(17, 40);
    let classifier = Classifier::precipitation_inches();
    let base = PipelineConfig::new().with_k(4);

    let seq = run_pipeline(&samples, &region(), 60, &classifier, &base.clone().with_parallel(false))
        .unwrap();
    for chunk_size in [1, 7, 256, 10_000] {
        let par = run_pipeline(
            &samples,
            &region(),
            60,
            &classifier,
            &base.clone().with_parallel(true).with_chunk_size(chunk_size),
        )
        .unwrap();
        assert_eq!(seq, par, "chunk size {chunk_size}");
    }
}

#[test]
fn strategies_agree_end_to_end() {
    let samples = random_samples(5, 120);
    let classifier = Classifier::precipitation_inches();
    for metric in [DistanceMetric::Manhattan, DistanceMetric::Euclidean] {
        let tree = PipelineConfig::new().with_k(6).with_index(
            IndexConfig::new()
                .with_metric(metric)
                .with_leaf_size(4)
                .with_strategy(SearchStrategy::KdTree),
        );
        let linear = PipelineConfig::new().with_k(6).with_index(
            IndexConfig::new()
                .with_metric(metric)
                .with_strategy(SearchStrategy::Linear),
        );
        let a = run_pipeline(&samples, &region(), 40, &classifier, &tree).unwrap();
        let b = run_pipeline(&samples, &region(), 40, &classifier, &linear).unwrap();
        assert_eq!(a.records(), b.records(), "metric {metric:?}");
    }
}

#[test]
fn estimates_stay_within_sample_range() {
    let samples = random_samples(99, 25);
    let values = samples.values();
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let result = run_pipeline(
        &samples,
        &region(),
        50,
        &Classifier::precipitation_inches(),
        &PipelineConfig::new().with_k(8),
    )
    .unwrap();
    for r in result.records() {
        assert!(r.value >= lo - 1e-9 && r.value <= hi + 1e-9);
    }
}
