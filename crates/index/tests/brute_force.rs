//! Cross-checks the k-d tree against the exhaustive scan on random gauges.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rainmap_index::{DistanceMetric, IndexConfig, SearchStrategy, SpatialIndex};

fn random_coords(rng: &mut StdRng, n: usize) -> Vec<[f64; 2]> {
    (0..n)
        .map(|_| {
            [
                rng.random_range(517_000.0..528_000.0),
                rng.random_range(4_514_000.0..4_525_000.0),
            ]
        })
        .collect()
}

fn assert_same_neighbors(metric: DistanceMetric, leaf_size: usize, n: usize, k: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let coords = random_coords(&mut rng, n);
    let queries = random_coords(&mut rng, 200);

    let base = IndexConfig::new()
        .with_metric(metric)
        .with_leaf_size(leaf_size);
    let tree = SpatialIndex::build(&coords, &base.clone().with_strategy(SearchStrategy::KdTree))
        .unwrap();
    let linear =
        SpatialIndex::build(&coords, &base.with_strategy(SearchStrategy::Linear)).unwrap();

    let a = tree.query(&queries, k).unwrap();
    let b = linear.query(&queries, k).unwrap();
    assert_eq!(a, b, "metric {metric:?}, leaf {leaf_size}, n {n}, k {k}");
}

#[test]
fn manhattan_matches_linear() {
    for (leaf, seed) in [(1, 1), (4, 2), (20, 3)] {
        assert_same_neighbors(DistanceMetric::Manhattan, leaf, 500, 4, seed);
    }
}

#[test]
fn euclidean_matches_linear() {
    assert_same_neighbors(DistanceMetric::Euclidean, 5, 400, 6, 11);
}

#[test]
fn chebyshev_matches_linear() {
    assert_same_neighbors(DistanceMetric::Chebyshev, 3, 300, 3, 21);
}

#[test]
fn general_order_matches_linear() {
    assert_same_neighbors(DistanceMetric::Minkowski { p: 3.0 }, 2, 250, 5, 31);
}

#[test]
fn k_equals_n_returns_every_sample() {
    assert_same_neighbors(DistanceMetric::Manhattan, 2, 17, 17, 41);
}

#[test]
fn distances_are_ascending() {
    let mut rng = StdRng::seed_from_u64(7);
    let coords = random_coords(&mut rng, 300);
    let queries = random_coords(&mut rng, 50);
    let index = SpatialIndex::build(&coords, &IndexConfig::new().with_leaf_size(4)).unwrap();
    let neighbors = index.query(&queries, 8).unwrap();
    for (_, dists) in neighbors.rows() {
        for w in dists.windows(2) {
            assert!(w[0] <= w[1], "distances not ascending: {dists:?}");
        }
    }
}

#[test]
fn approximate_query_respects_slack() {
    let mut rng = StdRng::seed_from_u64(99);
    let coords = random_coords(&mut rng, 1000);
    let queries = random_coords(&mut rng, 100);
    let k = 4;
    let eps = 0.25;

    let exact = SpatialIndex::build(&coords, &IndexConfig::new().with_leaf_size(2)).unwrap();
    let approx = SpatialIndex::build(
        &coords,
        &IndexConfig::new().with_leaf_size(2).with_eps(eps),
    )
    .unwrap();

    let e = exact.query(&queries, k).unwrap();
    let a = approx.query(&queries, k).unwrap();
    for q in 0..queries.len() {
        let true_kth = e.distances(q)[k - 1];
        let got_kth = a.distances(q)[k - 1];
        assert!(got_kth >= true_kth - 1e-9);
        assert!(got_kth <= true_kth * (1.0 + eps) + 1e-9);
    }
}
