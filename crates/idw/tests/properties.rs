//! Behavioral properties of the estimator on randomized neighborhoods.

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rainmap_idw::{IdwConfig, estimate, weights};

fn random_neighborhood(rng: &mut StdRng, k: usize) -> (Vec<f64>, Vec<f64>) {
    let values = (0..k).map(|_| rng.random_range(0.0..6.0)).collect();
    let distances = (0..k).map(|_| rng.random_range(0.0..5_000.0)).collect();
    (values, distances)
}

#[test]
fn estimate_lies_within_neighbor_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for power in [0.0, 0.5, 1.0, 2.0, 8.0] {
        let cfg = IdwConfig::new().with_power(power);
        for _ in 0..500 {
            let k = rng.random_range(1..=16);
            let (values, distances) = random_neighborhood(&mut rng, k);
            let z = estimate(&values, &distances, &cfg).unwrap();
            let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            assert!(
                z >= lo - 1e-9 && z <= hi + 1e-9,
                "power {power}: {z} outside [{lo}, {hi}]"
            );
        }
    }
}

#[test]
fn equal_values_are_reproduced() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..100 {
        let k = rng.random_range(1..=8);
        let (_, distances) = random_neighborhood(&mut rng, k);
        let values = vec![2.75; k];
        let z = estimate(&values, &distances, &IdwConfig::new()).unwrap();
        assert_abs_diff_eq!(z, 2.75, epsilon = 1e-12);
    }
}

#[test]
fn approaching_a_sample_converges_to_its_value() {
    let values = [1.0, 3.0, 5.0];
    let mut previous_error = f64::INFINITY;
    for d in [1.0, 1e-2, 1e-4, 1e-6, 0.0] {
        let z = estimate(&values, &[d, 10.0, 20.0], &IdwConfig::new()).unwrap();
        let error = (z - 1.0).abs();
        assert!(error <= previous_error, "error grew at d = {d}");
        previous_error = error;
    }
    assert!(previous_error < 1e-6);
}

#[test]
fn higher_power_is_more_local() {
    let values = [0.0, 10.0];
    let distances = [1.0, 4.0];
    let mut previous = f64::INFINITY;
    for power in [0.0, 1.0, 2.0, 4.0] {
        let z = estimate(&values, &distances, &IdwConfig::new().with_power(power)).unwrap();
        assert!(z < previous, "power {power} did not move toward nearest value");
        previous = z;
    }
}

#[test]
fn estimate_is_weights_dot_values() {
    let mut rng = StdRng::seed_from_u64(23);
    let cfg = IdwConfig::new().with_power(2.0);
    for _ in 0..50 {
        let (values, distances) = random_neighborhood(&mut rng, 6);
        let w = weights(&distances, &cfg).unwrap();
        let dot: f64 = w.iter().zip(&values).map(|(w, v)| w * v).sum();
        let z = estimate(&values, &distances, &cfg).unwrap();
        assert_abs_diff_eq!(z, dot, epsilon = 1e-9);
    }
}

#[test]
fn neighbor_order_does_not_matter() {
    let values = [1.0, 4.0, 2.5, 0.0];
    let distances = [3.0, 1.0, 2.0, 8.0];
    let forward = estimate(&values, &distances, &IdwConfig::new()).unwrap();

    let rev_values: Vec<f64> = values.iter().rev().copied().collect();
    let rev_distances: Vec<f64> = distances.iter().rev().copied().collect();
    let backward = estimate(&rev_values, &rev_distances, &IdwConfig::new()).unwrap();

    assert_abs_diff_eq!(forward, backward, epsilon = 1e-12);
}
