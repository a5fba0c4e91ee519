//! Shared utilities for integration tests

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Generate normal distribution data
pub fn generate_normal(n: usize, mean: f64, std_dev: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(mean, std_dev).unwrap();
    (0..n).map(|_| normal.sample(&mut rng)).collect()
}

/// Check a sequence never decreases
pub fn is_non_decreasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[1] >= w[0])
}
