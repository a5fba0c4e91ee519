//! Shared utilities for integration tests

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};

/// Generate normal distribution data
pub fn generate_normal(n: usize, mean: f64, std_dev: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(mean, std_dev).unwrap();
    (0..n).map(|_| normal.sample(&mut rng)).collect()
}

/// Generate uniform integer data in `[low, high)`
pub fn generate_uniform_i32(n: usize, low: i32, high: i32, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let uniform = Uniform::new(low, high);
    (0..n).map(|_| uniform.sample(&mut rng)).collect()
}

/// Sort a clean copy with NaN removed
pub fn sorted_clean(data: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = data.iter().copied().filter(|v| !v.is_nan()).collect();
    out.sort_by(|a, b| a.partial_cmp(b).unwrap());
    out
}
