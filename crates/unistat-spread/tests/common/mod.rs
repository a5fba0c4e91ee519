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

/// Normal data with a handful of far outliers appended
pub fn contaminated_normal(n: usize, outliers: &[f64], seed: u64) -> Vec<f64> {
    let mut data = generate_normal(n, 0.0, 1.0, seed);
    data.extend_from_slice(outliers);
    data
}

/// Route `debug!` output to the test harness when `RUST_LOG` is set
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
