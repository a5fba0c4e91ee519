//! Shared utilities for integration tests

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};
use statrs::distribution::{ContinuousCDF, Normal as ExactNormal};

/// Exact quantiles of a normal distribution at `(i + 0.5) / n`
pub fn normal_quantiles(n: usize, mean: f64, std_dev: f64) -> Vec<f64> {
    let dist = ExactNormal::new(mean, std_dev).unwrap();
    (0..n)
        .map(|i| dist.inverse_cdf((i as f64 + 0.5) / n as f64))
        .collect()
}

/// Generate normal distribution data
pub fn generate_normal(n: usize, mean: f64, std_dev: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(mean, std_dev).unwrap();
    (0..n).map(|_| normal.sample(&mut rng)).collect()
}

/// Normal data with a uniform tail of `extra` values in `[low, high)`
pub fn skewed_normal(n: usize, extra: usize, low: f64, high: f64, seed: u64) -> Vec<f64> {
    let mut data = generate_normal(n, 5.0, 2.0, seed);
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    let tail = Uniform::new(low, high);
    data.extend((0..extra).map(|_| tail.sample(&mut rng)));
    data
}

/// Route `debug!`/`trace!` output to the test harness when `RUST_LOG` is set
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
