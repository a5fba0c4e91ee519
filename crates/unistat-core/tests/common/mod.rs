//! Shared utilities for integration tests

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Buffer lengths around the interesting small sizes
pub fn edge_case_lengths() -> Vec<usize> {
    vec![0, 1, 2, 3, 4, 5, 7, 8, 9, 16, 17, 31, 64, 100, 127]
}

/// Random integers with roughly `blank_fraction` of them replaced by `blank`
pub fn with_blanks_i32(n: usize, blank_fraction: f64, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            if rng.gen_bool(blank_fraction) {
                i32::MIN
            } else {
                rng.gen_range(-1000..1000)
            }
        })
        .collect()
}

/// Random floats with roughly `blank_fraction` of them replaced by NaN
pub fn with_nans_f64(n: usize, blank_fraction: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            if rng.gen_bool(blank_fraction) {
                f64::NAN
            } else {
                rng.gen_range(-50.0..50.0)
            }
        })
        .collect()
}
