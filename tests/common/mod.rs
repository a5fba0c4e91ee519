//! Shared utilities for integration tests

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use unistat::{AnyBuffer, ElementType};

/// Generate normal distribution data
pub fn generate_normal(n: usize, mean: f64, std_dev: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(mean, std_dev).unwrap();
    (0..n).map(|_| normal.sample(&mut rng)).collect()
}

/// Small non-negative integers `values` stored as raw native-endian bytes of
/// `ty`, with the type's blank marker appended
pub fn raw_column(ty: ElementType, values: &[u8]) -> AnyBuffer {
    let mut bytes = Vec::new();
    macro_rules! push {
        ($t:ty, $blank:expr) => {{
            for &v in values {
                bytes.extend_from_slice(&(v as $t).to_ne_bytes());
            }
            bytes.extend_from_slice(&($blank as $t).to_ne_bytes());
        }};
    }
    match ty {
        ElementType::U8 => push!(u8, u8::MAX),
        ElementType::I8 => push!(i8, i8::MIN),
        ElementType::U16 => push!(u16, u16::MAX),
        ElementType::I16 => push!(i16, i16::MIN),
        ElementType::U32 => push!(u32, u32::MAX),
        ElementType::I32 => push!(i32, i32::MIN),
        ElementType::U64 => push!(u64, u64::MAX),
        ElementType::I64 => push!(i64, i64::MIN),
        ElementType::F32 => push!(f32, f32::NAN),
        ElementType::F64 => push!(f64, f64::NAN),
    }
    AnyBuffer::from_bytes(ty, &bytes, true).unwrap()
}

/// Route `debug!` output to the test harness when `RUST_LOG` is set
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
