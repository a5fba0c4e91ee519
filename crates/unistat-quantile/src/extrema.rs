//! Blank-aware minimum and maximum

use unistat_core::{Dataset, Numeric};

/// Smallest non-blank value, or the type's blank marker when there is none.
///
/// Never reorders or copies the input.
pub fn minimum<'a, T: Numeric>(input: impl Into<Dataset<'a, T>>) -> T {
    let input = input.into();
    let mut values = input.values();
    match values.next() {
        Some(first) => values.fold(first, |acc, v| if v < acc { v } else { acc }),
        None => T::blank(),
    }
}

/// Largest non-blank value, or the type's blank marker when there is none.
///
/// Never reorders or copies the input.
pub fn maximum<'a, T: Numeric>(input: impl Into<Dataset<'a, T>>) -> T {
    let input = input.into();
    let mut values = input.values();
    match values.next() {
        Some(first) => values.fold(first, |acc, v| if v > acc { v } else { acc }),
        None => T::blank(),
    }
}
