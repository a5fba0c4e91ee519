//! Generic numeric trait for blank-aware statistical computing
//!
//! Every algorithm in the workspace is written once against [`Numeric`] and
//! instantiated for the ten supported primitive types. The trait carries the
//! "blank" capability: a sentinel for integer types and NaN for floating
//! point types, so no algorithm has to branch on the element type itself.
//!
//! # Design Philosophy
//!
//! - **Pure type constraints**: Defines relationships between numeric types
//! - **Single algorithm body**: Type differences live here, not in the algorithms
//! - **Type safety**: Can't accidentally mix numeric types
//! - **Lossless where it matters**: Integer averages never overflow

use crate::any::AnyValue;
use crate::buffer::ElementType;
use bytemuck::Pod;
use num_traits::Num;
use std::fmt::{Debug, Display};

/// Base trait for numeric element types that can be used in statistical computations
pub trait Numeric:
    Pod + Num + Copy + PartialOrd + Debug + Display + Send + Sync + 'static
{
    /// Runtime tag for this element type
    const ELEMENT_TYPE: ElementType;

    /// Whether the blank marker is NaN
    const IS_FLOAT: bool;

    /// The blank marker of this type
    fn blank() -> Self;

    /// Check if a value is the blank marker
    fn is_blank(&self) -> bool;

    /// Convert to f64 (for accumulation and mirrored comparisons)
    fn to_f64(&self) -> f64;

    /// Convert from f64, saturating for integer types
    fn from_f64(val: f64) -> Self;

    /// Average of two values in this type's own arithmetic.
    ///
    /// Integral types truncate toward zero and never overflow.
    fn midpoint(self, other: Self) -> Self;

    /// Wrap into a runtime-tagged value
    fn into_any(self) -> AnyValue;

    /// Unwrap a runtime-tagged value of this exact type
    fn from_any(value: &AnyValue) -> Option<Self>;

    /// Check if a value must be skipped given a buffer's blank flag.
    ///
    /// NaN is never usable data. Integer sentinels only count as blank when
    /// the owning buffer says blanks may be present.
    #[inline]
    fn is_blank_given(&self, has_blank: bool) -> bool {
        (Self::IS_FLOAT || has_blank) && self.is_blank()
    }
}

macro_rules! impl_integer_numeric {
    ($($t:ty => $variant:ident, $blank:expr);* $(;)?) => {
        $(
            impl Numeric for $t {
                const ELEMENT_TYPE: ElementType = ElementType::$variant;
                const IS_FLOAT: bool = false;

                #[inline]
                fn blank() -> Self {
                    $blank
                }

                #[inline]
                fn is_blank(&self) -> bool {
                    *self == $blank
                }

                #[inline]
                fn to_f64(&self) -> f64 {
                    *self as f64
                }

                #[inline]
                fn from_f64(val: f64) -> Self {
                    val as $t
                }

                #[inline]
                fn midpoint(self, other: Self) -> Self {
                    ((self as i128 + other as i128) / 2) as $t
                }

                fn into_any(self) -> AnyValue {
                    AnyValue::$variant(self)
                }

                fn from_any(value: &AnyValue) -> Option<Self> {
                    match value {
                        AnyValue::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

macro_rules! impl_float_numeric {
    ($($t:ty => $variant:ident);* $(;)?) => {
        $(
            impl Numeric for $t {
                const ELEMENT_TYPE: ElementType = ElementType::$variant;
                const IS_FLOAT: bool = true;

                #[inline]
                fn blank() -> Self {
                    <$t>::NAN
                }

                #[inline]
                fn is_blank(&self) -> bool {
                    self.is_nan()
                }

                #[inline]
                fn to_f64(&self) -> f64 {
                    *self as f64
                }

                #[inline]
                fn from_f64(val: f64) -> Self {
                    val as $t
                }

                #[inline]
                fn midpoint(self, other: Self) -> Self {
                    (self + other) / 2.0
                }

                fn into_any(self) -> AnyValue {
                    AnyValue::$variant(self)
                }

                fn from_any(value: &AnyValue) -> Option<Self> {
                    match value {
                        AnyValue::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

// Unsigned blanks sit at the top of the range, signed ones at the bottom.
impl_integer_numeric! {
    u8  => U8,  u8::MAX;
    i8  => I8,  i8::MIN;
    u16 => U16, u16::MAX;
    i16 => I16, i16::MIN;
    u32 => U32, u32::MAX;
    i32 => I32, i32::MIN;
    u64 => U64, u64::MAX;
    i64 => I64, i64::MIN;
}

impl_float_numeric! {
    f32 => F32;
    f64 => F64;
}
