//! Runtime-tagged buffers and values
//!
//! Callers that only learn the element type at runtime (raw storage,
//! configuration-driven evaluation) hold an [`AnyBuffer`] and route it to
//! the generic algorithms with [`dispatch_buffer!`](crate::dispatch_buffer).

use crate::buffer::{DataBuffer, ElementType};
use crate::error::{Error, Result};
use crate::numeric::Numeric;
use std::fmt;

/// A single value of one of the supported element types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnyValue {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl AnyValue {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::U8(_) => ElementType::U8,
            Self::I8(_) => ElementType::I8,
            Self::U16(_) => ElementType::U16,
            Self::I16(_) => ElementType::I16,
            Self::U32(_) => ElementType::U32,
            Self::I32(_) => ElementType::I32,
            Self::U64(_) => ElementType::U64,
            Self::I64(_) => ElementType::I64,
            Self::F32(_) => ElementType::F32,
            Self::F64(_) => ElementType::F64,
        }
    }

    /// Widen to f64 (lossy above 2^53 for 64-bit integers)
    pub fn to_f64(&self) -> f64 {
        match *self {
            Self::U8(v) => v.to_f64(),
            Self::I8(v) => v.to_f64(),
            Self::U16(v) => v.to_f64(),
            Self::I16(v) => v.to_f64(),
            Self::U32(v) => v.to_f64(),
            Self::I32(v) => v.to_f64(),
            Self::U64(v) => v.to_f64(),
            Self::I64(v) => v.to_f64(),
            Self::F32(v) => v.to_f64(),
            Self::F64(v) => v.to_f64(),
        }
    }

    /// Check if the value is its type's blank marker
    pub fn is_blank(&self) -> bool {
        match *self {
            Self::U8(v) => v.is_blank(),
            Self::I8(v) => v.is_blank(),
            Self::U16(v) => v.is_blank(),
            Self::I16(v) => v.is_blank(),
            Self::U32(v) => v.is_blank(),
            Self::I32(v) => v.is_blank(),
            Self::U64(v) => v.is_blank(),
            Self::I64(v) => v.is_blank(),
            Self::F32(v) => v.is_blank(),
            Self::F64(v) => v.is_blank(),
        }
    }

    /// The blank marker of the given type
    pub fn blank(ty: ElementType) -> Self {
        match ty {
            ElementType::U8 => u8::blank().into_any(),
            ElementType::I8 => i8::blank().into_any(),
            ElementType::U16 => u16::blank().into_any(),
            ElementType::I16 => i16::blank().into_any(),
            ElementType::U32 => u32::blank().into_any(),
            ElementType::I32 => i32::blank().into_any(),
            ElementType::U64 => u64::blank().into_any(),
            ElementType::I64 => i64::blank().into_any(),
            ElementType::F32 => f32::blank().into_any(),
            ElementType::F64 => f64::blank().into_any(),
        }
    }

    /// Convert an f64 into a value of the requested type (saturating)
    pub fn from_f64(ty: ElementType, value: f64) -> Self {
        match ty {
            ElementType::U8 => u8::from_f64(value).into_any(),
            ElementType::I8 => i8::from_f64(value).into_any(),
            ElementType::U16 => u16::from_f64(value).into_any(),
            ElementType::I16 => i16::from_f64(value).into_any(),
            ElementType::U32 => u32::from_f64(value).into_any(),
            ElementType::I32 => i32::from_f64(value).into_any(),
            ElementType::U64 => u64::from_f64(value).into_any(),
            ElementType::I64 => i64::from_f64(value).into_any(),
            ElementType::F32 => f32::from_f64(value).into_any(),
            ElementType::F64 => f64::from_f64(value).into_any(),
        }
    }

    /// Extract a value of type `T`, failing with a type mismatch
    pub fn downcast<T: Numeric>(&self) -> Result<T> {
        T::from_any(self).ok_or_else(|| Error::type_mismatch(T::ELEMENT_TYPE, self.element_type()))
    }
}

impl fmt::Display for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

/// A buffer whose element type is only known at runtime
#[derive(Debug, Clone, PartialEq)]
pub enum AnyBuffer {
    U8(DataBuffer<u8>),
    I8(DataBuffer<i8>),
    U16(DataBuffer<u16>),
    I16(DataBuffer<i16>),
    U32(DataBuffer<u32>),
    I32(DataBuffer<i32>),
    U64(DataBuffer<u64>),
    I64(DataBuffer<i64>),
    F32(DataBuffer<f32>),
    F64(DataBuffer<f64>),
}

/// Run an expression against the typed buffer inside an [`AnyBuffer`].
///
/// The buffer binding is a `&DataBuffer<T>` for the concrete `T` in each arm,
/// so the body is monomorphized once per element type.
///
/// ```
/// use unistat_core::{dispatch_buffer, AnyBuffer, DataBuffer};
///
/// let any = AnyBuffer::from(DataBuffer::new(vec![1i16, 2, 3]));
/// let n = dispatch_buffer!(&any, buf => buf.len());
/// assert_eq!(n, 3);
/// ```
#[macro_export]
macro_rules! dispatch_buffer {
    ($any:expr, $buf:ident => $body:expr) => {
        match $any {
            $crate::AnyBuffer::U8($buf) => $body,
            $crate::AnyBuffer::I8($buf) => $body,
            $crate::AnyBuffer::U16($buf) => $body,
            $crate::AnyBuffer::I16($buf) => $body,
            $crate::AnyBuffer::U32($buf) => $body,
            $crate::AnyBuffer::I32($buf) => $body,
            $crate::AnyBuffer::U64($buf) => $body,
            $crate::AnyBuffer::I64($buf) => $body,
            $crate::AnyBuffer::F32($buf) => $body,
            $crate::AnyBuffer::F64($buf) => $body,
        }
    };
}

impl AnyBuffer {
    /// Reinterpret native-endian raw storage as a typed buffer.
    ///
    /// The byte length must be a whole multiple of the element size.
    pub fn from_bytes(ty: ElementType, bytes: &[u8], has_blank: bool) -> Result<Self> {
        if bytes.len() % ty.size_of() != 0 {
            return Err(Error::InvalidInput(format!(
                "{} bytes is not a whole number of {ty}",
                bytes.len()
            )));
        }

        fn typed<T: Numeric>(bytes: &[u8], has_blank: bool) -> DataBuffer<T> {
            DataBuffer::new(bytemuck::pod_collect_to_vec::<u8, T>(bytes)).with_blank_flag(has_blank)
        }

        Ok(match ty {
            ElementType::U8 => Self::U8(typed(bytes, has_blank)),
            ElementType::I8 => Self::I8(typed(bytes, has_blank)),
            ElementType::U16 => Self::U16(typed(bytes, has_blank)),
            ElementType::I16 => Self::I16(typed(bytes, has_blank)),
            ElementType::U32 => Self::U32(typed(bytes, has_blank)),
            ElementType::I32 => Self::I32(typed(bytes, has_blank)),
            ElementType::U64 => Self::U64(typed(bytes, has_blank)),
            ElementType::I64 => Self::I64(typed(bytes, has_blank)),
            ElementType::F32 => Self::F32(typed(bytes, has_blank)),
            ElementType::F64 => Self::F64(typed(bytes, has_blank)),
        })
    }

    pub fn element_type(&self) -> ElementType {
        dispatch_buffer!(self, buf => buf.element_type())
    }

    pub fn len(&self) -> usize {
        dispatch_buffer!(self, buf => buf.len())
    }

    pub fn is_empty(&self) -> bool {
        dispatch_buffer!(self, buf => buf.is_empty())
    }

    pub fn has_blank(&self) -> bool {
        dispatch_buffer!(self, buf => buf.has_blank())
    }

    /// Widen every element to f64, mapping blanks to NaN
    pub fn to_f64(&self) -> Vec<f64> {
        dispatch_buffer!(self, buf => {
            let has_blank = buf.has_blank();
            buf.as_slice()
                .iter()
                .map(|v| if v.is_blank_given(has_blank) { f64::NAN } else { v.to_f64() })
                .collect()
        })
    }

    /// Borrow the typed buffer, failing if the element type differs
    pub fn downcast_ref<T: BufferVariant>(&self) -> Result<&DataBuffer<T>> {
        T::buffer_ref(self)
            .ok_or_else(|| Error::type_mismatch(T::ELEMENT_TYPE, self.element_type()))
    }
}

/// Typed access to the matching [`AnyBuffer`] variant
pub trait BufferVariant: Numeric {
    fn buffer_ref(any: &AnyBuffer) -> Option<&DataBuffer<Self>>;
}

macro_rules! impl_buffer_variant {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl BufferVariant for $t {
                fn buffer_ref(any: &AnyBuffer) -> Option<&DataBuffer<Self>> {
                    match any {
                        AnyBuffer::$variant(buf) => Some(buf),
                        _ => None,
                    }
                }
            }

            impl From<DataBuffer<$t>> for AnyBuffer {
                fn from(buf: DataBuffer<$t>) -> Self {
                    AnyBuffer::$variant(buf)
                }
            }

            impl From<Vec<$t>> for AnyBuffer {
                fn from(data: Vec<$t>) -> Self {
                    AnyBuffer::$variant(DataBuffer::new(data))
                }
            }
        )*
    };
}

impl_buffer_variant! {
    u8 => U8, i8 => I8, u16 => U16, i16 => I16, u32 => U32,
    i32 => I32, u64 => U64, i64 => I64, f32 => F32, f64 => F64,
}
