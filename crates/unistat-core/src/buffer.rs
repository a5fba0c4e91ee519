//! Typed data buffers with blank and sort metadata

use crate::error::{Error, Result};
use crate::numeric::Numeric;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Runtime tag for the ten supported element types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    #[serde(rename = "uint8")]
    U8,
    #[serde(rename = "int8")]
    I8,
    #[serde(rename = "uint16")]
    U16,
    #[serde(rename = "int16")]
    I16,
    #[serde(rename = "uint32")]
    U32,
    #[serde(rename = "int32")]
    I32,
    #[serde(rename = "uint64")]
    U64,
    #[serde(rename = "int64")]
    I64,
    #[serde(rename = "float32")]
    F32,
    #[serde(rename = "float64")]
    F64,
}

impl ElementType {
    /// All supported element types, in code order
    pub const ALL: [ElementType; 10] = [
        ElementType::U8,
        ElementType::I8,
        ElementType::U16,
        ElementType::I16,
        ElementType::U32,
        ElementType::I32,
        ElementType::U64,
        ElementType::I64,
        ElementType::F32,
        ElementType::F64,
    ];

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Self::U8 => "uint8",
            Self::I8 => "int8",
            Self::U16 => "uint16",
            Self::I16 => "int16",
            Self::U32 => "uint32",
            Self::I32 => "int32",
            Self::U64 => "uint64",
            Self::I64 => "int64",
            Self::F32 => "float32",
            Self::F64 => "float64",
        }
    }

    /// Size of one element in bytes
    pub fn size_of(&self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 => 8,
        }
    }

    /// Whether the blank marker of this type is NaN
    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Numeric code used by raw-storage collaborators
    pub fn code(&self) -> u8 {
        match self {
            Self::U8 => 0,
            Self::I8 => 1,
            Self::U16 => 2,
            Self::I16 => 3,
            Self::U32 => 4,
            Self::I32 => 5,
            Self::U64 => 6,
            Self::I64 => 7,
            Self::F32 => 8,
            Self::F64 => 9,
        }
    }

    /// Inverse of [`ElementType::code`]
    pub fn from_code(code: u8) -> Result<Self> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| Error::unsupported_type(format!("type code {code}")))
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == lowered)
            .ok_or_else(|| Error::unsupported_type(s))
    }
}

/// Cached knowledge about the ordering of a buffer.
///
/// This is a hint only: correctness-critical paths re-derive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortStatus {
    #[default]
    Unsorted,
    Increasing,
    Decreasing,
}

impl SortStatus {
    /// Sorted in either direction
    pub fn is_sorted(&self) -> bool {
        !matches!(self, Self::Unsorted)
    }
}

/// A contiguous, owned buffer of one element type.
///
/// `has_blank` says whether blank markers *may* be present. NaN in a
/// floating point buffer is treated as blank regardless of the flag.
#[derive(Debug, Clone, PartialEq)]
pub struct DataBuffer<T: Numeric> {
    data: Vec<T>,
    has_blank: bool,
    sort_status: SortStatus,
}

impl<T: Numeric> DataBuffer<T> {
    /// Wrap a vector. Blanks are assumed possible and order unknown.
    pub fn new(data: Vec<T>) -> Self {
        Self {
            data,
            has_blank: true,
            sort_status: SortStatus::Unsorted,
        }
    }

    /// Set whether blank markers may appear
    pub fn with_blank_flag(mut self, has_blank: bool) -> Self {
        self.has_blank = has_blank;
        self
    }

    /// Set the cached sort status hint
    pub fn with_sort_status(mut self, status: SortStatus) -> Self {
        self.sort_status = status;
        self
    }

    /// Number of elements (blank or not)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer has no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element type tag
    pub fn element_type(&self) -> crate::buffer::ElementType {
        T::ELEMENT_TYPE
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn has_blank(&self) -> bool {
        self.has_blank
    }

    pub fn sort_status(&self) -> SortStatus {
        self.sort_status
    }

    /// Check a single value against this buffer's blank convention
    #[inline]
    pub fn is_blank_value(&self, value: T) -> bool {
        value.is_blank_given(self.has_blank)
    }

    /// Scan for an actual blank element
    pub fn blank_present(&self) -> bool {
        (T::IS_FLOAT || self.has_blank) && self.data.iter().any(|v| v.is_blank())
    }

    /// Remove blank elements in place, compacting the survivors.
    ///
    /// Returns the number of removed elements. Clears `has_blank`.
    pub fn remove_blanks(&mut self) -> usize {
        let before = self.data.len();
        let has_blank = self.has_blank;
        self.data.retain(|v| !v.is_blank_given(has_blank));
        self.has_blank = false;
        before - self.data.len()
    }

    pub(crate) fn data_mut(&mut self) -> &mut Vec<T> {
        &mut self.data
    }

    pub(crate) fn set_sort_status(&mut self, status: SortStatus) {
        self.sort_status = status;
    }
}

impl<T: Numeric> From<Vec<T>> for DataBuffer<T> {
    fn from(data: Vec<T>) -> Self {
        Self::new(data)
    }
}

impl<T: Numeric> FromIterator<T> for DataBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_type_names_round_trip() {
        for ty in ElementType::ALL {
            assert_eq!(ty.name().parse::<ElementType>().unwrap(), ty);
            assert_eq!(ElementType::from_code(ty.code()).unwrap(), ty);
        }
        assert_eq!(" Float32 ".parse::<ElementType>().unwrap(), ElementType::F32);
    }

    #[test]
    fn test_unknown_element_types_are_rejected() {
        assert!(matches!(
            "complex64".parse::<ElementType>(),
            Err(Error::UnsupportedElementType(_))
        ));
        assert!(matches!(
            ElementType::from_code(10),
            Err(Error::UnsupportedElementType(_))
        ));
    }

    #[test]
    fn test_element_sizes() {
        assert_eq!(ElementType::U8.size_of(), 1);
        assert_eq!(ElementType::I16.size_of(), 2);
        assert_eq!(ElementType::F32.size_of(), 4);
        assert_eq!(ElementType::U64.size_of(), 8);
        assert!(ElementType::F64.is_float());
        assert!(!ElementType::I64.is_float());
    }

    #[test]
    fn test_element_type_serde_names() {
        let json = serde_json::to_string(&ElementType::U16).unwrap();
        assert_eq!(json, "\"uint16\"");
        let back: ElementType = serde_json::from_str("\"float64\"").unwrap();
        assert_eq!(back, ElementType::F64);
    }

    #[test]
    fn test_blank_removal_integers() {
        let mut buf = DataBuffer::new(vec![3u8, 255, 1, 255, 2]);
        assert!(buf.blank_present());
        assert_eq!(buf.remove_blanks(), 2);
        assert_eq!(buf.as_slice(), &[3, 1, 2]);
        assert!(!buf.has_blank());
    }

    #[test]
    fn test_blank_flag_disables_integer_sentinel() {
        let buf = DataBuffer::new(vec![3u8, 255]).with_blank_flag(false);
        assert!(!buf.blank_present());
        assert!(!buf.is_blank_value(255));
    }

    #[test]
    fn test_nan_is_always_blank() {
        let mut buf = DataBuffer::new(vec![1.0f64, f64::NAN, 2.0]).with_blank_flag(false);
        assert!(buf.blank_present());
        assert_eq!(buf.remove_blanks(), 1);
        assert_eq!(buf.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_buffer_metadata_defaults() {
        let buf: DataBuffer<i32> = (0..5).collect();
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.element_type(), ElementType::I32);
        assert_eq!(buf.sort_status(), SortStatus::Unsorted);
        assert!(buf.has_blank());
    }
}
