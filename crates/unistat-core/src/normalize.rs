//! Blank removal and ordering
//!
//! Every order-based statistic starts from a contiguous, blank-free, sorted
//! view of its input. [`no_blank_sorted`] produces that view, touching the
//! caller's storage only when handed a [`Dataset::InPlace`] buffer.

use crate::buffer::{DataBuffer, SortStatus};
use crate::numeric::Numeric;
use crate::tiled::Dataset;
use std::cmp::Ordering;
use std::ops::Deref;
use tracing::trace;

/// Classify the ordering of a slice with one forward scan.
///
/// The direction is taken from the first adjacent pair (equal counts as
/// increasing) and must hold for every later pair. Slices shorter than two
/// elements are increasing.
pub fn is_sorted<T: Numeric>(data: &[T]) -> SortStatus {
    if data.len() < 2 {
        return SortStatus::Increasing;
    }
    if data[1] >= data[0] {
        if data.windows(2).all(|w| w[1] >= w[0]) {
            SortStatus::Increasing
        } else {
            SortStatus::Unsorted
        }
    } else if data.windows(2).all(|w| w[1] <= w[0]) {
        SortStatus::Decreasing
    } else {
        SortStatus::Unsorted
    }
}

#[inline]
fn is_nan<T: Numeric>(v: &T) -> bool {
    T::IS_FLOAT && v.is_blank()
}

/// Sort increasing. NaN values go to the end.
pub fn sort_increasing<T: Numeric>(data: &mut [T]) {
    data.sort_by(|a, b| match (is_nan(a), is_nan(b)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
    });
}

/// Sort decreasing. NaN values go to the end.
pub fn sort_decreasing<T: Numeric>(data: &mut [T]) {
    data.sort_by(|a, b| match (is_nan(a), is_nan(b)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(a).unwrap_or(Ordering::Equal),
    });
}

/// A blank-free, ordered buffer together with who owns it.
///
/// `Borrowed` is the caller's untouched buffer (already clean and ordered),
/// `InPlace` is the caller's buffer after compaction and sorting, `Owned` is
/// a private copy.
#[derive(Debug)]
pub enum Normalized<'a, T: Numeric> {
    Borrowed(&'a DataBuffer<T>),
    InPlace(&'a mut DataBuffer<T>),
    Owned(DataBuffer<T>),
}

impl<'a, T: Numeric> Normalized<'a, T> {
    /// Whether the result is a private allocation
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Detach from the caller, cloning if necessary
    pub fn into_owned(self) -> DataBuffer<T> {
        match self {
            Self::Borrowed(buf) => buf.clone(),
            Self::InPlace(buf) => buf.clone(),
            Self::Owned(buf) => buf,
        }
    }

    pub fn as_slice(&self) -> &[T] {
        self.deref().as_slice()
    }
}

impl<'a, T: Numeric> Deref for Normalized<'a, T> {
    type Target = DataBuffer<T>;

    fn deref(&self) -> &DataBuffer<T> {
        match self {
            Self::Borrowed(buf) => buf,
            Self::InPlace(buf) => buf,
            Self::Owned(buf) => buf,
        }
    }
}

/// Remove blanks and sort increasing.
///
/// Tiles are gathered into a private copy first. A borrowed buffer that is
/// already clean and increasing is returned without copying; otherwise a
/// borrowed buffer is cloned. An in-place buffer is compacted and sorted in
/// its own storage, and its metadata updated.
pub fn no_blank_sorted<'a, T: Numeric>(input: impl Into<Dataset<'a, T>>) -> Normalized<'a, T> {
    normalize(input.into(), true)
}

/// Remove blanks and make the buffer monotonic.
///
/// Like [`no_blank_sorted`], but a decreasing buffer is kept decreasing.
/// Check [`DataBuffer::sort_status`] on the result for the direction.
pub fn no_blank_monotonic<'a, T: Numeric>(input: impl Into<Dataset<'a, T>>) -> Normalized<'a, T> {
    normalize(input.into(), false)
}

fn normalize<'a, T: Numeric>(input: Dataset<'a, T>, increasing: bool) -> Normalized<'a, T> {
    match input {
        Dataset::Tile(tile) => {
            trace!(len = tile.len(), "materializing tile");
            let mut buf = tile.to_buffer();
            clean_and_order(&mut buf, increasing);
            Normalized::Owned(buf)
        }
        Dataset::Borrowed(buf) => {
            let status = is_sorted(buf.as_slice());
            let ordered = match status {
                SortStatus::Increasing => true,
                SortStatus::Decreasing => !increasing,
                SortStatus::Unsorted => false,
            };
            if ordered && !buf.blank_present() {
                trace!(len = buf.len(), ?status, "input already normalized");
                return Normalized::Borrowed(buf);
            }
            trace!(len = buf.len(), "copying input before normalizing");
            let mut copy = buf.clone();
            clean_and_order(&mut copy, increasing);
            Normalized::Owned(copy)
        }
        Dataset::InPlace(buf) => {
            clean_and_order(buf, increasing);
            Normalized::InPlace(buf)
        }
    }
}

fn clean_and_order<T: Numeric>(buf: &mut DataBuffer<T>, increasing: bool) {
    let removed = buf.remove_blanks();
    if removed > 0 {
        trace!(removed, remaining = buf.len(), "removed blanks");
    }

    let status = match is_sorted(buf.as_slice()) {
        SortStatus::Unsorted => {
            trace!(len = buf.len(), "sorting increasing");
            sort_increasing(buf.data_mut());
            SortStatus::Increasing
        }
        SortStatus::Decreasing if increasing => {
            trace!(len = buf.len(), "reversing decreasing input");
            buf.data_mut().reverse();
            SortStatus::Increasing
        }
        status => status,
    };
    buf.set_sort_status(status);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiled::TileView;

    #[test]
    fn test_is_sorted_classification() {
        assert_eq!(is_sorted::<i32>(&[]), SortStatus::Increasing);
        assert_eq!(is_sorted(&[7u8]), SortStatus::Increasing);
        assert_eq!(is_sorted(&[1, 2, 2, 5]), SortStatus::Increasing);
        assert_eq!(is_sorted(&[3, 3, 1]), SortStatus::Unsorted);
        assert_eq!(is_sorted(&[5.0, 4.0, 4.0, -1.0]), SortStatus::Decreasing);
        assert_eq!(is_sorted(&[1, 3, 2]), SortStatus::Unsorted);
        assert_eq!(is_sorted(&[3, 1, 2]), SortStatus::Unsorted);
    }

    #[test]
    fn test_sort_puts_nan_last() {
        let mut data = vec![3.0, f64::NAN, 1.0, 2.0];
        sort_increasing(&mut data);
        assert_eq!(&data[..3], &[1.0, 2.0, 3.0]);
        assert!(data[3].is_nan());

        let mut data = vec![3.0f32, f32::NAN, 1.0, 2.0];
        sort_decreasing(&mut data);
        assert_eq!(&data[..3], &[3.0, 2.0, 1.0]);
        assert!(data[3].is_nan());
    }

    #[test]
    fn test_borrowed_clean_input_is_not_copied() {
        let buf = DataBuffer::new(vec![1i32, 2, 3]);
        let norm = no_blank_sorted(&buf);
        assert!(matches!(norm, Normalized::Borrowed(_)));
        assert_eq!(norm.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_borrowed_input_is_never_mutated() {
        let buf = DataBuffer::new(vec![3u16, u16::MAX, 1, 2]);
        let norm = no_blank_sorted(&buf);
        assert!(norm.is_owned());
        assert_eq!(norm.as_slice(), &[1, 2, 3]);
        assert_eq!(norm.sort_status(), SortStatus::Increasing);
        assert!(!norm.has_blank());
        assert_eq!(buf.as_slice(), &[3, u16::MAX, 1, 2]);
    }

    #[test]
    fn test_in_place_updates_caller_buffer() {
        let mut buf = DataBuffer::new(vec![4.0f32, f32::NAN, 2.0, 9.0, f32::NAN]);
        {
            let norm = no_blank_sorted(&mut buf);
            assert!(matches!(norm, Normalized::InPlace(_)));
            assert_eq!(norm.len(), 3);
        }
        assert_eq!(buf.as_slice(), &[2.0, 4.0, 9.0]);
        assert_eq!(buf.sort_status(), SortStatus::Increasing);
        assert!(!buf.has_blank());
    }

    #[test]
    fn test_decreasing_input_is_reversed_for_canonical_order() {
        let buf = DataBuffer::new(vec![9i64, 5, 1]);
        assert_eq!(no_blank_sorted(&buf).as_slice(), &[1, 5, 9]);

        let mono = no_blank_monotonic(&buf);
        assert!(matches!(mono, Normalized::Borrowed(_)));
        assert_eq!(mono.as_slice(), &[9, 5, 1]);
    }

    #[test]
    fn test_tile_is_copied_and_normalized() {
        let block = vec![5u8, 255, 0, 0, 1, 3, 0, 0];
        let tile = TileView::new(&block, 0, 2, 2, 4).unwrap();
        let norm = no_blank_sorted(tile);
        assert!(norm.is_owned());
        assert_eq!(norm.as_slice(), &[1, 3, 5]);
        assert_eq!(block[1], 255);
    }

    #[test]
    fn test_sentinel_kept_when_flag_cleared() {
        let buf = DataBuffer::new(vec![255u8, 3]).with_blank_flag(false);
        assert_eq!(no_blank_sorted(&buf).as_slice(), &[3, 255]);
    }

    #[test]
    fn test_all_blank_normalizes_to_empty() {
        let buf = DataBuffer::new(vec![f64::NAN, f64::NAN]);
        let norm = no_blank_sorted(&buf);
        assert!(norm.is_empty());
        assert_eq!(norm.into_owned().into_vec(), Vec::<f64>::new());
    }
}
