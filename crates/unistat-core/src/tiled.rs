//! Tile views and the input forms accepted by every statistic
//!
//! A tile is a rectangular window into a row-major block. Statistics never
//! modify a tile: when ordering is needed its values are first gathered into
//! a private [`DataBuffer`].

use crate::buffer::DataBuffer;
use crate::error::{Error, Result};
use crate::numeric::Numeric;

/// A rectangular, read-only window into a row-major block
#[derive(Debug, Clone, Copy)]
pub struct TileView<'a, T: Numeric> {
    block: &'a [T],
    offset: usize,
    width: usize,
    height: usize,
    stride: usize,
    has_blank: bool,
}

impl<'a, T: Numeric> TileView<'a, T> {
    /// Create a view of `height` rows of `width` elements, starting at
    /// `offset` and advancing `stride` elements per row.
    pub fn new(
        block: &'a [T],
        offset: usize,
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<Self> {
        if width > stride && height > 1 {
            return Err(Error::InvalidInput(format!(
                "tile width {width} exceeds row stride {stride}"
            )));
        }
        if width > 0 && height > 0 {
            let last = (height - 1)
                .checked_mul(stride)
                .and_then(|rows| rows.checked_add(offset))
                .and_then(|start| start.checked_add(width));
            match last {
                Some(end) if end <= block.len() => {}
                _ => {
                    return Err(Error::InvalidInput(format!(
                        "tile {width}x{height} at offset {offset} (stride {stride}) \
                         does not fit in a block of {} elements",
                        block.len()
                    )))
                }
            }
        }
        Ok(Self {
            block,
            offset,
            width,
            height,
            stride,
            has_blank: true,
        })
    }

    /// Set whether blank markers may appear
    pub fn with_blank_flag(mut self, has_blank: bool) -> Self {
        self.has_blank = has_blank;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn has_blank(&self) -> bool {
        self.has_blank
    }

    /// Number of elements covered by the tile
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the covered elements in row-major order
    pub fn iter(&self) -> TileValues<'a, T> {
        TileValues {
            block: self.block,
            offset: self.offset,
            width: self.width,
            height: self.height,
            stride: self.stride,
            row: 0,
            col: 0,
        }
    }

    /// Gather the covered elements into a contiguous private buffer
    pub fn to_buffer(&self) -> DataBuffer<T> {
        DataBuffer::new(self.iter().collect()).with_blank_flag(self.has_blank)
    }
}

/// Row-major iterator over a [`TileView`]
#[derive(Debug, Clone)]
pub struct TileValues<'a, T> {
    block: &'a [T],
    offset: usize,
    width: usize,
    height: usize,
    stride: usize,
    row: usize,
    col: usize,
}

impl<'a, T: Copy> Iterator for TileValues<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.width == 0 || self.row >= self.height {
            return None;
        }
        let value = self.block[self.offset + self.row * self.stride + self.col];
        self.col += 1;
        if self.col == self.width {
            self.col = 0;
            self.row += 1;
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.width == 0 || self.row >= self.height {
            0
        } else {
            (self.height - self.row) * self.width - self.col
        };
        (remaining, Some(remaining))
    }
}

impl<'a, T: Copy> ExactSizeIterator for TileValues<'a, T> {}

/// Input to a statistic.
///
/// `InPlace` grants permission to reorder and compact the caller's buffer,
/// `Borrowed` never mutates, and a `Tile` is always read-only.
#[derive(Debug)]
pub enum Dataset<'a, T: Numeric> {
    Borrowed(&'a DataBuffer<T>),
    InPlace(&'a mut DataBuffer<T>),
    Tile(TileView<'a, T>),
}

impl<'a, T: Numeric> Dataset<'a, T> {
    pub fn has_blank(&self) -> bool {
        match self {
            Self::Borrowed(buf) => buf.has_blank(),
            Self::InPlace(buf) => buf.has_blank(),
            Self::Tile(tile) => tile.has_blank(),
        }
    }

    /// Number of elements including blanks
    pub fn len(&self) -> usize {
        match self {
            Self::Borrowed(buf) => buf.len(),
            Self::InPlace(buf) => buf.len(),
            Self::Tile(tile) => tile.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the usable (non-blank) values without modifying anything
    pub fn values(&self) -> Box<dyn Iterator<Item = T> + '_> {
        let has_blank = self.has_blank();
        match self {
            Self::Borrowed(buf) => Box::new(
                buf.as_slice()
                    .iter()
                    .copied()
                    .filter(move |v| !v.is_blank_given(has_blank)),
            ),
            Self::InPlace(buf) => Box::new(
                buf.as_slice()
                    .iter()
                    .copied()
                    .filter(move |v| !v.is_blank_given(has_blank)),
            ),
            Self::Tile(tile) => Box::new(tile.iter().filter(move |v| !v.is_blank_given(has_blank))),
        }
    }
}

impl<'a, T: Numeric> From<&'a DataBuffer<T>> for Dataset<'a, T> {
    fn from(buf: &'a DataBuffer<T>) -> Self {
        Self::Borrowed(buf)
    }
}

impl<'a, T: Numeric> From<&'a mut DataBuffer<T>> for Dataset<'a, T> {
    fn from(buf: &'a mut DataBuffer<T>) -> Self {
        Self::InPlace(buf)
    }
}

impl<'a, T: Numeric> From<TileView<'a, T>> for Dataset<'a, T> {
    fn from(tile: TileView<'a, T>) -> Self {
        Self::Tile(tile)
    }
}
