//! Matrix extents and cell coordinates.

use std::fmt;

use crate::{MatrixError, Result};

/// Largest row or column extent a matrix may have.
///
/// Derived extents (reshape, repeat, extend) are checked against this before
/// anything is allocated.
pub const MAX_EXTENT: usize = i32::MAX as usize;

/// Which axis an index or range refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// A cell coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Point {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Row and column extents of a matrix.
///
/// A shape is immutable; every shape-changing operation produces a new one.
/// `count() == 0` exactly when either extent is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
}

impl Shape {
    /// The canonical empty shape `(0, 0)`.
    pub const EMPTY: Shape = Shape { rows: 0, cols: 0 };

    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Build a shape from 64-bit extents, failing with
    /// [`MatrixError::Overflow`] if either extent exceeds [`MAX_EXTENT`]
    /// or the cell count does not fit in `usize`.
    pub fn checked(rows: u64, cols: u64) -> Result<Self> {
        let overflow = MatrixError::Overflow { rows, cols };
        if rows > MAX_EXTENT as u64 || cols > MAX_EXTENT as u64 {
            return Err(overflow);
        }
        let count = rows.checked_mul(cols).ok_or_else(|| overflow.clone())?;
        usize::try_from(count).map_err(|_| overflow)?;
        Ok(Self {
            rows: rows as usize,
            cols: cols as usize,
        })
    }

    /// [`Shape::checked`], additionally failing with [`MatrixError::Overflow`]
    /// when a buffer of `T` for every cell would exceed `isize::MAX` bytes.
    pub fn checked_for<T>(rows: u64, cols: u64) -> Result<Self> {
        Self::checked(rows, cols)?.fits::<T>()
    }

    /// `self` if a buffer of `T` for every cell is allocatable.
    pub fn fits<T>(self) -> Result<Self> {
        let bytes = self.count().checked_mul(std::mem::size_of::<T>() as u64);
        match bytes {
            Some(b) if b <= isize::MAX as u64 => Ok(self),
            _ => Err(MatrixError::Overflow {
                rows: self.rows as u64,
                cols: self.cols as u64,
            }),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, computed in 64-bit.
    #[inline]
    pub fn count(&self) -> u64 {
        self.rows as u64 * self.cols as u64
    }

    /// Total number of cells as a buffer length.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// True iff both extents match exactly.
    #[inline]
    pub fn is_same(&self, other: &Shape) -> bool {
        self == other
    }

    /// The shape with rows and columns swapped.
    pub fn transposed(&self) -> Shape {
        Shape::new(self.cols, self.rows)
    }

    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Linear row-major offset of `(row, col)`. Does not bounds-check.
    #[inline]
    pub(crate) fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub(crate) fn check_row(&self, index: usize) -> Result<()> {
        check_index(Axis::Row, index, self.rows)
    }

    pub(crate) fn check_col(&self, index: usize) -> Result<()> {
        check_index(Axis::Column, index, self.cols)
    }

    /// Fails with [`MatrixError::RangeOutOfBounds`] unless
    /// `from <= to <= self.rows()`.
    pub fn check_rows(&self, from: usize, to: usize) -> Result<()> {
        check_range(Axis::Row, from, to, self.rows)
    }

    /// Column counterpart of [`Shape::check_rows`].
    pub fn check_cols(&self, from: usize, to: usize) -> Result<()> {
        check_range(Axis::Column, from, to, self.cols)
    }

    pub(crate) fn check_square(&self) -> Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(MatrixError::NonSquare {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

fn check_index(axis: Axis, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(MatrixError::IndexOutOfBounds { axis, index, len })
    }
}

fn check_range(axis: Axis, from: usize, to: usize, len: usize) -> Result<()> {
    if from <= to && to <= len {
        Ok(())
    } else {
        Err(MatrixError::RangeOutOfBounds {
            axis,
            from,
            to,
            len,
        })
    }
}
