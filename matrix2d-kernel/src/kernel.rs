//! Iteration rectangles and the shape-compatibility check.

use crate::{Matrix, MatrixError, Result, Shape};

/// A half-open `rows x cols` iteration rectangle.
///
/// Only obtainable through [`Rect::full`] and [`Rect::within`], so both
/// ranges are always ordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    row_from: usize,
    row_to: usize,
    col_from: usize,
    col_to: usize,
}

impl Rect {
    /// Every cell of `shape`.
    pub fn full(shape: Shape) -> Self {
        Self {
            row_from: 0,
            row_to: shape.rows(),
            col_from: 0,
            col_to: shape.cols(),
        }
    }

    /// The sub-rectangle `from_row..to_row` x `from_col..to_col` of `shape`.
    ///
    /// Fails with [`MatrixError::RangeOutOfBounds`] on reversed or
    /// out-of-bound ranges.
    pub fn within(
        shape: Shape,
        from_row: usize,
        to_row: usize,
        from_col: usize,
        to_col: usize,
    ) -> Result<Self> {
        shape.check_rows(from_row, to_row)?;
        shape.check_cols(from_col, to_col)?;
        Ok(Self {
            row_from: from_row,
            row_to: to_row,
            col_from: from_col,
            col_to: to_col,
        })
    }

    #[inline]
    pub fn row_from(&self) -> usize {
        self.row_from
    }

    #[inline]
    pub fn row_to(&self) -> usize {
        self.row_to
    }

    #[inline]
    pub fn col_from(&self) -> usize {
        self.col_from
    }

    #[inline]
    pub fn col_to(&self) -> usize {
        self.col_to
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.row_to - self.row_from
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.col_to - self.col_from
    }

    #[inline]
    pub fn volume(&self) -> u64 {
        self.rows() as u64 * self.cols() as u64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    /// Halve along the longer axis (rows on a tie). `None` if neither axis
    /// can be split.
    pub(crate) fn split(&self) -> Option<(Rect, Rect)> {
        if self.rows() >= self.cols() && self.rows() > 1 {
            let mid = self.row_from + self.rows() / 2;
            Some((
                Rect {
                    row_to: mid,
                    ..*self
                },
                Rect {
                    row_from: mid,
                    ..*self
                },
            ))
        } else if self.cols() > 1 {
            let mid = self.col_from + self.cols() / 2;
            Some((
                Rect {
                    col_to: mid,
                    ..*self
                },
                Rect {
                    col_from: mid,
                    ..*self
                },
            ))
        } else {
            None
        }
    }

    /// Row-major sequential sweep.
    #[inline]
    pub(crate) fn for_each_cell(&self, op: &impl Fn(usize, usize)) {
        for i in self.row_from..self.row_to {
            for j in self.col_from..self.col_to {
                op(i, j);
            }
        }
    }
}

/// Fail with [`MatrixError::ShapeMismatch`] naming `op` unless `a` and `b`
/// have identical extents.
pub fn ensure_same_shape<A, B>(op: &'static str, a: &Matrix<A>, b: &Matrix<B>) -> Result<()> {
    if a.is_same_shape(b) {
        Ok(())
    } else {
        Err(MatrixError::ShapeMismatch {
            op,
            left: a.shape(),
            right: b.shape(),
        })
    }
}
