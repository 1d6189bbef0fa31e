//! Owned row-major matrix storage.
//!
//! [`Matrix`] owns one contiguous buffer of `rows * cols` cells laid out row
//! by row. Rows are contiguous, so [`Matrix::row_mut`] hands out a live,
//! aliasing slice of the storage. Columns are strided, so [`Matrix::column`]
//! always returns a fresh copy.

use std::fmt;
use std::ops::{Index, IndexMut};

use matrix2d_traits::Element;

use crate::shape::{Point, Shape};
use crate::{MatrixError, Result};

/// An owned, row-major 2D matrix.
///
/// `Clone` is a deep copy with no aliasing to the source.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Matrix<T> {
    data: Vec<T>,
    shape: Shape,
}

// ============================================================================
// Construction
// ============================================================================

impl<T> Matrix<T> {
    /// Wrap a row-major buffer without copying.
    ///
    /// Fails with [`MatrixError::LengthMismatch`] if `data.len() != rows * cols`
    /// and with [`MatrixError::Overflow`] if an extent is not representable.
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        let shape = Shape::checked_for::<T>(rows as u64, cols as u64)?;
        if data.len() != shape.len() {
            return Err(MatrixError::LengthMismatch {
                expected: shape.len(),
                actual: data.len(),
            });
        }
        Ok(Self { data, shape })
    }

    /// Build from a list of rows, moving the elements.
    ///
    /// All rows must have the same length. An empty list gives the `(0, 0)` matrix.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((i, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(MatrixError::InvalidArgument(format!(
                "ragged rows: row 0 has {} columns, row {} has {}",
                cols,
                i,
                bad.len()
            )));
        }
        let shape = Shape::checked_for::<T>(rows.len() as u64, cols as u64)?;
        let data: Vec<T> = rows.into_iter().flatten().collect();
        Ok(Self { data, shape })
    }

    /// Build a matrix by evaluating `f(row, col)` in row-major order.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        let shape = Shape::checked_for::<T>(rows as u64, cols as u64)?;
        let mut data = Vec::with_capacity(shape.len());
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Ok(Self { data, shape })
    }

    /// The `(0, 0)` matrix.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            shape: Shape::EMPTY,
        }
    }

    pub(crate) fn from_parts(data: Vec<T>, shape: Shape) -> Self {
        debug_assert_eq!(data.len(), shape.len());
        Self { data, shape }
    }
}

impl<T: Element> Matrix<T> {
    /// A `rows x cols` matrix with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Result<Self> {
        let shape = Shape::checked_for::<T>(rows as u64, cols as u64)?;
        Ok(Self {
            data: vec![value; shape.len()],
            shape,
        })
    }

    /// A `rows x cols` matrix of zero values.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, T::default())
    }

    /// Square matrix with `values` on the main diagonal and zeros elsewhere.
    pub fn diagonal_lu2rd(values: Vec<T>) -> Result<Self> {
        Self::diagonal(Some(values), None)
    }

    /// Square matrix with `values` on the anti-diagonal and zeros elsewhere.
    pub fn diagonal_ru2ld(values: Vec<T>) -> Result<Self> {
        Self::diagonal(None, Some(values))
    }

    /// Square matrix with the given main and anti-diagonals.
    ///
    /// When both are given they must have the same length. On odd sizes the
    /// centre cell takes the anti-diagonal's value.
    pub fn diagonal(lu2rd: Option<Vec<T>>, ru2ld: Option<Vec<T>>) -> Result<Self> {
        let n = match (&lu2rd, &ru2ld) {
            (Some(a), Some(b)) if a.len() != b.len() => {
                return Err(MatrixError::LengthMismatch {
                    expected: a.len(),
                    actual: b.len(),
                })
            }
            (Some(a), _) => a.len(),
            (None, Some(b)) => b.len(),
            (None, None) => 0,
        };
        let mut m = Self::zeros(n, n)?;
        if let Some(values) = lu2rd {
            for (k, v) in values.into_iter().enumerate() {
                m.data[k * n + k] = v;
            }
        }
        if let Some(values) = ru2ld {
            for (k, v) in values.into_iter().enumerate() {
                m.data[k * n + (n - 1 - k)] = v;
            }
        }
        Ok(m)
    }
}

// ============================================================================
// Shape & raw storage
// ============================================================================

impl<T> Matrix<T> {
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.shape.cols()
    }

    /// Number of cells, computed in 64-bit.
    #[inline]
    pub fn count(&self) -> u64 {
        self.shape.count()
    }

    /// Number of cells as a buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.shape.is_square()
    }

    /// True iff `other` has exactly the same row and column extents.
    pub fn is_same_shape<U>(&self, other: &Matrix<U>) -> bool {
        self.shape.is_same(&other.shape)
    }

    /// Row-major view of every cell.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    /// Consume the matrix, returning its row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

// ============================================================================
// Cell access
// ============================================================================

impl<T> Matrix<T> {
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if self.shape.contains(row, col) {
            Some(&self.data[self.shape.offset(row, col)])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if self.shape.contains(row, col) {
            let k = self.shape.offset(row, col);
            Some(&mut self.data[k])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_point(&self, p: Point) -> Option<&T> {
        self.get(p.row, p.col)
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.shape.check_row(row)?;
        self.shape.check_col(col)?;
        let k = self.shape.offset(row, col);
        self.data[k] = value;
        Ok(())
    }

    pub fn set_point(&mut self, p: Point, value: T) -> Result<()> {
        self.set(p.row, p.col, value)
    }

    /// The cell above `(row, col)`, if any.
    pub fn up_of(&self, row: usize, col: usize) -> Option<&T> {
        row.checked_sub(1).and_then(|r| self.get(r, col))
    }

    pub fn down_of(&self, row: usize, col: usize) -> Option<&T> {
        row.checked_add(1).and_then(|r| self.get(r, col))
    }

    pub fn left_of(&self, row: usize, col: usize) -> Option<&T> {
        col.checked_sub(1).and_then(|c| self.get(row, c))
    }

    pub fn right_of(&self, row: usize, col: usize) -> Option<&T> {
        col.checked_add(1).and_then(|c| self.get(row, c))
    }

    /// Neighbours in the order up, right, down, left; `None` where the
    /// neighbour falls outside the matrix.
    pub fn adjacent4_points(&self, row: usize, col: usize) -> [Option<Point>; 4] {
        [
            self.offset_point(row, col, -1, 0),
            self.offset_point(row, col, 0, 1),
            self.offset_point(row, col, 1, 0),
            self.offset_point(row, col, 0, -1),
        ]
    }

    /// Neighbours clockwise from the upper-left corner: left-up, up, right-up,
    /// right, right-down, down, left-down, left.
    pub fn adjacent8_points(&self, row: usize, col: usize) -> [Option<Point>; 8] {
        [
            self.offset_point(row, col, -1, -1),
            self.offset_point(row, col, -1, 0),
            self.offset_point(row, col, -1, 1),
            self.offset_point(row, col, 0, 1),
            self.offset_point(row, col, 1, 1),
            self.offset_point(row, col, 1, 0),
            self.offset_point(row, col, 1, -1),
            self.offset_point(row, col, 0, -1),
        ]
    }

    fn offset_point(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<Point> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        self.shape.contains(r, c).then_some(Point::new(r, c))
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            self.shape.contains(row, col),
            "index ({row}, {col}) out of bounds for {} matrix",
            self.shape
        );
        &self.data[self.shape.offset(row, col)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            self.shape.contains(row, col),
            "index ({row}, {col}) out of bounds for {} matrix",
            self.shape
        );
        let k = self.shape.offset(row, col);
        &mut self.data[k]
    }
}

impl<T> Index<Point> for Matrix<T> {
    type Output = T;

    fn index(&self, p: Point) -> &T {
        &self[(p.row, p.col)]
    }
}

// ============================================================================
// Rows, columns, diagonals
// ============================================================================

impl<T> Matrix<T> {
    /// Row `i` of the storage.
    pub fn row(&self, i: usize) -> Result<&[T]> {
        self.shape.check_row(i)?;
        let start = i * self.cols();
        Ok(&self.data[start..start + self.cols()])
    }

    /// Live mutable access to row `i`: writes through the slice change the matrix.
    pub fn row_mut(&mut self, i: usize) -> Result<&mut [T]> {
        self.shape.check_row(i)?;
        let cols = self.cols();
        let start = i * cols;
        Ok(&mut self.data[start..start + cols])
    }

    pub fn update_row(&mut self, i: usize, mut f: impl FnMut(&T) -> T) -> Result<()> {
        for x in self.row_mut(i)? {
            *x = f(x);
        }
        Ok(())
    }

    pub fn update_column(&mut self, j: usize, mut f: impl FnMut(&T) -> T) -> Result<()> {
        self.shape.check_col(j)?;
        let cols = self.cols();
        for i in 0..self.rows() {
            let x = &mut self.data[i * cols + j];
            *x = f(x);
        }
        Ok(())
    }

    /// Reverse the order of cells within every row, in place.
    pub fn reverse_h(&mut self) {
        let cols = self.cols();
        if cols == 0 {
            return;
        }
        for row in self.data.chunks_exact_mut(cols) {
            row.reverse();
        }
    }

    /// Reverse the order of rows, in place.
    pub fn reverse_v(&mut self) {
        let (rows, cols) = (self.rows(), self.cols());
        for i in 0..rows / 2 {
            let (head, tail) = self.data.split_at_mut((rows - 1 - i) * cols);
            head[i * cols..(i + 1) * cols].swap_with_slice(&mut tail[..cols]);
        }
    }
}

impl<T: Clone> Matrix<T> {
    /// A fresh copy of column `j`. Never aliases the storage.
    pub fn column(&self, j: usize) -> Result<Vec<T>> {
        self.shape.check_col(j)?;
        let cols = self.cols();
        Ok((0..self.rows())
            .map(|i| self.data[i * cols + j].clone())
            .collect())
    }

    pub fn set_row(&mut self, i: usize, values: &[T]) -> Result<()> {
        self.shape.check_row(i)?;
        check_len(self.cols(), values.len())?;
        self.row_mut(i)?.clone_from_slice(values);
        Ok(())
    }

    pub fn set_column(&mut self, j: usize, values: &[T]) -> Result<()> {
        self.shape.check_col(j)?;
        check_len(self.rows(), values.len())?;
        let cols = self.cols();
        for (i, v) in values.iter().enumerate() {
            self.data[i * cols + j] = v.clone();
        }
        Ok(())
    }

    /// Copy of the main diagonal (upper-left to lower-right).
    pub fn get_lu2rd(&self) -> Result<Vec<T>> {
        self.shape.check_square()?;
        let n = self.rows();
        Ok((0..n).map(|k| self.data[k * n + k].clone()).collect())
    }

    /// Overwrite the main diagonal. `values` must hold at least `rows()` cells;
    /// any surplus is ignored.
    pub fn set_lu2rd(&mut self, values: &[T]) -> Result<()> {
        self.shape.check_square()?;
        let n = self.rows();
        check_min_len(n, values.len())?;
        for (k, v) in values.iter().take(n).enumerate() {
            self.data[k * n + k] = v.clone();
        }
        Ok(())
    }

    pub fn update_lu2rd(&mut self, mut f: impl FnMut(&T) -> T) -> Result<()> {
        self.shape.check_square()?;
        let n = self.rows();
        for k in 0..n {
            let x = &mut self.data[k * n + k];
            *x = f(x);
        }
        Ok(())
    }

    /// Copy of the anti-diagonal (upper-right to lower-left).
    pub fn get_ru2ld(&self) -> Result<Vec<T>> {
        self.shape.check_square()?;
        let n = self.rows();
        Ok((0..n).map(|k| self.data[k * n + n - 1 - k].clone()).collect())
    }

    pub fn set_ru2ld(&mut self, values: &[T]) -> Result<()> {
        self.shape.check_square()?;
        let n = self.rows();
        check_min_len(n, values.len())?;
        for (k, v) in values.iter().take(n).enumerate() {
            self.data[k * n + n - 1 - k] = v.clone();
        }
        Ok(())
    }

    pub fn update_ru2ld(&mut self, mut f: impl FnMut(&T) -> T) -> Result<()> {
        self.shape.check_square()?;
        let n = self.rows();
        for k in 0..n {
            let x = &mut self.data[k * n + n - 1 - k];
            *x = f(x);
        }
        Ok(())
    }
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(MatrixError::LengthMismatch { expected, actual })
    }
}

fn check_min_len(expected: usize, actual: usize) -> Result<()> {
    if actual >= expected {
        Ok(())
    } else {
        Err(MatrixError::LengthMismatch { expected, actual })
    }
}

// ============================================================================
// Fill, copy, stack, flip
// ============================================================================

impl<T: Clone> Matrix<T> {
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Copy `block` into this matrix with its upper-left corner at
    /// `(from_row, from_col)`. Cells of `block` that fall outside are dropped.
    pub fn fill_from(&mut self, from_row: usize, from_col: usize, block: &Matrix<T>) -> Result<()> {
        self.shape.check_rows(from_row, self.rows())?;
        self.shape.check_cols(from_col, self.cols())?;
        let n_rows = block.rows().min(self.rows() - from_row);
        let n_cols = block.cols().min(self.cols() - from_col);
        for i in 0..n_rows {
            let dst = self.shape.offset(from_row + i, from_col);
            let src = block.shape.offset(i, 0);
            self.data[dst..dst + n_cols].clone_from_slice(&block.data[src..src + n_cols]);
        }
        Ok(())
    }

    /// Deep copy. Same as `clone()`.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Deep copy of rows `from_row..to_row`.
    pub fn copy_rows(&self, from_row: usize, to_row: usize) -> Result<Self> {
        self.shape.check_rows(from_row, to_row)?;
        let cols = self.cols();
        let data = self.data[from_row * cols..to_row * cols].to_vec();
        Ok(Self::from_parts(data, Shape::new(to_row - from_row, cols)))
    }

    /// Deep copy of the sub-rectangle `from_row..to_row` x `from_col..to_col`.
    pub fn copy_range(
        &self,
        from_row: usize,
        to_row: usize,
        from_col: usize,
        to_col: usize,
    ) -> Result<Self> {
        self.shape.check_rows(from_row, to_row)?;
        self.shape.check_cols(from_col, to_col)?;
        let shape = Shape::new(to_row - from_row, to_col - from_col);
        let mut data = Vec::with_capacity(shape.len());
        for i in from_row..to_row {
            let start = self.shape.offset(i, 0);
            data.extend_from_slice(&self.data[start + from_col..start + to_col]);
        }
        Ok(Self::from_parts(data, shape))
    }

    /// All cells in row-major order.
    pub fn flatten(&self) -> Vec<T> {
        self.data.clone()
    }

    /// Stack `other` below `self`. Column counts must match.
    pub fn vstack(&self, other: &Matrix<T>) -> Result<Self> {
        if self.cols() != other.cols() {
            return Err(MatrixError::ShapeMismatch {
                op: "vstack",
                left: self.shape,
                right: other.shape,
            });
        }
        let shape = Shape::checked_for::<T>(
            self.rows() as u64 + other.rows() as u64,
            self.cols() as u64,
        )?;
        let mut data = Vec::with_capacity(shape.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        Ok(Self::from_parts(data, shape))
    }

    /// Place `other` to the right of `self`. Row counts must match.
    pub fn hstack(&self, other: &Matrix<T>) -> Result<Self> {
        if self.rows() != other.rows() {
            return Err(MatrixError::ShapeMismatch {
                op: "hstack",
                left: self.shape,
                right: other.shape,
            });
        }
        let shape = Shape::checked_for::<T>(
            self.rows() as u64,
            self.cols() as u64 + other.cols() as u64,
        )?;
        let mut data = Vec::with_capacity(shape.len());
        for i in 0..self.rows() {
            let a = self.shape.offset(i, 0);
            let b = other.shape.offset(i, 0);
            data.extend_from_slice(&self.data[a..a + self.cols()]);
            data.extend_from_slice(&other.data[b..b + other.cols()]);
        }
        Ok(Self::from_parts(data, shape))
    }

    /// Copy with every row reversed.
    pub fn flip_h(&self) -> Self {
        let mut m = self.clone();
        m.reverse_h();
        m
    }

    /// Copy with the row order reversed.
    pub fn flip_v(&self) -> Self {
        let mut m = self.clone();
        m.reverse_v();
        m
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for i in 0..self.rows() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("[")?;
            for j in 0..self.cols() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", self.data[self.shape.offset(i, j)])?;
            }
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}
