//! Index-space transformations.
//!
//! Each [`IndexTransform`] is a pure description: given a source [`Shape`] it
//! derives the destination shape ([`IndexTransform::output_shape`]) and, for
//! every destination cell, the source cell it reads from
//! ([`IndexTransform::source_index`]) or `None` when the cell is padding.
//! [`Matrix::transform`] is the single place that copies elements.

use matrix2d_traits::Element;

use crate::matrix::Matrix;
use crate::shape::{Shape, MAX_EXTENT};
use crate::{MatrixError, Result};

/// A source → destination index mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexTransform {
    /// `dst[j][i] = src[i][j]`.
    Transpose,
    /// Quarter turn clockwise: `dst[i][j] = src[rows-1-j][i]`.
    Rotate90,
    /// Half turn: `dst[i][j] = src[rows-1-i][cols-1-j]`.
    Rotate180,
    /// Quarter turn counter-clockwise: `dst[i][j] = src[j][cols-1-i]`.
    Rotate270,
    /// Redistribute the row-major cell sequence into `rows x cols`,
    /// padding or truncating at the end.
    Reshape { rows: usize, cols: usize },
    /// A `rows x cols` destination with the source anchored at `(top, left)`.
    Extend {
        rows: usize,
        cols: usize,
        top: usize,
        left: usize,
    },
    /// Every source cell becomes a `row_factor x col_factor` block.
    RepeatElement { row_factor: usize, col_factor: usize },
    /// The whole source tiled `row_factor x col_factor` times.
    RepeatTile { row_factor: usize, col_factor: usize },
}

impl IndexTransform {
    /// Destination shape for a source of shape `src`.
    ///
    /// Fails with [`MatrixError::InvalidArgument`] on a zero repeat factor and
    /// with [`MatrixError::Overflow`] when the destination is not representable.
    pub fn output_shape(&self, src: Shape) -> Result<Shape> {
        match *self {
            IndexTransform::Transpose | IndexTransform::Rotate90 | IndexTransform::Rotate270 => {
                Ok(src.transposed())
            }
            IndexTransform::Rotate180 => Ok(src),
            IndexTransform::Reshape { rows, cols } => {
                let count = (rows as u64).checked_mul(cols as u64);
                if count.map_or(true, |c| c > MAX_EXTENT as u64) {
                    return Err(MatrixError::Overflow {
                        rows: rows as u64,
                        cols: cols as u64,
                    });
                }
                Shape::checked(rows as u64, cols as u64)
            }
            IndexTransform::Extend { rows, cols, .. } => Shape::checked(rows as u64, cols as u64),
            IndexTransform::RepeatElement {
                row_factor,
                col_factor,
            }
            | IndexTransform::RepeatTile {
                row_factor,
                col_factor,
            } => {
                if row_factor == 0 || col_factor == 0 {
                    return Err(MatrixError::InvalidArgument(format!(
                        "repeat factors must be positive, got {row_factor}x{col_factor}"
                    )));
                }
                Shape::checked(
                    (src.rows() as u64).saturating_mul(row_factor as u64),
                    (src.cols() as u64).saturating_mul(col_factor as u64),
                )
            }
        }
    }

    /// The source cell that destination cell `(i, j)` copies, or `None` if the
    /// cell is filled instead. `src` is the source shape.
    #[inline]
    pub fn source_index(&self, src: Shape, i: usize, j: usize) -> Option<(usize, usize)> {
        let (rows, cols) = (src.rows(), src.cols());
        match *self {
            IndexTransform::Transpose => Some((j, i)),
            IndexTransform::Rotate90 => Some((rows - 1 - j, i)),
            IndexTransform::Rotate180 => Some((rows - 1 - i, cols - 1 - j)),
            IndexTransform::Rotate270 => Some((j, cols - 1 - i)),
            IndexTransform::Reshape { cols: new_cols, .. } => {
                let k = i * new_cols + j;
                (k < src.len()).then(|| (k / cols, k % cols))
            }
            IndexTransform::Extend { top, left, .. } => {
                let si = i.checked_sub(top)?;
                let sj = j.checked_sub(left)?;
                src.contains(si, sj).then_some((si, sj))
            }
            IndexTransform::RepeatElement {
                row_factor,
                col_factor,
            } => Some((i / row_factor, j / col_factor)),
            IndexTransform::RepeatTile { .. } => Some((i % rows, j % cols)),
        }
    }

    /// True if every destination cell has a source cell and the mapping is a
    /// permutation of the source.
    fn is_permutation(&self) -> bool {
        matches!(
            self,
            IndexTransform::Transpose
                | IndexTransform::Rotate90
                | IndexTransform::Rotate180
                | IndexTransform::Rotate270
        )
    }
}

// ============================================================================
// Materialization
// ============================================================================

impl<T: Element> Matrix<T> {
    /// Apply `t`, filling unmapped destination cells with the zero value.
    pub fn transform(&self, t: IndexTransform) -> Result<Matrix<T>> {
        self.transform_with(t, T::default())
    }

    /// Apply `t`, filling unmapped destination cells with `fill`.
    pub fn transform_with(&self, t: IndexTransform, fill: T) -> Result<Matrix<T>> {
        let dst = t.output_shape(self.shape())?.fits::<T>()?;
        Ok(self.materialize(t, dst, fill))
    }

    fn materialize(&self, t: IndexTransform, dst: Shape, fill: T) -> Matrix<T> {
        let src = self.shape();
        let data = self.as_slice();

        if t == IndexTransform::Rotate180 {
            let mut out = data.to_vec();
            out.reverse();
            return Matrix::from_parts(out, dst);
        }

        if t.is_permutation() && src.rows() > src.cols() {
            // Tall source: walk the destination column by column so reads
            // stay within one source row.
            let mut out = vec![fill; dst.len()];
            for j in 0..dst.cols() {
                for i in 0..dst.rows() {
                    if let Some((si, sj)) = t.source_index(src, i, j) {
                        out[dst.offset(i, j)] = data[src.offset(si, sj)].clone();
                    }
                }
            }
            return Matrix::from_parts(out, dst);
        }

        let mut out = Vec::with_capacity(dst.len());
        for i in 0..dst.rows() {
            for j in 0..dst.cols() {
                out.push(match t.source_index(src, i, j) {
                    Some((si, sj)) => data[src.offset(si, sj)].clone(),
                    None => fill.clone(),
                });
            }
        }
        Matrix::from_parts(out, dst)
    }

    pub fn transpose(&self) -> Matrix<T> {
        let dst = self.shape().transposed();
        self.materialize(IndexTransform::Transpose, dst, T::default())
    }

    /// Rotate a quarter turn clockwise.
    pub fn rotate90(&self) -> Matrix<T> {
        let dst = self.shape().transposed();
        self.materialize(IndexTransform::Rotate90, dst, T::default())
    }

    pub fn rotate180(&self) -> Matrix<T> {
        self.materialize(IndexTransform::Rotate180, self.shape(), T::default())
    }

    /// Rotate a quarter turn counter-clockwise.
    pub fn rotate270(&self) -> Matrix<T> {
        let dst = self.shape().transposed();
        self.materialize(IndexTransform::Rotate270, dst, T::default())
    }

    /// Reinterpret the row-major cells as `rows x cols`. Extra destination
    /// cells are zero; surplus source cells are dropped.
    pub fn reshape(&self, rows: usize, cols: usize) -> Result<Matrix<T>> {
        self.transform(IndexTransform::Reshape { rows, cols })
    }

    /// Reshape to `cols` columns and as many rows as needed to hold every cell.
    pub fn reshape_cols(&self, cols: usize) -> Result<Matrix<T>> {
        if cols == 0 {
            return Err(MatrixError::InvalidArgument(
                "reshape column count must be positive".to_string(),
            ));
        }
        let rows = self.count().div_ceil(cols as u64);
        let rows = usize::try_from(rows).map_err(|_| MatrixError::Overflow {
            rows,
            cols: cols as u64,
        })?;
        self.reshape(rows, cols)
    }

    /// Resize to `rows x cols`, keeping the original content at the top-left.
    ///
    /// When both extents shrink (or stay) this is a sub-range copy.
    pub fn extend(&self, rows: usize, cols: usize) -> Result<Matrix<T>> {
        self.extend_with(rows, cols, T::default())
    }

    pub fn extend_with(&self, rows: usize, cols: usize, fill: T) -> Result<Matrix<T>> {
        if rows <= self.rows() && cols <= self.cols() {
            return self.copy_range(0, rows, 0, cols);
        }
        self.transform_with(
            IndexTransform::Extend {
                rows,
                cols,
                top: 0,
                left: 0,
            },
            fill,
        )
    }

    /// Add `up`, `down`, `left`, `right` zero-filled margins.
    pub fn extend_margins(
        &self,
        up: usize,
        down: usize,
        left: usize,
        right: usize,
    ) -> Result<Matrix<T>> {
        self.extend_margins_with(up, down, left, right, T::default())
    }

    pub fn extend_margins_with(
        &self,
        up: usize,
        down: usize,
        left: usize,
        right: usize,
        fill: T,
    ) -> Result<Matrix<T>> {
        let rows = (self.rows() as u64)
            .saturating_add(up as u64)
            .saturating_add(down as u64);
        let cols = (self.cols() as u64)
            .saturating_add(left as u64)
            .saturating_add(right as u64);
        let dst = Shape::checked_for::<T>(rows, cols)?;
        if up == 0 && down == 0 && left == 0 && right == 0 {
            return Ok(self.clone());
        }
        self.transform_with(
            IndexTransform::Extend {
                rows: dst.rows(),
                cols: dst.cols(),
                top: up,
                left,
            },
            fill,
        )
    }

    /// Repeat each cell as a `row_factor x col_factor` block.
    pub fn repelem(&self, row_factor: usize, col_factor: usize) -> Result<Matrix<T>> {
        self.transform(IndexTransform::RepeatElement {
            row_factor,
            col_factor,
        })
    }

    /// Tile the whole matrix `row_factor x col_factor` times.
    pub fn repmat(&self, row_factor: usize, col_factor: usize) -> Result<Matrix<T>> {
        self.transform(IndexTransform::RepeatTile {
            row_factor,
            col_factor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use approx::assert_relative_eq;

    fn m23() -> Matrix<i32> {
        Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap()
    }

    #[test]
    fn test_transpose() {
        let t = m23().transpose();
        assert_eq!(t.shape(), Shape::new(3, 2));
        assert_eq!(t.as_slice(), &[1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn test_transpose_tall_source() {
        let m = Matrix::from_fn(5, 2, |i, j| (i * 10 + j) as i64).unwrap();
        let t = m.transpose();
        assert_eq!(t.shape(), Shape::new(2, 5));
        for i in 0..5 {
            for j in 0..2 {
                assert_eq!(t[(j, i)], m[(i, j)]);
            }
        }
    }

    #[test]
    fn test_rotations() {
        let m = m23();
        assert_eq!(m.rotate90().as_slice(), &[4, 1, 5, 2, 6, 3]);
        assert_eq!(m.rotate180().as_slice(), &[6, 5, 4, 3, 2, 1]);
        let r = m.rotate270();
        assert_eq!(r.shape(), Shape::new(3, 2));
        assert_eq!(r.as_slice(), &[3, 6, 2, 5, 1, 4]);
    }

    #[test]
    fn test_rotate_tall_matches_formula() {
        let m = Matrix::from_fn(4, 3, |i, j| i * 3 + j).unwrap();
        let r90 = m.rotate90();
        let r270 = m.rotate270();
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(r90[(i, j)], m[(4 - 1 - j, i)]);
                assert_eq!(r270[(i, j)], m[(j, 3 - 1 - i)]);
            }
        }
    }

    #[test]
    fn test_rotate_empty() {
        let e = Matrix::<u8>::empty();
        assert_eq!(e.rotate90(), e);
        assert_eq!(e.transpose(), e);
        let z = Matrix::<u8>::from_vec(vec![], 0, 3).unwrap();
        assert_eq!(z.rotate90().shape(), Shape::new(3, 0));
    }

    #[test]
    fn test_reshape() {
        let m = m23();
        assert_eq!(m.reshape(3, 2).unwrap().as_slice(), &[1, 2, 3, 4, 5, 6]);
        let grown = m.reshape(2, 4).unwrap();
        assert_eq!(grown.as_slice(), &[1, 2, 3, 4, 5, 6, 0, 0]);
        let shrunk = m.reshape(1, 4).unwrap();
        assert_eq!(shrunk.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(m.reshape(2, 3).unwrap(), m);
    }

    #[test]
    fn test_reshape_floats_pad_with_zero() {
        let m = Matrix::from_vec(vec![0.5f64, 1.5], 1, 2).unwrap();
        let r = m.reshape(2, 2).unwrap();
        assert_relative_eq!(r[(0, 1)], 1.5);
        assert_relative_eq!(r[(1, 1)], 0.0);
    }

    #[test]
    fn test_reshape_overflow() {
        let m = m23();
        let err = m.reshape(1 << 16, 1 << 16).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
        let err = m.reshape(usize::MAX, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
    }

    #[test]
    fn test_reshape_cols() {
        let m = m23();
        let r = m.reshape_cols(4).unwrap();
        assert_eq!(r.shape(), Shape::new(2, 4));
        assert_eq!(r.as_slice(), &[1, 2, 3, 4, 5, 6, 0, 0]);
        assert_eq!(m.reshape_cols(3).unwrap(), m);
        assert_eq!(m.reshape_cols(0).unwrap_err().kind(), ErrorKind::Argument);
    }

    #[test]
    fn test_extend_grow_and_shrink() {
        let m = m23();
        let g = m.extend(3, 4).unwrap();
        assert_eq!(g.as_slice(), &[1, 2, 3, 0, 4, 5, 6, 0, 0, 0, 0, 0]);
        let s = m.extend(1, 2).unwrap();
        assert_eq!(s.as_slice(), &[1, 2]);
        let mixed = m.extend_with(3, 2, 9).unwrap();
        assert_eq!(mixed.as_slice(), &[1, 2, 4, 5, 9, 9]);
    }

    #[test]
    fn test_extend_margins() {
        let m = Matrix::from_rows(vec![vec![1, 2]]).unwrap();
        let e = m.extend_margins_with(1, 0, 1, 1, -1).unwrap();
        assert_eq!(e.shape(), Shape::new(2, 4));
        assert_eq!(e.as_slice(), &[-1, -1, -1, -1, -1, 1, 2, -1]);
        assert_eq!(m.extend_margins(0, 0, 0, 0).unwrap(), m);
        let err = m.extend_margins(usize::MAX, 0, 0, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
    }

    #[test]
    fn test_repelem() {
        let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let r = m.repelem(2, 3).unwrap();
        assert_eq!(r.shape(), Shape::new(4, 6));
        for i in 0..2 {
            for j in 0..2 {
                for bi in 0..2 {
                    for bj in 0..3 {
                        assert_eq!(r[(i * 2 + bi, j * 3 + bj)], m[(i, j)]);
                    }
                }
            }
        }
    }

    #[test]
    fn test_repmat() {
        let m = Matrix::from_rows(vec![vec![1, 2]]).unwrap();
        let r = m.repmat(2, 2).unwrap();
        assert_eq!(r.as_slice(), &[1, 2, 1, 2, 1, 2, 1, 2]);
    }

    #[test]
    fn test_repeat_errors() {
        let m = m23();
        assert_eq!(m.repelem(0, 1).unwrap_err().kind(), ErrorKind::Argument);
        assert_eq!(m.repmat(1, 0).unwrap_err().kind(), ErrorKind::Argument);
        let err = m.repmat(MAX_EXTENT, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
    }

    #[test]
    fn test_repeat_too_large_to_allocate() {
        let one = Matrix::<i32>::filled(1, 1, 7).unwrap();
        let err = one.repelem(MAX_EXTENT, MAX_EXTENT).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
        let err = one.repmat(MAX_EXTENT, MAX_EXTENT).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
        let err = one.extend(MAX_EXTENT, MAX_EXTENT).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
        let err = one.extend_margins(MAX_EXTENT - 1, 0, MAX_EXTENT - 1, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
    }

    #[test]
    fn test_source_index_reports_padding() {
        let t = IndexTransform::Extend {
            rows: 3,
            cols: 3,
            top: 1,
            left: 1,
        };
        let src = Shape::new(1, 1);
        assert_eq!(t.source_index(src, 0, 0), None);
        assert_eq!(t.source_index(src, 1, 1), Some((0, 0)));
        assert_eq!(t.source_index(src, 2, 2), None);
    }
}
