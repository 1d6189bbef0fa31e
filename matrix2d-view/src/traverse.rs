//! Traversal entry points on [`Matrix`].
//!
//! `stream_*` methods yield cell references, `points_*` methods yield the
//! coordinates of the same cells. Ranges are validated here, once, when the
//! traversal is created.

use crate::cursor::{Cells, Cursor, LineCursor, Lines, Path};
use crate::matrix::Matrix;
use crate::Result;

impl<T> Matrix<T> {
    // ========================================================================
    // Positions
    // ========================================================================

    /// Row-major over every cell.
    pub fn points_h(&self) -> Cursor {
        self.horizontal(0, self.rows())
    }

    /// Row-major over row `row` only.
    pub fn points_h_row(&self, row: usize) -> Result<Cursor> {
        self.points_h_rows(row, row.saturating_add(1))
    }

    /// Row-major over rows `from_row..to_row`.
    pub fn points_h_rows(&self, from_row: usize, to_row: usize) -> Result<Cursor> {
        self.shape().check_rows(from_row, to_row)?;
        Ok(self.horizontal(from_row, to_row))
    }

    /// Column-major over every cell.
    pub fn points_v(&self) -> Cursor {
        self.vertical(0, self.cols())
    }

    pub fn points_v_col(&self, col: usize) -> Result<Cursor> {
        self.points_v_cols(col, col.saturating_add(1))
    }

    /// Column-major over columns `from_col..to_col`.
    pub fn points_v_cols(&self, from_col: usize, to_col: usize) -> Result<Cursor> {
        self.shape().check_cols(from_col, to_col)?;
        Ok(self.vertical(from_col, to_col))
    }

    /// One position cursor per row.
    pub fn points_r(&self) -> LineCursor {
        LineCursor::rows(0, self.rows(), self.cols())
    }

    pub fn points_r_rows(&self, from_row: usize, to_row: usize) -> Result<LineCursor> {
        self.shape().check_rows(from_row, to_row)?;
        Ok(LineCursor::rows(from_row, to_row, self.cols()))
    }

    /// One position cursor per column.
    pub fn points_c(&self) -> LineCursor {
        LineCursor::cols(0, self.cols(), self.rows())
    }

    pub fn points_c_cols(&self, from_col: usize, to_col: usize) -> Result<LineCursor> {
        self.shape().check_cols(from_col, to_col)?;
        Ok(LineCursor::cols(from_col, to_col, self.rows()))
    }

    /// Main diagonal, upper-left to lower-right. Square matrices only.
    pub fn points_lu2rd(&self) -> Result<Cursor> {
        self.shape().check_square()?;
        Ok(Cursor::new(Path::MainDiagonal, self.rows()))
    }

    /// Anti-diagonal, upper-right to lower-left. Square matrices only.
    pub fn points_ru2ld(&self) -> Result<Cursor> {
        self.shape().check_square()?;
        Ok(Cursor::new(Path::AntiDiagonal { n: self.rows() }, self.rows()))
    }

    fn horizontal(&self, from_row: usize, to_row: usize) -> Cursor {
        let cols = self.cols();
        Cursor::new(
            Path::Horizontal {
                first_row: from_row,
                cols,
            },
            (to_row - from_row) * cols,
        )
    }

    fn vertical(&self, from_col: usize, to_col: usize) -> Cursor {
        let rows = self.rows();
        Cursor::new(
            Path::Vertical {
                first_col: from_col,
                rows,
            },
            (to_col - from_col) * rows,
        )
    }

    // ========================================================================
    // Values
    // ========================================================================

    pub fn stream_h(&self) -> Cells<'_, T> {
        Cells::new(self, self.points_h())
    }

    pub fn stream_h_row(&self, row: usize) -> Result<Cells<'_, T>> {
        Ok(Cells::new(self, self.points_h_row(row)?))
    }

    pub fn stream_h_rows(&self, from_row: usize, to_row: usize) -> Result<Cells<'_, T>> {
        Ok(Cells::new(self, self.points_h_rows(from_row, to_row)?))
    }

    pub fn stream_v(&self) -> Cells<'_, T> {
        Cells::new(self, self.points_v())
    }

    pub fn stream_v_col(&self, col: usize) -> Result<Cells<'_, T>> {
        Ok(Cells::new(self, self.points_v_col(col)?))
    }

    pub fn stream_v_cols(&self, from_col: usize, to_col: usize) -> Result<Cells<'_, T>> {
        Ok(Cells::new(self, self.points_v_cols(from_col, to_col)?))
    }

    pub fn stream_r(&self) -> Lines<'_, T> {
        Lines::new(self, self.points_r())
    }

    pub fn stream_r_rows(&self, from_row: usize, to_row: usize) -> Result<Lines<'_, T>> {
        Ok(Lines::new(self, self.points_r_rows(from_row, to_row)?))
    }

    pub fn stream_c(&self) -> Lines<'_, T> {
        Lines::new(self, self.points_c())
    }

    pub fn stream_c_cols(&self, from_col: usize, to_col: usize) -> Result<Lines<'_, T>> {
        Ok(Lines::new(self, self.points_c_cols(from_col, to_col)?))
    }

    pub fn stream_lu2rd(&self) -> Result<Cells<'_, T>> {
        Ok(Cells::new(self, self.points_lu2rd()?))
    }

    pub fn stream_ru2ld(&self) -> Result<Cells<'_, T>> {
        Ok(Cells::new(self, self.points_ru2ld()?))
    }
}
