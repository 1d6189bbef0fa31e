//! Lazy traversal cursors.
//!
//! A traversal is a [`Path`] (how a linear step counter maps to a cell) plus
//! a half-open window `front..back` of steps still to visit. Because the
//! mapping is pure arithmetic, skipping ahead and counting what is left are
//! O(1) and never touch the skipped cells.
//!
//! - [`Cursor`] yields [`Point`]s.
//! - [`Cells`] pairs a cursor with a matrix and yields `&T`.
//! - [`LineCursor`] / [`Lines`] yield one cursor (or one `Cells`) per row or
//!   per column, for the row-of-sequences and column-of-sequences traversals.
//!
//! Every cursor is created by a `Matrix::stream_*` / `Matrix::points_*` call
//! that has already validated the requested range.

use std::iter::FusedIterator;

use crate::matrix::Matrix;
use crate::shape::Point;

/// How step `k` of a traversal maps to a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Path {
    /// Row-major over full rows starting at `first_row`, `cols` cells per row.
    Horizontal { first_row: usize, cols: usize },
    /// Column-major over full columns starting at `first_col`, `rows` cells per column.
    Vertical { first_col: usize, rows: usize },
    /// `(k, k)`.
    MainDiagonal,
    /// `(k, n - 1 - k)` on an `n x n` matrix.
    AntiDiagonal { n: usize },
}

impl Path {
    #[inline]
    pub(crate) fn point_at(self, k: usize) -> Point {
        match self {
            Path::Horizontal { first_row, cols } => Point::new(first_row + k / cols, k % cols),
            Path::Vertical { first_col, rows } => Point::new(k % rows, first_col + k / rows),
            Path::MainDiagonal => Point::new(k, k),
            Path::AntiDiagonal { n } => Point::new(k, n - 1 - k),
        }
    }
}

// ============================================================================
// Cursor
// ============================================================================

/// A resumable, skippable sequence of cell positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    path: Path,
    front: usize,
    back: usize,
}

impl Cursor {
    /// A cursor over steps `0..len` of `path`.
    ///
    /// A path with a zero-length line addresses no cells, and an
    /// anti-diagonal addresses `n`; `len` is clamped to that.
    pub fn new(path: Path, len: usize) -> Self {
        let back = match path {
            Path::Horizontal { cols: 0, .. } | Path::Vertical { rows: 0, .. } => 0,
            Path::AntiDiagonal { n } => len.min(n),
            _ => len,
        };
        Self {
            path,
            front: 0,
            back,
        }
    }

    pub fn path(&self) -> Path {
        self.path
    }

    /// Number of positions not yet yielded.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.back - self.front
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.front == self.back
    }

    /// The next position, without consuming it.
    pub fn peek(&self) -> Option<Point> {
        (self.front < self.back).then(|| self.path.point_at(self.front))
    }

    /// Advance past `n` positions without visiting them. Saturates at the end.
    #[inline]
    pub fn skip_by(&mut self, n: usize) {
        self.front = self.front.saturating_add(n).min(self.back);
    }
}

impl Iterator for Cursor {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.front < self.back {
            let p = self.path.point_at(self.front);
            self.front += 1;
            Some(p)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Point> {
        self.skip_by(n);
        self.next()
    }

    fn count(self) -> usize {
        self.remaining()
    }

    fn last(mut self) -> Option<Point> {
        self.next_back()
    }
}

impl DoubleEndedIterator for Cursor {
    #[inline]
    fn next_back(&mut self) -> Option<Point> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.path.point_at(self.back))
        } else {
            None
        }
    }
}

impl ExactSizeIterator for Cursor {}
impl FusedIterator for Cursor {}

// ============================================================================
// Cells
// ============================================================================

/// A cursor bound to a matrix, yielding references to the visited cells.
#[derive(Debug)]
pub struct Cells<'a, T> {
    data: &'a [T],
    cols: usize,
    cursor: Cursor,
}

impl<T> Clone for Cells<'_, T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            cols: self.cols,
            cursor: self.cursor.clone(),
        }
    }
}

impl<'a, T> Cells<'a, T> {
    pub(crate) fn new(matrix: &'a Matrix<T>, cursor: Cursor) -> Self {
        Self {
            data: matrix.as_slice(),
            cols: matrix.cols(),
            cursor,
        }
    }

    #[inline]
    fn cell(&self, p: Point) -> &'a T {
        &self.data[p.row * self.cols + p.col]
    }

    /// Position of the next cell, without consuming it.
    pub fn peek_point(&self) -> Option<Point> {
        self.cursor.peek()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    #[inline]
    pub fn skip_by(&mut self, n: usize) {
        self.cursor.skip_by(n);
    }

    /// The underlying position cursor at its current state.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Copy every remaining cell into one buffer and exhaust the cursor.
    pub fn to_vec(&mut self) -> Vec<T>
    where
        T: Clone,
    {
        let path = self.cursor.path;
        let out = match path {
            Path::Horizontal { first_row, cols } if cols > 0 => {
                // Horizontal paths over full rows are contiguous in storage.
                let start = first_row * cols + self.cursor.front;
                let end = first_row * cols + self.cursor.back;
                self.data[start..end].to_vec()
            }
            _ => {
                let mut buf = Vec::with_capacity(self.remaining());
                buf.extend(self.by_ref().cloned());
                buf
            }
        };
        self.cursor.front = self.cursor.back;
        out
    }
}

impl<'a, T> Iterator for Cells<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.cursor.next().map(|p| self.cell(p))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<&'a T> {
        self.cursor.nth(n).map(|p| self.cell(p))
    }

    fn count(self) -> usize {
        self.cursor.remaining()
    }
}

impl<T> DoubleEndedIterator for Cells<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.cursor.next_back().map(|p| self.cell(p))
    }
}

impl<T> ExactSizeIterator for Cells<'_, T> {}
impl<T> FusedIterator for Cells<'_, T> {}

// ============================================================================
// Lines (row-of-sequences / column-of-sequences)
// ============================================================================

/// Yields one [`Cursor`] per row (`by_row == true`) or per column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineCursor {
    by_row: bool,
    rows: usize,
    cols: usize,
    front: usize,
    back: usize,
}

impl LineCursor {
    /// Rows `from..to` of a matrix with `cols` columns.
    pub(crate) fn rows(from: usize, to: usize, cols: usize) -> Self {
        Self {
            by_row: true,
            rows: 0,
            cols,
            front: from,
            back: to,
        }
    }

    /// Columns `from..to` of a matrix with `rows` rows.
    pub(crate) fn cols(from: usize, to: usize, rows: usize) -> Self {
        Self {
            by_row: false,
            rows,
            cols: 0,
            front: from,
            back: to,
        }
    }

    fn line(&self, index: usize) -> Cursor {
        if self.by_row {
            Cursor::new(
                Path::Horizontal {
                    first_row: index,
                    cols: self.cols,
                },
                self.cols,
            )
        } else {
            Cursor::new(
                Path::Vertical {
                    first_col: index,
                    rows: self.rows,
                },
                self.rows,
            )
        }
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.back - self.front
    }

    #[inline]
    pub fn skip_by(&mut self, n: usize) {
        self.front = self.front.saturating_add(n).min(self.back);
    }
}

impl Iterator for LineCursor {
    type Item = Cursor;

    fn next(&mut self) -> Option<Cursor> {
        if self.front < self.back {
            let line = self.line(self.front);
            self.front += 1;
            Some(line)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<Cursor> {
        self.skip_by(n);
        self.next()
    }
}

impl DoubleEndedIterator for LineCursor {
    fn next_back(&mut self) -> Option<Cursor> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.line(self.back))
        } else {
            None
        }
    }
}

impl ExactSizeIterator for LineCursor {}
impl FusedIterator for LineCursor {}

/// Yields one [`Cells`] per row or per column of a matrix.
#[derive(Debug)]
pub struct Lines<'a, T> {
    matrix: &'a Matrix<T>,
    lines: LineCursor,
}

impl<T> Clone for Lines<'_, T> {
    fn clone(&self) -> Self {
        Self {
            matrix: self.matrix,
            lines: self.lines.clone(),
        }
    }
}

impl<'a, T> Lines<'a, T> {
    pub(crate) fn new(matrix: &'a Matrix<T>, lines: LineCursor) -> Self {
        Self { matrix, lines }
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.lines.remaining()
    }

    #[inline]
    pub fn skip_by(&mut self, n: usize) {
        self.lines.skip_by(n);
    }

    /// Copy every remaining line into its own buffer and exhaust the cursor.
    pub fn to_vecs(&mut self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        self.by_ref().map(|mut line| line.to_vec()).collect()
    }
}

impl<'a, T> Iterator for Lines<'a, T> {
    type Item = Cells<'a, T>;

    fn next(&mut self) -> Option<Cells<'a, T>> {
        self.lines.next().map(|c| Cells::new(self.matrix, c))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lines.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<Cells<'a, T>> {
        self.lines.nth(n).map(|c| Cells::new(self.matrix, c))
    }
}

impl<T> DoubleEndedIterator for Lines<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.lines.next_back().map(|c| Cells::new(self.matrix, c))
    }
}

impl<T> ExactSizeIterator for Lines<'_, T> {}
impl<T> FusedIterator for Lines<'_, T> {}
