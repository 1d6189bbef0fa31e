//! Owned row-major matrices for the matrix2d crates.
//!
//! This crate provides:
//! - [`Shape`], [`Point`]: extents and cell coordinates
//! - [`Matrix`]: an owned, row-major matrix over any [`Element`]
//! - [`IndexTransform`]: transpose, rotations, reshape, extend and repeat as
//!   pure shape + index mappings, materialized once by [`Matrix::transform`]
//! - [`Cursor`], [`Cells`], [`Lines`]: lazy, skippable traversals over rows,
//!   columns, sub-ranges and the two diagonals
//!
//! Bulk per-cell operations (map, zip, arithmetic) and the parallel dispatch
//! policy live in `matrix2d-kernel`.

pub mod cursor;
pub mod matrix;
pub mod shape;
pub mod transform;
mod traverse;

pub use cursor::{Cells, Cursor, LineCursor, Lines, Path};
pub use matrix::Matrix;
pub use shape::{Axis, Point, Shape, MAX_EXTENT};
pub use transform::IndexTransform;

pub use matrix2d_traits::{Element, MaybeSend, MaybeSendSync, MaybeSync, Numeric};

/// Broad category of a [`MatrixError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A single row or column index is outside the shape.
    Index,
    /// A sub-range is reversed or reaches past the shape.
    Range,
    /// An argument is invalid for the operation (shape mismatch, zero factor).
    Argument,
    /// A replacement buffer has the wrong length.
    LengthMismatch,
    /// The operation is not defined for the matrix's current shape.
    State,
    /// A derived extent does not fit the addressable range.
    Overflow,
}

/// Errors that can occur during matrix operations.
///
/// Every operation validates its inputs before allocating or mutating, so an
/// `Err` always leaves the receiver untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// Row or column index outside `0..len`.
    #[error("{axis} index {index} out of bounds for length {len}")]
    IndexOutOfBounds { axis: Axis, index: usize, len: usize },

    /// Sub-range `from..to` is reversed or exceeds `len`.
    #[error("{axis} range {from}..{to} out of bounds for length {len}")]
    RangeOutOfBounds {
        axis: Axis,
        from: usize,
        to: usize,
        len: usize,
    },

    /// Operands of an elementwise or stacking operation disagree in shape.
    #[error("{op}: shape mismatch: {left} vs {right}")]
    ShapeMismatch {
        op: &'static str,
        left: Shape,
        right: Shape,
    },

    /// Invalid argument (zero repeat factor, ragged input rows, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A row, column or diagonal buffer has the wrong length.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Diagonal access on a non-square matrix.
    #[error("non-square matrix: rows={rows}, cols={cols}")]
    NonSquare { rows: usize, cols: usize },

    /// Derived extents exceed [`MAX_EXTENT`] or the cell count exceeds memory addressing.
    #[error("dimension overflow: {rows}x{cols} is not representable")]
    Overflow { rows: u64, cols: u64 },
}

impl MatrixError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::IndexOutOfBounds { .. } => ErrorKind::Index,
            MatrixError::RangeOutOfBounds { .. } => ErrorKind::Range,
            MatrixError::ShapeMismatch { .. } | MatrixError::InvalidArgument(_) => {
                ErrorKind::Argument
            }
            MatrixError::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            MatrixError::NonSquare { .. } => ErrorKind::State,
            MatrixError::Overflow { .. } => ErrorKind::Overflow,
        }
    }
}

/// Result type for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;
