//! Generic row-major 2D matrices.
//!
//! One engine serves every element type: integers of any width, floats,
//! `bool`, and object types such as `String` or `Option<T>`. Arithmetic on
//! fixed-width integers wraps like the type's native `wrapping_*` operations.
//!
//! # Core Types
//!
//! - [`Matrix`]: owned, row-major storage. [`Matrix::row_mut`] aliases the
//!   backing buffer; [`Matrix::column`] always copies
//! - [`Shape`], [`Point`]: extents and coordinates
//! - [`IndexTransform`]: transpose, rotations, reshape, extend and repeat
//! - [`Cursor`], [`Cells`], [`Lines`]: lazy traversals with O(1) `skip_by`
//!   and exact `remaining`
//!
//! # Bulk operations
//!
//! - [`map`], [`zip_map2`], [`zip_map3`], [`zip_map4`], [`zip_fold`], [`zip_n`]
//! - [`update_all`], [`replace_if`], [`for_each`]
//! - [`add`], [`subtract`], [`multiply`]
//!
//! Each runs through [`run_over_rectangle`] (or [`run_over_cube`] for the
//! product), which consults a [`ParallelConfig`]. The short forms use the
//! process-wide policy ([`set_parallel_policy`]); the `*_with` forms take an
//! explicit configuration.
//!
//! # Example
//!
//! ```rust
//! use matrix2d::{add, multiply, Matrix};
//!
//! let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
//! assert_eq!(m.transpose().to_string(), "[[1, 4], [2, 5], [3, 6]]");
//! assert_eq!(m.rotate90().to_string(), "[[4, 1], [5, 2], [6, 3]]");
//! assert_eq!(m.flatten(), vec![1, 2, 3, 4, 5, 6]);
//!
//! let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
//! let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
//! assert_eq!(add(&a, &b).unwrap().to_string(), "[[6, 8], [10, 12]]");
//! assert_eq!(multiply(&a, &b).unwrap().to_string(), "[[19, 22], [43, 50]]");
//! ```
//!
//! # Features
//!
//! - `parallel` (default): rayon-backed fan-out. Without it every operation
//!   runs on the calling thread and element types need not be `Send + Sync`.

// ============================================================================
// Element traits
// ============================================================================
pub use matrix2d_traits::{Element, MaybeSend, MaybeSendSync, MaybeSync, Numeric};

// ============================================================================
// Storage, shape, transforms and traversal
// ============================================================================
pub use matrix2d_view::{
    Axis, Cells, Cursor, ErrorKind, IndexTransform, LineCursor, Lines, Matrix, MatrixError, Path,
    Point, Result, Shape, MAX_EXTENT,
};

// ============================================================================
// Dispatch and elementwise kernels
// ============================================================================
pub use matrix2d_kernel::{
    ensure_same_shape, parallel_policy, run_over_cube, run_over_rectangle, set_parallel_policy,
    ParallelConfig, ParallelPolicy, Rect, MIN_PARALLEL_VOLUME, PARALLEL_ENV, THRESHOLD_ENV,
};

pub use matrix2d_kernel::{
    for_each, for_each_in, for_each_in_with, map, map_into, map_into_with, map_with, replace_if,
    replace_if_indexed, replace_if_indexed_with, replace_if_with, update_all, update_all_indexed,
    update_all_indexed_with, update_all_with, zip_fold, zip_fold_with, zip_map2, zip_map2_into,
    zip_map2_into_with, zip_map2_with, zip_map3, zip_map3_into, zip_map3_into_with, zip_map3_with,
    zip_map4, zip_map4_into, zip_map4_into_with, zip_n, zip_n_with,
};

pub use matrix2d_kernel::{add, add_with, multiply, multiply_with, subtract, subtract_with};
