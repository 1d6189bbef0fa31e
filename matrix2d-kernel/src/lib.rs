//! Bulk per-cell execution for matrix2d.
//!
//! # Dispatch
//!
//! - [`ParallelPolicy`] / [`ParallelConfig`]: whether an operation of a given
//!   volume runs on the calling thread or fans out over the rayon pool
//! - [`run_over_rectangle`]: invoke a per-cell operation over a [`Rect`]
//! - [`run_over_cube`]: the multiply variant, parallel over `(i, j)` with the
//!   inner `k` loop kept on one worker
//!
//! # Elementwise
//!
//! - [`map`], [`map_into`]: unary map, possibly to another element type
//! - [`zip_map2`], [`zip_map3`], [`zip_map4`] and their `_into` forms
//! - [`zip_fold`], [`zip_n`]: any number of same-shape operands
//! - [`update_all`], [`replace_if`], [`for_each`] and indexed variants
//!
//! # Arithmetic
//!
//! - [`add`], [`subtract`]: wraparound on fixed-width integers
//! - [`multiply`]: matrix product
//!
//! Every bulk function has a `*_with` form taking an explicit
//! [`ParallelConfig`]; the short form uses [`ParallelConfig::current`].

mod dispatch;
mod kernel;
mod map;
mod ops;
mod policy;
mod threading;

pub use dispatch::{run_over_cube, run_over_rectangle};
pub use kernel::{ensure_same_shape, Rect};
pub use map::{
    for_each, for_each_in, for_each_in_with, map, map_into, map_into_with, map_with,
    replace_if, replace_if_indexed, replace_if_indexed_with, replace_if_with, update_all,
    update_all_indexed, update_all_indexed_with, update_all_with, zip_fold, zip_fold_with,
    zip_map2, zip_map2_into, zip_map2_into_with, zip_map2_with, zip_map3, zip_map3_into,
    zip_map3_into_with, zip_map3_with, zip_map4, zip_map4_into, zip_map4_into_with, zip_n,
    zip_n_with,
};
pub use ops::{add, add_with, multiply, multiply_with, subtract, subtract_with};
pub use policy::{
    parallel_policy, set_parallel_policy, ParallelConfig, ParallelPolicy, MIN_PARALLEL_VOLUME,
    PARALLEL_ENV, THRESHOLD_ENV,
};

pub use matrix2d_traits::{Element, MaybeSend, MaybeSendSync, MaybeSync, Numeric};
pub use matrix2d_view::{ErrorKind, Matrix, MatrixError, Result, Shape};
