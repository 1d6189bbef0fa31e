//! Matrix arithmetic over [`Numeric`] elements.

use num_traits::Zero;

use crate::dispatch::run_over_cube;
use crate::kernel::{ensure_same_shape, Rect};
use crate::map::zip_map2_with;
use crate::policy::ParallelConfig;
use crate::threading::SendPtr;
use crate::{Matrix, MatrixError, MaybeSendSync, Numeric, Result};

/// Elementwise sum. Integer cells wrap on overflow.
pub fn add<T: Numeric + MaybeSendSync>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    add_with(&ParallelConfig::current(), a, b)
}

pub fn add_with<T: Numeric + MaybeSendSync>(
    config: &ParallelConfig,
    a: &Matrix<T>,
    b: &Matrix<T>,
) -> Result<Matrix<T>> {
    ensure_same_shape("add", a, b)?;
    zip_map2_with(config, a, b, |&x, &y| x.add_wrap(y))
}

/// Elementwise difference `a - b`. Integer cells wrap on overflow.
pub fn subtract<T: Numeric + MaybeSendSync>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    subtract_with(&ParallelConfig::current(), a, b)
}

pub fn subtract_with<T: Numeric + MaybeSendSync>(
    config: &ParallelConfig,
    a: &Matrix<T>,
    b: &Matrix<T>,
) -> Result<Matrix<T>> {
    ensure_same_shape("subtract", a, b)?;
    zip_map2_with(config, a, b, |&x, &y| x.sub_wrap(y))
}

/// Matrix product of an `m x n` and an `n x p` matrix.
///
/// Each output cell accumulates its `n` products in ascending `k`, so the
/// sequential and parallel results are bit-identical, floats included.
pub fn multiply<T: Numeric + MaybeSendSync>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    multiply_with(&ParallelConfig::current(), a, b)
}

pub fn multiply_with<T: Numeric + MaybeSendSync>(
    config: &ParallelConfig,
    a: &Matrix<T>,
    b: &Matrix<T>,
) -> Result<Matrix<T>> {
    if a.cols() != b.rows() {
        return Err(MatrixError::ShapeMismatch {
            op: "multiply",
            left: a.shape(),
            right: b.shape(),
        });
    }
    let inner = a.cols();
    let p = b.cols();
    let mut out = Matrix::filled(a.rows(), p, T::zero())?;
    let (sa, sb) = (a.as_slice(), b.as_slice());
    let ptr = SendPtr(out.as_mut_ptr());
    run_over_cube(config, Rect::full(out.shape()), inner, move |i, j, k| {
        // SAFETY: (i, j) is in bounds of `out` and owned by one worker for
        // every k.
        unsafe {
            let c = ptr.at(i * p + j);
            *c = (*c).add_wrap(sa[i * inner + k].mul_wrap(sb[k * p + j]));
        }
    });
    Ok(out)
}
