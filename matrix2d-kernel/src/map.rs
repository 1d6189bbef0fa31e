//! Elementwise map, zip and in-place update operations.
//!
//! Every function checks operand shapes first, then hands a per-cell closure
//! to [`run_over_rectangle`]. Destination cells are written through a
//! [`SendPtr`]; the dispatch layer gives each `(i, j)` to exactly one worker.

use smallvec::SmallVec;

use crate::dispatch::run_over_rectangle;
use crate::kernel::{ensure_same_shape, Rect};
use crate::policy::ParallelConfig;
use crate::threading::SendPtr;
use crate::{Element, Matrix, MatrixError, MaybeSend, MaybeSendSync, MaybeSync, Result};

/// Operand slices for the n-ary zips; 8 covers the common cases without
/// touching the heap.
type Operands<'a, T> = SmallVec<[&'a [T]; 8]>;

/// Overwrite every cell of `dest` with `f(i, j)`.
fn write_cells<D, F>(config: &ParallelConfig, dest: &mut Matrix<D>, f: F)
where
    D: MaybeSend,
    F: Fn(usize, usize) -> D + MaybeSync,
{
    let cols = dest.cols();
    let rect = Rect::full(dest.shape());
    let ptr = SendPtr(dest.as_mut_ptr());
    run_over_rectangle(config, rect, None, move |i, j| {
        // SAFETY: (i, j) lies in `dest` and is visited exactly once.
        unsafe { *ptr.at(i * cols + j) = f(i, j) };
    });
}

/// Replace every cell `x` of `dest` with `f(i, j, &x)`, or leave it when
/// `f` returns `None`.
fn rewrite_cells<T, F>(config: &ParallelConfig, dest: &mut Matrix<T>, f: F)
where
    T: MaybeSendSync,
    F: Fn(usize, usize, &T) -> Option<T> + MaybeSync,
{
    let cols = dest.cols();
    let rect = Rect::full(dest.shape());
    let ptr = SendPtr(dest.as_mut_ptr());
    run_over_rectangle(config, rect, None, move |i, j| {
        // SAFETY: (i, j) lies in `dest` and is visited exactly once.
        unsafe {
            let p = ptr.at(i * cols + j);
            if let Some(v) = f(i, j, &*p) {
                *p = v;
            }
        }
    });
}

// ============================================================================
// Map
// ============================================================================

/// `dest[i][j] = f(&src[i][j])`.
pub fn map_into<D, A>(
    dest: &mut Matrix<D>,
    src: &Matrix<A>,
    f: impl Fn(&A) -> D + MaybeSync,
) -> Result<()>
where
    D: MaybeSend,
    A: MaybeSync,
{
    map_into_with(&ParallelConfig::current(), dest, src, f)
}

pub fn map_into_with<D, A>(
    config: &ParallelConfig,
    dest: &mut Matrix<D>,
    src: &Matrix<A>,
    f: impl Fn(&A) -> D + MaybeSync,
) -> Result<()>
where
    D: MaybeSend,
    A: MaybeSync,
{
    ensure_same_shape("map", dest, src)?;
    let s = src.as_slice();
    let cols = src.cols();
    write_cells(config, dest, |i, j| f(&s[i * cols + j]));
    Ok(())
}

/// A new matrix with `f` applied to every cell. The element type may change.
pub fn map<D, A>(src: &Matrix<A>, f: impl Fn(&A) -> D + MaybeSync) -> Result<Matrix<D>>
where
    D: Element + MaybeSend,
    A: MaybeSync,
{
    map_with(&ParallelConfig::current(), src, f)
}

pub fn map_with<D, A>(
    config: &ParallelConfig,
    src: &Matrix<A>,
    f: impl Fn(&A) -> D + MaybeSync,
) -> Result<Matrix<D>>
where
    D: Element + MaybeSend,
    A: MaybeSync,
{
    let mut out = Matrix::zeros(src.rows(), src.cols())?;
    map_into_with(config, &mut out, src, f)?;
    Ok(out)
}

// ============================================================================
// Zip
// ============================================================================

/// `dest[i][j] = f(&a[i][j], &b[i][j])`.
pub fn zip_map2_into<D, A, B>(
    dest: &mut Matrix<D>,
    a: &Matrix<A>,
    b: &Matrix<B>,
    f: impl Fn(&A, &B) -> D + MaybeSync,
) -> Result<()>
where
    D: MaybeSend,
    A: MaybeSync,
    B: MaybeSync,
{
    zip_map2_into_with(&ParallelConfig::current(), dest, a, b, f)
}

pub fn zip_map2_into_with<D, A, B>(
    config: &ParallelConfig,
    dest: &mut Matrix<D>,
    a: &Matrix<A>,
    b: &Matrix<B>,
    f: impl Fn(&A, &B) -> D + MaybeSync,
) -> Result<()>
where
    D: MaybeSend,
    A: MaybeSync,
    B: MaybeSync,
{
    ensure_same_shape("zip", a, b)?;
    ensure_same_shape("zip", dest, a)?;
    let (sa, sb) = (a.as_slice(), b.as_slice());
    let cols = a.cols();
    write_cells(config, dest, |i, j| {
        let k = i * cols + j;
        f(&sa[k], &sb[k])
    });
    Ok(())
}

pub fn zip_map2<D, A, B>(
    a: &Matrix<A>,
    b: &Matrix<B>,
    f: impl Fn(&A, &B) -> D + MaybeSync,
) -> Result<Matrix<D>>
where
    D: Element + MaybeSend,
    A: MaybeSync,
    B: MaybeSync,
{
    zip_map2_with(&ParallelConfig::current(), a, b, f)
}

pub fn zip_map2_with<D, A, B>(
    config: &ParallelConfig,
    a: &Matrix<A>,
    b: &Matrix<B>,
    f: impl Fn(&A, &B) -> D + MaybeSync,
) -> Result<Matrix<D>>
where
    D: Element + MaybeSend,
    A: MaybeSync,
    B: MaybeSync,
{
    ensure_same_shape("zip", a, b)?;
    let mut out = Matrix::zeros(a.rows(), a.cols())?;
    zip_map2_into_with(config, &mut out, a, b, f)?;
    Ok(out)
}

/// `dest[i][j] = f(&a[i][j], &b[i][j], &c[i][j])`.
pub fn zip_map3_into<D, A, B, C>(
    dest: &mut Matrix<D>,
    a: &Matrix<A>,
    b: &Matrix<B>,
    c: &Matrix<C>,
    f: impl Fn(&A, &B, &C) -> D + MaybeSync,
) -> Result<()>
where
    D: MaybeSend,
    A: MaybeSync,
    B: MaybeSync,
    C: MaybeSync,
{
    zip_map3_into_with(&ParallelConfig::current(), dest, a, b, c, f)
}

pub fn zip_map3_into_with<D, A, B, C>(
    config: &ParallelConfig,
    dest: &mut Matrix<D>,
    a: &Matrix<A>,
    b: &Matrix<B>,
    c: &Matrix<C>,
    f: impl Fn(&A, &B, &C) -> D + MaybeSync,
) -> Result<()>
where
    D: MaybeSend,
    A: MaybeSync,
    B: MaybeSync,
    C: MaybeSync,
{
    ensure_same_shape("zip3", a, b)?;
    ensure_same_shape("zip3", a, c)?;
    ensure_same_shape("zip3", dest, a)?;
    let (sa, sb, sc) = (a.as_slice(), b.as_slice(), c.as_slice());
    let cols = a.cols();
    write_cells(config, dest, |i, j| {
        let k = i * cols + j;
        f(&sa[k], &sb[k], &sc[k])
    });
    Ok(())
}

pub fn zip_map3<D, A, B, C>(
    a: &Matrix<A>,
    b: &Matrix<B>,
    c: &Matrix<C>,
    f: impl Fn(&A, &B, &C) -> D + MaybeSync,
) -> Result<Matrix<D>>
where
    D: Element + MaybeSend,
    A: MaybeSync,
    B: MaybeSync,
    C: MaybeSync,
{
    zip_map3_with(&ParallelConfig::current(), a, b, c, f)
}

pub fn zip_map3_with<D, A, B, C>(
    config: &ParallelConfig,
    a: &Matrix<A>,
    b: &Matrix<B>,
    c: &Matrix<C>,
    f: impl Fn(&A, &B, &C) -> D + MaybeSync,
) -> Result<Matrix<D>>
where
    D: Element + MaybeSend,
    A: MaybeSync,
    B: MaybeSync,
    C: MaybeSync,
{
    ensure_same_shape("zip3", a, b)?;
    ensure_same_shape("zip3", a, c)?;
    let mut out = Matrix::zeros(a.rows(), a.cols())?;
    zip_map3_into_with(config, &mut out, a, b, c, f)?;
    Ok(out)
}

/// `dest[i][j] = f(&a[i][j], &b[i][j], &c[i][j], &d[i][j])`.
pub fn zip_map4_into<D, A, B, C, E>(
    dest: &mut Matrix<D>,
    a: &Matrix<A>,
    b: &Matrix<B>,
    c: &Matrix<C>,
    e: &Matrix<E>,
    f: impl Fn(&A, &B, &C, &E) -> D + MaybeSync,
) -> Result<()>
where
    D: MaybeSend,
    A: MaybeSync,
    B: MaybeSync,
    C: MaybeSync,
    E: MaybeSync,
{
    zip_map4_into_with(&ParallelConfig::current(), dest, a, b, c, e, f)
}

pub fn zip_map4_into_with<D, A, B, C, E>(
    config: &ParallelConfig,
    dest: &mut Matrix<D>,
    a: &Matrix<A>,
    b: &Matrix<B>,
    c: &Matrix<C>,
    e: &Matrix<E>,
    f: impl Fn(&A, &B, &C, &E) -> D + MaybeSync,
) -> Result<()>
where
    D: MaybeSend,
    A: MaybeSync,
    B: MaybeSync,
    C: MaybeSync,
    E: MaybeSync,
{
    ensure_same_shape("zip4", a, b)?;
    ensure_same_shape("zip4", a, c)?;
    ensure_same_shape("zip4", a, e)?;
    ensure_same_shape("zip4", dest, a)?;
    let (sa, sb, sc, se) = (a.as_slice(), b.as_slice(), c.as_slice(), e.as_slice());
    let cols = a.cols();
    write_cells(config, dest, |i, j| {
        let k = i * cols + j;
        f(&sa[k], &sb[k], &sc[k], &se[k])
    });
    Ok(())
}

pub fn zip_map4<D, A, B, C, E>(
    a: &Matrix<A>,
    b: &Matrix<B>,
    c: &Matrix<C>,
    e: &Matrix<E>,
    f: impl Fn(&A, &B, &C, &E) -> D + MaybeSync,
) -> Result<Matrix<D>>
where
    D: Element + MaybeSend,
    A: MaybeSync,
    B: MaybeSync,
    C: MaybeSync,
    E: MaybeSync,
{
    let mut out = Matrix::zeros(a.rows(), a.cols())?;
    zip_map4_into(&mut out, a, b, c, e, f)?;
    Ok(out)
}

fn operand_slices<'a, T>(op: &'static str, matrices: &[&'a Matrix<T>]) -> Result<Operands<'a, T>> {
    let first = matrices.first().ok_or_else(|| {
        MatrixError::InvalidArgument(format!("{op} needs at least one matrix"))
    })?;
    for m in &matrices[1..] {
        ensure_same_shape(op, *first, *m)?;
    }
    Ok(matrices.iter().map(|m| m.as_slice()).collect())
}

/// Left fold across same-shape matrices, cell by cell:
/// `out[i][j] = f(...f(f(m0[i][j], m1[i][j]), m2[i][j])...)`.
///
/// A single matrix is returned as a copy.
pub fn zip_fold<T>(matrices: &[&Matrix<T>], f: impl Fn(&T, &T) -> T + MaybeSync) -> Result<Matrix<T>>
where
    T: Element + MaybeSendSync,
{
    zip_fold_with(&ParallelConfig::current(), matrices, f)
}

pub fn zip_fold_with<T>(
    config: &ParallelConfig,
    matrices: &[&Matrix<T>],
    f: impl Fn(&T, &T) -> T + MaybeSync,
) -> Result<Matrix<T>>
where
    T: Element + MaybeSendSync,
{
    let slices = operand_slices("zip_fold", matrices)?;
    let first = matrices[0];
    if slices.len() == 1 {
        return Ok(first.clone());
    }
    let cols = first.cols();
    let mut out = Matrix::zeros(first.rows(), cols)?;
    write_cells(config, &mut out, |i, j| {
        let k = i * cols + j;
        let mut acc = f(&slices[0][k], &slices[1][k]);
        for s in &slices[2..] {
            acc = f(&acc, &s[k]);
        }
        acc
    });
    Ok(out)
}

/// `out[i][j] = f(&[&m0[i][j], &m1[i][j], ...])` over same-shape matrices.
pub fn zip_n<T, R>(matrices: &[&Matrix<T>], f: impl Fn(&[&T]) -> R + MaybeSync) -> Result<Matrix<R>>
where
    T: MaybeSync,
    R: Element + MaybeSend,
{
    zip_n_with(&ParallelConfig::current(), matrices, f)
}

pub fn zip_n_with<T, R>(
    config: &ParallelConfig,
    matrices: &[&Matrix<T>],
    f: impl Fn(&[&T]) -> R + MaybeSync,
) -> Result<Matrix<R>>
where
    T: MaybeSync,
    R: Element + MaybeSend,
{
    let slices = operand_slices("zip_n", matrices)?;
    let cols = matrices[0].cols();
    let mut out = Matrix::zeros(matrices[0].rows(), cols)?;
    write_cells(config, &mut out, |i, j| {
        let k = i * cols + j;
        let cell: SmallVec<[&T; 8]> = slices.iter().map(|s| &s[k]).collect();
        f(&cell)
    });
    Ok(out)
}

// ============================================================================
// In-place updates
// ============================================================================

/// Replace every cell `x` with `f(&x)`.
pub fn update_all<T: MaybeSendSync>(m: &mut Matrix<T>, f: impl Fn(&T) -> T + MaybeSync) {
    update_all_with(&ParallelConfig::current(), m, f)
}

pub fn update_all_with<T: MaybeSendSync>(
    config: &ParallelConfig,
    m: &mut Matrix<T>,
    f: impl Fn(&T) -> T + MaybeSync,
) {
    rewrite_cells(config, m, |_, _, x| Some(f(x)));
}

/// Replace every cell `(i, j)` with `f(i, j)`.
pub fn update_all_indexed<T: MaybeSend>(
    m: &mut Matrix<T>,
    f: impl Fn(usize, usize) -> T + MaybeSync,
) {
    update_all_indexed_with(&ParallelConfig::current(), m, f)
}

pub fn update_all_indexed_with<T: MaybeSend>(
    config: &ParallelConfig,
    m: &mut Matrix<T>,
    f: impl Fn(usize, usize) -> T + MaybeSync,
) {
    write_cells(config, m, f);
}

/// Set every cell matching `pred` to `new_value`.
pub fn replace_if<T: Clone + MaybeSendSync>(
    m: &mut Matrix<T>,
    pred: impl Fn(&T) -> bool + MaybeSync,
    new_value: T,
) {
    replace_if_with(&ParallelConfig::current(), m, pred, new_value)
}

pub fn replace_if_with<T: Clone + MaybeSendSync>(
    config: &ParallelConfig,
    m: &mut Matrix<T>,
    pred: impl Fn(&T) -> bool + MaybeSync,
    new_value: T,
) {
    rewrite_cells(config, m, |_, _, x| pred(x).then(|| new_value.clone()));
}

/// Set every cell whose position matches `pred` to `new_value`.
pub fn replace_if_indexed<T: Clone + MaybeSendSync>(
    m: &mut Matrix<T>,
    pred: impl Fn(usize, usize) -> bool + MaybeSync,
    new_value: T,
) {
    replace_if_indexed_with(&ParallelConfig::current(), m, pred, new_value)
}

pub fn replace_if_indexed_with<T: Clone + MaybeSendSync>(
    config: &ParallelConfig,
    m: &mut Matrix<T>,
    pred: impl Fn(usize, usize) -> bool + MaybeSync,
    new_value: T,
) {
    rewrite_cells(config, m, |i, j, _| pred(i, j).then(|| new_value.clone()));
}

// ============================================================================
// Visiting
// ============================================================================

/// Call `f(i, j, &m[i][j])` for every cell. Order is unspecified when the
/// dispatch runs in parallel.
pub fn for_each<T: MaybeSync>(m: &Matrix<T>, f: impl Fn(usize, usize, &T) + MaybeSync) {
    let rect = Rect::full(m.shape());
    let (s, cols) = (m.as_slice(), m.cols());
    run_over_rectangle(&ParallelConfig::current(), rect, None, |i, j| {
        f(i, j, &s[i * cols + j])
    });
}

/// [`for_each`] restricted to `from_row..to_row` x `from_col..to_col`.
pub fn for_each_in<T: MaybeSync>(
    m: &Matrix<T>,
    from_row: usize,
    to_row: usize,
    from_col: usize,
    to_col: usize,
    f: impl Fn(usize, usize, &T) + MaybeSync,
) -> Result<()> {
    for_each_in_with(&ParallelConfig::current(), m, from_row, to_row, from_col, to_col, f)
}

pub fn for_each_in_with<T: MaybeSync>(
    config: &ParallelConfig,
    m: &Matrix<T>,
    from_row: usize,
    to_row: usize,
    from_col: usize,
    to_col: usize,
    f: impl Fn(usize, usize, &T) + MaybeSync,
) -> Result<()> {
    let rect = Rect::within(m.shape(), from_row, to_row, from_col, to_col)?;
    let (s, cols) = (m.as_slice(), m.cols());
    run_over_rectangle(config, rect, None, |i, j| f(i, j, &s[i * cols + j]));
    Ok(())
}
