//! Entry points that decide between a sequential sweep and a parallel split.

use crate::kernel::Rect;
use crate::policy::ParallelConfig;
use crate::MaybeSync;

/// Invoke `op(i, j)` for every cell of `rect`.
///
/// `volume_hint` overrides the rectangle's area for the parallel decision,
/// for operations whose real work per cell differs from one unit.
///
/// Sequential execution is row-major on the calling thread. Parallel
/// execution splits `rect` into disjoint sub-rectangles, one per worker;
/// `op` must not write to memory shared between distinct `(i, j)`.
pub fn run_over_rectangle<F>(config: &ParallelConfig, rect: Rect, volume_hint: Option<u64>, op: F)
where
    F: Fn(usize, usize) + MaybeSync,
{
    if rect.is_empty() {
        return;
    }
    let volume = volume_hint.unwrap_or_else(|| rect.volume());
    let parallel = config.should_parallelize(volume);
    tracing::trace!(
        policy = %config.policy,
        volume,
        threshold = config.threshold,
        parallel,
        rows = rect.rows(),
        cols = rect.cols(),
        "run_over_rectangle"
    );

    #[cfg(feature = "parallel")]
    {
        if parallel {
            let nthreads = rayon::current_num_threads();
            crate::threading::split_threaded(rect, nthreads, &|r: Rect| r.for_each_cell(&op));
            return;
        }
    }

    rect.for_each_cell(&op);
}

/// Invoke `op(i, j, k)` for every `(i, j)` in `rect` and every `k` in `0..inner`.
///
/// Work is split over `(i, j)` only. All `k` for a given `(i, j)` run in
/// ascending order on the same worker, so `op` may accumulate into a
/// per-`(i, j)` target without synchronization. The parallel decision uses
/// `rect.volume() * inner`.
pub fn run_over_cube<F>(config: &ParallelConfig, rect: Rect, inner: usize, op: F)
where
    F: Fn(usize, usize, usize) + MaybeSync,
{
    if rect.is_empty() || inner == 0 {
        return;
    }
    let volume = rect.volume().saturating_mul(inner as u64);
    let parallel = config.should_parallelize(volume);
    tracing::trace!(
        policy = %config.policy,
        volume,
        threshold = config.threshold,
        parallel,
        rows = rect.rows(),
        cols = rect.cols(),
        inner,
        "run_over_cube"
    );

    // i-k-j keeps the innermost loop on contiguous columns of both the
    // right-hand operand and the target.
    let leaf = |r: Rect| {
        for i in r.row_from()..r.row_to() {
            for k in 0..inner {
                for j in r.col_from()..r.col_to() {
                    op(i, j, k);
                }
            }
        }
    };

    #[cfg(feature = "parallel")]
    {
        if parallel {
            let nthreads = rayon::current_num_threads();
            crate::threading::split_threaded(rect, nthreads, &leaf);
            return;
        }
    }

    leaf(rect);
}
