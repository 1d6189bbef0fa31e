//! Rayon fan-out over iteration rectangles.
//!
//! The rectangle is halved along its longer axis with `rayon::join` until
//! each half has a single worker's share, then swept sequentially. Halves
//! never overlap, so per-cell writes through [`SendPtr`] are race-free as
//! long as each `(i, j)` touches only its own target cell.

#[cfg(feature = "parallel")]
use crate::kernel::Rect;

/// A raw pointer wrapper that is `Send` + `Sync`.
///
/// # Safety
/// The pointee must outlive the parallel operation, and concurrent users must
/// write to disjoint cells.
pub(crate) struct SendPtr<T>(pub(crate) *mut T);

impl<T> Clone for SendPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SendPtr<T> {}

unsafe impl<T> Send for SendPtr<T> {}
unsafe impl<T> Sync for SendPtr<T> {}

impl<T> SendPtr<T> {
    /// Pointer to the `offset`-th element.
    ///
    /// # Safety
    /// `offset` must be in bounds of the allocation.
    #[inline]
    pub(crate) unsafe fn at(self, offset: usize) -> *mut T {
        self.0.add(offset)
    }
}

/// Recursively split `rect` across up to `nthreads` workers, calling `leaf`
/// once per final sub-rectangle.
#[cfg(feature = "parallel")]
pub(crate) fn split_threaded<F>(rect: Rect, nthreads: usize, leaf: &F)
where
    F: Fn(Rect) + Sync,
{
    if nthreads <= 1 {
        return leaf(rect);
    }
    let Some((left, right)) = rect.split() else {
        return leaf(rect);
    };
    let nt_left = nthreads / 2;
    let nt_right = nthreads - nt_left;
    rayon::join(
        || split_threaded(left, nt_left, leaf),
        || split_threaded(right, nt_right, leaf),
    );
}

#[cfg(all(test, feature = "parallel"))]
mod tests {
    use super::*;
    use crate::kernel::Rect;
    use crate::Shape;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[test]
    fn test_split_threaded_covers_every_cell_once() {
        let rect = Rect::full(Shape::new(37, 53));
        let hits: Vec<AtomicUsize> = (0..37 * 53).map(|_| AtomicUsize::new(0)).collect();
        split_threaded(rect, 8, &|r: Rect| {
            r.for_each_cell(&|i, j| {
                hits[i * 53 + j].fetch_add(1, Ordering::Relaxed);
            })
        });
        assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
    }

    #[test]
    fn test_split_threaded_leaf_count_bounded_by_threads() {
        let leaves = Mutex::new(Vec::new());
        split_threaded(Rect::full(Shape::new(100, 100)), 4, &|r: Rect| {
            leaves.lock().unwrap().push(r)
        });
        let leaves = leaves.into_inner().unwrap();
        assert_eq!(leaves.len(), 4);
        let total: u64 = leaves.iter().map(Rect::volume).sum();
        assert_eq!(total, 10_000);
    }

    #[test]
    fn test_split_threaded_single_thread_is_one_leaf() {
        let count = AtomicUsize::new(0);
        split_threaded(Rect::full(Shape::new(10, 10)), 1, &|_r: Rect| {
            count.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_split_threaded_unsplittable() {
        let count = AtomicUsize::new(0);
        split_threaded(Rect::full(Shape::new(1, 1)), 16, &|_r: Rect| {
            count.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_send_ptr_disjoint_writes() {
        let mut data = vec![0usize; 64];
        let ptr = SendPtr(data.as_mut_ptr());
        split_threaded(Rect::full(Shape::new(8, 8)), 4, &|r: Rect| {
            r.for_each_cell(&|i, j| unsafe { *ptr.at(i * 8 + j) = i * 8 + j });
        });
        assert_eq!(data, (0..64).collect::<Vec<_>>());
    }
}
