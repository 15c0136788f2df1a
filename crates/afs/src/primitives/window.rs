//! Windowing primitives.
//!
//! This module provides the inclusive index range used in two places: the
//! nearest-neighbour neighbourhood of a local regression fit, and the
//! anchor-to-anchor windows of the quantile selection.

// External dependencies
use num_traits::Float;

// Inclusive window bounds `[left, right]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Window {
    // Left boundary index (inclusive).
    pub left: usize,

    // Right boundary index (inclusive).
    pub right: usize,
}

impl Window {
    // Window spanning two consecutive anchors, both included.
    #[inline]
    pub fn between(left: usize, right: usize) -> Self {
        debug_assert!(left <= right, "between: left must not exceed right");
        Self { left, right }
    }

    // The `q` samples of sorted `x` nearest to `x0`.
    //
    // Starts from the insertion point of `x0` and grows towards whichever side
    // holds the closer sample; ties extend to the left.
    pub fn nearest<T: Float>(x: &[T], x0: T, q: usize) -> Self {
        let n = x.len();
        debug_assert!(n > 0, "nearest: x must not be empty");

        if q >= n {
            return Self {
                left: 0,
                right: n.saturating_sub(1),
            };
        }

        // First index with x >= x0
        let pos = x.partition_point(|&v| v < x0);

        // Half-open [lo, hi) grows until it holds q samples
        let mut lo = pos;
        let mut hi = pos;
        while hi - lo < q {
            if lo == 0 {
                hi += 1;
            } else if hi == n {
                lo -= 1;
            } else {
                let d_left = x0 - x[lo - 1];
                let d_right = x[hi] - x0;
                if d_left <= d_right {
                    lo -= 1;
                } else {
                    hi += 1;
                }
            }
        }

        Self {
            left: lo,
            right: hi - 1,
        }
    }

    // Compute the maximum distance from `x_current` to any point in the window.
    #[inline]
    pub fn max_distance<T: Float>(&self, x: &[T], x_current: T) -> T {
        T::max(
            (x_current - x[self.left]).abs(),
            (x[self.right] - x_current).abs(),
        )
    }

    // Neighbourhood size q from span and data length n.
    //
    // Spans above 1 use every point; the bandwidth is enlarged instead.
    #[inline]
    pub fn calculate_span<T: Float>(n: usize, span: T) -> usize {
        let epsilon = T::from(1e-5).unwrap_or_else(T::epsilon);
        let frac_n = span.min(T::one()) * T::from(n).unwrap_or_else(T::zero) + epsilon;
        let frac_n_int = frac_n.floor().to_usize().unwrap_or(0);
        usize::max(1, usize::min(n, frac_n_int))
    }

    // Whether `idx` lies inside the window.
    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        self.left <= idx && idx <= self.right
    }

    // Check if the window is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.right < self.left
    }

    // Get the number of points in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.right + 1 - self.left
    }
}
