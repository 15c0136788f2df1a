//! Sorting utilities for regression input data.
//!
//! ## Purpose
//!
//! Local regression needs its samples sorted by x so neighbourhoods are
//! contiguous. Pipeline inputs are already sorted (wavelengths increase and
//! selected indices are ascending); caller-supplied data might not be.
//!
//! ## Design notes
//!
//! * **Fast path**: Already-sorted input is copied without sorting.
//! * **Stability**: Uses stable sorting to preserve the relative order of equal x-values.
//!
//! ## Invariants
//!
//! * Sorted x-values are non-decreasing.
//! * `y` stays paired with its `x`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

/// Samples sorted by x-coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedData<T> {
    /// Sorted x-coordinates.
    pub x: Vec<T>,

    /// Y-coordinates reordered to match sorted x-coordinates.
    pub y: Vec<T>,
}

/// Sort paired samples by x-coordinate in ascending order.
#[inline]
pub fn sort_by_x<T: Float>(x: &[T], y: &[T]) -> SortedData<T> {
    // Fast path: check if data is already sorted by x
    if x.windows(2).all(|w| w[0] <= w[1]) {
        return SortedData {
            x: x.to_vec(),
            y: y.to_vec(),
        };
    }

    let mut pairs: Vec<(T, T)> = x.iter().copied().zip(y.iter().copied()).collect();

    // Stable sort to preserve order of equal x values for determinism
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    SortedData {
        x: pairs.iter().map(|p| p.0).collect(),
        y: pairs.iter().map(|p| p.1).collect(),
    }
}
