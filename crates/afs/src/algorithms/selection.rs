//! Window selection.
//!
//! ## Purpose
//!
//! This module keeps, inside every anchor-to-anchor window, the pixels whose
//! ratio to the first-pass baseline reaches the window's `q`-quantile. Those
//! pixels are the ones least affected by lines and feed the final fit.
//!
//! ## Design notes
//!
//! * **Inclusive windows**: Window `(a, b)` covers pixels `a..=b`, so
//!   neighbouring windows share their anchor.
//! * **Local thresholds**: Each window is compared against its own quantile only.
//! * **Constant windows**: A window whose ratios are all equal has no
//!   meaningful quantile and is rejected, unless the caller allows it, in
//!   which case every pixel of the window is selected.
//!
//! ## Invariants
//!
//! * The selected set is strictly ascending.
//! * Every selected pixel reaches the threshold of a window containing it.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use log::trace;
use num_traits::Float;

// Internal dependencies
use crate::math::quantile::quantile_inplace;
use crate::primitives::errors::{AfsError, WindowDefect};
use crate::primitives::window::Window;

/// Outcome of the per-window quantile selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<T> {
    /// Selected pixels, ascending and unique.
    pub indices: Vec<usize>,

    /// Windows in anchor order.
    pub windows: Vec<Window>,

    /// Quantile threshold of each window.
    pub thresholds: Vec<T>,
}

/// `intensity[i] / baseline[i]` for every pixel.
pub fn ratios<T: Float>(intensity: &[T], baseline: &[T]) -> Vec<T> {
    intensity
        .iter()
        .zip(baseline.iter())
        .map(|(&y, &b)| y / b)
        .collect()
}

/// Consecutive anchor pairs as inclusive windows.
pub fn anchor_windows(anchors: &[usize]) -> Vec<Window> {
    anchors
        .windows(2)
        .map(|pair| Window::between(pair[0], pair[1]))
        .collect()
}

/// Select the pixels at or above the `q`-quantile of each window.
pub fn select_in_windows<T: Float>(
    ratio: &[T],
    anchors: &[usize],
    q: T,
    allow_constant: bool,
) -> Result<Selection<T>, AfsError> {
    let windows = anchor_windows(anchors);
    let mut thresholds = Vec::with_capacity(windows.len());
    let mut indices = Vec::new();
    let mut scratch = Vec::new();

    for window in windows.iter() {
        let degenerate = |reason| AfsError::DegenerateWindow {
            left: window.left,
            right: window.right,
            reason,
        };

        if window.is_empty() || window.right >= ratio.len() {
            return Err(degenerate(WindowDefect::Empty));
        }

        let values = &ratio[window.left..=window.right];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(degenerate(WindowDefect::NonFiniteRatio));
        }
        if !allow_constant && values.iter().all(|&v| v == values[0]) {
            return Err(degenerate(WindowDefect::ConstantRatio));
        }

        scratch.clear();
        scratch.extend_from_slice(values);
        let threshold = quantile_inplace(&mut scratch, q);

        let before = indices.len();
        indices.extend((window.left..=window.right).filter(|&i| ratio[i] >= threshold));
        trace!(
            "window [{}, {}]: kept {} of {} pixel(s)",
            window.left,
            window.right,
            indices.len() - before,
            window.len()
        );

        thresholds.push(threshold);
    }

    indices.sort_unstable();
    indices.dedup();

    Ok(Selection {
        indices,
        windows,
        thresholds,
    })
}
