//! Envelope interpolation.
//!
//! ## Purpose
//!
//! This module replaces the intensity of every pixel by the straight line
//! joining the anchors on either side of it, giving the piecewise-linear
//! envelope the first regression pass is fitted to.
//!
//! ## Key concepts
//!
//! * **Bracketing**: Pixel `i` uses the smallest anchor `b > i` and the anchor
//!   `a` just before it, so anchors keep their own intensity exactly.
//! * **Early stop**: Pixels at or beyond the last anchor keep their observed
//!   intensity. Since `n - 1` is never an anchor, the last pixel always does;
//!   any pixel between the last anchor and the last pixel is reported with a
//!   warning.
//!
//! ## Invariants
//!
//! * The envelope has the same length as the order.
//! * `envelope[a] == intensity[a]` for every anchor `a`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use log::warn;
use num_traits::Float;

// Internal dependencies
use crate::primitives::order::Order;

/// Piecewise-linear envelope of an order.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    /// Envelope intensity per pixel.
    pub intensity: Vec<T>,

    /// Number of leading pixels covered by an anchor bracket.
    ///
    /// Pixels from this index on keep their observed intensity. Equals the
    /// last anchor when the anchor set ends before `n - 1`.
    pub covered: usize,
}

/// Interpolate the order's intensity linearly between consecutive anchors.
pub fn interpolate_envelope<T: Float>(order: &Order<'_, T>, anchors: &[usize]) -> Envelope<T> {
    let n = order.len();
    let wv = order.wavelength;
    let intens = order.intensity;
    let mut envelope = intens.to_vec();
    let mut covered = 0;

    for i in 0..n.saturating_sub(1) {
        let next = anchors.partition_point(|&a| a <= i);
        if next == anchors.len() {
            break;
        }
        covered = i + 1;
        if next == 0 {
            continue;
        }

        let a = anchors[next - 1];
        let b = anchors[next];
        envelope[i] = intens[a] + (intens[b] - intens[a]) * ((wv[i] - wv[a]) / (wv[b] - wv[a]));
    }

    // The last pixel is never interpolated; anything between it and the last
    // anchor is the early-stop case
    if covered + 2 < n {
        warn!(
            "envelope stops at pixel {}: pixels {}..={} keep their observed intensity",
            covered,
            covered + 1,
            n - 2
        );
    }

    Envelope {
        intensity: envelope,
        covered,
    }
}
