//! Kernel (weight) functions for local regression.
//!
//! ## Purpose
//!
//! This module provides kernel functions that turn the distance between a
//! sample and the query point into a regression weight.
//!
//! ## Design notes
//!
//! * **Normalization**: Maps distances u = |x - x_i| / bandwidth to weights.
//! * **Support**: All kernels are bounded on [-1, 1].
//! * **Thresholds**: Points within `h1` of the query get weight 1, points
//!   beyond `h9` get weight 0, following the classic loess implementation.
//!
//! ## Invariants
//!
//! * Kernels are non-negative (K(u) >= 0) and symmetric (K(u) = K(-u)).
//! * Kernels return exactly zero outside their support.

// External dependencies
use num_traits::Float;

// ============================================================================
// Weight Function Enum
// ============================================================================

/// Weight function (kernel) for local regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeightFunction {
    /// Tricube kernel: K(u) = (1 - |u|^3)^3 for |u| < 1.
    ///
    /// This is the kernel used by loess and the default.
    #[default]
    Tricube,

    /// Biweight (quartic) kernel: K(u) = (1 - u^2)^2 for |u| < 1.
    Biweight,

    /// Epanechnikov kernel: K(u) = (1 - u^2) for |u| < 1.
    Epanechnikov,
}

impl WeightFunction {
    /// Get the name of the weight function.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            WeightFunction::Tricube => "Tricube",
            WeightFunction::Biweight => "Biweight",
            WeightFunction::Epanechnikov => "Epanechnikov",
        }
    }

    /// Evaluate the kernel at normalized distance `u`.
    #[inline]
    pub fn compute_weight<T: Float>(&self, u: T) -> T {
        let abs_u = u.abs();
        if abs_u >= T::one() {
            return T::zero();
        }

        match self {
            WeightFunction::Tricube => {
                let tmp = T::one() - abs_u * abs_u * abs_u;
                tmp * tmp * tmp
            }
            WeightFunction::Biweight => {
                let tmp = T::one() - abs_u * abs_u;
                tmp * tmp
            }
            WeightFunction::Epanechnikov => T::one() - abs_u * abs_u,
        }
    }

    /// Compute weights for the inclusive window `[left, right]` of sorted `x`.
    ///
    /// Writes into `weights[left..=right]` and returns the weight sum.
    #[allow(clippy::too_many_arguments)]
    pub fn compute_window_weights<T: Float>(
        &self,
        x: &[T],
        left: usize,
        right: usize,
        x_current: T,
        bandwidth: T,
        h1: T,
        h9: T,
        weights: &mut [T],
    ) -> T {
        let n = x.len();

        // Safety guard for empty input or invalid window
        if left >= n || right >= n || left > right {
            return T::zero();
        }

        // Degenerate bandwidth: zero all weights in window
        if bandwidth <= T::zero() {
            weights[left..=right].fill(T::zero());
            return T::zero();
        }

        let mut sum = T::zero();
        for j in left..=right {
            let distance = (x[j] - x_current).abs();

            let w_k = if distance > h9 {
                T::zero()
            } else if distance <= h1 {
                T::one()
            } else {
                self.compute_weight(distance / bandwidth)
            };

            weights[j] = w_k;
            sum = sum + w_k;
        }

        sum
    }
}
