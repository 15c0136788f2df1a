//! Regression Logic
//!
//! ## Purpose
//!
//! This module provides the core data types and logic for local polynomial
//! fitting (loess), including:
//! - Context for fitting the curve at a single query point.
//! - Generic and SIMD-optimized accumulation of weighted moments.
//! - A small normal-equation solver with rank-deficiency fallback.
//!
//! Local coordinates are `u = (x - x0) / h`, so the fitted value at the query
//! `x0` is the constant coefficient and every moment stays within `[-1, 1]`.

// External dependencies
use num_traits::Float;
use wide::{f32x8, f64x2};

// Internal dependencies
use crate::math::kernel::WeightFunction;
use crate::primitives::window::Window;

/// Highest supported polynomial degree.
pub const MAX_DEGREE: usize = 2;

// ============================================================================
// Weighted Moments
// ============================================================================

/// Weighted moments of a local neighbourhood in local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments<T> {
    /// `s[k] = sum(w * u^k)` for `k` in `0..=4`.
    pub s: [T; 5],

    /// `t[k] = sum(w * u^k * y)` for `k` in `0..=2`.
    pub t: [T; 3],
}

impl<T: Float> Moments<T> {
    /// All-zero moments.
    pub fn zero() -> Self {
        Self {
            s: [T::zero(); 5],
            t: [T::zero(); 3],
        }
    }
}

/// Scalar accumulation of weighted moments (generic Float).
#[inline]
pub fn accumulate_moments_scalar<T: Float>(
    x: &[T],
    y: &[T],
    weights: &[T],
    x0: T,
    inv_h: T,
) -> Moments<T> {
    let mut m = Moments::zero();

    for ((&xi, &yi), &w) in x.iter().zip(y.iter()).zip(weights.iter()) {
        if w <= T::zero() {
            continue;
        }
        let u = (xi - x0) * inv_h;
        let wu = w * u;
        let wu2 = wu * u;

        m.s[0] = m.s[0] + w;
        m.s[1] = m.s[1] + wu;
        m.s[2] = m.s[2] + wu2;
        m.s[3] = m.s[3] + wu2 * u;
        m.s[4] = m.s[4] + wu2 * u * u;
        m.t[0] = m.t[0] + w * yi;
        m.t[1] = m.t[1] + wu * yi;
        m.t[2] = m.t[2] + wu2 * yi;
    }

    m
}

/// SIMD-optimized accumulation of weighted moments (f64).
#[inline]
pub fn accumulate_moments_simd_f64(
    x: &[f64],
    y: &[f64],
    weights: &[f64],
    x0: f64,
    inv_h: f64,
) -> Moments<f64> {
    let n = x.len().min(y.len()).min(weights.len());
    let lanes = n - n % 2;

    let origin = f64x2::splat(x0);
    let scale = f64x2::splat(inv_h);
    let mut s = [f64x2::splat(0.0); 5];
    let mut t = [f64x2::splat(0.0); 3];

    for ((xc, yc), wc) in x[..lanes]
        .chunks_exact(2)
        .zip(y[..lanes].chunks_exact(2))
        .zip(weights[..lanes].chunks_exact(2))
    {
        let w = f64x2::new([wc[0], wc[1]]);
        let u = (f64x2::new([xc[0], xc[1]]) - origin) * scale;
        let y_val = f64x2::new([yc[0], yc[1]]);

        let wu = w * u;
        let wu2 = wu * u;
        let wu3 = wu2 * u;

        s[0] += w;
        s[1] += wu;
        s[2] += wu2;
        s[3] += wu3;
        s[4] += wu3 * u;
        t[0] += w * y_val;
        t[1] += wu * y_val;
        t[2] += wu2 * y_val;
    }

    let mut m = Moments {
        s: s.map(|v| v.reduce_add()),
        t: t.map(|v| v.reduce_add()),
    };

    if lanes < n {
        let tail = accumulate_moments_scalar(
            &x[lanes..n],
            &y[lanes..n],
            &weights[lanes..n],
            x0,
            inv_h,
        );
        for k in 0..5 {
            m.s[k] += tail.s[k];
        }
        for k in 0..3 {
            m.t[k] += tail.t[k];
        }
    }

    m
}

/// SIMD-optimized accumulation of weighted moments (f32).
#[inline]
pub fn accumulate_moments_simd_f32(
    x: &[f32],
    y: &[f32],
    weights: &[f32],
    x0: f32,
    inv_h: f32,
) -> Moments<f32> {
    let n = x.len().min(y.len()).min(weights.len());
    let lanes = n - n % 8;

    let origin = f32x8::splat(x0);
    let scale = f32x8::splat(inv_h);
    let mut s = [f32x8::splat(0.0); 5];
    let mut t = [f32x8::splat(0.0); 3];

    for ((xc, yc), wc) in x[..lanes]
        .chunks_exact(8)
        .zip(y[..lanes].chunks_exact(8))
        .zip(weights[..lanes].chunks_exact(8))
    {
        let lane = |c: &[f32]| f32x8::new([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]);

        let w = lane(wc);
        let u = (lane(xc) - origin) * scale;
        let y_val = lane(yc);

        let wu = w * u;
        let wu2 = wu * u;
        let wu3 = wu2 * u;

        s[0] += w;
        s[1] += wu;
        s[2] += wu2;
        s[3] += wu3;
        s[4] += wu3 * u;
        t[0] += w * y_val;
        t[1] += wu * y_val;
        t[2] += wu2 * y_val;
    }

    let mut m = Moments {
        s: s.map(|v| v.reduce_add()),
        t: t.map(|v| v.reduce_add()),
    };

    if lanes < n {
        let tail = accumulate_moments_scalar(
            &x[lanes..n],
            &y[lanes..n],
            &weights[lanes..n],
            x0,
            inv_h,
        );
        for k in 0..5 {
            m.s[k] += tail.s[k];
        }
        for k in 0..3 {
            m.t[k] += tail.t[k];
        }
    }

    m
}

// ============================================================================
// Solver Trait
// ============================================================================

/// Trait for type-specific weighted least squares accumulation.
pub trait WLSSolver: Float {
    /// Accumulate weighted moments around `x0` with bandwidth `1 / inv_h`.
    #[inline]
    fn accumulate_moments(
        x: &[Self],
        y: &[Self],
        weights: &[Self],
        x0: Self,
        inv_h: Self,
    ) -> Moments<Self> {
        accumulate_moments_scalar(x, y, weights, x0, inv_h)
    }
}

impl WLSSolver for f64 {
    #[inline]
    fn accumulate_moments(
        x: &[f64],
        y: &[f64],
        weights: &[f64],
        x0: f64,
        inv_h: f64,
    ) -> Moments<f64> {
        accumulate_moments_simd_f64(x, y, weights, x0, inv_h)
    }
}

impl WLSSolver for f32 {
    #[inline]
    fn accumulate_moments(
        x: &[f32],
        y: &[f32],
        weights: &[f32],
        x0: f32,
        inv_h: f32,
    ) -> Moments<f32> {
        accumulate_moments_simd_f32(x, y, weights, x0, inv_h)
    }
}

// ============================================================================
// PolynomialFit
// ============================================================================

/// Local polynomial in `u = (x - x0) / h`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolynomialFit<T> {
    /// Coefficients of `1, u, u^2`; unused ones are zero.
    pub coefficients: [T; 3],

    /// Degree actually fitted (may be below the requested one).
    pub degree: usize,
}

impl<T: Float> PolynomialFit<T> {
    /// Evaluate at local coordinate `u`.
    #[inline]
    pub fn predict(&self, u: T) -> T {
        let [c0, c1, c2] = self.coefficients;
        c0 + u * (c1 + u * c2)
    }

    /// Solve the weighted normal equations for `degree`.
    ///
    /// A rank-deficient system (pivot below `tol`) is retried with the next
    /// lower degree; returns `None` only when the weights sum to zero.
    pub fn solve(m: &Moments<T>, degree: usize, tol: T) -> Option<Self> {
        if m.s[0] <= T::zero() {
            return None;
        }

        let mut d = degree.min(MAX_DEGREE);
        loop {
            if d == 0 {
                return Some(Self {
                    coefficients: [m.t[0] / m.s[0], T::zero(), T::zero()],
                    degree: 0,
                });
            }
            if let Some(coefficients) = solve_normal_equations(m, d, tol) {
                return Some(Self {
                    coefficients,
                    degree: d,
                });
            }
            d -= 1;
        }
    }
}

/// Gaussian elimination with partial pivoting on the `(d+1)x(d+1)` system
/// `sum_j s[i+j] c_j = t[i]`.
fn solve_normal_equations<T: Float>(m: &Moments<T>, d: usize, tol: T) -> Option<[T; 3]> {
    let k = d + 1;
    let mut a = [[T::zero(); 4]; 3];
    for i in 0..k {
        for j in 0..k {
            a[i][j] = m.s[i + j];
        }
        a[i][3] = m.t[i];
    }

    for col in 0..k {
        let pivot = (col..k).max_by(|&r1, &r2| {
            a[r1][col]
                .abs()
                .partial_cmp(&a[r2][col].abs())
                .unwrap_or(core::cmp::Ordering::Equal)
        })?;
        if !(a[pivot][col].abs() > tol) {
            return None;
        }
        a.swap(col, pivot);

        for row in (col + 1)..k {
            let factor = a[row][col] / a[col][col];
            for c in col..k {
                a[row][c] = a[row][c] - factor * a[col][c];
            }
            a[row][3] = a[row][3] - factor * a[col][3];
        }
    }

    let mut coefficients = [T::zero(); 3];
    for row in (0..k).rev() {
        let mut acc = a[row][3];
        for c in (row + 1)..k {
            acc = acc - a[row][c] * coefficients[c];
        }
        coefficients[row] = acc / a[row][row];
    }

    if coefficients.iter().all(|c| c.is_finite()) {
        Some(coefficients)
    } else {
        None
    }
}

// ============================================================================
// Regression Context
// ============================================================================

/// Context containing all data needed to fit a single query point.
pub struct RegressionContext<'a, T: Float> {
    /// Sorted x-values of the samples.
    pub x: &'a [T],

    /// y-values of the samples.
    pub y: &'a [T],

    /// Where the curve is evaluated.
    pub x_query: T,

    /// Nearest-neighbour window of `x_query`.
    pub window: Window,

    /// Bandwidth multiplier (1 unless the span exceeds 1).
    pub bandwidth_factor: T,

    /// Mutable slice of weights to be used in fitting.
    pub weights: &'a mut [T],

    /// Weight function (kernel).
    pub weight_function: WeightFunction,

    /// Requested polynomial degree.
    pub degree: usize,
}

impl<'a, T: Float + WLSSolver> RegressionContext<'a, T> {
    /// Perform the local polynomial fit and return the value at `x_query`.
    pub fn fit(&mut self) -> Option<T> {
        let n = self.x.len();
        if n == 0 || self.window.left >= n || self.window.right >= n {
            return None;
        }

        let window_radius = self.window.max_distance(self.x, self.x_query) * self.bandwidth_factor;
        if window_radius <= T::zero() {
            return Some(self.local_mean());
        }

        let h1 = T::from(0.001).unwrap_or_else(T::zero) * window_radius;
        let h9 = T::from(0.999).unwrap_or_else(T::one) * window_radius;

        let weight_sum = self.weight_function.compute_window_weights(
            self.x,
            self.window.left,
            self.window.right,
            self.x_query,
            window_radius,
            h1,
            h9,
            self.weights,
        );

        if weight_sum <= T::zero() {
            return Some(self.local_mean());
        }

        let range = self.window.left..=self.window.right;
        let moments = T::accumulate_moments(
            &self.x[range.clone()],
            &self.y[range.clone()],
            &self.weights[range],
            self.x_query,
            T::one() / window_radius,
        );

        let tol = moments.s[0] * T::epsilon().sqrt();
        PolynomialFit::solve(&moments, self.degree, tol).map(|fit| fit.predict(T::zero()))
    }

    /// Unweighted mean of the window.
    fn local_mean(&self) -> T {
        let sum = self.y[self.window.left..=self.window.right]
            .iter()
            .copied()
            .fold(T::zero(), |acc, v| acc + v);
        sum / T::from(self.window.len()).unwrap_or_else(T::one)
    }
}
