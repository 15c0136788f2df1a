//! Sample quantiles.
//!
//! Linear interpolation between order statistics: for `m` values and level
//! `q`, `h = (m - 1) q` and the quantile is `x[⌊h⌋] + (h - ⌊h⌋)(x[⌊h⌋+1] - x[⌊h⌋])`
//! over the sorted values. This is Hyndman & Fan's definition 7, the default
//! of the common numerical stacks.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

/// Quantile of `vals` at level `q` in `[0, 1]`.
///
/// Sorts `vals` in place. Returns NaN for an empty slice.
pub fn quantile_inplace<T: Float>(vals: &mut [T], q: T) -> T {
    let m = vals.len();
    if m == 0 {
        return T::nan();
    }

    vals.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));

    if m == 1 {
        return vals[0];
    }

    let q = q.max(T::zero()).min(T::one());
    let h = T::from(m - 1).unwrap_or_else(T::zero) * q;
    let lo = h.floor();
    let frac = h - lo;
    let lo_idx = lo.to_usize().unwrap_or(0).min(m - 1);
    let hi_idx = (lo_idx + 1).min(m - 1);

    vals[lo_idx] + frac * (vals[hi_idx] - vals[lo_idx])
}
