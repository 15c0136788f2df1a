//! Point scaler.
//!
//! The alpha shape uses a single radius over both axes, so the intensity
//! axis is rescaled to be commensurate with the wavelength axis before the
//! boundary is computed:
//!
//! ```text
//! u = (wv_max - wv_min) / divisor / intens_max      (divisor = 10 by default)
//! ```
//!
//! After scaling, the intensity axis spans a tenth of the wavelength range
//! whatever the input units are.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::AfsError;
use crate::primitives::order::{Order, Point};

/// Default ratio between the wavelength range and the scaled intensity range.
pub const DEFAULT_SCALE_DIVISOR: f64 = 10.0;

/// Copy of an order with intensities multiplied by the scale factor `u`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledOrder<'a, T> {
    /// Wavelength column, shared with the source order.
    pub wavelength: &'a [T],

    /// Scaled intensity column.
    pub intensity: Vec<T>,

    /// Scale factor applied to the intensities.
    pub factor: T,
}

impl<'a, T: Float> ScaledOrder<'a, T> {
    /// Scale `order` so its intensities span `range / divisor`.
    pub fn new(order: &Order<'a, T>, divisor: T) -> Result<Self, AfsError> {
        let factor = scale_factor(order, divisor)?;

        Ok(Self {
            wavelength: order.wavelength,
            intensity: order.intensity.iter().map(|&v| v * factor).collect(),
            factor,
        })
    }

    /// Undo the scaling, recovering the original intensities.
    pub fn unscale(&self) -> Vec<T> {
        self.intensity.iter().map(|&v| v / self.factor).collect()
    }

    /// Point cloud `(wavelength, scaled intensity)`, one point per pixel.
    pub fn points(&self) -> Vec<Point<T>> {
        Order::new(self.wavelength, &self.intensity).points()
    }
}

/// Scale factor `u = range / divisor / max_intensity`.
pub fn scale_factor<T: Float>(order: &Order<'_, T>, divisor: T) -> Result<T, AfsError> {
    let max = order.max_intensity();
    if !(max > T::zero()) {
        return Err(AfsError::NonPositiveMaxIntensity(
            max.to_f64().unwrap_or(f64::NAN),
        ));
    }

    let range = order.wavelength_range();
    if !(range > T::zero()) {
        return Err(AfsError::ZeroWavelengthRange);
    }

    Ok(range / divisor / max)
}
