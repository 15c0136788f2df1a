//! Spectral order and point-cloud types.
//!
//! ## Purpose
//!
//! This module defines the borrowed view of one echelle order that every
//! pipeline stage reads, and the 2-D points handed to the alpha-shape
//! capability.
//!
//! ## Invariants
//!
//! * An `Order` is only guaranteed well-formed after it passed the validator
//!   (`n >= 3`, strictly increasing wavelengths, finite non-negative intensities).
//! * A `Point` keeps the exact wavelength of the pixel it came from, so the
//!   pixel can be recovered by value.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// ============================================================================
// Order
// ============================================================================

/// One spectral order: paired wavelength and intensity columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Order<'a, T> {
    /// Wavelength per pixel, strictly increasing.
    pub wavelength: &'a [T],

    /// Observed intensity per pixel.
    pub intensity: &'a [T],
}

impl<'a, T: Float> Order<'a, T> {
    /// Wrap two columns without validating them.
    #[inline]
    pub fn new(wavelength: &'a [T], intensity: &'a [T]) -> Self {
        Self {
            wavelength,
            intensity,
        }
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    /// Whether the order has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }

    /// `max(wavelength) - min(wavelength)`.
    ///
    /// Computed from the extremes rather than the endpoints so that it is also
    /// meaningful for orders that have not been validated yet.
    pub fn wavelength_range(&self) -> T {
        let (lo, hi) = self
            .wavelength
            .iter()
            .fold((T::infinity(), T::neg_infinity()), |(lo, hi), &w| {
                (lo.min(w), hi.max(w))
            });
        if lo > hi { T::zero() } else { hi - lo }
    }

    /// Largest intensity of the order.
    pub fn max_intensity(&self) -> T {
        self.intensity
            .iter()
            .copied()
            .fold(T::neg_infinity(), T::max)
    }

    /// Build the point cloud `(wavelength, intensity)`, one point per pixel.
    pub fn points(&self) -> Vec<Point<T>> {
        self.wavelength
            .iter()
            .zip(self.intensity.iter())
            .map(|(&x, &y)| Point::new(x, y))
            .collect()
    }
}

// ============================================================================
// Point
// ============================================================================

/// A point of the 2-D cloud the alpha shape is computed over.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<T> {
    /// Wavelength coordinate.
    pub x: T,

    /// Scaled intensity coordinate.
    pub y: T,
}

impl<T: Float> Point<T> {
    /// Create a point.
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}
