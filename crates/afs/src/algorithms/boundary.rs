//! Boundary extraction.
//!
//! ## Purpose
//!
//! This module computes the alpha shape of the scaled point cloud and turns
//! each polygon's exterior ring into a loop of pixel indices.
//!
//! ## Design notes
//!
//! * **Alpha**: `alpha = (wv_max - wv_min) / divisor` from the unscaled
//!   wavelength range (divisor 6 by default); the capability receives `1 / alpha`.
//! * **Lookup by value**: Vertices are mapped back to pixels through a
//!   [`WavelengthIndex`] built once per call.
//! * **Open loops**: The closing vertex of every ring is dropped here.
//!
//! ## Invariants
//!
//! * Every index of every loop is a valid pixel of the order.
//! * `wavelength[idx]` equals the x-coordinate of the vertex it came from.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use log::debug;
use num_traits::Float;

// Internal dependencies
use crate::geometry::alpha_shape::{AlphaShape, AlphaShapeBuilder};
use crate::math::scaling::ScaledOrder;
use crate::primitives::errors::AfsError;
use crate::primitives::lookup::WavelengthIndex;

/// Default ratio between the wavelength range and alpha.
pub const DEFAULT_ALPHA_DIVISOR: f64 = 6.0;

/// Open loop of pixel indices along one polygon's exterior.
pub type BoundaryLoop = Vec<usize>;

/// Alpha radius for a wavelength range.
#[inline]
pub fn alpha_radius<T: Float>(wavelength_range: T, divisor: T) -> T {
    wavelength_range / divisor
}

/// Map every exterior ring of `shape` onto pixel indices.
pub fn shape_to_loops<T: Float>(
    shape: &AlphaShape<T>,
    index: &WavelengthIndex<T>,
) -> Result<Vec<BoundaryLoop>, AfsError> {
    if shape.is_empty() {
        return Err(AfsError::EmptyAlphaShape);
    }

    shape
        .rings()
        .iter()
        .map(|ring| {
            let mut indices = ring
                .iter()
                .map(|p| {
                    index
                        .index_of(p.x)
                        .ok_or(AfsError::UnmatchedBoundaryVertex {
                            wavelength: p.x.to_f64().unwrap_or(f64::NAN),
                        })
                })
                .collect::<Result<Vec<usize>, AfsError>>()?;

            // Closed-ring convention
            if indices.len() > 1 && indices.first() == indices.last() {
                indices.pop();
            }
            Ok(indices)
        })
        .collect()
}

/// Compute the boundary loops of a scaled order.
pub fn extract_boundary<T, A>(
    builder: &A,
    scaled: &ScaledOrder<'_, T>,
    alpha: T,
) -> Result<Vec<BoundaryLoop>, AfsError>
where
    T: Float,
    A: AlphaShapeBuilder<T> + ?Sized,
{
    let points = scaled.points();
    let shape = builder.alpha_shape(&points, T::one() / alpha)?;

    let index = WavelengthIndex::new(scaled.wavelength);
    let loops = shape_to_loops(&shape, &index)?;

    debug!(
        "alpha shape: {} polygon(s), {} boundary vertices",
        loops.len(),
        loops.iter().map(Vec::len).sum::<usize>()
    );

    Ok(loops)
}
