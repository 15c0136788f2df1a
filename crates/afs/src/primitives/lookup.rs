//! Wavelength to pixel-index mapping.
//!
//! Boundary vertices come back from the alpha-shape capability as bare
//! coordinates. This index recovers the originating pixel of each vertex by
//! exact wavelength match: built once in O(n log n), queried in O(log n).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

/// Sorted `(wavelength, pixel)` table supporting exact-value lookups.
#[derive(Debug, Clone)]
pub struct WavelengthIndex<T> {
    entries: Vec<(T, usize)>,
}

impl<T: Float> WavelengthIndex<T> {
    /// Build the index from a wavelength column.
    pub fn new(wavelength: &[T]) -> Self {
        let mut entries: Vec<(T, usize)> = wavelength
            .iter()
            .enumerate()
            .map(|(i, &w)| (w, i))
            .collect();

        // Validated orders are already sorted; the stable sort is then linear.
        entries.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        Self { entries }
    }

    /// Pixel whose wavelength equals `wavelength` exactly.
    ///
    /// With duplicate wavelengths the lowest pixel index wins.
    pub fn index_of(&self, wavelength: T) -> Option<usize> {
        let pos = self.entries.partition_point(|&(w, _)| w < wavelength);
        match self.entries.get(pos) {
            Some(&(w, idx)) if w == wavelength => Some(idx),
            _ => None,
        }
    }

    /// Number of indexed pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
