//! Output types for AFS operations.
//!
//! ## Purpose
//!
//! This module defines [`AfsResult`], the normalized series of one order,
//! and [`AfsDiagnostics`], the intermediate products of the pipeline kept
//! when diagnostics are requested.
//!
//! ## Design notes
//!
//! * **Memory Efficiency**: Intermediates are only kept on request.
//! * **Ergonomics**: Implements `Display` for human-readable output.
//! * **Pixel order**: Every per-pixel vector follows the input pixel order.
//!
//! ## Invariants
//!
//! * `normalized` has one entry per input pixel.
//! * Per-pixel diagnostic vectors have the same length as `normalized`.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::boundary::BoundaryLoop;

// ============================================================================
// Diagnostics
// ============================================================================

/// Intermediate products of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AfsDiagnostics<T> {
    /// Intensity scale factor `u`.
    pub scale_factor: T,

    /// Alpha radius handed to the alpha shape as `1 / alpha`.
    pub alpha: T,

    /// Boundary loops, one per polygon, closing vertex dropped.
    pub loops: Vec<BoundaryLoop>,

    /// Anchor set.
    pub anchors: Vec<usize>,

    /// Piecewise-linear envelope over the anchors.
    pub envelope: Vec<T>,

    /// Number of leading pixels the envelope interpolated.
    pub envelope_covered: usize,

    /// First-pass baseline.
    pub baseline: Vec<T>,

    /// Intensity over baseline.
    pub ratios: Vec<T>,

    /// Quantile threshold of each anchor window.
    pub thresholds: Vec<T>,

    /// Pixels selected for the second pass.
    pub selected: Vec<usize>,

    /// Final continuum estimate.
    pub continuum: Vec<T>,
}

impl<T: Float> AfsDiagnostics<T> {
    /// Whether pixel `i` is an anchor.
    pub fn is_anchor(&self, i: usize) -> bool {
        self.anchors.binary_search(&i).is_ok()
    }

    /// Whether pixel `i` was selected for the second pass.
    pub fn is_selected(&self, i: usize) -> bool {
        self.selected.binary_search(&i).is_ok()
    }
}

impl<T: Float + Display> Display for AfsDiagnostics<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Diagnostics:")?;
        writeln!(f, "  Scale factor:   {}", self.scale_factor)?;
        writeln!(f, "  Alpha:          {}", self.alpha)?;
        writeln!(f, "  Polygons:       {}", self.loops.len())?;
        writeln!(f, "  Anchors:        {}", self.anchors.len())?;
        writeln!(f, "  Selected:       {}", self.selected.len())?;
        if self.envelope_covered + 2 < self.envelope.len() {
            writeln!(f, "  Envelope stops: pixel {}", self.envelope_covered)?;
        }
        Ok(())
    }
}

// ============================================================================
// Result Structure
// ============================================================================

/// Normalized intensity of one spectral order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AfsResult<T> {
    /// Wavelength of each pixel.
    pub wavelength: Vec<T>,

    /// Intensity divided by the continuum, per pixel.
    pub normalized: Vec<T>,

    /// Selection quantile used.
    pub quantile_used: T,

    /// Span of the default regression backend, if it was used.
    pub span_used: Option<T>,

    /// Intermediate products, when requested.
    pub diagnostics: Option<AfsDiagnostics<T>>,
}

impl<T: Float> AfsResult<T> {
    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    /// Whether the result has no pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Check if diagnostics were kept.
    pub fn has_diagnostics(&self) -> bool {
        self.diagnostics.is_some()
    }

    /// Consume the result, keeping only the normalized series.
    pub fn into_normalized(self) -> Vec<T> {
        self.normalized
    }
}

impl<T: Float + Display> Display for AfsResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Pixels:   {}", self.len())?;
        writeln!(f, "  Quantile: {}", self.quantile_used)?;
        if let Some(span) = self.span_used {
            writeln!(f, "  Span:     {}", span)?;
        }
        writeln!(f)?;

        if let Some(diag) = &self.diagnostics {
            writeln!(f, "{}", diag)?;
        }

        writeln!(f, "Normalized Data:")?;

        let diag = self.diagnostics.as_ref();
        write!(f, "{:>12} {:>12}", "Wavelength", "Normalized")?;
        if diag.is_some() {
            write!(f, " {:>12} {:>6}", "Continuum", "Flags")?;
        }
        writeln!(f)?;

        let line_width = 25 + if diag.is_some() { 20 } else { 0 };
        writeln!(f, "  {:-<width$}", "", width = line_width - 2)?;

        for i in 0..self.len() {
            write!(
                f,
                "{:>12.4} {:>12.5}",
                self.wavelength[i], self.normalized[i]
            )?;
            if let Some(d) = diag {
                let flags = match (d.is_anchor(i), d.is_selected(i)) {
                    (true, true) => "AS",
                    (true, false) => "A",
                    (false, true) => "S",
                    (false, false) => "",
                };
                write!(f, " {:>12.5} {:>6}", d.continuum[i], flags)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
