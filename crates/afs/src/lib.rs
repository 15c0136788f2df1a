//! # AFS — Alpha-shape Fitting to Spectrum
//!
//! Blaze removal and continuum normalization for a single echelle order.
//!
//! ## What is AFS?
//!
//! An echelle order is the observed spectrum multiplied by a smooth
//! instrumental envelope (the blaze function). AFS estimates that envelope
//! from the geometry of the spectrum itself: the upper boundary of the
//! order's concave hull touches the continuum between absorption lines, a
//! local regression over that boundary gives a first baseline, and the
//! pixels that sit highest above the baseline inside each boundary window are
//! re-fitted to give the final continuum. Dividing by it yields the
//! normalized spectrum.
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use afs::prelude::*;
//!
//! let wavelength: Vec<f64> = (0..40).map(|i| 4000.0 + 0.05 * i as f64).collect();
//! let intensity: Vec<f64> = (0..40)
//!     .map(|i| {
//!         let line = if i % 7 == 3 { 20.0 } else { 0.0 };
//!         50.0 + 5.0 * (std::f64::consts::PI * i as f64 / 39.0).sin() - line
//!     })
//!     .collect();
//!
//! // Build the model
//! let model = Afs::new()
//!     .quantile(0.95)     // Window-local selection quantile
//!     .span(0.25)         // Loess span
//!     .build()?;
//!
//! // Normalize the order
//! let result = model.normalize(&wavelength, &intensity)?;
//!
//! assert_eq!(result.normalized.len(), wavelength.len());
//! # Result::<(), AfsError>::Ok(())
//! ```
//!
//! ### Shortcut
//!
//! ```rust
//! use afs::prelude::*;
//!
//! let wavelength: Vec<f64> = (0..40).map(|i| 4000.0 + 0.05 * i as f64).collect();
//! let intensity: Vec<f64> = (0..40)
//!     .map(|i| {
//!         let line = if i % 7 == 3 { 20.0 } else { 0.0 };
//!         50.0 + 5.0 * (std::f64::consts::PI * i as f64 / 39.0).sin() - line
//!     })
//!     .collect();
//!
//! let normalized = afs(&wavelength, &intensity)?;
//! assert_eq!(normalized.len(), 40);
//! # Result::<(), AfsError>::Ok(())
//! ```
//!
//! ### Diagnostics
//!
//! `.return_diagnostics()` keeps every intermediate product (scale factor,
//! alpha, boundary loops, anchors, envelope, baseline, ratios, selected
//! pixels and continuum) in [`AfsResult::diagnostics`](prelude::AfsResult).
//! The result implements `Display` as a table.
//!
//! ### Constant windows
//!
//! A selection window whose ratios are all identical has no meaningful
//! quantile and fails with [`AfsError::DegenerateWindow`](prelude::AfsError::DegenerateWindow).
//! `.allow_constant_windows()` selects such windows whole instead; small
//! noise-free test orders usually need it.
//!
//! ## Collaborators
//!
//! The pipeline needs two capabilities, both behind traits:
//!
//! | Capability       | Trait                                         | Default               |
//! |------------------|-----------------------------------------------|-----------------------|
//! | Alpha shape      | `AlphaShapeBuilder`                           | `DelaunayAlphaShape`  |
//! | Local regression | `LocalRegression` / `RegressionModel`         | `Loess` (degree 2)    |
//!
//! Replace either with `.alpha_shape(..)` or `.regression(..)` on the builder.
//!
//! ## Parameters
//!
//! | Parameter          | Default | Meaning                                             |
//! |--------------------|---------|-----------------------------------------------------|
//! | `quantile`         | 0.95    | Window-local selection quantile, in `(0, 1)`        |
//! | `span`             | 0.25    | Loess span, in `(0, 1)`                             |
//! | `degree`           | 2       | Loess polynomial degree                             |
//! | `alpha_divisor`    | 6       | `alpha = wavelength_range / alpha_divisor`          |
//! | `scale_divisor`    | 10      | `u = wavelength_range / scale_divisor / max(I)`     |
//!
//! ## Features
//!
//! * `std` (default): standard library support. Without it the crate is `no_std + alloc`.
//! * `parallel`: `normalize_orders` spreads orders over the rayon thread pool.
//! * `serde`: `Serialize`/`Deserialize` for configuration and result types.
//! * `dev`: exposes the internal layers under `afs::internals`.
//!
//! ## Logging
//!
//! Stages report through the `log` facade: `debug!` per stage, `trace!` per
//! selection window and `warn!` when the envelope stops before the last pixel.
//! No logger is installed by the library.
//!
//! ## References
//!
//! - Xu, X., Cisewski-Kehe, J., Davis, A. B., Fischer, D. A., Brewer, J. M. (2019).
//!   "Modeling the Echelle Spectra Continuum with Alpha Shapes and Local Regression Fitting"
//! - Cleveland, W. S., Grosse, E., Shyu, W. M. (1992). "Local regression models"

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Geometry - triangulation and alpha shapes.
mod geometry;

// Layer 4: Algorithms - stages of the continuum fit.
mod algorithms;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// High-level fluent API for AFS.
mod api;

pub use api::{afs, afs_with};

// Standard AFS prelude.
pub mod prelude {
    pub use crate::api::{
        AfsBuilder as Afs, AfsDiagnostics, AfsError, AfsModel, AfsResult, AlphaShape,
        AlphaShapeBuilder, DelaunayAlphaShape, ErrorKind, LocalRegression, Loess, LoessModel,
        Order, Point, RegressionError, RegressionModel, Ring, Stage, WindowDefect,
        WeightFunction::Biweight,
        WeightFunction::Epanechnikov,
        WeightFunction::Tricube,
        afs, afs_with,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod geometry {
        pub use crate::geometry::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
