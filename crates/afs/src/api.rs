//! High-level API for AFS continuum normalization.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry points: a fluent builder
//! configuring the pipeline and its collaborators, the [`AfsModel`] it
//! produces, and the [`afs`] shortcut running the defaults.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are checked when `.build()` is called.
//! * **Pluggable**: `.regression(..)` and `.alpha_shape(..)` swap the
//!   collaborators; span and degree only exist while the default loess
//!   backend is in place.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create an [`AfsBuilder`] via `Afs::new()`.
//! 2. Chain configuration methods (`.quantile()`, `.span()`, etc.).
//! 3. Call `.build()` and normalize orders with the returned model.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::algorithms::regression::WLSSolver;
use crate::engine::executor::{AfsConfig, AfsExecutor};
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::boundary::DEFAULT_ALPHA_DIVISOR;
pub use crate::algorithms::loess::{LocalRegression, Loess, LoessModel, RegressionModel};
pub use crate::engine::output::{AfsDiagnostics, AfsResult};
pub use crate::geometry::alpha_shape::{AlphaShape, AlphaShapeBuilder, DelaunayAlphaShape, Ring};
pub use crate::math::kernel::WeightFunction;
pub use crate::math::scaling::DEFAULT_SCALE_DIVISOR;
pub use crate::primitives::errors::{AfsError, ErrorKind, RegressionError, Stage, WindowDefect};
pub use crate::primitives::order::{Order, Point};

/// Default window-local selection quantile.
pub const DEFAULT_QUANTILE: f64 = 0.95;

/// Default span of the loess backend.
pub const DEFAULT_SPAN: f64 = 0.25;

#[inline]
fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring the AFS pipeline.
#[derive(Debug, Clone)]
pub struct AfsBuilder<T, R = Loess<T>, A = DelaunayAlphaShape> {
    /// Window-local selection quantile (0..1).
    pub quantile: Option<T>,

    /// Span of the default loess backend (0..1).
    pub span: Option<T>,

    /// Degree of the default loess backend.
    pub degree: Option<usize>,

    /// Kernel of the default loess backend.
    pub weight_function: Option<WeightFunction>,

    /// Alpha radius divisor.
    pub alpha_divisor: Option<T>,

    /// Intensity scale divisor.
    pub scale_divisor: Option<T>,

    /// Keep intermediate products in the result.
    pub return_diagnostics: Option<bool>,

    /// Select constant-ratio windows whole instead of failing.
    pub allow_constant_windows: Option<bool>,

    /// Local regression used for both passes.
    pub regression: R,

    /// Alpha-shape capability.
    pub alpha_shape: A,

    /// Whether `regression` is the builder's own loess backend.
    default_regression: bool,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for AfsBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> AfsBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            quantile: None,
            span: None,
            degree: None,
            weight_function: None,
            alpha_divisor: None,
            scale_divisor: None,
            return_diagnostics: None,
            allow_constant_windows: None,
            regression: Loess::new(constant(DEFAULT_SPAN)),
            alpha_shape: DelaunayAlphaShape,
            default_regression: true,
            duplicate_param: None,
        }
    }
}

impl<T: Float, A> AfsBuilder<T, Loess<T>, A> {
    /// Set the span of the loess backend.
    pub fn span(mut self, span: T) -> Self {
        if self.span.is_some() {
            self.duplicate_param = Some("span");
        }
        self.span = Some(span);
        self.regression.span = span;
        self
    }

    /// Set the degree of the loess backend (0, 1 or 2).
    pub fn degree(mut self, degree: usize) -> Self {
        if self.degree.is_some() {
            self.duplicate_param = Some("degree");
        }
        self.degree = Some(degree);
        self.regression.degree = degree;
        self
    }

    /// Set the kernel of the loess backend.
    pub fn weight_function(mut self, weight_function: WeightFunction) -> Self {
        if self.weight_function.is_some() {
            self.duplicate_param = Some("weight_function");
        }
        self.weight_function = Some(weight_function);
        self.regression.weight_function = weight_function;
        self
    }
}

impl<T: Float, R, A> AfsBuilder<T, R, A> {
    /// Set the window-local selection quantile.
    pub fn quantile(mut self, quantile: T) -> Self {
        if self.quantile.is_some() {
            self.duplicate_param = Some("quantile");
        }
        self.quantile = Some(quantile);
        self
    }

    /// Set the alpha radius divisor (`alpha = wavelength_range / divisor`).
    pub fn alpha_divisor(mut self, divisor: T) -> Self {
        if self.alpha_divisor.is_some() {
            self.duplicate_param = Some("alpha_divisor");
        }
        self.alpha_divisor = Some(divisor);
        self
    }

    /// Set the intensity scale divisor
    /// (`u = wavelength_range / divisor / max_intensity`).
    pub fn scale_divisor(mut self, divisor: T) -> Self {
        if self.scale_divisor.is_some() {
            self.duplicate_param = Some("scale_divisor");
        }
        self.scale_divisor = Some(divisor);
        self
    }

    /// Keep the intermediate products of the pipeline in the result.
    pub fn return_diagnostics(mut self) -> Self {
        self.return_diagnostics = Some(true);
        self
    }

    /// Select every pixel of a window whose ratios are all identical,
    /// instead of failing with a degenerate-window error.
    ///
    /// Noise-free synthetic orders can produce such windows when the first
    /// pass reproduces the envelope exactly at neighbouring anchors.
    pub fn allow_constant_windows(mut self) -> Self {
        self.allow_constant_windows = Some(true);
        self
    }

    /// Replace the local regression backend.
    ///
    /// Span, degree and kernel set before this call no longer apply.
    pub fn regression<R2: LocalRegression<T>>(self, regression: R2) -> AfsBuilder<T, R2, A> {
        AfsBuilder {
            quantile: self.quantile,
            span: None,
            degree: None,
            weight_function: None,
            alpha_divisor: self.alpha_divisor,
            scale_divisor: self.scale_divisor,
            return_diagnostics: self.return_diagnostics,
            allow_constant_windows: self.allow_constant_windows,
            regression,
            alpha_shape: self.alpha_shape,
            default_regression: false,
            duplicate_param: self.duplicate_param,
        }
    }

    /// Replace the alpha-shape capability.
    pub fn alpha_shape<A2: AlphaShapeBuilder<T>>(self, alpha_shape: A2) -> AfsBuilder<T, R, A2> {
        AfsBuilder {
            quantile: self.quantile,
            span: self.span,
            degree: self.degree,
            weight_function: self.weight_function,
            alpha_divisor: self.alpha_divisor,
            scale_divisor: self.scale_divisor,
            return_diagnostics: self.return_diagnostics,
            allow_constant_windows: self.allow_constant_windows,
            regression: self.regression,
            alpha_shape,
            default_regression: self.default_regression,
            duplicate_param: self.duplicate_param,
        }
    }
}

impl<T, R, A> AfsBuilder<T, R, A>
where
    T: Float,
    R: LocalRegression<T>,
    A: AlphaShapeBuilder<T>,
{
    /// Validate the configuration and build the model.
    pub fn build(self) -> Result<AfsModel<T, R, A>, AfsError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let quantile = self.quantile.unwrap_or_else(|| constant(DEFAULT_QUANTILE));
        Validator::validate_quantile(quantile)?;

        if let Some(span) = self.span {
            Validator::validate_span(span)?;
        }
        if let Some(degree) = self.degree {
            Validator::validate_degree(degree)?;
        }

        let alpha_divisor = self
            .alpha_divisor
            .unwrap_or_else(|| constant(DEFAULT_ALPHA_DIVISOR));
        Validator::validate_divisor("alpha_divisor", alpha_divisor)?;

        let scale_divisor = self
            .scale_divisor
            .unwrap_or_else(|| constant(DEFAULT_SCALE_DIVISOR));
        Validator::validate_divisor("scale_divisor", scale_divisor)?;

        let span = if self.default_regression {
            Some(self.span.unwrap_or_else(|| constant(DEFAULT_SPAN)))
        } else {
            None
        };

        let config = AfsConfig {
            quantile,
            span,
            alpha_divisor,
            scale_divisor,
            return_diagnostics: self.return_diagnostics.unwrap_or(false),
            allow_constant_windows: self.allow_constant_windows.unwrap_or(false),
        };

        Ok(AfsModel {
            executor: AfsExecutor::new(config, self.regression, self.alpha_shape),
        })
    }
}

// ============================================================================
// Model
// ============================================================================

/// Configured AFS pipeline.
#[derive(Debug, Clone)]
pub struct AfsModel<T, R = Loess<T>, A = DelaunayAlphaShape> {
    executor: AfsExecutor<T, R, A>,
}

impl<T, R, A> AfsModel<T, R, A>
where
    T: Float,
    R: LocalRegression<T>,
    A: AlphaShapeBuilder<T>,
{
    /// Configuration the model was built with.
    pub fn config(&self) -> &AfsConfig<T> {
        &self.executor.config
    }

    /// Normalize one spectral order.
    pub fn normalize(&self, wavelength: &[T], intensity: &[T]) -> Result<AfsResult<T>, AfsError> {
        self.executor.run(wavelength, intensity)
    }

    /// Normalize several independent orders, in input order.
    ///
    /// The first failing order aborts the batch.
    #[cfg(not(feature = "parallel"))]
    pub fn normalize_orders(&self, orders: &[Order<'_, T>]) -> Result<Vec<AfsResult<T>>, AfsError> {
        orders
            .iter()
            .map(|order| self.normalize(order.wavelength, order.intensity))
            .collect()
    }

    /// Normalize several independent orders, in input order, across the
    /// rayon thread pool.
    ///
    /// The first failing order aborts the batch.
    #[cfg(feature = "parallel")]
    pub fn normalize_orders(&self, orders: &[Order<'_, T>]) -> Result<Vec<AfsResult<T>>, AfsError>
    where
        T: Send + Sync,
        R: Sync,
        A: Sync,
    {
        orders
            .par_iter()
            .map(|order| self.normalize(order.wavelength, order.intensity))
            .collect()
    }
}

// ============================================================================
// Shortcuts
// ============================================================================

/// Normalize one order with the default quantile (0.95) and span (0.25).
pub fn afs<T: Float + WLSSolver>(wavelength: &[T], intensity: &[T]) -> Result<Vec<T>, AfsError> {
    afs_with(
        wavelength,
        intensity,
        constant(DEFAULT_QUANTILE),
        constant(DEFAULT_SPAN),
    )
}

/// Normalize one order with an explicit quantile `q` and span `d`.
pub fn afs_with<T: Float + WLSSolver>(
    wavelength: &[T],
    intensity: &[T],
    q: T,
    d: T,
) -> Result<Vec<T>, AfsError> {
    let model = AfsBuilder::new().quantile(q).span(d).build()?;
    Ok(model.normalize(wavelength, intensity)?.into_normalized())
}
