//! Local polynomial regression capability.
//!
//! ## Purpose
//!
//! The pipeline fits a smooth curve twice and evaluates it at every
//! wavelength of the order. This module defines that capability as a pair of
//! traits, [`LocalRegression`] (fit) and [`RegressionModel`] (predict), and
//! ships [`Loess`], a default backend with the semantics of a gaussian-family
//! loess with exact ("direct") evaluation.
//!
//! ## Design notes
//!
//! * **Collaborator**: The pipeline receives the regression as a value, so
//!   tests and callers can substitute another backend.
//! * **Direct surface**: Every query is fitted on its own `q` nearest samples;
//!   no kd-tree interpolation. Queries outside the sample range extrapolate
//!   the local polynomial.
//! * **Rank fallback**: A neighbourhood too small or too degenerate for the
//!   requested degree is fitted with the next lower degree.
//!
//! ## Key concepts
//!
//! * **Span**: `q = floor(n * span)` samples per neighbourhood, at least
//!   `degree + 1`; spans above 1 use every sample and widen the bandwidth.
//! * **Tricube**: Default kernel, `(1 - (d / h)^3)^3`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::regression::{MAX_DEGREE, RegressionContext, WLSSolver};
use crate::math::kernel::WeightFunction;
use crate::primitives::errors::RegressionError;
use crate::primitives::sorting::{SortedData, sort_by_x};
use crate::primitives::window::Window;

// ============================================================================
// Capability Traits
// ============================================================================

/// A fitted curve that can be evaluated at arbitrary x-values.
pub trait RegressionModel<T> {
    /// Predicted value for every query, in query order.
    fn predict(&self, x: &[T]) -> Result<Vec<T>, RegressionError>;
}

/// Capability fitting a smooth curve through `(x, y)` samples.
pub trait LocalRegression<T> {
    /// Fitted curve type.
    type Model: RegressionModel<T>;

    /// Fit the curve.
    fn fit(&self, x: &[T], y: &[T]) -> Result<Self::Model, RegressionError>;
}

impl<T, R: LocalRegression<T> + ?Sized> LocalRegression<T> for &R {
    type Model = R::Model;

    fn fit(&self, x: &[T], y: &[T]) -> Result<Self::Model, RegressionError> {
        (**self).fit(x, y)
    }
}

// ============================================================================
// Loess
// ============================================================================

/// Default loess backend.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loess<T> {
    /// Fraction of samples in each neighbourhood.
    pub span: T,

    /// Local polynomial degree (0, 1 or 2).
    pub degree: usize,

    /// Kernel weight function.
    pub weight_function: WeightFunction,
}

impl<T: Float> Loess<T> {
    /// Quadratic tricube loess with the given span.
    pub fn new(span: T) -> Self {
        Self {
            span,
            degree: MAX_DEGREE,
            weight_function: WeightFunction::default(),
        }
    }

    /// Set the local polynomial degree.
    pub fn degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Set the kernel weight function.
    pub fn weight_function(mut self, weight_function: WeightFunction) -> Self {
        self.weight_function = weight_function;
        self
    }

    /// Check the configuration and the samples.
    fn validate(&self, x: &[T], y: &[T]) -> Result<(), RegressionError> {
        if !self.span.is_finite() || self.span <= T::zero() {
            return Err(RegressionError::InvalidSpan(
                self.span.to_f64().unwrap_or(f64::NAN),
            ));
        }
        if self.degree > MAX_DEGREE {
            return Err(RegressionError::InvalidDegree(self.degree));
        }
        if x.is_empty() || y.is_empty() {
            return Err(RegressionError::EmptyInput);
        }
        if x.len() != y.len() {
            return Err(RegressionError::MismatchedInputs {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.len() < self.degree + 1 {
            return Err(RegressionError::TooFewPoints {
                got: x.len(),
                min: self.degree + 1,
            });
        }
        for (i, (&xi, &yi)) in x.iter().zip(y.iter()).enumerate() {
            if !xi.is_finite() {
                return Err(RegressionError::InvalidNumericValue(format!(
                    "x[{}]={}",
                    i,
                    xi.to_f64().unwrap_or(f64::NAN)
                )));
            }
            if !yi.is_finite() {
                return Err(RegressionError::InvalidNumericValue(format!(
                    "y[{}]={}",
                    i,
                    yi.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        Ok(())
    }
}

impl<T: Float + WLSSolver> LocalRegression<T> for Loess<T> {
    type Model = LoessModel<T>;

    fn fit(&self, x: &[T], y: &[T]) -> Result<LoessModel<T>, RegressionError> {
        self.validate(x, y)?;

        let SortedData { x, y } = sort_by_x(x, y);
        let n = x.len();
        let q = Window::calculate_span(n, self.span)
            .max(self.degree + 1)
            .min(n);
        let bandwidth_factor = self.span.max(T::one());

        Ok(LoessModel {
            x,
            y,
            q,
            bandwidth_factor,
            degree: self.degree,
            weight_function: self.weight_function,
        })
    }
}

// ============================================================================
// Loess Model
// ============================================================================

/// Loess curve fitted to a set of samples, evaluated exactly at each query.
#[derive(Debug, Clone, PartialEq)]
pub struct LoessModel<T> {
    x: Vec<T>,
    y: Vec<T>,
    q: usize,
    bandwidth_factor: T,
    degree: usize,
    weight_function: WeightFunction,
}

impl<T: Float + WLSSolver> LoessModel<T> {
    /// Number of samples per neighbourhood.
    #[inline]
    pub fn neighbourhood_size(&self) -> usize {
        self.q
    }

    /// Number of samples the model was fitted on.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the model has no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Evaluate the curve at a single point.
    pub fn evaluate(&self, x_query: T, weights: &mut [T]) -> Option<T> {
        let mut ctx = RegressionContext {
            x: &self.x,
            y: &self.y,
            x_query,
            window: Window::nearest(&self.x, x_query, self.q),
            bandwidth_factor: self.bandwidth_factor,
            weights,
            weight_function: self.weight_function,
            degree: self.degree,
        };
        ctx.fit()
    }
}

impl<T: Float + WLSSolver> RegressionModel<T> for LoessModel<T> {
    fn predict(&self, x: &[T]) -> Result<Vec<T>, RegressionError> {
        let mut weights = vec![T::zero(); self.x.len()];
        let mut out = Vec::with_capacity(x.len());

        for (i, &x_query) in x.iter().enumerate() {
            if !x_query.is_finite() {
                return Err(RegressionError::InvalidNumericValue(format!(
                    "query[{}]={}",
                    i,
                    x_query.to_f64().unwrap_or(f64::NAN)
                )));
            }
            let value = self.evaluate(x_query, &mut weights).ok_or_else(|| {
                RegressionError::InvalidNumericValue(format!(
                    "no finite fit at query[{}]={}",
                    i,
                    x_query.to_f64().unwrap_or(f64::NAN)
                ))
            })?;
            out.push(value);
        }

        Ok(out)
    }
}
