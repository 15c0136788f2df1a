//! Execution engine for the AFS pipeline.
//!
//! ## Purpose
//!
//! This module runs the continuum fit of one spectral order from validated
//! configuration to normalized output. It threads the order through every
//! stage and wraps the two regression passes with the stage they belong to.
//!
//! ## Design notes
//!
//! * **Strictly linear**: Validate, scale, extract the boundary, build the
//!   anchors, interpolate the envelope, fit the baseline, select, fit the
//!   continuum, normalize. No stage is skipped or reordered.
//! * **Collaborators**: The alpha shape and the local regression are values
//!   owned by the executor; the pipeline only uses their traits.
//! * **Generic**: Works for any `Float` type the collaborators support.
//!
//! ## Invariants
//!
//! * The output has one value per input pixel, in input order.
//! * Each regression model is evaluated at every wavelength of the order.
//!
//! ## Non-goals
//!
//! * This module does not parse or build configuration (see `api`).
//! * This module does not distribute orders over threads (see `api`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use log::debug;
use num_traits::Float;

// Internal dependencies
use crate::algorithms::anchors::build_anchors;
use crate::algorithms::boundary::{alpha_radius, extract_boundary};
use crate::algorithms::envelope::interpolate_envelope;
use crate::algorithms::loess::{LocalRegression, RegressionModel};
use crate::algorithms::selection::{ratios, select_in_windows};
use crate::engine::output::{AfsDiagnostics, AfsResult};
use crate::engine::validator::Validator;
use crate::geometry::alpha_shape::AlphaShapeBuilder;
use crate::math::scaling::ScaledOrder;
use crate::primitives::errors::{AfsError, RegressionError, Stage};
use crate::primitives::order::Order;

// ============================================================================
// Configuration
// ============================================================================

/// Validated configuration of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AfsConfig<T> {
    /// Window-local selection quantile.
    pub quantile: T,

    /// Span of the default regression backend, if it is used.
    pub span: Option<T>,

    /// Alpha radius is `wavelength_range / alpha_divisor`.
    pub alpha_divisor: T,

    /// Scale factor is `wavelength_range / scale_divisor / max_intensity`.
    pub scale_divisor: T,

    /// Keep intermediate products in the result.
    pub return_diagnostics: bool,

    /// Select constant windows whole instead of rejecting them.
    pub allow_constant_windows: bool,
}

// ============================================================================
// Executor
// ============================================================================

/// Pipeline runner owning its collaborators.
#[derive(Debug, Clone)]
pub struct AfsExecutor<T, R, A> {
    /// Pipeline configuration.
    pub config: AfsConfig<T>,

    /// Local regression used for both passes.
    pub regression: R,

    /// Alpha-shape capability used by the boundary extractor.
    pub alpha_shape: A,
}

impl<T, R, A> AfsExecutor<T, R, A>
where
    T: Float,
    R: LocalRegression<T>,
    A: AlphaShapeBuilder<T>,
{
    /// Assemble an executor.
    pub fn new(config: AfsConfig<T>, regression: R, alpha_shape: A) -> Self {
        Self {
            config,
            regression,
            alpha_shape,
        }
    }

    /// Normalize one order.
    pub fn run(&self, wavelength: &[T], intensity: &[T]) -> Result<AfsResult<T>, AfsError> {
        Validator::validate_order(wavelength, intensity)?;

        let order = Order::new(wavelength, intensity);
        let n = order.len();

        // Boundary
        let scaled = ScaledOrder::new(&order, self.config.scale_divisor)?;
        let alpha = alpha_radius(order.wavelength_range(), self.config.alpha_divisor);
        let loops = extract_boundary(&self.alpha_shape, &scaled, alpha)?;

        // Anchors and envelope
        let anchors = build_anchors(&loops, n)?;
        let envelope = interpolate_envelope(&order, &anchors);

        // First pass
        let baseline = self.fit_and_predict(
            Stage::FirstPass,
            wavelength,
            &envelope.intensity,
            wavelength,
        )?;

        // Selection
        let ratio = ratios(intensity, &baseline);
        let selection = select_in_windows(
            &ratio,
            &anchors,
            self.config.quantile,
            self.config.allow_constant_windows,
        )?;
        debug!(
            "selection: {} of {} pixel(s) over {} window(s)",
            selection.indices.len(),
            n,
            selection.windows.len()
        );

        // Second pass
        let (sel_x, sel_y): (Vec<T>, Vec<T>) = selection
            .indices
            .iter()
            .map(|&i| (wavelength[i], intensity[i]))
            .unzip();
        let continuum = self.fit_and_predict(Stage::SecondPass, &sel_x, &sel_y, wavelength)?;

        let normalized: Vec<T> = intensity
            .iter()
            .zip(continuum.iter())
            .map(|(&y, &c)| y / c)
            .collect();

        let diagnostics = if self.config.return_diagnostics {
            Some(AfsDiagnostics {
                scale_factor: scaled.factor,
                alpha,
                loops,
                anchors,
                envelope: envelope.intensity,
                envelope_covered: envelope.covered,
                baseline,
                ratios: ratio,
                thresholds: selection.thresholds,
                selected: selection.indices,
                continuum,
            })
        } else {
            None
        };

        Ok(AfsResult {
            wavelength: wavelength.to_vec(),
            normalized,
            quantile_used: self.config.quantile,
            span_used: self.config.span,
            diagnostics,
        })
    }

    /// Fit the regression to `(x, y)` and evaluate it at `query`.
    pub fn fit_and_predict(
        &self,
        stage: Stage,
        x: &[T],
        y: &[T],
        query: &[T],
    ) -> Result<Vec<T>, AfsError> {
        let model = self
            .regression
            .fit(x, y)
            .map_err(|e| AfsError::regression(stage, e))?;
        let predicted = model
            .predict(query)
            .map_err(|e| AfsError::regression(stage, e))?;

        if predicted.len() != query.len() {
            return Err(AfsError::regression(
                stage,
                RegressionError::Backend(format!(
                    "expected {} predictions, got {}",
                    query.len(),
                    predicted.len()
                )),
            ));
        }

        debug!("{} fit: {} sample(s), {} queries", stage, x.len(), query.len());
        Ok(predicted)
    }
}
