#![cfg(feature = "dev")]
//! Tests for the high-level AFS API.
//!
//! These tests verify the builder pattern, collaborator injection and the
//! shortcut functions:
//! - Builder defaults, validation and duplicate detection
//! - End-to-end normalization, including long noise-free orders
//! - Custom regression and alpha-shape collaborators
//! - Batches of orders
//!
//! ## Test Organization
//!
//! 1. **Builder** - Defaults, validation
//! 2. **Normalization** - End-to-end behaviour
//! 3. **Collaborators** - Injected backends
//! 4. **Shortcuts & Batches** - `afs`, `afs_with`, `normalize_orders`

use approx::assert_relative_eq;

use afs::internals::api::{DEFAULT_QUANTILE, DEFAULT_SPAN};
use afs::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

/// 20 pixels on a smooth arc with absorption lines at 5, 10 and 15.
///
/// The order is noise-free and small enough for the first pass to reproduce
/// the envelope at neighbouring anchors, so models running on it allow
/// constant-ratio windows.
fn lined_order() -> (Vec<f64>, Vec<f64>) {
    let wv: Vec<f64> = (0..20).map(|i| 5000.0 + 0.1 * i as f64).collect();
    let intens: Vec<f64> = (0..20)
        .map(|i| match i {
            5 | 10 | 15 => 60.0,
            _ => 100.0 + 10.0 * (std::f64::consts::PI * i as f64 / 19.0).sin(),
        })
        .collect();
    (wv, intens)
}

/// 40 pixels with a shallow line every seventh pixel.
fn dense_order() -> (Vec<f64>, Vec<f64>) {
    let wv: Vec<f64> = (0..40).map(|i| 4000.0 + 0.05 * i as f64).collect();
    let intens: Vec<f64> = (0..40)
        .map(|i| {
            let line = if i % 7 == 3 { 20.0 } else { 0.0 };
            50.0 + 5.0 * (std::f64::consts::PI * i as f64 / 39.0).sin() - line
        })
        .collect();
    (wv, intens)
}

/// Noise-free order of 3000 pixels with a 30-unit line every 37 pixels.
fn long_order(continuum: impl Fn(f64) -> f64) -> (Vec<f64>, Vec<f64>) {
    let wv: Vec<f64> = (0..3000).map(|i| 5000.0 + 0.02 * i as f64).collect();
    let intens: Vec<f64> = wv
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let line = if i % 37 == 18 { 30.0 } else { 0.0 };
            continuum(x) - line
        })
        .collect();
    (wv, intens)
}

/// Regression predicting the mean of its samples everywhere.
#[derive(Debug, Clone, Copy)]
struct MeanRegression;

#[derive(Debug, Clone, Copy)]
struct MeanModel(f64);

impl RegressionModel<f64> for MeanModel {
    fn predict(&self, x: &[f64]) -> Result<Vec<f64>, RegressionError> {
        Ok(vec![self.0; x.len()])
    }
}

impl LocalRegression<f64> for MeanRegression {
    type Model = MeanModel;

    fn fit(&self, _x: &[f64], y: &[f64]) -> Result<MeanModel, RegressionError> {
        Ok(MeanModel(y.iter().sum::<f64>() / y.len() as f64))
    }
}

/// Regression whose model returns a single value whatever the query.
#[derive(Debug, Clone, Copy)]
struct ShortRegression;

struct ShortModel;

impl RegressionModel<f64> for ShortModel {
    fn predict(&self, _x: &[f64]) -> Result<Vec<f64>, RegressionError> {
        Ok(vec![1.0])
    }
}

impl LocalRegression<f64> for ShortRegression {
    type Model = ShortModel;

    fn fit(&self, _x: &[f64], _y: &[f64]) -> Result<ShortModel, RegressionError> {
        Ok(ShortModel)
    }
}

/// Alpha shape reporting nothing.
#[derive(Debug, Clone, Copy)]
struct NoShape;

impl AlphaShapeBuilder<f64> for NoShape {
    fn alpha_shape(
        &self,
        _points: &[Point<f64>],
        _shape: f64,
    ) -> Result<AlphaShape<f64>, AfsError> {
        Ok(AlphaShape::Empty)
    }
}

// ============================================================================
// Builder Tests
// ============================================================================

/// Test the defaults end up in the configuration.
#[test]
fn test_builder_defaults() {
    let model = Afs::<f64>::new().build().unwrap();
    let config = model.config();

    assert_eq!(config.quantile, DEFAULT_QUANTILE);
    assert_eq!(config.span, Some(DEFAULT_SPAN));
    assert_eq!(config.alpha_divisor, 6.0);
    assert_eq!(config.scale_divisor, 10.0);
    assert!(!config.return_diagnostics);
    assert!(!config.allow_constant_windows);
}

/// Test explicit settings end up in the configuration.
#[test]
fn test_builder_settings() {
    let model = Afs::<f64>::new()
        .quantile(0.8)
        .span(0.4)
        .degree(1)
        .weight_function(Epanechnikov)
        .alpha_divisor(4.0)
        .scale_divisor(8.0)
        .return_diagnostics()
        .allow_constant_windows()
        .build()
        .unwrap();
    let config = model.config();

    assert_eq!(config.quantile, 0.8);
    assert_eq!(config.span, Some(0.4));
    assert_eq!(config.alpha_divisor, 4.0);
    assert_eq!(config.scale_divisor, 8.0);
    assert!(config.return_diagnostics);
    assert!(config.allow_constant_windows);
}

/// Test out-of-range parameters are rejected at build time.
#[test]
fn test_builder_invalid_parameters() {
    assert_eq!(
        Afs::<f64>::new().quantile(1.0).build().unwrap_err(),
        AfsError::InvalidQuantile(1.0)
    );
    assert_eq!(
        Afs::<f64>::new().quantile(0.9).span(1.5).build().unwrap_err(),
        AfsError::InvalidSpan(1.5)
    );
    assert_eq!(
        Afs::<f64>::new().degree(3).build().unwrap_err(),
        AfsError::InvalidDegree(3)
    );
    assert_eq!(
        Afs::<f64>::new().alpha_divisor(0.0).build().unwrap_err(),
        AfsError::InvalidDivisor {
            name: "alpha_divisor",
            value: 0.0
        }
    );

    let err = Afs::<f64>::new().scale_divisor(f64::NAN).build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
}

/// Test a parameter set twice is rejected.
#[test]
fn test_builder_duplicate_parameter() {
    let err = Afs::<f64>::new().quantile(0.9).quantile(0.8).build().unwrap_err();
    assert_eq!(err, AfsError::DuplicateParameter { parameter: "quantile" });

    let err = Afs::<f64>::new().span(0.3).span(0.3).build().unwrap_err();
    assert_eq!(err, AfsError::DuplicateParameter { parameter: "span" });

    let err = Afs::<f64>::new()
        .weight_function(Tricube)
        .weight_function(Biweight)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        AfsError::DuplicateParameter {
            parameter: "weight_function"
        }
    );

    // A kernel set on the replaced backend does not count against a later one
    let model = Afs::<f64>::new()
        .weight_function(Tricube)
        .regression(MeanRegression)
        .quantile(0.9)
        .build();
    assert!(model.is_ok());
}

// ============================================================================
// Normalization Tests
// ============================================================================

/// Test the continuum follows the arc and leaves the lines below it.
#[test]
fn test_normalize_lined_order() {
    let (wv, intens) = lined_order();
    let model = Afs::<f64>::new().allow_constant_windows().build().unwrap();

    let result = model.normalize(&wv, &intens).unwrap();

    assert_eq!(result.len(), 20);
    assert_eq!(result.wavelength, wv);
    for line in [5, 10, 15] {
        assert!(result.normalized[line] < result.normalized[line - 1]);
        assert!(result.normalized[line] < result.normalized[line + 1]);
        assert!(result.normalized[line] < 0.6);
    }
    for (i, &r) in result.normalized.iter().enumerate() {
        if ![5, 10, 15].contains(&i) {
            assert!((r - 1.0).abs() < 0.05, "pixel {} normalized to {}", i, r);
        }
    }
}

/// Test diagnostics are only kept on request.
#[test]
fn test_normalize_diagnostics_flag() {
    let (wv, intens) = lined_order();

    let plain = Afs::<f64>::new()
        .allow_constant_windows()
        .build()
        .unwrap()
        .normalize(&wv, &intens)
        .unwrap();
    assert!(!plain.has_diagnostics());

    let full = Afs::<f64>::new()
        .allow_constant_windows()
        .return_diagnostics()
        .build()
        .unwrap()
        .normalize(&wv, &intens)
        .unwrap();
    let diag = full.diagnostics.as_ref().unwrap();
    assert_eq!(diag.continuum.len(), 20);
    for (i, (&n, &c)) in full.normalized.iter().zip(diag.continuum.iter()).enumerate() {
        assert_relative_eq!(n * c, intens[i], max_relative = 1e-12);
    }
}

/// Test a long, exactly linear continuum is recovered.
#[test]
fn test_normalize_long_linear_continuum() {
    let (wv, intens) = long_order(|x| 100.0 + 0.5 * (x - 5000.0));
    let model = Afs::<f64>::new().allow_constant_windows().build().unwrap();

    let result = model.normalize(&wv, &intens).unwrap();

    assert_eq!(result.len(), 3000);
    for (i, &r) in result.normalized.iter().enumerate() {
        if i % 37 == 18 {
            assert!(r < 0.8, "line core {} normalized to {}", i, r);
        } else {
            assert!((r - 1.0).abs() < 0.01, "pixel {} normalized to {}", i, r);
        }
    }
}

/// Test a long, noise-free blaze is removed with the default settings.
#[test]
fn test_normalize_long_smooth_blaze() {
    let (wv, intens) = long_order(|x| {
        800.0 + 200.0 * (std::f64::consts::PI * (x - 5000.0) / 59.98).sin()
    });

    let normalized = afs(&wv, &intens).unwrap();

    assert_eq!(normalized.len(), 3000);
    for (i, &r) in normalized.iter().enumerate() {
        if i % 37 == 18 {
            assert!(r < 0.99, "line core {} normalized to {}", i, r);
        } else {
            assert!((r - 1.0).abs() < 0.02, "pixel {} normalized to {}", i, r);
        }
    }
}

/// Test malformed orders surface as input-shape errors.
#[test]
fn test_normalize_rejects_flat_order() {
    let model = Afs::<f64>::new().build().unwrap();

    let err = model.normalize(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).unwrap_err();
    assert_eq!(err, AfsError::ConstantIntensity);
    assert_eq!(err.kind(), ErrorKind::InputShape);

    let err = model.normalize(&[1.0, 2.0], &[4.0, 5.0]).unwrap_err();
    assert!(matches!(err, AfsError::TooFewPixels { got: 2, .. }));
}

/// Test an order too small for any alpha-shape triangle.
#[test]
fn test_normalize_straight_line() {
    let wv = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let intens = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

    let err = Afs::<f64>::new().build().unwrap().normalize(&wv, &intens).unwrap_err();
    assert_eq!(err, AfsError::EmptyAlphaShape);
    assert_eq!(err.kind(), ErrorKind::GeometryConsistency);
}

/// Test a flat continuum trips the constant-window check unless allowed.
#[test]
fn test_normalize_constant_window() {
    let wv: Vec<f64> = (0..20).map(|i| 5000.0 + 0.1 * i as f64).collect();
    let intens: Vec<f64> = (0..20)
        .map(|i| if [5, 10, 15].contains(&i) { 60.0 } else { 100.0 })
        .collect();

    let err = Afs::<f64>::new()
        .regression(MeanRegression)
        .build()
        .unwrap()
        .normalize(&wv, &intens)
        .unwrap_err();
    assert!(matches!(
        err,
        AfsError::DegenerateWindow {
            reason: WindowDefect::ConstantRatio,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::DegenerateWindow);

    let result = Afs::<f64>::new()
        .regression(MeanRegression)
        .allow_constant_windows()
        .build()
        .unwrap()
        .normalize(&wv, &intens)
        .unwrap();
    assert_eq!(result.len(), 20);
    assert!(result.normalized.iter().all(|v| v.is_finite() && *v > 0.0));
}

// ============================================================================
// Collaborator Tests
// ============================================================================

/// Test a flat regression backend scales the order by one constant.
#[test]
fn test_custom_regression() {
    let (wv, intens) = lined_order();
    let model = Afs::<f64>::new().regression(MeanRegression).build().unwrap();

    assert_eq!(model.config().span, None);

    let result = model.normalize(&wv, &intens).unwrap();
    assert_eq!(result.span_used, None);

    let c = intens[0] / result.normalized[0];
    for (&y, &r) in intens.iter().zip(result.normalized.iter()) {
        assert_relative_eq!(y / r, c, max_relative = 1e-12);
    }
    // Only pixels at the top of their window feed the second pass
    assert!(c > intens.iter().sum::<f64>() / intens.len() as f64);
}

/// Test a backend returning too few predictions is reported.
#[test]
fn test_custom_regression_wrong_length() {
    let (wv, intens) = lined_order();
    let model = Afs::<f64>::new().regression(ShortRegression).build().unwrap();

    let err = model.normalize(&wv, &intens).unwrap_err();
    assert!(matches!(
        err,
        AfsError::RegressionFailure {
            stage: Stage::FirstPass,
            source: RegressionError::Backend(_)
        }
    ));
    assert_eq!(err.kind(), ErrorKind::RegressionFailure);
}

/// Test a custom alpha shape is used by the boundary stage.
#[test]
fn test_custom_alpha_shape() {
    let (wv, intens) = lined_order();
    let model = Afs::<f64>::new().alpha_shape(NoShape).build().unwrap();

    assert_eq!(model.normalize(&wv, &intens).unwrap_err(), AfsError::EmptyAlphaShape);
}

// ============================================================================
// Shortcut & Batch Tests
// ============================================================================

/// Test the shortcut on a dense order.
#[test]
fn test_afs_shortcut() {
    let (wv, intens) = dense_order();

    let normalized = afs(&wv, &intens).unwrap();
    assert_eq!(normalized.len(), 40);
    assert!(normalized.iter().all(|v| v.is_finite() && *v > 0.0));

    let tuned = afs_with(&wv, &intens, 0.5, 0.3).unwrap();
    assert_eq!(tuned.len(), 40);
}

/// Test the shortcut rejects invalid parameters.
#[test]
fn test_afs_with_invalid() {
    let (wv, intens) = dense_order();
    assert_eq!(
        afs_with(&wv, &intens, 0.0, 0.25).unwrap_err(),
        AfsError::InvalidQuantile(0.0)
    );
}

/// Test several orders are normalized independently and in order.
#[test]
fn test_normalize_orders() {
    let (wv1, in1) = lined_order();
    let (wv2, in2) = dense_order();
    let model = Afs::<f64>::new().allow_constant_windows().build().unwrap();

    let orders = [Order::new(&wv1, &in1), Order::new(&wv2, &in2)];
    let results = model.normalize_orders(&orders).unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].len(), 20);
    assert_eq!(results[1].len(), 40);
    assert_eq!(results[0], model.normalize(&wv1, &in1).unwrap());
}

/// Test a failing order aborts the batch.
#[test]
fn test_normalize_orders_failure() {
    let (wv1, in1) = lined_order();
    let flat = [1.0, 1.0, 1.0];
    let model = Afs::<f64>::new().allow_constant_windows().build().unwrap();

    let orders = [Order::new(&wv1, &in1), Order::new(&wv1[..3], &flat)];
    assert_eq!(
        model.normalize_orders(&orders).unwrap_err(),
        AfsError::ConstantIntensity
    );
}
