#![cfg(feature = "dev")]
//! Tests for the default loess backend.
//!
//! These tests verify:
//! - Exact reproduction of polynomials of the fitted degree
//! - Neighbourhood sizing from the span
//! - Rank-deficiency fallback of the normal-equation solver
//! - SIMD moment accumulation against the scalar path
//! - Input validation
//!
//! ## Test Organization
//!
//! 1. **Fitting** - Polynomial reproduction, extrapolation, unsorted input
//! 2. **Solver** - Degree fallback
//! 3. **Errors** - Configuration and data failures

use approx::assert_relative_eq;

use afs::internals::algorithms::loess::{LocalRegression, Loess, RegressionModel};
use afs::internals::algorithms::regression::{
    Moments, PolynomialFit, WLSSolver, accumulate_moments_scalar,
};
use afs::internals::math::kernel::WeightFunction;
use afs::internals::primitives::errors::RegressionError;

// ============================================================================
// Helper Functions
// ============================================================================

fn quadratic(x: f64) -> f64 {
    1.0 + 2.0 * x + 0.5 * x * x
}

fn grid(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

// ============================================================================
// Fitting Tests
// ============================================================================

/// Test a quadratic loess reproduces a quadratic exactly.
#[test]
fn test_loess_reproduces_quadratic() {
    let x = grid(21);
    let y: Vec<f64> = x.iter().map(|&v| quadratic(v)).collect();

    let model = Loess::new(0.5).fit(&x, &y).unwrap();
    let query = [0.0, 3.5, 10.0, 17.25, 20.0];
    let fitted = model.predict(&query).unwrap();

    for (&q, &f) in query.iter().zip(fitted.iter()) {
        assert_relative_eq!(f, quadratic(q), epsilon = 1e-8);
    }
}

/// Test queries beyond the samples extrapolate the local polynomial.
#[test]
fn test_loess_extrapolates() {
    let x = grid(21);
    let y: Vec<f64> = x.iter().map(|&v| quadratic(v)).collect();

    let model = Loess::new(0.5).fit(&x, &y).unwrap();
    let fitted = model.predict(&[25.0]).unwrap();

    assert_relative_eq!(fitted[0], quadratic(25.0), epsilon = 1e-6);
}

/// Test a linear loess reproduces a line with any kernel.
#[test]
fn test_loess_linear_kernels() {
    let x = grid(30);
    let y: Vec<f64> = x.iter().map(|&v| 4.0 - 0.25 * v).collect();

    for wf in [
        WeightFunction::Tricube,
        WeightFunction::Epanechnikov,
        WeightFunction::Biweight,
    ] {
        let model = Loess::new(0.3).degree(1).weight_function(wf).fit(&x, &y).unwrap();
        let fitted = model.predict(&[2.5, 14.0, 28.75]).unwrap();
        assert_relative_eq!(fitted[0], 3.375, epsilon = 1e-9);
        assert_relative_eq!(fitted[1], 0.5, epsilon = 1e-9);
        assert_relative_eq!(fitted[2], -3.1875, epsilon = 1e-9);
    }
}

/// Test the samples do not need to be sorted.
#[test]
fn test_loess_unsorted_input() {
    let x = [4.0, 0.0, 7.0, 2.0, 9.0, 1.0, 5.0, 8.0, 3.0, 6.0];
    let y: Vec<f64> = x.iter().map(|&v| 2.0 * v + 1.0).collect();

    let model = Loess::new(0.6).degree(1).fit(&x, &y).unwrap();
    let fitted = model.predict(&[0.0, 4.5, 9.0]).unwrap();

    assert_relative_eq!(fitted[0], 1.0, epsilon = 1e-9);
    assert_relative_eq!(fitted[1], 10.0, epsilon = 1e-9);
    assert_relative_eq!(fitted[2], 19.0, epsilon = 1e-9);
}

/// Test neighbourhood sizes follow the span with a floor of `degree + 1`.
#[test]
fn test_loess_neighbourhood_size() {
    let x = grid(20);
    let y = vec![1.0; 20];

    let model = Loess::new(0.25).fit(&x, &y).unwrap();
    assert_eq!(model.neighbourhood_size(), 5);
    assert_eq!(model.len(), 20);

    let narrow = Loess::new(0.05).fit(&x, &y).unwrap();
    assert_eq!(narrow.neighbourhood_size(), 3);

    let wide = Loess::new(2.0).fit(&x, &y).unwrap();
    assert_eq!(wide.neighbourhood_size(), 20);
}

/// Test a constant signal is returned unchanged.
#[test]
fn test_loess_constant_signal() {
    let x = grid(12);
    let y = vec![7.5; 12];

    let model = Loess::new(0.4).fit(&x, &y).unwrap();
    for v in model.predict(&x).unwrap() {
        assert_relative_eq!(v, 7.5, epsilon = 1e-10);
    }
}

// ============================================================================
// Solver Tests
// ============================================================================

/// Test a single-point neighbourhood falls back to degree 0.
#[test]
fn test_polynomial_fit_fallback() {
    let mut m = Moments::<f64>::zero();
    m.s[0] = 2.0;
    m.t[0] = 10.0;

    let fit = PolynomialFit::solve(&m, 2, 1e-8).unwrap();

    assert_eq!(fit.degree, 0);
    assert_relative_eq!(fit.predict(0.0), 5.0);
}

/// Test the SIMD accumulators agree with the scalar one, tail included.
#[test]
fn test_moments_simd_matches_scalar() {
    let x: Vec<f64> = (0..13).map(|i| 0.3 * i as f64).collect();
    let y: Vec<f64> = x.iter().map(|&v| quadratic(v)).collect();
    let w: Vec<f64> = (0..13).map(|i| 1.0 / (1.0 + i as f64)).collect();

    let simd = <f64 as WLSSolver>::accumulate_moments(&x, &y, &w, 1.8, 0.5);
    let scalar = accumulate_moments_scalar(&x, &y, &w, 1.8, 0.5);
    for k in 0..5 {
        assert_relative_eq!(simd.s[k], scalar.s[k], epsilon = 1e-10);
    }
    for k in 0..3 {
        assert_relative_eq!(simd.t[k], scalar.t[k], epsilon = 1e-10);
    }

    let xf: Vec<f32> = x.iter().map(|&v| v as f32).collect();
    let yf: Vec<f32> = y.iter().map(|&v| v as f32).collect();
    let wf: Vec<f32> = w.iter().map(|&v| v as f32).collect();
    let simd = <f32 as WLSSolver>::accumulate_moments(&xf, &yf, &wf, 1.8, 0.5);
    let scalar = accumulate_moments_scalar(&xf, &yf, &wf, 1.8, 0.5);
    for k in 0..5 {
        assert_relative_eq!(simd.s[k], scalar.s[k], epsilon = 1e-4);
    }
}

/// Test zero total weight yields no fit.
#[test]
fn test_polynomial_fit_zero_weight() {
    let m = Moments::<f64>::zero();
    assert!(PolynomialFit::solve(&m, 1, 1e-8).is_none());
}

// ============================================================================
// Error Tests
// ============================================================================

/// Test fewer samples than coefficients.
#[test]
fn test_loess_too_few_points() {
    let err = Loess::new(0.5).fit(&[0.0, 1.0], &[1.0, 2.0]).unwrap_err();
    assert_eq!(err, RegressionError::TooFewPoints { got: 2, min: 3 });

    assert!(Loess::new(0.5).degree(1).fit(&[0.0, 1.0], &[1.0, 2.0]).is_ok());
}

/// Test configuration errors.
#[test]
fn test_loess_invalid_configuration() {
    let x = grid(10);
    let y = grid(10);

    assert_eq!(
        Loess::new(0.0).fit(&x, &y).unwrap_err(),
        RegressionError::InvalidSpan(0.0)
    );
    assert!(matches!(
        Loess::new(f64::NAN).fit(&x, &y).unwrap_err(),
        RegressionError::InvalidSpan(_)
    ));
    assert_eq!(
        Loess::new(0.5).degree(3).fit(&x, &y).unwrap_err(),
        RegressionError::InvalidDegree(3)
    );
}

/// Test data errors.
#[test]
fn test_loess_invalid_data() {
    let loess = Loess::new(0.5);

    assert_eq!(
        loess.fit(&[], &[]).unwrap_err(),
        RegressionError::EmptyInput
    );
    assert_eq!(
        loess.fit(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0, 3.0]).unwrap_err(),
        RegressionError::MismatchedInputs { x_len: 3, y_len: 4 }
    );
    assert!(matches!(
        loess.fit(&[0.0, 1.0, 2.0, 3.0], &[0.0, f64::NAN, 2.0, 3.0]).unwrap_err(),
        RegressionError::InvalidNumericValue(_)
    ));
}

/// Test non-finite queries are rejected.
#[test]
fn test_loess_invalid_query() {
    let x = grid(10);
    let model = Loess::new(0.5).fit(&x, &x).unwrap();

    assert!(matches!(
        model.predict(&[1.0, f64::INFINITY]).unwrap_err(),
        RegressionError::InvalidNumericValue(_)
    ));
}
