#![cfg(feature = "dev")]
//! Tests for window selection.
//!
//! These tests verify:
//! - Ratios against a baseline
//! - Per-window quantile thresholds and the union of selections
//! - Constant, non-finite and empty windows

use approx::assert_relative_eq;

use afs::internals::algorithms::selection::{anchor_windows, ratios, select_in_windows};
use afs::internals::primitives::errors::{AfsError, ErrorKind, WindowDefect};
use afs::internals::primitives::window::Window;

/// Test ratios are taken pixel by pixel.
#[test]
fn test_ratios() {
    let r = ratios(&[2.0f64, 3.0, 0.0], &[4.0, 1.5, 2.0]);
    assert_eq!(r, vec![0.5, 2.0, 0.0]);
}

/// Test consecutive anchors become inclusive windows.
#[test]
fn test_anchor_windows() {
    let w = anchor_windows(&[0, 3, 4, 9]);
    assert_eq!(
        w,
        vec![Window::between(0, 3), Window::between(3, 4), Window::between(4, 9)]
    );
    assert!(anchor_windows(&[0]).is_empty());
}

/// Test selection against per-window medians.
#[test]
fn test_select_median() {
    let ratio = [1.0f64, 0.5, 1.2, 0.9, 1.1];
    let sel = select_in_windows(&ratio, &[0, 2, 4], 0.5, false).unwrap();

    assert_eq!(sel.indices, vec![0, 2, 4]);
    assert_relative_eq!(sel.thresholds[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(sel.thresholds[1], 1.1, epsilon = 1e-12);
}

/// Test every selected pixel reaches the threshold of a window holding it.
#[test]
fn test_select_no_leakage() {
    let ratio: Vec<f64> = (0..40)
        .map(|i| {
            let line = if i % 6 == 2 { 0.4 } else { 0.0 };
            1.0 + 0.1 * ((i * 13 % 17) as f64 / 17.0) - line
        })
        .collect();
    let anchors = [0, 5, 11, 12, 20, 31, 38];

    let sel = select_in_windows(&ratio, &anchors, 0.75, false).unwrap();

    assert!(sel.indices.windows(2).all(|w| w[0] < w[1]));
    for &i in sel.indices.iter() {
        let ok = sel
            .windows
            .iter()
            .zip(sel.thresholds.iter())
            .any(|(w, &t)| w.contains(i) && ratio[i] >= t);
        assert!(ok, "pixel {} selected without reaching a threshold", i);
    }
    assert_eq!(sel.thresholds.len(), anchors.len() - 1);
}

/// Test a window of identical ratios is kept whole when allowed.
#[test]
fn test_select_constant_window_allowed() {
    let ratio = [1.0f64, 1.0, 1.0, 2.0];
    let sel = select_in_windows(&ratio, &[0, 2, 3], 0.5, true).unwrap();

    assert_eq!(sel.indices, vec![0, 1, 2, 3]);
}

/// Test a window of identical ratios is rejected by default.
#[test]
fn test_select_constant_window_rejected() {
    let ratio = [1.0f64, 1.0, 1.0, 2.0];
    let err = select_in_windows(&ratio, &[0, 2, 3], 0.5, false).unwrap_err();

    assert_eq!(
        err,
        AfsError::DegenerateWindow {
            left: 0,
            right: 2,
            reason: WindowDefect::ConstantRatio
        }
    );
    assert_eq!(err.kind(), ErrorKind::DegenerateWindow);
}

/// Test a non-finite ratio is rejected.
#[test]
fn test_select_non_finite() {
    let ratio = [1.0f64, 2.0, f64::INFINITY, 1.0];
    let err = select_in_windows(&ratio, &[0, 1, 3], 0.5, false).unwrap_err();

    assert_eq!(
        err,
        AfsError::DegenerateWindow {
            left: 1,
            right: 3,
            reason: WindowDefect::NonFiniteRatio
        }
    );
}

/// Test a window past the ratios is rejected as empty.
#[test]
fn test_select_window_out_of_range() {
    let ratio = [1.0f64, 2.0, 3.0];
    let err = select_in_windows(&ratio, &[0, 7], 0.5, false).unwrap_err();

    assert!(matches!(
        err,
        AfsError::DegenerateWindow {
            reason: WindowDefect::Empty,
            ..
        }
    ));
}
