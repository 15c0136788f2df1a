//! Input validation for AFS configuration and spectral orders.
//!
//! ## Purpose
//!
//! This module checks a spectral order and the builder parameters before any
//! geometry or regression work starts, so malformed input fails with a
//! precise error instead of a geometric inconsistency further down.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * An order that passes [`Validator::validate_order`] has at least 3 pixels,
//!   strictly increasing finite wavelengths, finite non-negative intensities,
//!   a positive maximum and at least two distinct intensities.
//!
//! ## Non-goals
//!
//! * This module does not sort, transform, or filter input data.
//! * This module does not provide automatic correction of invalid inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::regression::MAX_DEGREE;
use crate::primitives::errors::AfsError;

/// Minimum number of pixels in an order.
pub const MIN_PIXELS: usize = 3;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for AFS configuration and input data.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Order Validation
    // ========================================================================

    /// Validate the wavelength and intensity columns of an order.
    pub fn validate_order<T: Float>(wavelength: &[T], intensity: &[T]) -> Result<(), AfsError> {
        // Check 1: Matching lengths
        let n = wavelength.len();
        if n != intensity.len() {
            return Err(AfsError::MismatchedColumns {
                wavelength_len: n,
                intensity_len: intensity.len(),
            });
        }

        // Check 2: Enough pixels for a polygon
        if n < MIN_PIXELS {
            return Err(AfsError::TooFewPixels {
                got: n,
                min: MIN_PIXELS,
            });
        }

        // Check 3: Finite values
        for i in 0..n {
            if !wavelength[i].is_finite() {
                return Err(AfsError::InvalidNumericValue(format!(
                    "wavelength[{}]={}",
                    i,
                    wavelength[i].to_f64().unwrap_or(f64::NAN)
                )));
            }
            if !intensity[i].is_finite() {
                return Err(AfsError::InvalidNumericValue(format!(
                    "intensity[{}]={}",
                    i,
                    intensity[i].to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        // Check 4: Strictly increasing wavelengths
        if let Some(index) = (1..n).find(|&i| wavelength[i] <= wavelength[i - 1]) {
            return Err(AfsError::NonIncreasingWavelength { index });
        }

        // Check 5: Intensity sign and spread
        if let Some(index) = intensity.iter().position(|&v| v < T::zero()) {
            return Err(AfsError::NegativeIntensity { index });
        }
        let max = intensity.iter().fold(T::zero(), |acc, &v| acc.max(v));
        if max <= T::zero() {
            return Err(AfsError::NonPositiveMaxIntensity(
                max.to_f64().unwrap_or(f64::NAN),
            ));
        }
        if intensity.iter().all(|&v| v == intensity[0]) {
            return Err(AfsError::ConstantIntensity);
        }

        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the selection quantile, strictly inside `(0, 1)`.
    pub fn validate_quantile<T: Float>(q: T) -> Result<(), AfsError> {
        if !q.is_finite() || q <= T::zero() || q >= T::one() {
            return Err(AfsError::InvalidQuantile(q.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate the regression span, strictly inside `(0, 1)`.
    pub fn validate_span<T: Float>(span: T) -> Result<(), AfsError> {
        if !span.is_finite() || span <= T::zero() || span >= T::one() {
            return Err(AfsError::InvalidSpan(span.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate the local polynomial degree.
    pub fn validate_degree(degree: usize) -> Result<(), AfsError> {
        if degree > MAX_DEGREE {
            return Err(AfsError::InvalidDegree(degree));
        }
        Ok(())
    }

    /// Validate a scale or alpha divisor.
    pub fn validate_divisor<T: Float>(name: &'static str, value: T) -> Result<(), AfsError> {
        if !value.is_finite() || value <= T::zero() {
            return Err(AfsError::InvalidDivisor {
                name,
                value: value.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), AfsError> {
        if let Some(param) = duplicate_param {
            return Err(AfsError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
