//! Error types for AFS operations.
//!
//! ## Purpose
//!
//! This module defines every error condition the continuum-fitting pipeline
//! can report: malformed spectral orders, geometric inconsistencies between
//! the alpha shape and the order, degenerate selection windows, failures of
//! the local regression backend and invalid builder parameters.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending index, window or value.
//! * **Staged**: Regression failures record which pass (first or second) failed.
//! * **Classified**: [`AfsError::kind`] groups variants into the coarse kinds
//!   callers usually branch on.
//! * **No-std**: Uses `alloc` for dynamic messages when `std` is disabled.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery; every error aborts the call.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Pipeline Stage
// ============================================================================

/// Regression pass of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    /// Baseline fit over the alpha-shape envelope.
    FirstPass,

    /// Continuum fit over the selected high-quantile points.
    SecondPass,
}

impl Stage {
    /// Human-readable name of the stage.
    pub const fn name(&self) -> &'static str {
        match self {
            Stage::FirstPass => "first-pass",
            Stage::SecondPass => "second-pass",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Error Kinds
// ============================================================================

/// Coarse classification of [`AfsError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The spectral order itself is malformed.
    InputShape,

    /// The boundary geometry cannot be mapped back onto the order.
    GeometryConsistency,

    /// A selection window cannot be quantile-filtered.
    DegenerateWindow,

    /// The local regression backend rejected its input.
    RegressionFailure,

    /// A builder parameter is out of range.
    InvalidParameter,
}

/// Reason a selection window was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowDefect {
    /// The window contains no pixels.
    Empty,

    /// Every ratio in the window is identical.
    ConstantRatio,

    /// A ratio in the window is NaN or infinite.
    NonFiniteRatio,
}

impl Display for WindowDefect {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Empty => f.write_str("window contains no pixels"),
            Self::ConstantRatio => f.write_str("all ratios in the window are identical"),
            Self::NonFiniteRatio => f.write_str("window contains a non-finite ratio"),
        }
    }
}

// ============================================================================
// Regression Error
// ============================================================================

/// Error reported by a local regression backend.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionError {
    /// Input arrays are empty.
    EmptyInput,

    /// `x` and `y` arrays must have the same number of elements.
    MismatchedInputs {
        /// Number of elements in the `x` array.
        x_len: usize,
        /// Number of elements in the `y` array.
        y_len: usize,
    },

    /// Input or query data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// The span leaves too few points in each neighbourhood for the degree.
    TooFewPoints {
        /// Number of points in each neighbourhood.
        got: usize,
        /// Minimum required points.
        min: usize,
    },

    /// Span must be positive and finite.
    InvalidSpan(f64),

    /// Polynomial degree must be 0, 1 or 2.
    InvalidDegree(usize),

    /// Failure reported by a caller-supplied backend.
    Backend(String),
}

impl Display for RegressionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::MismatchedInputs { x_len, y_len } => {
                write!(f, "Length mismatch: x has {x_len} points, y has {y_len}")
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::TooFewPoints { got, min } => {
                write!(
                    f,
                    "Too few points per neighbourhood: got {got}, need at least {min}"
                )
            }
            Self::InvalidSpan(span) => write!(f, "Invalid span: {span} (must be > 0)"),
            Self::InvalidDegree(degree) => {
                write!(f, "Invalid degree: {degree} (must be 0, 1 or 2)")
            }
            Self::Backend(msg) => write!(f, "Regression backend failed: {msg}"),
        }
    }
}

#[cfg(feature = "std")]
impl Error for RegressionError {}

// ============================================================================
// Error Type
// ============================================================================

/// Error type for AFS operations.
#[derive(Debug, Clone, PartialEq)]
pub enum AfsError {
    /// An order needs at least 3 pixels.
    TooFewPixels {
        /// Number of pixels provided.
        got: usize,
        /// Minimum required pixels.
        min: usize,
    },

    /// Wavelength and intensity columns must have the same length.
    MismatchedColumns {
        /// Length of the wavelength column.
        wavelength_len: usize,
        /// Length of the intensity column.
        intensity_len: usize,
    },

    /// The order contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Wavelengths must be strictly increasing.
    NonIncreasingWavelength {
        /// First index whose wavelength is not above its predecessor.
        index: usize,
    },

    /// Intensities must be non-negative.
    NegativeIntensity {
        /// Index of the negative intensity.
        index: usize,
    },

    /// The brightest pixel must be strictly positive.
    NonPositiveMaxIntensity(f64),

    /// Every intensity is identical, so no boundary can be traced.
    ConstantIntensity,

    /// All wavelengths coincide.
    ZeroWavelengthRange,

    /// A boundary vertex does not match any wavelength of the order.
    UnmatchedBoundaryVertex {
        /// Wavelength coordinate of the vertex.
        wavelength: f64,
    },

    /// The alpha shape contains no polygon.
    EmptyAlphaShape,

    /// A boundary loop is empty once the last pixel is discarded.
    EmptyLoop {
        /// Position of the loop in the alpha shape.
        loop_index: usize,
    },

    /// The anchor set must contain at least two indices.
    TooFewAnchors {
        /// Number of anchors found.
        got: usize,
    },

    /// A selection window cannot be quantile-filtered.
    DegenerateWindow {
        /// First pixel of the window.
        left: usize,
        /// Last pixel of the window (inclusive).
        right: usize,
        /// What is wrong with the window.
        reason: WindowDefect,
    },

    /// The local regression backend rejected its input.
    RegressionFailure {
        /// Pass that failed.
        stage: Stage,
        /// Error reported by the backend.
        source: RegressionError,
    },

    /// Quantile must be strictly between 0 and 1.
    InvalidQuantile(f64),

    /// Span must be strictly between 0 and 1.
    InvalidSpan(f64),

    /// Polynomial degree must be 0, 1 or 2.
    InvalidDegree(usize),

    /// Scale and alpha divisors must be positive and finite.
    InvalidDivisor {
        /// Name of the divisor.
        name: &'static str,
        /// Value provided.
        value: f64,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

impl AfsError {
    /// Coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TooFewPixels { .. }
            | Self::MismatchedColumns { .. }
            | Self::InvalidNumericValue(_)
            | Self::NonIncreasingWavelength { .. }
            | Self::NegativeIntensity { .. }
            | Self::NonPositiveMaxIntensity(_)
            | Self::ConstantIntensity
            | Self::ZeroWavelengthRange => ErrorKind::InputShape,
            Self::UnmatchedBoundaryVertex { .. }
            | Self::EmptyAlphaShape
            | Self::EmptyLoop { .. }
            | Self::TooFewAnchors { .. } => ErrorKind::GeometryConsistency,
            Self::DegenerateWindow { .. } => ErrorKind::DegenerateWindow,
            Self::RegressionFailure { .. } => ErrorKind::RegressionFailure,
            Self::InvalidQuantile(_)
            | Self::InvalidSpan(_)
            | Self::InvalidDegree(_)
            | Self::InvalidDivisor { .. }
            | Self::DuplicateParameter { .. } => ErrorKind::InvalidParameter,
        }
    }

    /// Wrap a backend error with the stage it occurred in.
    pub fn regression(stage: Stage, source: RegressionError) -> Self {
        Self::RegressionFailure { stage, source }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for AfsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::TooFewPixels { got, min } => {
                write!(f, "Too few pixels: got {got}, need at least {min}")
            }
            Self::MismatchedColumns {
                wavelength_len,
                intensity_len,
            } => write!(
                f,
                "Column length mismatch: wavelength has {wavelength_len} rows, intensity has {intensity_len}"
            ),
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::NonIncreasingWavelength { index } => {
                write!(f, "Wavelength at index {index} is not strictly increasing")
            }
            Self::NegativeIntensity { index } => {
                write!(f, "Intensity at index {index} is negative")
            }
            Self::NonPositiveMaxIntensity(max) => {
                write!(f, "Maximum intensity {max} must be > 0")
            }
            Self::ConstantIntensity => write!(f, "All intensities are identical"),
            Self::ZeroWavelengthRange => write!(f, "Wavelength range is zero"),
            Self::UnmatchedBoundaryVertex { wavelength } => write!(
                f,
                "Boundary vertex at wavelength {wavelength} does not match any pixel"
            ),
            Self::EmptyAlphaShape => write!(f, "Alpha shape contains no polygon"),
            Self::EmptyLoop { loop_index } => {
                write!(f, "Boundary loop {loop_index} has no anchor candidates")
            }
            Self::TooFewAnchors { got } => {
                write!(f, "Too few anchors: got {got}, need at least 2")
            }
            Self::DegenerateWindow {
                left,
                right,
                reason,
            } => write!(f, "Degenerate window [{left}, {right}]: {reason}"),
            Self::RegressionFailure { stage, source } => {
                write!(f, "Local regression failed in {stage} fit: {source}")
            }
            Self::InvalidQuantile(q) => {
                write!(f, "Invalid quantile: {q} (must be > 0 and < 1)")
            }
            Self::InvalidSpan(d) => write!(f, "Invalid span: {d} (must be > 0 and < 1)"),
            Self::InvalidDegree(degree) => {
                write!(f, "Invalid degree: {degree} (must be 0, 1 or 2)")
            }
            Self::InvalidDivisor { name, value } => {
                write!(f, "Invalid {name}: {value} (must be > 0 and finite)")
            }
            Self::DuplicateParameter { parameter } => write!(
                f,
                "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
            ),
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for AfsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RegressionFailure { source, .. } => Some(source),
            _ => None,
        }
    }
}
