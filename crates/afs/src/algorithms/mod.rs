//! Layer 4: Algorithms
//!
//! This layer implements the stages of the continuum fit: boundary
//! extraction, anchor construction, envelope interpolation, local regression
//! and window selection. It contains the "business logic" of AFS but is
//! orchestrated by the engine layer.

// Local polynomial fitting primitives.
pub mod regression;

// Local regression capability and the default loess backend.
pub mod loess;

// Alpha-shape boundary to pixel loops.
pub mod boundary;

// Anchor set construction.
pub mod anchors;

// Piecewise-linear envelope between anchors.
pub mod envelope;

// Per-window quantile selection.
pub mod selection;
