//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout AFS:
//! - Kernel functions for distance-based weighting
//! - Sample quantiles for window selection
//! - Intensity scaling ahead of the alpha shape
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Algorithms
//!   ↓
//! Layer 3: Geometry
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Kernel (weight) functions for distance-based weighting.
pub mod kernel;

/// Sample quantiles.
pub mod quantile;

/// Point scaler.
pub mod scaling;
