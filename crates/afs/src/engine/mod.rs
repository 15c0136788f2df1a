//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates the continuum fit by coordinating between
//! primitives, geometry and algorithms. It validates the order, runs the
//! stages in order and packages the result.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Algorithms
//!   ↓
//! Layer 3: Geometry
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Pipeline execution engine.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types for AFS operations.
pub mod output;
