//! Layer 3: Geometry
//!
//! # Purpose
//!
//! This layer provides the computational geometry behind the boundary
//! extractor: a Delaunay triangulation and the alpha shape built on it.
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
//! Layer 3: Geometry ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Delaunay triangulation with exact predicates.
pub mod delaunay;

/// Alpha shapes and boundary ring tracing.
pub mod alpha_shape;
