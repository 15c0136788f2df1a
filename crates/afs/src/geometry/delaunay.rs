//! Delaunay triangulation.
//!
//! ## Purpose
//!
//! This module triangulates the 2-D point cloud of an order. The alpha shape
//! is the sub-complex of this triangulation made of triangles whose
//! circumradius is below alpha.
//!
//! ## Design notes
//!
//! * **Exact predicates**: The triangulation is bulk-loaded into a
//!   `spade::DelaunayTriangulation`, whose orientation and in-circle tests are
//!   adaptive-precision. Smooth continua, where thousands of consecutive
//!   pixels are almost collinear, therefore triangulate in `O(n log n)`.
//! * **Normalized**: Coordinates are translated to the origin and divided by
//!   the larger axis extent before insertion. This is a similarity transform,
//!   so the triangulation is unchanged while circumradii stay well
//!   conditioned for wavelengths in the thousands.
//! * **Indexed vertices**: Each vertex carries its input index, so output
//!   triangles refer to the caller's points regardless of insertion order.
//!
//! ## Invariants
//!
//! * Output triangles reference input indices only and are counter-clockwise.
//! * Duplicate points are merged; collinear inputs yield no triangle.
//!
//! ## Non-goals
//!
//! * This module does not support constrained edges.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;
use spade::{DelaunayTriangulation, HasPosition, Point2, Triangulation as _};

// Internal dependencies
use crate::primitives::errors::AfsError;
use crate::primitives::order::Point;

// ============================================================================
// Vertex
// ============================================================================

/// Normalized point tagged with its position in the input.
#[derive(Debug, Clone, Copy)]
struct IndexedVertex {
    position: Point2<f64>,
    index: usize,
}

impl HasPosition for IndexedVertex {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

/// Twice the signed area of `(a, b, c)`; positive when counter-clockwise.
#[inline]
pub(crate) fn orient(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

// ============================================================================
// Triangulation
// ============================================================================

/// Delaunay triangulation of a point set.
#[derive(Debug, Clone)]
pub struct Triangulation {
    /// Counter-clockwise triangles as indices into the input points.
    pub triangles: Vec<[usize; 3]>,

    /// Input points after the similarity transform, in input order.
    pub normalized: Vec<(f64, f64)>,

    /// Factor the coordinates were divided by.
    pub scale: f64,
}

impl Triangulation {
    /// Triangulate `points`.
    ///
    /// Fails with [`AfsError::InvalidNumericValue`] when a coordinate cannot
    /// be represented by the triangulation (NaN or out of range).
    pub fn new<T: Float>(points: &[Point<T>]) -> Result<Self, AfsError> {
        let (normalized, scale) = normalize(points);

        if normalized.len() < 3 {
            return Ok(Self {
                triangles: Vec::new(),
                normalized,
                scale,
            });
        }

        let vertices: Vec<IndexedVertex> = normalized
            .iter()
            .enumerate()
            .map(|(index, &(x, y))| IndexedVertex {
                position: Point2::new(x, y),
                index,
            })
            .collect();

        let delaunay: DelaunayTriangulation<IndexedVertex> =
            DelaunayTriangulation::bulk_load(vertices).map_err(|e| {
                AfsError::InvalidNumericValue(format!("triangulation rejected a vertex: {e:?}"))
            })?;

        let triangles = delaunay
            .inner_faces()
            .map(|face| face.vertices().map(|v| v.data().index))
            .collect();

        Ok(Self {
            triangles,
            normalized,
            scale,
        })
    }

    /// Circumradius of triangle `tri` in the original (un-normalized) units.
    pub fn circumradius(&self, tri: &[usize; 3]) -> f64 {
        let [a, b, c] = *tri;
        let pa = self.normalized[a];
        let pb = self.normalized[b];
        let pc = self.normalized[c];

        let ab = (pa.0 - pb.0).hypot(pa.1 - pb.1);
        let bc = (pb.0 - pc.0).hypot(pb.1 - pc.1);
        let ca = (pc.0 - pa.0).hypot(pc.1 - pa.1);
        let area = orient(pa, pb, pc).abs() / 2.0;

        if area <= 0.0 {
            return f64::INFINITY;
        }

        ab * bc * ca / (4.0 * area) * self.scale
    }

    /// Number of triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the triangulation has no triangle.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Translate to the origin and divide by the larger axis extent.
fn normalize<T: Float>(points: &[Point<T>]) -> (Vec<(f64, f64)>, f64) {
    let raw: Vec<(f64, f64)> = points
        .iter()
        .map(|p| {
            (
                p.x.to_f64().unwrap_or(f64::NAN),
                p.y.to_f64().unwrap_or(f64::NAN),
            )
        })
        .collect();

    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in raw.iter() {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    let extent = (max_x - min_x).max(max_y - min_y);
    let scale = if extent > 0.0 && extent.is_finite() {
        extent
    } else {
        1.0
    };

    let normalized = raw
        .into_iter()
        .map(|(x, y)| ((x - min_x) / scale, (y - min_y) / scale))
        .collect();

    (normalized, scale)
}
