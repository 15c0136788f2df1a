//! Alpha shapes (concave hulls).
//!
//! ## Purpose
//!
//! This module provides the alpha-shape capability the boundary extractor
//! consumes: given a point set and a shape parameter `1 / alpha`, return the
//! exterior rings of the concave hull as either one polygon or a collection
//! of polygons.
//!
//! ## Design notes
//!
//! * **Pluggable**: The pipeline talks to [`AlphaShapeBuilder`]; the default
//!   [`DelaunayAlphaShape`] keeps the Delaunay triangles whose circumradius is
//!   below `alpha` and traces the boundary of their union.
//! * **Orientation**: Exterior rings are clockwise and start at their lowest-x
//!   vertex, so walking a ring from its leftmost to its rightmost vertex
//!   follows the upper arc of the shape. This matches the shell orientation
//!   of the usual GIS geometry engines.
//! * **Pinches**: Where two parts of the shape meet in a single vertex, the
//!   tracer turns into the first boundary edge clockwise from the incoming
//!   one, which splits the boundary into simple rings.
//!
//! ## Key concepts
//!
//! * **Closed ring**: The first vertex is repeated at the end of every ring.
//! * **Holes**: Rings traced around holes are not reported.
//!
//! ## Non-goals
//!
//! * This module does not map vertices back to pixels (see `algorithms::boundary`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::f64::consts::TAU;
use core::slice;
use num_traits::Float;

// Internal dependencies
use crate::geometry::delaunay::{Triangulation, orient};
use crate::primitives::errors::AfsError;
use crate::primitives::order::Point;

// ============================================================================
// Alpha Shape
// ============================================================================

/// Closed ring of vertices (first vertex repeated at the end).
pub type Ring<T> = Vec<Point<T>>;

/// Result of an alpha-shape computation.
#[derive(Debug, Clone, PartialEq)]
pub enum AlphaShape<T> {
    /// No triangle survived the alpha filter.
    Empty,

    /// A single polygon.
    Polygon(Ring<T>),

    /// Several polygons, in order of their leftmost vertex.
    MultiPolygon(Vec<Ring<T>>),
}

impl<T> AlphaShape<T> {
    /// Collapse a list of exterior rings into the matching variant.
    pub fn from_rings(mut rings: Vec<Ring<T>>) -> Self {
        match rings.len() {
            0 => AlphaShape::Empty,
            1 => AlphaShape::Polygon(rings.remove(0)),
            _ => AlphaShape::MultiPolygon(rings),
        }
    }

    /// Exterior rings, whatever the variant.
    pub fn rings(&self) -> &[Ring<T>] {
        match self {
            AlphaShape::Empty => &[],
            AlphaShape::Polygon(ring) => slice::from_ref(ring),
            AlphaShape::MultiPolygon(rings) => rings,
        }
    }

    /// Number of polygons.
    #[inline]
    pub fn len(&self) -> usize {
        self.rings().len()
    }

    /// Whether the shape has no polygon.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, AlphaShape::Empty)
    }
}

// ============================================================================
// Capability
// ============================================================================

/// Capability computing the alpha shape of a point set.
pub trait AlphaShapeBuilder<T: Float> {
    /// Alpha shape of `points` for `shape_parameter = 1 / alpha`.
    ///
    /// A non-positive shape parameter yields the convex hull.
    fn alpha_shape(
        &self,
        points: &[Point<T>],
        shape_parameter: T,
    ) -> Result<AlphaShape<T>, AfsError>;
}

/// Alpha shape via Delaunay triangulation and circumradius filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelaunayAlphaShape;

impl<T: Float> AlphaShapeBuilder<T> for DelaunayAlphaShape {
    fn alpha_shape(
        &self,
        points: &[Point<T>],
        shape_parameter: T,
    ) -> Result<AlphaShape<T>, AfsError> {
        let triangulation = Triangulation::new(points)?;

        let shape_parameter = shape_parameter.to_f64().unwrap_or(0.0);
        let alpha = if shape_parameter > 0.0 {
            1.0 / shape_parameter
        } else {
            f64::INFINITY
        };

        let kept: Vec<[usize; 3]> = triangulation
            .triangles
            .iter()
            .filter(|tri| triangulation.circumradius(tri) < alpha)
            .copied()
            .collect();

        let rings = trace_exteriors(&kept, &triangulation.normalized)
            .into_iter()
            .map(|ring| ring.into_iter().map(|i| points[i]).collect())
            .collect();

        Ok(AlphaShape::from_rings(rings))
    }
}

// ============================================================================
// Boundary Tracing
// ============================================================================

/// Clockwise exterior rings of the union of `triangles`, as closed index
/// sequences starting at their leftmost vertex.
///
/// Boundary edges are walked with the interior on the left, which traces
/// shells counter-clockwise and holes clockwise; shells are then reversed.
pub fn trace_exteriors(triangles: &[[usize; 3]], pts: &[(f64, f64)]) -> Vec<Vec<usize>> {
    let mut directed: BTreeSet<(usize, usize)> = BTreeSet::new();
    for &[a, b, c] in triangles {
        directed.insert((a, b));
        directed.insert((b, c));
        directed.insert((c, a));
    }

    // Boundary edges keep the interior on their left
    let mut outgoing: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for &(u, v) in directed.iter() {
        if !directed.contains(&(v, u)) {
            outgoing.entry(u).or_default().push(v);
        }
    }

    let mut used: BTreeSet<(usize, usize)> = BTreeSet::new();
    let mut rings: Vec<Vec<usize>> = Vec::new();

    for (&start, targets) in outgoing.iter() {
        for &first in targets {
            if used.contains(&(start, first)) {
                continue;
            }

            let mut ring = vec![start];
            used.insert((start, first));
            let (mut prev, mut cur) = (start, first);

            loop {
                let Some(next) = next_boundary_vertex(&outgoing, pts, prev, cur) else {
                    break;
                };
                if (cur, next) == (start, first) {
                    break;
                }
                if !used.insert((cur, next)) {
                    break;
                }
                ring.push(cur);
                prev = cur;
                cur = next;
            }

            if ring.len() >= 3 && signed_area(&ring, pts) > 0.0 {
                ring.reverse();
                rings.push(close_at_leftmost(ring, pts));
            }
        }
    }

    rings.sort_by(|a, b| {
        pts[a[0]]
            .0
            .partial_cmp(&pts[b[0]].0)
            .unwrap_or(core::cmp::Ordering::Equal)
            .then(a[0].cmp(&b[0]))
    });
    rings
}

/// Next vertex after walking `prev -> cur`: the first outgoing boundary edge
/// of `cur` clockwise from the direction back to `prev`.
fn next_boundary_vertex(
    outgoing: &BTreeMap<usize, Vec<usize>>,
    pts: &[(f64, f64)],
    prev: usize,
    cur: usize,
) -> Option<usize> {
    let candidates = outgoing.get(&cur)?;
    if candidates.len() == 1 {
        return Some(candidates[0]);
    }

    let origin = pts[cur];
    let back = angle(origin, pts[prev]);

    candidates
        .iter()
        .map(|&w| {
            let mut cw = back - angle(origin, pts[w]);
            while cw <= 0.0 {
                cw += TAU;
            }
            (cw, w)
        })
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(core::cmp::Ordering::Equal))
        .map(|(_, w)| w)
}

#[inline]
fn angle(from: (f64, f64), to: (f64, f64)) -> f64 {
    (to.1 - from.1).atan2(to.0 - from.0)
}

/// Shoelace area of an open ring; positive when counter-clockwise.
fn signed_area(ring: &[usize], pts: &[(f64, f64)]) -> f64 {
    let origin = pts[ring[0]];
    let mut twice = 0.0;
    for k in 1..ring.len() - 1 {
        twice += orient(origin, pts[ring[k]], pts[ring[k + 1]]);
    }
    twice / 2.0
}

/// Rotate an open ring to start at its lowest-x vertex and close it.
fn close_at_leftmost(mut ring: Vec<usize>, pts: &[(f64, f64)]) -> Vec<usize> {
    let start = (0..ring.len())
        .min_by(|&a, &b| {
            pts[ring[a]]
                .0
                .partial_cmp(&pts[ring[b]].0)
                .unwrap_or(core::cmp::Ordering::Equal)
                .then(ring[a].cmp(&ring[b]))
        })
        .unwrap_or(0);
    ring.rotate_left(start);
    ring.push(ring[0]);
    ring
}
