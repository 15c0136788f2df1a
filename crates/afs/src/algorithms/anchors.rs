//! Anchor set construction.
//!
//! ## Purpose
//!
//! This module reduces the boundary loops to one ascending set of anchor
//! pixels: the points of the order taken to touch the continuum.
//!
//! ## Design notes
//!
//! * **Arc selection**: Each loop is cut to the run going from its smallest
//!   to its largest pixel index in loop order. Exterior rings are clockwise,
//!   so this is the upper arc; the returning arc only closes the shape.
//! * **Wrap-around**: When the smallest index comes after the largest one the
//!   loop is read circularly.
//! * **Last pixel**: Index `n - 1` is never an anchor.
//!
//! ## Invariants
//!
//! * The anchor set is strictly ascending, contains 0 and every element is
//!   below `n - 1`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Reverse;
use log::debug;

// Internal dependencies
use crate::primitives::errors::AfsError;

/// Run of `indices` from its smallest to its largest element, in loop order.
///
/// Returns `None` for an empty loop.
pub fn continuum_arc(indices: &[usize]) -> Option<Vec<usize>> {
    let (pos_min, &min_k) = indices.iter().enumerate().min_by_key(|&(_, &v)| v)?;
    // First occurrence of the maximum
    let (pos_max, &max_k) = indices
        .iter()
        .enumerate()
        .max_by_key(|&(i, &v)| (v, Reverse(i)))?;

    let last = indices.len() - 1;
    if indices[0] == min_k && indices[last] == max_k {
        return Some(indices.to_vec());
    }

    let arc = if pos_min < pos_max {
        indices[pos_min..=pos_max].to_vec()
    } else {
        let mut arc = indices[pos_min..].to_vec();
        arc.extend_from_slice(&indices[..=pos_max]);
        arc
    };
    Some(arc)
}

/// Merge the continuum arcs of all loops into the anchor set.
pub fn build_anchors(loops: &[Vec<usize>], n: usize) -> Result<Vec<usize>, AfsError> {
    let mut anchors: Vec<usize> = vec![0];

    for (loop_index, boundary) in loops.iter().enumerate() {
        let candidates: Vec<usize> = boundary
            .iter()
            .copied()
            .filter(|&i| i + 1 < n)
            .collect();

        let arc = continuum_arc(&candidates).ok_or(AfsError::EmptyLoop { loop_index })?;
        anchors.extend(arc);
    }

    anchors.sort_unstable();
    anchors.dedup();

    debug!("anchor set: {} anchors from {} loop(s)", anchors.len(), loops.len());

    if anchors.len() < 2 {
        return Err(AfsError::TooFewAnchors { got: anchors.len() });
    }

    Ok(anchors)
}
