//! Nearest Neighbor interpolation
//!
//! Each query receives the value of the closest sample point (Voronoi
//! assignment). Defined everywhere as long as there is at least one sample.

use crate::maybe_rayon::*;

use super::kdtree::KdTree;

/// Nearest-sample values for a batch of query positions.
///
/// Returns NaN for every query when the tree is empty.
pub fn nearest_batch(tree: &KdTree, queries: &[(f64, f64)]) -> Vec<f64> {
    queries
        .into_par_iter()
        .map(|&(x, y)| tree.nearest(x, y).map_or(f64::NAN, |n| n.point.value))
        .collect()
}
