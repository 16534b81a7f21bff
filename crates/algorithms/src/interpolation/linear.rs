//! Linear (TIN) interpolation
//!
//! Interpolates within each Delaunay triangle using barycentric weights,
//! giving the piecewise-affine surface through the samples.

use crate::maybe_rayon::*;

use super::triangulation::Triangulation;

/// Linear estimate at (x, y), NaN outside the convex hull.
pub fn linear_at(tri: &Triangulation, x: f64, y: f64) -> f64 {
    match tri.locate(x, y) {
        Some(loc) => {
            let pts = tri.points();
            let [a, b, c] = tri.vertices(loc.triangle);
            let [u, v, w] = loc.weights;
            u * pts[a].value + v * pts[b].value + w * pts[c].value
        }
        None => f64::NAN,
    }
}

/// Linear estimates for a batch of query positions.
pub fn linear_batch(tri: &Triangulation, queries: &[(f64, f64)]) -> Vec<f64> {
    queries
        .into_par_iter()
        .map(|&(x, y)| linear_at(tri, x, y))
        .collect()
}
