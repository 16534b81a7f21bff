//! Scattered-data interpolation
//!
//! Estimate values at arbitrary (x, y) positions from irregularly placed
//! samples:
//! - Linear: barycentric interpolation over a Delaunay triangulation
//! - Cubic: Clough-Tocher C1 piecewise cubic over the same triangulation
//! - Nearest: value of the closest sample (k-d tree)
//!
//! Linear and cubic are undefined outside the convex hull of the samples and
//! report NaN there; [`estimate`] resolves those with a nearest-sample pass.

mod cubic;
mod estimator;
pub mod kdtree;
mod linear;
mod nearest;
pub mod triangulation;

pub use cubic::CloughTocher;
pub use estimator::{estimate, interpolate_batch, Estimates, Method};
pub use kdtree::{KdTree, NearestResult};
pub use linear::{linear_at, linear_batch};
pub use nearest::nearest_batch;
pub use triangulation::{Location, Triangulation};

/// A sample point with x, y coordinates and a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl SamplePoint {
    pub fn new(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value }
    }

    /// Squared Euclidean distance to another point
    #[inline]
    pub fn dist_sq(&self, other_x: f64, other_y: f64) -> f64 {
        let dx = self.x - other_x;
        let dy = self.y - other_y;
        dx * dx + dy * dy
    }
}

impl From<horizon_core::Point> for SamplePoint {
    fn from(p: horizon_core::Point) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}
