//! Delaunay triangulation of the sample scatter with point location
//!
//! Triangles come from the `delaunator` crate. Locating the triangle that
//! contains a query walks across triangle adjacency, starting from a
//! triangle incident to the nearest sample (found with a k-d tree). A
//! Delaunay triangulation guarantees the walk terminates; the step limit is
//! a guard for near-degenerate input, after which every triangle is scanned.

use delaunator::{Point, EMPTY};

use super::kdtree::KdTree;
use super::SamplePoint;

/// Barycentric weights at or above `-INSIDE_EPS` count as inside, so points
/// on shared edges and hull edges are located.
const INSIDE_EPS: f64 = 1e-9;

/// Delaunay triangulation of a set of samples.
#[derive(Debug, Clone)]
pub struct Triangulation {
    points: Vec<SamplePoint>,
    /// Vertex indices, three per triangle
    triangles: Vec<usize>,
    /// Opposite half-edge for each half-edge, `EMPTY` on the hull
    halfedges: Vec<usize>,
    /// One triangle incident to each vertex (duplicates get none)
    vertex_triangle: Vec<Option<usize>>,
    tree: KdTree,
}

/// A located query: enclosing triangle and its barycentric weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub triangle: usize,
    pub weights: [f64; 3],
}

impl Triangulation {
    /// Triangulate the samples.
    ///
    /// Fewer than three samples, or collinear samples, produce an empty
    /// triangulation in which every query is outside.
    pub fn build(samples: &[SamplePoint]) -> Self {
        let (triangles, halfedges) = if samples.len() < 3 {
            (Vec::new(), Vec::new())
        } else {
            let coords: Vec<Point> = samples
                .iter()
                .map(|p| Point { x: p.x, y: p.y })
                .collect();
            let result = delaunator::triangulate(&coords);
            (result.triangles, result.halfedges)
        };

        let mut vertex_triangle = vec![None; samples.len()];
        for (corner, &v) in triangles.iter().enumerate() {
            if vertex_triangle[v].is_none() {
                vertex_triangle[v] = Some(corner / 3);
            }
        }

        Self {
            points: samples.to_vec(),
            triangles,
            halfedges,
            vertex_triangle,
            tree: KdTree::build(samples),
        }
    }

    /// Number of triangles
    pub fn len(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Samples the triangulation was built from, in input order
    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    /// Vertex indices of triangle `t`
    #[inline]
    pub fn vertices(&self, t: usize) -> [usize; 3] {
        [
            self.triangles[3 * t],
            self.triangles[3 * t + 1],
            self.triangles[3 * t + 2],
        ]
    }

    /// Iterate over all triangles as vertex index triples
    pub fn iter(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        (0..self.len()).map(move |t| self.vertices(t))
    }

    /// Find the triangle containing (x, y).
    ///
    /// Returns `None` outside the convex hull or when the triangulation is
    /// empty.
    pub fn locate(&self, x: f64, y: f64) -> Option<Location> {
        if self.is_empty() {
            return None;
        }

        let mut t = self
            .tree
            .nearest(x, y)
            .and_then(|n| self.vertex_triangle[n.index])
            .unwrap_or(0);

        for _ in 0..=self.len() {
            let weights = self.weights(t, x, y);

            let (k, min) = weights
                .iter()
                .enumerate()
                .fold((0, f64::INFINITY), |acc, (i, &w)| if w < acc.1 { (i, w) } else { acc });
            if min >= -INSIDE_EPS {
                return Some(Location { triangle: t, weights });
            }

            // Cross the edge opposite the most negative weight
            let opposite = self.halfedges[3 * t + (k + 1) % 3];
            if opposite == EMPTY {
                return None;
            }
            t = opposite / 3;
        }

        self.scan(x, y)
    }

    fn scan(&self, x: f64, y: f64) -> Option<Location> {
        (0..self.len()).find_map(|t| {
            let weights = self.weights(t, x, y);
            weights
                .iter()
                .all(|&w| w >= -INSIDE_EPS)
                .then_some(Location { triangle: t, weights })
        })
    }

    fn weights(&self, t: usize, x: f64, y: f64) -> [f64; 3] {
        let [a, b, c] = self.vertices(t);
        let (u, v, w) = barycentric(x, y, &self.points[a], &self.points[b], &self.points[c]);
        [u, v, w]
    }
}

/// Compute barycentric coordinates of point (px, py) within triangle (p0, p1, p2)
///
/// Returns (u, v, w) where the interpolated value is u*v0 + v*v1 + w*v2
pub(crate) fn barycentric(
    px: f64,
    py: f64,
    p0: &SamplePoint,
    p1: &SamplePoint,
    p2: &SamplePoint,
) -> (f64, f64, f64) {
    let v0x = p1.x - p0.x;
    let v0y = p1.y - p0.y;
    let v1x = p2.x - p0.x;
    let v1y = p2.y - p0.y;
    let v2x = px - p0.x;
    let v2y = py - p0.y;

    let dot00 = v0x * v0x + v0y * v0y;
    let dot01 = v0x * v1x + v0y * v1y;
    let dot02 = v0x * v2x + v0y * v2y;
    let dot11 = v1x * v1x + v1y * v1y;
    let dot12 = v1x * v2x + v1y * v2y;

    let inv_denom = 1.0 / (dot00 * dot11 - dot01 * dot01);
    let v = (dot11 * dot02 - dot01 * dot12) * inv_denom;
    let w = (dot00 * dot12 - dot01 * dot02) * inv_denom;
    let u = 1.0 - v - w;

    (u, v, w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<SamplePoint> {
        vec![
            SamplePoint::new(0.0, 0.0, 0.0),
            SamplePoint::new(10.0, 0.0, 0.0),
            SamplePoint::new(0.0, 10.0, 0.0),
            SamplePoint::new(10.0, 10.0, 0.0),
        ]
    }

    fn lattice(n: usize) -> Vec<SamplePoint> {
        let mut pts = Vec::new();
        for i in 0..n {
            for j in 0..n {
                // Slight jitter keeps the Delaunay triangulation unique
                let jitter = ((i * 7 + j * 3) % 5) as f64 * 0.01;
                pts.push(SamplePoint::new(i as f64 + jitter, j as f64 - jitter, 0.0));
            }
        }
        pts
    }

    #[test]
    fn test_square_has_two_triangles() {
        let tri = Triangulation::build(&square());
        assert_eq!(tri.len(), 2);
        assert_eq!(tri.iter().count(), 2);
    }

    #[test]
    fn test_too_few_points() {
        let tri = Triangulation::build(&square()[..2]);
        assert!(tri.is_empty());
        assert!(tri.locate(1.0, 1.0).is_none());
    }

    #[test]
    fn test_collinear_is_empty() {
        let pts: Vec<SamplePoint> = (0..5)
            .map(|i| SamplePoint::new(i as f64, 2.0 * i as f64, 1.0))
            .collect();
        let tri = Triangulation::build(&pts);
        assert!(tri.is_empty());
        assert!(tri.locate(2.0, 4.0).is_none());
    }

    #[test]
    fn test_locate_inside_and_outside() {
        let tri = Triangulation::build(&square());

        let loc = tri.locate(3.0, 4.0).unwrap();
        let sum: f64 = loc.weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(loc.weights.iter().all(|&w| w >= -1e-12));

        assert!(tri.locate(-0.5, 5.0).is_none());
        assert!(tri.locate(5.0, 10.5).is_none());
    }

    #[test]
    fn test_locate_on_hull_edge() {
        let tri = Triangulation::build(&square());
        assert!(tri.locate(0.0, 4.0).is_some());
        assert!(tri.locate(10.0, 10.0).is_some());
    }

    #[test]
    fn test_walk_agrees_with_scan() {
        let pts = lattice(12);
        let tri = Triangulation::build(&pts);
        assert!(!tri.is_empty());

        for i in 0..40 {
            for j in 0..40 {
                let x = i as f64 * 0.3 - 0.5;
                let y = j as f64 * 0.3 - 0.5;
                let walked = tri.locate(x, y);
                let scanned = tri.scan(x, y);
                assert_eq!(walked.is_some(), scanned.is_some(), "at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_barycentric_at_vertices() {
        let p0 = SamplePoint::new(0.0, 0.0, 1.0);
        let p1 = SamplePoint::new(10.0, 0.0, 2.0);
        let p2 = SamplePoint::new(0.0, 10.0, 3.0);

        let (u, v, w) = barycentric(10.0, 0.0, &p0, &p1, &p2);
        assert!(u.abs() < 1e-10);
        assert!((v - 1.0).abs() < 1e-10);
        assert!(w.abs() < 1e-10);

        let (u, v, w) = barycentric(10.0 / 3.0, 10.0 / 3.0, &p0, &p1, &p2);
        assert!((u - 1.0 / 3.0).abs() < 1e-10);
        assert!((v - 1.0 / 3.0).abs() < 1e-10);
        assert!((w - 1.0 / 3.0).abs() < 1e-10);
    }
}
