//! 2D k-d tree for nearest-sample queries
//!
//! Answers "which sample is closest to (x, y)" in O(log n) on average. Used
//! by the nearest estimator and to seed point location in the
//! triangulation.
//!
//! Reference:
//! Bentley, J.L. (1975). Multidimensional binary search trees used
//! for associative searching. CACM, 18(9).

use super::SamplePoint;

/// A 2D k-d tree over sample points.
///
/// Points keep their input order; query results report the input index.
#[derive(Debug, Clone)]
pub struct KdTree {
    points: Vec<SamplePoint>,
    nodes: Vec<KdNode>,
    root: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    fn coord(self, p: &SamplePoint) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }

    #[inline]
    fn flip(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

#[derive(Debug, Clone)]
struct KdNode {
    point_idx: usize,
    axis: Axis,
    left: Option<usize>,
    right: Option<usize>,
}

/// Result of a nearest-neighbor query
#[derive(Debug, Clone, Copy)]
pub struct NearestResult {
    pub point: SamplePoint,
    pub distance_sq: f64,
    /// Index of the point in the slice the tree was built from
    pub index: usize,
}

impl KdTree {
    /// Build a tree from sample points.
    ///
    /// Median splits via `select_nth_unstable`, O(n log n) overall.
    pub fn build(points: &[SamplePoint]) -> Self {
        let points = points.to_vec();
        let mut indices: Vec<usize> = (0..points.len()).collect();
        let mut nodes = Vec::with_capacity(points.len());
        let root = split(&points, &mut indices, Axis::X, &mut nodes);

        Self { points, nodes, root }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closest point to (qx, qy), or `None` for an empty tree.
    pub fn nearest(&self, qx: f64, qy: f64) -> Option<NearestResult> {
        let root = self.root?;

        let mut best = NearestResult {
            point: self.points[self.nodes[root].point_idx],
            distance_sq: f64::INFINITY,
            index: self.nodes[root].point_idx,
        };
        self.descend(root, qx, qy, &mut best);

        Some(best)
    }

    fn descend(&self, node_idx: usize, qx: f64, qy: f64, best: &mut NearestResult) {
        let node = &self.nodes[node_idx];
        let p = &self.points[node.point_idx];

        let d = p.dist_sq(qx, qy);
        if d < best.distance_sq {
            *best = NearestResult {
                point: *p,
                distance_sq: d,
                index: node.point_idx,
            };
        }

        let q = match node.axis {
            Axis::X => qx,
            Axis::Y => qy,
        };
        let diff = q - node.axis.coord(p);
        let (near, far) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(child) = near {
            self.descend(child, qx, qy, best);
        }
        // The far side can only help if the splitting line is closer than the best so far
        if diff * diff < best.distance_sq {
            if let Some(child) = far {
                self.descend(child, qx, qy, best);
            }
        }
    }
}

fn split(
    points: &[SamplePoint],
    indices: &mut [usize],
    axis: Axis,
    nodes: &mut Vec<KdNode>,
) -> Option<usize> {
    if indices.is_empty() {
        return None;
    }

    let mid = indices.len() / 2;
    indices.select_nth_unstable_by(mid, |&a, &b| {
        axis.coord(&points[a]).total_cmp(&axis.coord(&points[b]))
    });

    let node_idx = nodes.len();
    nodes.push(KdNode {
        point_idx: indices[mid],
        axis,
        left: None,
        right: None,
    });

    let (below, rest) = indices.split_at_mut(mid);
    let above = &mut rest[1..];
    let left = split(points, below, axis.flip(), nodes);
    let right = split(points, above, axis.flip(), nodes);
    nodes[node_idx].left = left;
    nodes[node_idx].right = right;

    Some(node_idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<SamplePoint> {
        vec![
            SamplePoint::new(2.0, 3.0, 10.0),
            SamplePoint::new(5.0, 4.0, 20.0),
            SamplePoint::new(9.0, 6.0, 30.0),
            SamplePoint::new(4.0, 7.0, 40.0),
            SamplePoint::new(8.0, 1.0, 50.0),
            SamplePoint::new(7.0, 2.0, 60.0),
            SamplePoint::new(1.0, 8.0, 70.0),
            SamplePoint::new(6.0, 5.0, 80.0),
        ]
    }

    fn brute_force(pts: &[SamplePoint], qx: f64, qy: f64) -> f64 {
        pts.iter()
            .map(|p| p.dist_sq(qx, qy))
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn test_empty_tree() {
        let tree = KdTree::build(&[]);
        assert!(tree.is_empty());
        assert!(tree.nearest(0.0, 0.0).is_none());
    }

    #[test]
    fn test_nearest_exact_hit_reports_index() {
        let pts = sample_points();
        let tree = KdTree::build(&pts);
        assert_eq!(tree.len(), 8);

        let result = tree.nearest(5.0, 4.0).unwrap();
        assert_eq!(result.index, 1);
        assert_eq!(result.distance_sq, 0.0);
        assert_eq!(result.point.value, 20.0);
    }

    #[test]
    fn test_nearest_matches_brute_force() {
        let pts = sample_points();
        let tree = KdTree::build(&pts);

        for i in 0..20 {
            for j in 0..20 {
                let qx = i as f64 * 0.5 - 0.25;
                let qy = j as f64 * 0.5 - 0.25;
                let found = tree.nearest(qx, qy).unwrap();
                assert!(
                    (found.distance_sq - brute_force(&pts, qx, qy)).abs() < 1e-12,
                    "mismatch at ({}, {})",
                    qx,
                    qy
                );
                assert_eq!(pts[found.index], found.point);
            }
        }
    }

    #[test]
    fn test_collinear_and_duplicate_points() {
        let mut pts: Vec<SamplePoint> = (0..10)
            .map(|i| SamplePoint::new(i as f64, 0.0, i as f64))
            .collect();
        pts.push(SamplePoint::new(4.0, 0.0, 99.0));
        let tree = KdTree::build(&pts);

        let result = tree.nearest(6.2, 1.0).unwrap();
        assert_eq!(result.point.x, 6.0);
    }

    #[test]
    fn test_large_dataset() {
        let pts: Vec<SamplePoint> = (0..1000)
            .map(|i| {
                let x = ((i * 7 + 13) % 100) as f64;
                let y = ((i * 11 + 37) % 100) as f64;
                SamplePoint::new(x, y, i as f64)
            })
            .collect();
        let tree = KdTree::build(&pts);

        for &(qx, qy) in &[(50.0, 50.0), (-10.0, 3.3), (101.5, 99.9), (33.3, 66.6)] {
            let result = tree.nearest(qx, qy).unwrap();
            assert!((result.distance_sq - brute_force(&pts, qx, qy)).abs() < 1e-10);
        }
    }
}
