//! Clough-Tocher piecewise cubic interpolation
//!
//! Each Delaunay triangle is split at its centroid into three sub-triangles
//! carrying a cubic Bézier patch. Control points are fixed by the values
//! and gradients at the vertices, and by requiring the cross-boundary
//! derivative along every edge to vary linearly, which makes the surface C1
//! across triangles. Inside a macro triangle the usual Clough-Tocher
//! conditions make the three patches join C1 as well.
//!
//! Vertex gradients are the area-weighted mean of the gradients of the
//! planar facets around each vertex. Planes are reproduced exactly.
//!
//! Reference:
//! Farin, G. (1986). Triangular Bernstein-Bézier patches. Computer Aided
//! Geometric Design, 3(2), 83-127.

use crate::maybe_rayon::*;

use super::triangulation::Triangulation;

/// Fitted Clough-Tocher interpolant over a triangulation.
#[derive(Debug, Clone)]
pub struct CloughTocher<'a> {
    tri: &'a Triangulation,
    gradients: Vec<[f64; 2]>,
}

impl<'a> CloughTocher<'a> {
    /// Estimate vertex gradients for the triangulation.
    pub fn new(tri: &'a Triangulation) -> Self {
        let pts = tri.points();
        let mut sum = vec![[0.0f64; 2]; pts.len()];
        let mut weight = vec![0.0f64; pts.len()];

        for [a, b, c] in tri.iter() {
            let (p0, p1, p2) = (&pts[a], &pts[b], &pts[c]);
            let d1x = p1.x - p0.x;
            let d1y = p1.y - p0.y;
            let d2x = p2.x - p0.x;
            let d2y = p2.y - p0.y;
            let det = d1x * d2y - d1y * d2x;
            if det.abs() < f64::EPSILON {
                continue;
            }

            let df1 = p1.value - p0.value;
            let df2 = p2.value - p0.value;
            let gx = (df1 * d2y - df2 * d1y) / det;
            let gy = (d1x * df2 - d2x * df1) / det;
            let area = 0.5 * det.abs();

            for v in [a, b, c] {
                sum[v][0] += area * gx;
                sum[v][1] += area * gy;
                weight[v] += area;
            }
        }

        let gradients = sum
            .into_iter()
            .zip(weight)
            .map(|(g, w)| if w > 0.0 { [g[0] / w, g[1] / w] } else { [0.0, 0.0] })
            .collect();

        Self { tri, gradients }
    }

    /// Estimated gradient at each sample
    pub fn gradients(&self) -> &[[f64; 2]] {
        &self.gradients
    }

    /// Cubic estimate at (x, y), NaN outside the convex hull.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let Some(loc) = self.tri.locate(x, y) else {
            return f64::NAN;
        };

        let pts = self.tri.points();
        let idx = self.tri.vertices(loc.triangle);
        let patch = MacroTriangle {
            p: idx.map(|i| [pts[i].x, pts[i].y]),
            f: idx.map(|i| pts[i].value),
            g: idx.map(|i| self.gradients[i]),
        };
        patch.evaluate(loc.weights)
    }

    /// Cubic estimates for a batch of query positions.
    pub fn evaluate_batch(&self, queries: &[(f64, f64)]) -> Vec<f64> {
        queries
            .into_par_iter()
            .map(|&(x, y)| self.evaluate(x, y))
            .collect()
    }
}

/// One triangle with vertex positions, values and gradients
struct MacroTriangle {
    p: [[f64; 2]; 3],
    f: [f64; 3],
    g: [[f64; 2]; 3],
}

#[inline]
fn dot(a: [f64; 2], b: [f64; 2]) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

#[inline]
fn sub(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    [a[0] - b[0], a[1] - b[1]]
}

impl MacroTriangle {
    /// Evaluate at barycentric weights `lambda` of the macro triangle.
    fn evaluate(&self, lambda: [f64; 3]) -> f64 {
        let p = &self.p;
        let f = &self.f;
        let centroid = [
            (p[0][0] + p[1][0] + p[2][0]) / 3.0,
            (p[0][1] + p[1][1] + p[2][1]) / 3.0,
        ];

        // Tangent-plane points next to each vertex: along edge i->j, and toward the centroid
        let along = |i: usize, j: usize| f[i] + dot(self.g[i], sub(p[j], p[i])) / 3.0;
        let inward: [f64; 3] =
            std::array::from_fn(|i| f[i] + dot(self.g[i], sub(centroid, p[i])) / 3.0);

        // Edge-interior point of the sub-triangle on edge (i, j), indexed by the opposite vertex
        let edge_point = |i: usize, j: usize| {
            let eij = along(i, j);
            let eji = along(j, i);

            // Cross-boundary derivative toward the centroid at both ends of the edge
            let start = inward[i] - 0.5 * f[i] - 0.5 * eij;
            let end = inward[j] - 0.5 * eji - 0.5 * f[j];

            // Along-edge derivative coefficients
            let t0 = eij - f[i];
            let t1 = eji - eij;
            let t2 = f[j] - eji;

            let edge = sub(p[j], p[i]);
            let mid = [(p[i][0] + p[j][0]) / 2.0, (p[i][1] + p[j][1]) / 2.0];
            let beta = dot(sub(centroid, mid), edge) / dot(edge, edge);

            0.5 * (eij + eji) + 0.5 * (start + end) + beta * (t1 - 0.5 * (t0 + t2))
        };
        let edge_mid: [f64; 3] =
            std::array::from_fn(|k| edge_point((k + 1) % 3, (k + 2) % 3));

        // Points next to the centroid on each interior edge, then the centroid itself
        let near_center: [f64; 3] = std::array::from_fn(|i| {
            let before = edge_mid[(i + 1) % 3]; // edge (i+2, i)
            let after = edge_mid[(i + 2) % 3]; // edge (i, i+1)
            (inward[i] + before + after) / 3.0
        });
        let center = (near_center[0] + near_center[1] + near_center[2]) / 3.0;

        // Sub-triangle (i, j, centroid) opposite the smallest weight
        let k = (0..3)
            .min_by(|&a, &b| lambda[a].total_cmp(&lambda[b]))
            .unwrap_or(0);
        let i = (k + 1) % 3;
        let j = (k + 2) % 3;

        let mu_i = lambda[i] - lambda[k];
        let mu_j = lambda[j] - lambda[k];
        let mu_c = 3.0 * lambda[k];

        f[i] * mu_i.powi(3)
            + f[j] * mu_j.powi(3)
            + center * mu_c.powi(3)
            + 3.0 * along(i, j) * mu_i * mu_i * mu_j
            + 3.0 * along(j, i) * mu_i * mu_j * mu_j
            + 3.0 * inward[i] * mu_i * mu_i * mu_c
            + 3.0 * inward[j] * mu_j * mu_j * mu_c
            + 3.0 * near_center[i] * mu_i * mu_c * mu_c
            + 3.0 * near_center[j] * mu_j * mu_c * mu_c
            + 6.0 * edge_mid[k] * mu_i * mu_j * mu_c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::SamplePoint;

    fn scatter<F: Fn(f64, f64) -> f64>(f: F) -> Vec<SamplePoint> {
        let mut pts = Vec::new();
        for i in 0..7 {
            for j in 0..7 {
                let x = i as f64 + ((i * 3 + j * 5) % 4) as f64 * 0.1;
                let y = j as f64 + ((i * 5 + j) % 3) as f64 * 0.1;
                pts.push(SamplePoint::new(x, y, f(x, y)));
            }
        }
        pts
    }

    #[test]
    fn test_reproduces_plane() {
        let plane = |x: f64, y: f64| 2.0 - 1.5 * x + 0.25 * y;
        let tri = Triangulation::build(&scatter(plane));
        let ct = CloughTocher::new(&tri);

        for g in ct.gradients() {
            assert!((g[0] + 1.5).abs() < 1e-9);
            assert!((g[1] - 0.25).abs() < 1e-9);
        }

        for &(x, y) in &[(1.2, 1.7), (3.0, 3.0), (5.55, 2.1), (0.5, 5.9)] {
            let v = ct.evaluate(x, y);
            assert!((v - plane(x, y)).abs() < 1e-9, "at ({}, {}): {}", x, y, v);
        }
    }

    #[test]
    fn test_interpolates_samples() {
        let pts = scatter(|x, y| (x * 0.7).sin() + y * y * 0.1);
        let tri = Triangulation::build(&pts);
        let ct = CloughTocher::new(&tri);

        for p in &pts {
            assert!((ct.evaluate(p.x, p.y) - p.value).abs() < 1e-9);
        }
    }

    #[test]
    fn test_continuous_across_subtriangles() {
        let pts = scatter(|x, y| x * x - x * y + 0.5 * y * y);
        let tri = Triangulation::build(&pts);
        let ct = CloughTocher::new(&tri);

        // Adjacent queries never jump, even where the walk switches sub-triangle or triangle
        let mut prev = ct.evaluate(0.5, 2.5);
        for step in 1..=1000 {
            let x = 0.5 + step as f64 * 0.005;
            let v = ct.evaluate(x, 2.5);
            assert!((v - prev).abs() < 0.2, "jump at x={}: {} -> {}", x, prev, v);
            prev = v;
        }
    }

    #[test]
    fn test_close_to_smooth_surface() {
        let surface = |x: f64, y: f64| 0.1 * x * x + 0.05 * y * y;
        let tri = Triangulation::build(&scatter(surface));
        let ct = CloughTocher::new(&tri);

        let v = ct.evaluate(3.3, 3.4);
        assert!((v - surface(3.3, 3.4)).abs() < 0.1, "got {}", v);
    }

    #[test]
    fn test_nan_outside_hull() {
        let tri = Triangulation::build(&scatter(|x, _| x));
        let ct = CloughTocher::new(&tri);
        let values = ct.evaluate_batch(&[(-2.0, 3.0), (3.0, 3.0)]);
        assert!(values[0].is_nan());
        assert!(values[1].is_finite());
    }
}
