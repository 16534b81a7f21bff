//! Horizon grid densification
//!
//! Fills the missing grid positions of a sparsely picked horizon:
//!
//! 1. **Topology**: index which rows each column holds (and vice versa) and
//!    infer the dominant spacing along each axis
//! 2. **Gaps**: step along every column, then every row, emitting new keys
//!    at the target spacing between neighbouring samples
//! 3. **Estimate**: interpolate z for all new positions in one batch, with a
//!    nearest-sample fallback for anything left undefined
//! 4. **Merge**: union originals and estimates, ordered by col then row

mod gaps;
mod merge;
mod topology;

pub use gaps::{generate_candidates, Candidate};
pub use merge::merge;
pub use topology::{AxisIndex, GridTopology, TopologySummary, DEFAULT_SPACING, DEFAULT_SPACING_SAMPLE};

use std::time::Instant;

use horizon_core::{Algorithm, Error, Point, PointStore, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::interpolation::{estimate, Method, SamplePoint};

/// Parameters for grid densification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensifyParams {
    /// Index step between generated positions (default 2)
    pub target_spacing: i64,
    /// Interpolation method for new z values
    pub method: Method,
    /// Columns and rows inspected when inferring spacing (default 100)
    pub spacing_sample: usize,
}

impl Default for DensifyParams {
    fn default() -> Self {
        Self {
            target_spacing: 2,
            method: Method::Linear,
            spacing_sample: DEFAULT_SPACING_SAMPLE,
        }
    }
}

impl DensifyParams {
    pub fn validate(&self) -> Result<()> {
        if self.target_spacing < 1 {
            return Err(Error::InvalidParameter {
                name: "target_spacing",
                value: self.target_spacing.to_string(),
                reason: "must be a positive integer".into(),
            });
        }
        Ok(())
    }
}

/// Counts and settings of one densification run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensifyReport {
    pub original_points: usize,
    pub candidate_points: usize,
    /// Candidates whose value came from the nearest-sample fallback
    pub fallback_points: usize,
    pub topology: TopologySummary,
    pub target_spacing: i64,
    pub method: Method,
}

impl DensifyReport {
    /// Points in the densified grid
    pub fn total_points(&self) -> usize {
        self.original_points + self.candidate_points
    }
}

/// Densified grid ordered by col, then row
#[derive(Debug, Clone)]
pub struct DensifyResult {
    pub points: Vec<Point>,
    pub report: DensifyReport,
}

/// Densification algorithm
#[derive(Debug, Clone, Default)]
pub struct Densify;

impl Algorithm for Densify {
    type Input = PointStore;
    type Output = DensifyResult;
    type Params = DensifyParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Densify"
    }

    fn description(&self) -> &'static str {
        "Fill missing horizon grid positions at a finer index spacing by scattered-data interpolation"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        densify(&input, params)
    }
}

/// Densify a horizon grid.
///
/// Every original point is kept unchanged. New points are added at
/// `target_spacing` between existing neighbours along columns and rows, and
/// each receives an estimated z. Fails with [`Error::EmptyInput`] when the
/// store holds no points.
pub fn densify(store: &PointStore, params: DensifyParams) -> Result<DensifyResult> {
    params.validate()?;
    if store.is_empty() {
        return Err(Error::EmptyInput);
    }

    let start = Instant::now();
    let topology = GridTopology::analyze(store, params.spacing_sample);
    debug!(
        "Topology: {} columns (row spacing {}), {} rows (col spacing {})",
        topology.columns.len(),
        topology.row_spacing,
        topology.rows.len(),
        topology.col_spacing
    );

    let candidates = generate_candidates(store, &topology, params.target_spacing)?;
    debug!(
        "Generated {} candidates at spacing {}",
        candidates.len(),
        params.target_spacing
    );

    let (values, fallback_points) = if candidates.is_empty() {
        (Vec::new(), 0)
    } else {
        let samples: Vec<SamplePoint> = store.iter().map(SamplePoint::from).collect();
        let queries: Vec<(f64, f64)> = candidates.iter().map(|c| (c.x, c.y)).collect();
        let est = estimate(&samples, &queries, params.method)?;
        (est.values, est.fallback_count)
    };

    let points = merge(store, &candidates, &values)?;
    debug!("Densified to {} points in {:.2?}", points.len(), start.elapsed());

    Ok(DensifyResult {
        points,
        report: DensifyReport {
            original_points: store.len(),
            candidate_points: candidates.len(),
            fallback_points,
            topology: topology.summary(),
            target_spacing: params.target_spacing,
            method: params.method,
        },
    })
}
