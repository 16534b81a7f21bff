//! Gap generation: new grid positions between existing neighbours
//!
//! The column pass steps along each column's rows, the row pass along each
//! row's columns. A key is emitted at most once and never when it already
//! exists in the store; because the column pass runs first, it owns any key
//! both passes could produce.

use std::collections::HashSet;

use horizon_core::{Coord, Error, GridKey, PointStore, Result};

use super::topology::{AxisIndex, GridTopology};

/// A new grid position awaiting a z value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub col: i64,
    pub row: i64,
    pub x: f64,
    pub y: f64,
}

impl Candidate {
    #[inline]
    pub fn key(&self) -> GridKey {
        GridKey::new(self.col, self.row)
    }
}

/// Which axis a pass steps along
#[derive(Debug, Clone, Copy)]
enum Pass {
    /// Walk rows within a column; x is held, y interpolated
    Column,
    /// Walk columns within a row; y is held, x interpolated
    Row,
}

impl Pass {
    fn key(self, lane_key: i64, step: i64) -> GridKey {
        match self {
            Pass::Column => GridKey::new(lane_key, step),
            Pass::Row => GridKey::new(step, lane_key),
        }
    }

    fn position(self, lo: Coord, hi: Coord, ratio: f64) -> (f64, f64) {
        match self {
            Pass::Column => (lo.x, lo.y + (hi.y - lo.y) * ratio),
            Pass::Row => (lo.x + (hi.x - lo.x) * ratio, lo.y),
        }
    }
}

/// Enumerate every missing grid position at `target_spacing` between
/// consecutive existing entries, column pass first, then row pass.
pub fn generate_candidates(
    store: &PointStore,
    topology: &GridTopology,
    target_spacing: i64,
) -> Result<Vec<Candidate>> {
    if target_spacing < 1 {
        return Err(Error::InvalidParameter {
            name: "target_spacing",
            value: target_spacing.to_string(),
            reason: "must be a positive integer".into(),
        });
    }

    let mut taken = HashSet::new();
    let mut out = Vec::new();

    walk(store, &topology.columns, Pass::Column, target_spacing, &mut taken, &mut out)?;
    walk(store, &topology.rows, Pass::Row, target_spacing, &mut taken, &mut out)?;

    Ok(out)
}

fn walk(
    store: &PointStore,
    index: &AxisIndex,
    pass: Pass,
    spacing: i64,
    taken: &mut HashSet<GridKey>,
    out: &mut Vec<Candidate>,
) -> Result<()> {
    let step = usize::try_from(spacing).map_err(|_| Error::InvalidParameter {
        name: "target_spacing",
        value: spacing.to_string(),
        reason: "does not fit the platform word size".into(),
    })?;

    for (lane_key, lane) in index.iter() {
        for pair in lane.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            let lo_coord = anchor(store, pass.key(lane_key, lo))?;
            let hi_coord = anchor(store, pass.key(lane_key, hi))?;
            let span = (hi - lo) as f64;

            for pos in (lo.saturating_add(spacing)..hi).step_by(step) {
                let key = pass.key(lane_key, pos);
                if store.contains(key) || !taken.insert(key) {
                    continue;
                }

                let (x, y) = pass.position(lo_coord, hi_coord, (pos - lo) as f64 / span);
                out.push(Candidate {
                    col: key.col,
                    row: key.row,
                    x,
                    y,
                });
            }
        }
    }

    Ok(())
}

fn anchor(store: &PointStore, key: GridKey) -> Result<Coord> {
    store
        .get(key)
        .ok_or_else(|| Error::Algorithm(format!("axis index references missing point {}", key)))
}
