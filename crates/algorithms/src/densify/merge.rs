//! Merge original points and estimated candidates into one ordered grid

use std::collections::BTreeMap;

use horizon_core::{Coord, Error, GridKey, Point, PointStore, Result};

use super::gaps::Candidate;

/// Combine the store with the estimated candidates.
///
/// `values[i]` is the z estimate for `candidates[i]`. The result is sorted
/// by col, then row. Candidate keys must be disjoint from the store and from
/// each other.
pub fn merge(store: &PointStore, candidates: &[Candidate], values: &[f64]) -> Result<Vec<Point>> {
    if candidates.len() != values.len() {
        return Err(Error::Algorithm(format!(
            "{} candidates but {} estimated values",
            candidates.len(),
            values.len()
        )));
    }

    // GridKey orders by col, then row
    let mut grid: BTreeMap<GridKey, Coord> = store.iter().map(|p| (p.key(), p.coord())).collect();

    for (c, &z) in candidates.iter().zip(values) {
        if grid.insert(c.key(), Coord::new(c.x, c.y, z)).is_some() {
            return Err(Error::Algorithm(format!("candidate {} collides with an existing point", c.key())));
        }
    }

    Ok(grid
        .into_iter()
        .map(|(key, coord)| Point::from_parts(key, coord))
        .collect())
}
