//! Grid topology: which rows each column holds, which columns each row holds,
//! and the dominant spacing along each axis.

use std::collections::HashMap;

use horizon_core::PointStore;
use serde::{Deserialize, Serialize};

/// Spacing reported when no gap larger than one is observed
pub const DEFAULT_SPACING: i64 = 4;

/// Number of axis keys sampled for spacing inference
pub const DEFAULT_SPACING_SAMPLE: usize = 100;

/// Sorted, de-duplicated lanes keyed along one grid axis.
///
/// For the column index a lane is the rows present in that column; for the
/// row index it is the columns present in that row. Keys iterate in the order
/// they first appeared.
#[derive(Debug, Clone, Default)]
pub struct AxisIndex {
    keys: Vec<i64>,
    lanes: Vec<Vec<i64>>,
    slots: HashMap<i64, usize>,
}

impl AxisIndex {
    fn push(&mut self, key: i64, value: i64) {
        let slot = match self.slots.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.keys.len();
                self.keys.push(key);
                self.lanes.push(Vec::new());
                self.slots.insert(key, slot);
                slot
            }
        };
        self.lanes[slot].push(value);
    }

    fn finish(&mut self) {
        for lane in &mut self.lanes {
            lane.sort_unstable();
            lane.dedup();
        }
    }

    /// Number of populated keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Sorted lane for `key`
    pub fn get(&self, key: i64) -> Option<&[i64]> {
        self.slots.get(&key).map(|&slot| self.lanes[slot].as_slice())
    }

    /// `(key, lane)` pairs in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &[i64])> + '_ {
        self.keys
            .iter()
            .zip(&self.lanes)
            .map(|(&k, lane)| (k, lane.as_slice()))
    }

    /// Most frequent gap between consecutive lane entries.
    ///
    /// Only the first `sample` keys are examined. Gaps of one are ignored;
    /// ties go to the gap size seen first. Falls back to
    /// [`DEFAULT_SPACING`] when nothing qualifies.
    pub fn dominant_gap(&self, sample: usize) -> i64 {
        let mut counts: Vec<(i64, usize)> = Vec::new();
        let mut seen: HashMap<i64, usize> = HashMap::new();

        for lane in self.lanes.iter().take(sample) {
            for pair in lane.windows(2) {
                let gap = pair[1] - pair[0];
                if gap <= 1 {
                    continue;
                }
                match seen.get(&gap) {
                    Some(&i) => counts[i].1 += 1,
                    None => {
                        seen.insert(gap, counts.len());
                        counts.push((gap, 1));
                    }
                }
            }
        }

        counts
            .iter()
            .fold(None, |best: Option<(i64, usize)>, &(gap, n)| match best {
                Some((_, m)) if m >= n => best,
                _ => Some((gap, n)),
            })
            .map_or(DEFAULT_SPACING, |(gap, _)| gap)
    }
}

/// Axis indices and inferred spacing of a point store
#[derive(Debug, Clone)]
pub struct GridTopology {
    /// col -> sorted rows present in that column
    pub columns: AxisIndex,
    /// row -> sorted columns present in that row
    pub rows: AxisIndex,
    /// Dominant step between neighbouring columns
    pub col_spacing: i64,
    /// Dominant step between neighbouring rows
    pub row_spacing: i64,
}

/// Serializable overview of a grid topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologySummary {
    pub populated_cols: usize,
    pub populated_rows: usize,
    pub col_spacing: i64,
    pub row_spacing: i64,
}

impl GridTopology {
    /// Build both axis indices and infer spacing from the first `sample`
    /// columns and rows.
    pub fn analyze(store: &PointStore, sample: usize) -> Self {
        let mut columns = AxisIndex::default();
        let mut rows = AxisIndex::default();

        for key in store.keys() {
            columns.push(key.col, key.row);
            rows.push(key.row, key.col);
        }
        columns.finish();
        rows.finish();

        let row_spacing = columns.dominant_gap(sample);
        let col_spacing = rows.dominant_gap(sample);

        Self {
            columns,
            rows,
            col_spacing,
            row_spacing,
        }
    }

    pub fn summary(&self) -> TopologySummary {
        TopologySummary {
            populated_cols: self.columns.len(),
            populated_rows: self.rows.len(),
            col_spacing: self.col_spacing,
            row_spacing: self.row_spacing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_core::Point;

    fn store_from_keys(keys: &[(i64, i64)]) -> PointStore {
        keys.iter()
            .map(|&(c, r)| Point::new(c as f64, r as f64, 0.0, c, r))
            .collect()
    }

    #[test]
    fn test_lanes_sorted_and_deduplicated() {
        let store = store_from_keys(&[(5, 8), (5, 0), (1, 4), (5, 4), (1, 0)]);
        let topo = GridTopology::analyze(&store, DEFAULT_SPACING_SAMPLE);

        let cols: Vec<(i64, Vec<i64>)> = topo
            .columns
            .iter()
            .map(|(k, lane)| (k, lane.to_vec()))
            .collect();
        assert_eq!(cols, vec![(5, vec![0, 4, 8]), (1, vec![0, 4])]);

        assert_eq!(topo.rows.get(4), Some(&[1, 5][..]));
        assert_eq!(topo.rows.get(8), Some(&[5][..]));
        assert!(topo.rows.get(3).is_none());
    }

    #[test]
    fn test_spacing_per_axis() {
        // Columns every 3, rows every 5
        let mut keys = Vec::new();
        for c in 0..4 {
            for r in 0..4 {
                keys.push((c * 3, r * 5));
            }
        }
        let topo = GridTopology::analyze(&store_from_keys(&keys), DEFAULT_SPACING_SAMPLE);
        assert_eq!(topo.col_spacing, 3);
        assert_eq!(topo.row_spacing, 5);
        assert_eq!(
            topo.summary(),
            TopologySummary {
                populated_cols: 4,
                populated_rows: 4,
                col_spacing: 3,
                row_spacing: 5,
            }
        );
    }

    #[test]
    fn test_unit_gaps_ignored() {
        // Mostly unit gaps with a few gaps of 6
        let rows = [0, 1, 2, 3, 4, 10, 11, 12, 18];
        let keys: Vec<(i64, i64)> = rows.iter().map(|&r| (0, r)).collect();
        let topo = GridTopology::analyze(&store_from_keys(&keys), DEFAULT_SPACING_SAMPLE);
        assert_eq!(topo.row_spacing, 6);
    }

    #[test]
    fn test_default_when_no_qualifying_gap() {
        let topo = GridTopology::analyze(&store_from_keys(&[(0, 0), (0, 1), (7, 0)]), DEFAULT_SPACING_SAMPLE);
        assert_eq!(topo.row_spacing, DEFAULT_SPACING);
        assert_eq!(topo.col_spacing, 7);

        let single = GridTopology::analyze(&store_from_keys(&[(2, 2)]), DEFAULT_SPACING_SAMPLE);
        assert_eq!(single.row_spacing, DEFAULT_SPACING);
        assert_eq!(single.col_spacing, DEFAULT_SPACING);
    }

    #[test]
    fn test_tie_goes_to_first_seen_gap() {
        // Column 0 contributes gap 8 first, column 1 contributes gap 2: one each
        let store = store_from_keys(&[(0, 0), (0, 8), (1, 0), (1, 2)]);
        let topo = GridTopology::analyze(&store, DEFAULT_SPACING_SAMPLE);
        assert_eq!(topo.row_spacing, 8);
    }

    #[test]
    fn test_sample_bound_limits_inspected_keys() {
        // First column has gap 2, second column gap 5 twice
        let store = store_from_keys(&[(0, 0), (0, 2), (1, 0), (1, 5), (1, 10)]);
        assert_eq!(GridTopology::analyze(&store, 100).row_spacing, 5);
        assert_eq!(GridTopology::analyze(&store, 1).row_spacing, 2);
        assert_eq!(GridTopology::analyze(&store, 0).row_spacing, DEFAULT_SPACING);
    }
}
