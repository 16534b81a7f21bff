//! Keyed point store

use std::collections::HashMap;

use super::point::{Coord, GridKey, Point};

/// Scattered input points keyed by (col, row).
///
/// Duplicate keys collapse to the last-seen coordinates. Iteration follows
/// the order in which each key was first seen, so "the first N columns"
/// means the first N columns to appear in the input.
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    coords: HashMap<GridKey, Coord>,
    order: Vec<GridKey>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from points, last writer wins on duplicate keys.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut store = Self::new();
        for p in points {
            store.insert(p);
        }
        store
    }

    /// Insert or overwrite a point. Overwriting keeps the key's original position.
    pub fn insert(&mut self, point: Point) {
        let key = point.key();
        if self.coords.insert(key, point.coord()).is_none() {
            self.order.push(key);
        }
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Coordinates stored under `key`
    #[inline]
    pub fn get(&self, key: GridKey) -> Option<Coord> {
        self.coords.get(&key).copied()
    }

    #[inline]
    pub fn contains(&self, key: GridKey) -> bool {
        self.coords.contains_key(&key)
    }

    /// Keys in first-appearance order
    pub fn keys(&self) -> impl Iterator<Item = GridKey> + '_ {
        self.order.iter().copied()
    }

    /// Points in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.order
            .iter()
            .map(move |&key| Point::from_parts(key, self.coords[&key]))
    }
}

impl FromIterator<Point> for PointStore {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_writer_wins() {
        let store = PointStore::from_points(vec![
            Point::new(0.0, 0.0, 1.0, 0, 0),
            Point::new(5.0, 5.0, 5.0, 1, 1),
            Point::new(9.0, 9.0, 9.0, 0, 0),
        ]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(GridKey::new(0, 0)), Some(Coord::new(9.0, 9.0, 9.0)));
    }

    #[test]
    fn test_first_appearance_order() {
        let store: PointStore = vec![
            Point::new(0.0, 0.0, 0.0, 3, 0),
            Point::new(0.0, 0.0, 0.0, 1, 0),
            Point::new(0.0, 0.0, 0.0, 3, 0),
            Point::new(0.0, 0.0, 0.0, 2, 0),
        ]
        .into_iter()
        .collect();

        let cols: Vec<i64> = store.keys().map(|k| k.col).collect();
        assert_eq!(cols, vec![3, 1, 2]);
    }

    #[test]
    fn test_missing_key() {
        let store = PointStore::from_points(vec![Point::new(0.0, 0.0, 0.0, 0, 0)]);
        assert!(store.get(GridKey::new(0, 1)).is_none());
        assert!(!store.contains(GridKey::new(1, 0)));
        assert!(store.contains(GridKey::new(0, 0)));
    }

    #[test]
    fn test_empty() {
        let store = PointStore::new();
        assert!(store.is_empty());
        assert_eq!(store.iter().count(), 0);
    }
}
