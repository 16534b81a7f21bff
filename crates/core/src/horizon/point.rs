//! Survey points and their grid identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid index of a horizon sample.
///
/// Ordering is by column first, then row, which is the order points are
/// emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridKey {
    pub col: i64,
    pub row: i64,
}

impl GridKey {
    pub fn new(col: i64, row: i64) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Spatial position and value of a sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A horizon sample: spatial coordinates, depth/elevation and grid index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub col: i64,
    pub row: i64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64, col: i64, row: i64) -> Self {
        Self { x, y, z, col, row }
    }

    /// Assemble a point from its key and coordinate triple
    pub fn from_parts(key: GridKey, coord: Coord) -> Self {
        Self {
            x: coord.x,
            y: coord.y,
            z: coord.z,
            col: key.col,
            row: key.row,
        }
    }

    #[inline]
    pub fn key(&self) -> GridKey {
        GridKey::new(self.col, self.row)
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y, self.z)
    }
}
