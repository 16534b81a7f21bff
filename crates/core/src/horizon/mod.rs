//! Horizon survey data structures

mod point;
mod store;

pub use point::{Coord, GridKey, Point};
pub use store::PointStore;
