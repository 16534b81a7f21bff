//! # Horizon Core
//!
//! Core types, traits and I/O for horizon grid densification.
//!
//! This crate provides:
//! - `Point` / `GridKey`: survey samples keyed by (col, row)
//! - `PointStore`: keyed, read-only lookup of (x, y, z) by grid key
//! - Horizon text file reading and writing
//! - Algorithm trait for a consistent API

pub mod error;
pub mod horizon;
pub mod io;

pub use error::{Error, Result};
pub use horizon::{Coord, GridKey, Point, PointStore};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::horizon::{Coord, GridKey, Point, PointStore};
    pub use crate::io::HorizonFile;
    pub use crate::Algorithm;
}

/// Core trait for all algorithms operating on horizon data.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
