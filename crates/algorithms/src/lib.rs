//! # Horizon Algorithms
//!
//! Grid densification for picked seismic horizons.
//!
//! ## Modules
//!
//! - **densify**: topology analysis, gap generation and merging
//! - **interpolation**: Delaunay linear, Clough-Tocher cubic and nearest
//!   sample estimation of scattered data

pub mod densify;
pub mod interpolation;
pub(crate) mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::densify::{
        densify, generate_candidates, merge, Candidate, Densify, DensifyParams, DensifyReport,
        DensifyResult, GridTopology, TopologySummary,
    };
    pub use crate::interpolation::{estimate, interpolate_batch, Estimates, Method, SamplePoint};
    pub use horizon_core::prelude::*;
}
