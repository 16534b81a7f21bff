//! Error types for horizon densification

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for horizon operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Unknown interpolation method: {0} (expected linear, cubic or nearest)")]
    UnknownMethod(String),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("No data points in input")]
    EmptyInput,

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for horizon operations
pub type Result<T> = std::result::Result<T, Error>;
