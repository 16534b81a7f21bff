//! Batch value estimation with nearest-sample fallback

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use horizon_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cubic::CloughTocher;
use super::kdtree::KdTree;
use super::linear::linear_batch;
use super::nearest::nearest_batch;
use super::triangulation::Triangulation;
use super::SamplePoint;

/// Scattered-data interpolation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Barycentric interpolation over the Delaunay triangulation
    #[default]
    Linear,
    /// Clough-Tocher C1 piecewise cubic
    Cubic,
    /// Value of the closest sample
    Nearest,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Linear, Method::Cubic, Method::Nearest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Linear => "linear",
            Method::Cubic => "cubic",
            Method::Nearest => "nearest",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(Method::Linear),
            "cubic" => Ok(Method::Cubic),
            "nearest" => Ok(Method::Nearest),
            _ => Err(Error::UnknownMethod(s.to_string())),
        }
    }
}

/// Interpolate all queries in one call.
///
/// Positions where the method is undefined (outside the convex hull for
/// linear and cubic, or a degenerate triangulation) come back as NaN.
pub fn interpolate_batch(
    samples: &[SamplePoint],
    queries: &[(f64, f64)],
    method: Method,
) -> Result<Vec<f64>> {
    if samples.is_empty() {
        return Err(Error::Algorithm("No sample points provided".into()));
    }

    let values = match method {
        Method::Nearest => nearest_batch(&KdTree::build(samples), queries),
        Method::Linear => linear_batch(&Triangulation::build(samples), queries),
        Method::Cubic => {
            let tri = Triangulation::build(samples);
            CloughTocher::new(&tri).evaluate_batch(queries)
        }
    };

    Ok(values)
}

/// Estimated values for a batch of queries
#[derive(Debug, Clone, PartialEq)]
pub struct Estimates {
    /// One value per query, in query order
    pub values: Vec<f64>,
    /// How many queries were resolved by the nearest-sample fallback
    pub fallback_count: usize,
}

/// Estimate a value for every query.
///
/// Runs `method` over the whole batch, then re-estimates every undefined
/// result with one nearest-sample pass, so all values are defined whenever
/// the sample values are.
pub fn estimate(samples: &[SamplePoint], queries: &[(f64, f64)], method: Method) -> Result<Estimates> {
    let start = Instant::now();
    let mut values = interpolate_batch(samples, queries, method)?;

    let undefined: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_finite())
        .map(|(i, _)| i)
        .collect();

    if !undefined.is_empty() {
        debug!(
            "{} of {} {} estimates undefined, filling with nearest",
            undefined.len(),
            queries.len(),
            method
        );
        let retry: Vec<(f64, f64)> = undefined.iter().map(|&i| queries[i]).collect();
        let filled = interpolate_batch(samples, &retry, Method::Nearest)?;
        for (&i, v) in undefined.iter().zip(filled) {
            values[i] = v;
        }
    }

    debug!(
        "Estimated {} values ({}) in {:.2?}",
        queries.len(),
        method,
        start.elapsed()
    );

    Ok(Estimates {
        values,
        fallback_count: undefined.len(),
    })
}
