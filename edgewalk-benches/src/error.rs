//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark inputs so
//! setup functions can propagate failures with `?` instead of `.expect()`.

use crate::points::PointSetError;
use edgewalk_core::SamplerError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Point generation failed.
    #[error("point generation failed: {0}")]
    Points(#[from] PointSetError),
    /// Building a graph, chain or sampler failed.
    #[error("sampler setup failed: {0}")]
    Sampler(#[from] SamplerError),
}
