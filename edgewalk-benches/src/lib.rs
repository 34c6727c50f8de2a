//! Benchmark support crate for edgewalk.
//!
//! Provides seeded planar point sets and parameter types used by the
//! Criterion benchmarks for chain stepping, full sampler runs and the graph
//! queries behind every proposal.

pub mod error;
pub mod params;
pub mod points;
