//! Benchmark parameter types.
//!
//! Groups related benchmark parameters so helper functions stay small and
//! Criterion ids render consistently.

use std::fmt;

use edgewalk_core::CandidateStrategy;

/// Parameters for a chain-stepping benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct ChainBenchParams {
    /// Number of vertices in the point set.
    pub vertex_count: usize,
    /// How candidates are evaluated.
    pub strategy: CandidateStrategy,
}

impl fmt::Display for ChainBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},{:?}", self.vertex_count, self.strategy)
    }
}

/// Parameters for a full sampler benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct SamplerBenchParams {
    /// Number of vertices in the point set.
    pub vertex_count: usize,
    /// Number of worker chains.
    pub workers: usize,
}

impl fmt::Display for SamplerBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},W={}", self.vertex_count, self.workers)
    }
}

/// Parameters for a graph-query benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Number of vertices in the point set.
    pub vertex_count: usize,
    /// Extra random edges added on top of the star.
    pub extra_edges: usize,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},extra={}", self.vertex_count, self.extra_edges)
    }
}
