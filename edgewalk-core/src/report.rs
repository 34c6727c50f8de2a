//! Merged outcome of a sampling run.

use crate::{
    chain::ChainStatistics,
    topology::{FrequencyTable, TopologyKey},
};

/// Running sums divided by the total iteration budget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Expectations {
    /// Expected degree of vertex 0.
    pub vertex0_degree: f64,
    /// Expected number of edges.
    pub edge_count: f64,
    /// Expected longest weighted shortest path from vertex 0.
    pub max_path_length: f64,
}

/// Statistics merged across every worker chain of a run.
///
/// # Examples
/// ```
/// use edgewalk_core::{ExecutionStrategy, Point, SamplerBuilder};
///
/// let sampler = SamplerBuilder::new()
///     .with_iterations(10)
///     .with_workers(2)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()?;
/// let report = sampler.run(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0)])?;
/// let expectations = report.expectations().expect("budget is non-zero");
/// assert_eq!(expectations.vertex0_degree, 1.0);
/// assert_eq!(expectations.max_path_length, 1.0);
/// assert_eq!(report.distinct_topologies(), 1);
/// # Ok::<(), edgewalk_core::SamplerError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SamplingReport {
    iterations: u64,
    workers: usize,
    seed: u64,
    statistics: ChainStatistics,
}

impl SamplingReport {
    pub(crate) fn new(iterations: u64, workers: usize, seed: u64, statistics: ChainStatistics) -> Self {
        Self {
            iterations,
            workers,
            seed,
            statistics,
        }
    }

    /// Total iteration budget the expectations are normalised by.
    #[must_use]
    #[rustfmt::skip]
    pub fn iterations(&self) -> u64 { self.iterations }

    /// Number of worker chains that ran.
    #[must_use]
    #[rustfmt::skip]
    pub fn workers(&self) -> usize { self.workers }

    /// Base seed the worker seeds were derived from.
    #[must_use]
    #[rustfmt::skip]
    pub fn seed(&self) -> u64 { self.seed }

    /// Merged running sums and frequency table.
    #[must_use]
    #[rustfmt::skip]
    pub fn statistics(&self) -> &ChainStatistics { &self.statistics }

    /// Merged visit counts per topology.
    #[must_use]
    pub fn frequencies(&self) -> &FrequencyTable {
        self.statistics.frequencies()
    }

    /// Number of distinct topologies visited by any worker.
    #[must_use]
    pub fn distinct_topologies(&self) -> usize {
        self.frequencies().len()
    }

    /// Expected observables, or `None` for a zero-iteration run.
    #[must_use]
    pub fn expectations(&self) -> Option<Expectations> {
        if self.iterations == 0 {
            return None;
        }
        let total = self.iterations as f64;
        Some(Expectations {
            vertex0_degree: self.statistics.degree_sum() as f64 / total,
            edge_count: self.statistics.edge_sum() as f64 / total,
            max_path_length: self.statistics.max_path_sum() / total,
        })
    }

    /// Share of steps whose candidate was accepted, or `None` for a
    /// zero-iteration run.
    #[must_use]
    pub fn acceptance_rate(&self) -> Option<f64> {
        (self.iterations > 0).then(|| self.statistics.accepted() as f64 / self.iterations as f64)
    }

    /// The most frequently visited topologies; see
    /// [`FrequencyTable::top_fraction`].
    #[must_use]
    pub fn top_fraction(&self) -> Vec<TopologyKey> {
        self.frequencies().top_fraction()
    }
}
