//! Sampling orchestration: splits the iteration budget over independent
//! worker chains, runs them sequentially or on the Rayon pool, and merges
//! their statistics on the calling thread.

use std::num::NonZeroUsize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, instrument};

use crate::{
    Result,
    builder::{CandidateStrategy, ExecutionStrategy},
    chain::{Chain, ChainStatistics},
    energy::EnergyModel,
    error::SamplerError,
    graph::Graph,
    point::Point,
    report::SamplingReport,
};

/// SplitMix64 increment (the 64-bit golden ratio) used for per-worker seed
/// derivation.
const WORKER_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

/// Derives the seed of worker `worker_index` from the run's base seed.
///
/// # Examples
/// ```
/// use edgewalk_core::mix_worker_seed;
///
/// assert_ne!(mix_worker_seed(1, 0), mix_worker_seed(1, 1));
/// assert_eq!(mix_worker_seed(9, 3), mix_worker_seed(9, 3));
/// ```
#[inline]
#[must_use]
pub fn mix_worker_seed(base_seed: u64, worker_index: usize) -> u64 {
    splitmix64(base_seed ^ ((worker_index as u64 + 1).wrapping_mul(WORKER_SEED_SPACING)))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(WORKER_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

/// Splits `iterations` over `workers` chains as evenly as possible.
///
/// The first `iterations % workers` chains take one extra step.
///
/// # Examples
/// ```
/// use edgewalk_core::split_budget;
///
/// assert_eq!(split_budget(10, 4), vec![3, 3, 2, 2]);
/// assert!(split_budget(5, 0).is_empty());
/// ```
#[must_use]
pub fn split_budget(iterations: u64, workers: usize) -> Vec<u64> {
    if workers == 0 {
        return Vec::new();
    }
    let share = iterations / workers as u64;
    let remainder = iterations % workers as u64;
    (0..workers as u64)
        .map(|worker| share + u64::from(worker < remainder))
        .collect()
}

/// Entry point for running a Metropolis-Hastings sampler over connected
/// graphs on a fixed vertex set.
///
/// Every worker starts from the star graph with a seed derived from the base
/// seed and its index, so a fixed seed and worker count reproduce the same
/// report under either execution strategy.
///
/// # Examples
/// ```
/// use edgewalk_core::{Point, SamplerBuilder};
///
/// let sampler = SamplerBuilder::new()
///     .with_iterations(300)
///     .with_workers(3)
///     .with_seed(11)
///     .build()?;
/// let report = sampler.run(&[
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(0.0, 1.0),
/// ])?;
/// assert_eq!(report.workers(), 3);
/// assert_eq!(report.frequencies().total(), 300);
/// assert!(report.distinct_topologies() <= 4);
/// # Ok::<(), edgewalk_core::SamplerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Sampler {
    model: EnergyModel,
    iterations: u64,
    workers: Option<NonZeroUsize>,
    seed: u64,
    execution_strategy: ExecutionStrategy,
    candidate_strategy: CandidateStrategy,
}

impl Sampler {
    pub(crate) fn new(
        model: EnergyModel,
        iterations: u64,
        workers: Option<NonZeroUsize>,
        seed: u64,
        execution_strategy: ExecutionStrategy,
        candidate_strategy: CandidateStrategy,
    ) -> Self {
        Self {
            model,
            iterations,
            workers,
            seed,
            execution_strategy,
            candidate_strategy,
        }
    }

    /// Returns the energy model shared by every chain.
    #[must_use]
    #[rustfmt::skip]
    pub fn model(&self) -> EnergyModel { self.model }

    /// Returns the total iteration budget.
    #[must_use]
    #[rustfmt::skip]
    pub fn iterations(&self) -> u64 { self.iterations }

    /// Returns the explicitly requested worker count, if any.
    #[must_use]
    #[rustfmt::skip]
    pub fn requested_workers(&self) -> Option<NonZeroUsize> { self.workers }

    /// Returns the base seed.
    #[must_use]
    #[rustfmt::skip]
    pub fn seed(&self) -> u64 { self.seed }

    /// Returns the execution strategy.
    #[must_use]
    #[rustfmt::skip]
    pub fn execution_strategy(&self) -> ExecutionStrategy { self.execution_strategy }

    /// Returns the candidate strategy.
    #[must_use]
    #[rustfmt::skip]
    pub fn candidate_strategy(&self) -> CandidateStrategy { self.candidate_strategy }

    /// Number of worker chains a run will use.
    ///
    /// Defaults to the available parallelism and never exceeds the iteration
    /// budget, except that a zero-iteration run still reports one worker.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        let requested = self.workers.map_or_else(available_workers, NonZeroUsize::get);
        let budget = usize::try_from(self.iterations.max(1)).unwrap_or(usize::MAX);
        requested.min(budget).max(1)
    }

    /// Runs every worker chain over `vertices` and merges their statistics.
    ///
    /// # Errors
    /// Returns the vertex validation errors of [`Graph::star`],
    /// [`SamplerError::BackendUnavailable`] when parallel execution is
    /// requested from a build without the `parallel` feature, and
    /// [`SamplerError::WorkerFailed`] wrapping the first chain failure.
    #[instrument(
        name = "core.run",
        err,
        skip(self, vertices),
        fields(
            vertices = vertices.len(),
            iterations = self.iterations,
            seed = self.seed,
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn run(&self, vertices: &[Point]) -> Result<SamplingReport> {
        let initial = Graph::star(vertices.to_vec())?;
        let workers = self.worker_count();
        let budgets = split_budget(self.iterations, workers);

        let statistics = match self.execution_strategy {
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Auto | ExecutionStrategy::Parallel => {
                self.run_parallel(&initial, &budgets)
            }
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Auto => self.run_sequential(&initial, &budgets),
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => Err(SamplerError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            }),
            ExecutionStrategy::Sequential => self.run_sequential(&initial, &budgets),
        }?;

        let report = SamplingReport::new(self.iterations, workers, self.seed, statistics);
        info!(
            workers,
            distinct = report.distinct_topologies(),
            accepted = report.statistics().accepted(),
            "sampling finished"
        );
        Ok(report)
    }

    fn run_sequential(&self, initial: &Graph, budgets: &[u64]) -> Result<ChainStatistics> {
        let results = budgets
            .iter()
            .enumerate()
            .map(|(worker, &steps)| self.run_worker(initial, worker, steps))
            .collect::<Result<Vec<_>>>()?;
        Ok(merge_in_order(results))
    }

    #[cfg(feature = "parallel")]
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
    fn run_parallel(&self, initial: &Graph, budgets: &[u64]) -> Result<ChainStatistics> {
        let results = budgets
            .par_iter()
            .enumerate()
            .map(|(worker, &steps)| self.run_worker(initial, worker, steps))
            .collect::<Result<Vec<_>>>()?;
        Ok(merge_in_order(results))
    }

    fn run_worker(&self, initial: &Graph, worker: usize, steps: u64) -> Result<ChainStatistics> {
        Chain::from_graph(
            initial.clone(),
            self.model,
            mix_worker_seed(self.seed, worker),
            self.candidate_strategy,
        )
        .and_then(|chain| chain.run(steps))
        .map_err(|source| SamplerError::WorkerFailed {
            worker,
            source: Box::new(source),
        })
    }
}

/// Merges worker statistics in worker order so floating-point sums do not
/// depend on scheduling.
fn merge_in_order(results: Vec<ChainStatistics>) -> ChainStatistics {
    results
        .into_iter()
        .fold(ChainStatistics::new(), |mut merged, statistics| {
            merged.merge(statistics);
            merged
        })
}

#[cfg(feature = "parallel")]
fn available_workers() -> usize {
    rayon::current_num_threads()
}

#[cfg(not(feature = "parallel"))]
fn available_workers() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}
