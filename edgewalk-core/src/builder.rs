//! Builder utilities for configuring edgewalk samplers.
//!
//! Exposes the execution and candidate strategy selection surface and the
//! validation performed before constructing [`Sampler`] instances.

use std::num::NonZeroUsize;

use crate::{Result, energy::EnergyModel, error::SamplerError, sampler::Sampler};

/// Default base seed from which every worker seed is derived.
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

/// Default total iteration budget.
pub const DEFAULT_ITERATIONS: u64 = 200;

/// Vertex count above which [`CandidateStrategy::Auto`] evaluates candidates
/// in place.
pub const DELTA_VERTEX_THRESHOLD: usize = 32;

/// Indicates how [`Sampler`] schedules its worker chains when
/// [`Sampler::run`] is invoked.
///
/// `Auto` resolves deterministically: it runs chains on the Rayon pool when
/// the `parallel` feature is enabled and sequentially otherwise. Both paths
/// derive identical worker seeds, so a fixed seed and worker count yield the
/// same report either way.
///
/// # Examples
/// ```
/// use edgewalk_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Auto;
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Allow the library to select a scheduler automatically.
    Auto,
    /// Run every chain on the calling thread, one after another.
    Sequential,
    /// Run chains concurrently on the Rayon thread pool.
    Parallel,
}

/// Selects how a chain materialises candidate graphs.
///
/// # Examples
/// ```
/// use edgewalk_core::CandidateStrategy;
///
/// assert_eq!(CandidateStrategy::Auto.resolve(8), CandidateStrategy::Clone);
/// assert_eq!(CandidateStrategy::Auto.resolve(64), CandidateStrategy::Delta);
/// assert_eq!(CandidateStrategy::Clone.resolve(64), CandidateStrategy::Clone);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateStrategy {
    /// Pick [`CandidateStrategy::Delta`] above [`DELTA_VERTEX_THRESHOLD`]
    /// vertices and [`CandidateStrategy::Clone`] otherwise.
    Auto,
    /// Evaluate a copy of the current graph with the move applied.
    Clone,
    /// Apply the move to the current graph and revert it on rejection.
    Delta,
}

impl CandidateStrategy {
    /// Resolves [`CandidateStrategy::Auto`] for a vertex count.
    #[must_use]
    pub fn resolve(self, vertex_count: usize) -> Self {
        match self {
            Self::Auto if vertex_count > DELTA_VERTEX_THRESHOLD => Self::Delta,
            Self::Auto => Self::Clone,
            explicit => explicit,
        }
    }
}

/// Configures and constructs [`Sampler`] instances.
///
/// # Examples
/// ```
/// use edgewalk_core::{ExecutionStrategy, SamplerBuilder};
///
/// let sampler = SamplerBuilder::new()
///     .with_temperature(0.5)
///     .with_iterations(1_000)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(sampler.model().temperature(), 0.5);
/// assert_eq!(sampler.iterations(), 1_000);
/// ```
#[derive(Debug, Clone)]
pub struct SamplerBuilder {
    temperature: f64,
    edge_cost: f64,
    iterations: u64,
    workers: Option<usize>,
    seed: u64,
    execution_strategy: ExecutionStrategy,
    candidate_strategy: CandidateStrategy,
}

impl Default for SamplerBuilder {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            edge_cost: 1.0,
            iterations: DEFAULT_ITERATIONS,
            workers: None,
            seed: DEFAULT_SEED,
            execution_strategy: ExecutionStrategy::Auto,
            candidate_strategy: CandidateStrategy::Auto,
        }
    }
}

impl SamplerBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use edgewalk_core::{ExecutionStrategy, SamplerBuilder};
    ///
    /// let builder = SamplerBuilder::new();
    /// assert_eq!(builder.temperature(), 1.0);
    /// assert_eq!(builder.edge_cost(), 1.0);
    /// assert_eq!(builder.iterations(), 200);
    /// assert_eq!(builder.seed(), 0x5EED_CAFE);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the temperature `T`.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Returns the configured temperature.
    #[must_use]
    #[rustfmt::skip]
    pub fn temperature(&self) -> f64 { self.temperature }

    /// Overrides the edge-cost coefficient `r`.
    #[must_use]
    pub fn with_edge_cost(mut self, edge_cost: f64) -> Self {
        self.edge_cost = edge_cost;
        self
    }

    /// Returns the configured edge-cost coefficient.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_cost(&self) -> f64 { self.edge_cost }

    /// Overrides the total iteration budget shared by all workers.
    #[must_use]
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Returns the configured iteration budget.
    #[must_use]
    #[rustfmt::skip]
    pub fn iterations(&self) -> u64 { self.iterations }

    /// Requests a fixed number of worker chains.
    ///
    /// Without a request the sampler uses the Rayon pool size. Either way
    /// the count is capped by the iteration budget so no worker idles.
    ///
    /// # Examples
    /// ```
    /// use edgewalk_core::{SamplerBuilder, SamplerError};
    ///
    /// let err = SamplerBuilder::new().with_workers(0).build().unwrap_err();
    /// assert_eq!(err, SamplerError::InvalidWorkerCount { got: 0 });
    /// ```
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Returns the requested worker count, if any.
    #[must_use]
    #[rustfmt::skip]
    pub fn workers(&self) -> Option<usize> { self.workers }

    /// Overrides the base seed from which worker seeds are derived.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured base seed.
    #[must_use]
    #[rustfmt::skip]
    pub fn seed(&self) -> u64 { self.seed }

    /// Sets the scheduler used when running chains.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the configured execution strategy.
    #[must_use]
    #[rustfmt::skip]
    pub fn execution_strategy(&self) -> ExecutionStrategy { self.execution_strategy }

    /// Sets how chains materialise candidate graphs.
    #[must_use]
    pub fn with_candidate_strategy(mut self, strategy: CandidateStrategy) -> Self {
        self.candidate_strategy = strategy;
        self
    }

    /// Returns the configured candidate strategy.
    #[must_use]
    #[rustfmt::skip]
    pub fn candidate_strategy(&self) -> CandidateStrategy { self.candidate_strategy }

    /// Validates the configuration and constructs a [`Sampler`].
    ///
    /// # Errors
    /// Returns [`SamplerError::InvalidTemperature`],
    /// [`SamplerError::InvalidEdgeCost`], or
    /// [`SamplerError::InvalidWorkerCount`] for out-of-range parameters.
    pub fn build(self) -> Result<Sampler> {
        let model = EnergyModel::new(self.temperature, self.edge_cost)?;
        let workers = self
            .workers
            .map(|got| NonZeroUsize::new(got).ok_or(SamplerError::InvalidWorkerCount { got }))
            .transpose()?;
        Ok(Sampler::new(
            model,
            self.iterations,
            workers,
            self.seed,
            self.execution_strategy,
            self.candidate_strategy,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(CandidateStrategy::Auto, 2, CandidateStrategy::Clone)]
    #[case(CandidateStrategy::Auto, DELTA_VERTEX_THRESHOLD, CandidateStrategy::Clone)]
    #[case(CandidateStrategy::Auto, DELTA_VERTEX_THRESHOLD + 1, CandidateStrategy::Delta)]
    #[case(CandidateStrategy::Delta, 3, CandidateStrategy::Delta)]
    #[case(CandidateStrategy::Clone, 1_000, CandidateStrategy::Clone)]
    fn candidate_strategy_resolution(
        #[case] strategy: CandidateStrategy,
        #[case] vertices: usize,
        #[case] expected: CandidateStrategy,
    ) {
        assert_eq!(strategy.resolve(vertices), expected);
    }

    #[rstest]
    #[case(0.0, 1.0, SamplerError::InvalidTemperature { got: 0.0 })]
    #[case(-2.0, 1.0, SamplerError::InvalidTemperature { got: -2.0 })]
    #[case(1.0, f64::INFINITY, SamplerError::InvalidEdgeCost { got: f64::INFINITY })]
    fn build_rejects_invalid_parameters(
        #[case] temperature: f64,
        #[case] edge_cost: f64,
        #[case] expected: SamplerError,
    ) {
        let err = SamplerBuilder::new()
            .with_temperature(temperature)
            .with_edge_cost(edge_cost)
            .build()
            .expect_err("parameters must be rejected");
        assert_eq!(err, expected);
    }

    #[test]
    fn build_keeps_configuration() {
        let sampler = SamplerBuilder::new()
            .with_edge_cost(-0.5)
            .with_iterations(42)
            .with_workers(3)
            .with_seed(7)
            .with_candidate_strategy(CandidateStrategy::Delta)
            .build()
            .expect("configuration is valid");
        assert_eq!(sampler.model().edge_cost(), -0.5);
        assert_eq!(sampler.iterations(), 42);
        assert_eq!(sampler.requested_workers().map(NonZeroUsize::get), Some(3));
        assert_eq!(sampler.seed(), 7);
        assert_eq!(sampler.candidate_strategy(), CandidateStrategy::Delta);
    }
}
