//! A single Metropolis-Hastings chain over connected graphs.
//!
//! Each step draws vertex pairs until one yields a legal edge toggle, runs
//! the acceptance test against the cached evaluation of the current graph,
//! and then records the post-step graph in the running sums and the
//! frequency table.

use std::sync::Arc;

use rand::{Rng, SeedableRng, distributions::Standard, rngs::SmallRng, seq::index};
use tracing::{debug, instrument};

use crate::{
    builder::CandidateStrategy,
    energy::{EnergyModel, Evaluation, accepts},
    error::{Result, SamplerError},
    graph::{Graph, pair_count},
    point::Point,
    proposal::{EdgeMove, plan_move},
    topology::{FrequencyTable, TopologyKey},
};

/// Pair draws allowed per vertex pair before a step is declared livelocked.
const ATTEMPTS_PER_PAIR: usize = 64;

/// What happened during one chain step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepOutcome {
    /// The candidate replaced the current graph.
    Accepted(EdgeMove),
    /// The candidate was evaluated and discarded.
    Rejected(EdgeMove),
    /// The current graph admits no legal move, so nothing was proposed.
    Stay,
}

/// Running sums and visit counts accumulated by one or more chains.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChainStatistics {
    steps: u64,
    accepted: u64,
    degree_sum: u64,
    edge_sum: u64,
    max_path_sum: f64,
    frequencies: FrequencyTable,
}

impl ChainStatistics {
    /// Creates empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded steps.
    #[must_use]
    #[rustfmt::skip]
    pub fn steps(&self) -> u64 { self.steps }

    /// Number of steps whose candidate was accepted.
    #[must_use]
    #[rustfmt::skip]
    pub fn accepted(&self) -> u64 { self.accepted }

    /// Sum of the degree of vertex 0 over all steps.
    #[must_use]
    #[rustfmt::skip]
    pub fn degree_sum(&self) -> u64 { self.degree_sum }

    /// Sum of the edge count over all steps.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_sum(&self) -> u64 { self.edge_sum }

    /// Sum of the longest shortest path from vertex 0 over all steps.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_path_sum(&self) -> f64 { self.max_path_sum }

    /// Visit counts per topology.
    #[must_use]
    #[rustfmt::skip]
    pub fn frequencies(&self) -> &FrequencyTable { &self.frequencies }

    /// Consumes the statistics, returning the frequency table.
    #[must_use]
    pub fn into_frequencies(self) -> FrequencyTable {
        self.frequencies
    }

    /// Adds the sums and counts of `other` into `self`.
    pub fn merge(&mut self, other: Self) {
        self.steps += other.steps;
        self.accepted += other.accepted;
        self.degree_sum += other.degree_sum;
        self.edge_sum += other.edge_sum;
        self.max_path_sum += other.max_path_sum;
        self.frequencies.merge(other.frequencies);
    }

    fn record(&mut self, graph: &Graph, key: &TopologyKey, max_path: f64) -> Result<()> {
        self.steps += 1;
        self.degree_sum += graph.degree(0)? as u64;
        self.edge_sum += graph.edge_count() as u64;
        self.max_path_sum += max_path;
        self.frequencies.record_ref(key);
        Ok(())
    }
}

/// One Metropolis-Hastings chain owning its current graph and random stream.
///
/// # Examples
/// ```
/// use edgewalk_core::{CandidateStrategy, Chain, EnergyModel, Point};
///
/// let vertices = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
/// let model = EnergyModel::new(1.0, 1.0)?;
/// let chain = Chain::new(vertices, model, 7, CandidateStrategy::Auto)?;
/// let statistics = chain.run(100)?;
/// assert_eq!(statistics.steps(), 100);
/// assert_eq!(statistics.frequencies().total(), 100);
/// # Ok::<(), edgewalk_core::SamplerError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Chain {
    graph: Graph,
    model: EnergyModel,
    strategy: CandidateStrategy,
    rng: SmallRng,
    current: Evaluation,
    key: TopologyKey,
    statistics: ChainStatistics,
}

impl Chain {
    /// Starts a chain from the star graph over `vertices`.
    ///
    /// # Errors
    /// Returns the vertex validation errors of [`Graph::star`].
    pub fn new(
        vertices: impl Into<Arc<[Point]>>,
        model: EnergyModel,
        seed: u64,
        strategy: CandidateStrategy,
    ) -> Result<Self> {
        Self::from_graph(Graph::star(vertices)?, model, seed, strategy)
    }

    /// Starts a chain from an arbitrary connected graph.
    ///
    /// # Errors
    /// Returns [`SamplerError::Unreachable`] when `graph` is disconnected and
    /// [`SamplerError::EmptyVertexSet`] when it has no vertices.
    pub fn from_graph(
        graph: Graph,
        model: EnergyModel,
        seed: u64,
        strategy: CandidateStrategy,
    ) -> Result<Self> {
        let current = model.evaluate(&graph)?;
        let key = graph.topology_key();
        let strategy = strategy.resolve(graph.vertex_count());
        Ok(Self {
            graph,
            model,
            strategy,
            rng: SmallRng::seed_from_u64(seed),
            current,
            key,
            statistics: ChainStatistics::new(),
        })
    }

    /// Returns the current graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &Graph { &self.graph }

    /// Returns the resolved candidate strategy.
    #[must_use]
    #[rustfmt::skip]
    pub fn strategy(&self) -> CandidateStrategy { self.strategy }

    /// Returns the statistics recorded so far.
    #[must_use]
    #[rustfmt::skip]
    pub fn statistics(&self) -> &ChainStatistics { &self.statistics }

    /// Energy of the current graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn energy(&self) -> f64 { self.current.energy }

    /// Legal move count of the current graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn legal_moves(&self) -> usize { self.current.legal_moves }

    /// Performs one propose, evaluate, advance cycle.
    ///
    /// # Errors
    /// Returns [`SamplerError::ProposalLivelock`] when no legal pair is drawn
    /// within the attempt cap, and internal-consistency errors when a
    /// candidate breaks connectivity.
    pub fn step(&mut self) -> Result<StepOutcome> {
        let outcome = match self.draw_move()? {
            Some(edge_move) => self.advance(edge_move)?,
            None => StepOutcome::Stay,
        };
        if matches!(outcome, StepOutcome::Accepted(_)) {
            self.statistics.accepted += 1;
        }
        self.statistics
            .record(&self.graph, &self.key, self.current.path.max)?;
        Ok(outcome)
    }

    /// Runs `steps` steps and returns the accumulated statistics.
    ///
    /// # Errors
    /// Propagates the first error returned by [`Chain::step`].
    #[instrument(
        name = "core.chain",
        err,
        skip(self),
        fields(vertices = self.graph.vertex_count(), strategy = ?self.strategy),
    )]
    pub fn run(mut self, steps: u64) -> Result<ChainStatistics> {
        for _ in 0..steps {
            self.step()?;
        }
        debug!(
            steps = self.statistics.steps,
            accepted = self.statistics.accepted,
            distinct = self.statistics.frequencies.len(),
            "chain finished"
        );
        Ok(self.statistics)
    }

    fn draw_move(&mut self) -> Result<Option<EdgeMove>> {
        let vertex_count = self.graph.vertex_count();
        if self.current.legal_moves == 0 {
            return Ok(None);
        }
        let attempts = pair_count(vertex_count).saturating_mul(ATTEMPTS_PER_PAIR);
        for _ in 0..attempts {
            let pair = index::sample(&mut self.rng, vertex_count, 2);
            if let Some(edge_move) = plan_move(&self.graph, pair.index(0), pair.index(1))?.legal()
            {
                return Ok(Some(edge_move));
            }
        }
        Err(SamplerError::ProposalLivelock { attempts })
    }

    fn advance(&mut self, edge_move: EdgeMove) -> Result<StepOutcome> {
        match self.strategy {
            CandidateStrategy::Delta => self.advance_in_place(edge_move),
            CandidateStrategy::Clone | CandidateStrategy::Auto => self.advance_cloned(edge_move),
        }
    }

    fn advance_cloned(&mut self, edge_move: EdgeMove) -> Result<StepOutcome> {
        let mut candidate = self.graph.clone();
        candidate.apply(edge_move)?;
        let evaluation = self.model.evaluate(&candidate)?;
        if !self.passes_acceptance(&evaluation, candidate.edge_count())? {
            return Ok(StepOutcome::Rejected(edge_move));
        }
        self.graph = candidate;
        self.accept(evaluation);
        Ok(StepOutcome::Accepted(edge_move))
    }

    fn advance_in_place(&mut self, edge_move: EdgeMove) -> Result<StepOutcome> {
        self.graph.apply(edge_move)?;
        let evaluation = self.model.evaluate(&self.graph)?;
        if !self.passes_acceptance(&evaluation, self.graph.edge_count())? {
            self.graph.revert(edge_move)?;
            return Ok(StepOutcome::Rejected(edge_move));
        }
        self.accept(evaluation);
        Ok(StepOutcome::Accepted(edge_move))
    }

    fn passes_acceptance(&mut self, candidate: &Evaluation, candidate_edges: usize) -> Result<bool> {
        let probability = self
            .model
            .acceptance_from(&self.current, candidate, candidate_edges)?;
        let draw: f64 = self.rng.sample(Standard);
        Ok(accepts(probability, draw))
    }

    fn accept(&mut self, evaluation: Evaluation) {
        self.current = evaluation;
        self.key = self.graph.topology_key();
    }
}
