//! Energy function and Metropolis-Hastings acceptance rule.
//!
//! The target density is proportional to `exp(-energy / T)`. Because the
//! proposal kernel is uniform over legal moves, the acceptance ratio carries
//! a correction for the differing legal-move counts of the two graphs.

use crate::{
    error::{Result, SamplerError},
    graph::{Graph, PathSummary, pair_count},
};

/// Number of vertex pairs that propose a legal move from `graph`.
///
/// Equals `n (n - 1) / 2` minus the number of bridges.
///
/// # Examples
/// ```
/// use edgewalk_core::{Graph, Point, legal_move_count};
///
/// let star = Graph::star((0..6).map(|k| Point::new(k as f64, (k * k) as f64)).collect::<Vec<_>>())?;
/// assert_eq!(legal_move_count(&star), 10);
/// # Ok::<(), edgewalk_core::SamplerError>(())
/// ```
#[must_use]
pub fn legal_move_count(graph: &Graph) -> usize {
    pair_count(graph.vertex_count()).saturating_sub(graph.bridge_count())
}

/// Probability of proposing any particular legal move from `graph`.
///
/// # Errors
/// Returns [`SamplerError::NoLegalMoves`] when `graph` admits no legal move.
pub fn proposal_probability(graph: &Graph) -> Result<f64> {
    match legal_move_count(graph) {
        0 => Err(SamplerError::NoLegalMoves {
            edges: graph.edge_count(),
        }),
        legal => Ok(1.0 / legal as f64),
    }
}

/// Returns `true` when a move with acceptance `probability` is taken for the
/// uniform `draw` in `[0, 1)`.
#[must_use]
pub fn accepts(probability: f64, draw: f64) -> bool {
    probability >= draw
}

/// Everything the chain needs to know about a graph after one evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Evaluation {
    pub(crate) energy: f64,
    pub(crate) legal_moves: usize,
    pub(crate) path: PathSummary,
}

/// Temperature and edge-cost parameters of the target distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyModel {
    temperature: f64,
    edge_cost: f64,
}

impl EnergyModel {
    /// Creates a model for temperature `T` and edge-cost coefficient `r`.
    ///
    /// # Errors
    /// Returns [`SamplerError::InvalidTemperature`] unless `temperature` is
    /// positive and finite, and [`SamplerError::InvalidEdgeCost`] when
    /// `edge_cost` is not finite.
    pub fn new(temperature: f64, edge_cost: f64) -> Result<Self> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(SamplerError::InvalidTemperature { got: temperature });
        }
        if !edge_cost.is_finite() {
            return Err(SamplerError::InvalidEdgeCost { got: edge_cost });
        }
        Ok(Self {
            temperature,
            edge_cost,
        })
    }

    /// Returns the temperature `T`.
    #[must_use]
    #[rustfmt::skip]
    pub fn temperature(&self) -> f64 { self.temperature }

    /// Returns the edge-cost coefficient `r`.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_cost(&self) -> f64 { self.edge_cost }

    /// Computes `r * weighted_size(G) + sum of distances from vertex 0`.
    ///
    /// # Errors
    /// Returns [`SamplerError::Unreachable`] for a disconnected graph and
    /// [`SamplerError::EmptyVertexSet`] for a graph without vertices.
    ///
    /// # Examples
    /// ```
    /// use edgewalk_core::{EnergyModel, Graph, Point};
    ///
    /// let model = EnergyModel::new(1.0, 2.0)?;
    /// let star = Graph::star(vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)])?;
    /// assert_eq!(model.energy(&star)?, 15.0);
    /// # Ok::<(), edgewalk_core::SamplerError>(())
    /// ```
    pub fn energy(&self, graph: &Graph) -> Result<f64> {
        let path = graph.path_summary()?;
        Ok(self.energy_with(graph, path))
    }

    fn energy_with(&self, graph: &Graph, path: PathSummary) -> f64 {
        self.edge_cost * graph.weighted_size() + path.total
    }

    pub(crate) fn evaluate(&self, graph: &Graph) -> Result<Evaluation> {
        let path = graph.path_summary()?;
        Ok(Evaluation {
            energy: self.energy_with(graph, path),
            legal_moves: legal_move_count(graph),
            path,
        })
    }

    /// Metropolis-Hastings acceptance probability for moving from `current`
    /// to `candidate`.
    ///
    /// # Errors
    /// Returns [`SamplerError::Unreachable`] when either graph is
    /// disconnected and [`SamplerError::NoLegalMoves`] when the candidate
    /// admits no legal move.
    pub fn acceptance_probability(&self, current: &Graph, candidate: &Graph) -> Result<f64> {
        let current = self.evaluate(current)?;
        let candidate_eval = self.evaluate(candidate)?;
        self.acceptance_from(&current, &candidate_eval, candidate.edge_count())
    }

    pub(crate) fn acceptance_from(
        &self,
        current: &Evaluation,
        candidate: &Evaluation,
        candidate_edges: usize,
    ) -> Result<f64> {
        if candidate.legal_moves == 0 {
            return Err(SamplerError::NoLegalMoves {
                edges: candidate_edges,
            });
        }
        let boltzmann = (-(candidate.energy - current.energy) / self.temperature).exp();
        let correction = current.legal_moves as f64 / candidate.legal_moves as f64;
        Ok((boltzmann * correction).min(1.0))
    }
}
