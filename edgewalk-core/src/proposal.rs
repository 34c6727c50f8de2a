//! Single-edge toggle proposals with bridge avoidance.
//!
//! A proposal names an unordered vertex pair. Absent edges are added, present
//! non-bridge edges are removed, and bridges are rejected by construction so
//! every candidate stays connected.

use crate::{
    error::Result,
    graph::{Graph, canonical},
};

/// Edge toggle that keeps a connected graph connected.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EdgeMove {
    /// Insert the absent edge `{left, right}`.
    Add {
        /// Lower endpoint.
        left: usize,
        /// Upper endpoint.
        right: usize,
    },
    /// Delete the present, non-bridge edge `{left, right}`.
    Remove {
        /// Lower endpoint.
        left: usize,
        /// Upper endpoint.
        right: usize,
    },
}

impl EdgeMove {
    /// Returns the `(lower, upper)` endpoints of the toggled edge.
    #[must_use]
    pub fn endpoints(self) -> (usize, usize) {
        match self {
            Self::Add { left, right } | Self::Remove { left, right } => (left, right),
        }
    }

    /// Returns the move that undoes `self`.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Add { left, right } => Self::Remove { left, right },
            Self::Remove { left, right } => Self::Add { left, right },
        }
    }
}

/// Classification of a vertex pair against the current graph.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Proposal {
    /// The pair yields a legal toggle.
    Legal(EdgeMove),
    /// The pair names a bridge; removing it would disconnect the graph.
    Bridge {
        /// Lower endpoint.
        left: usize,
        /// Upper endpoint.
        right: usize,
    },
}

impl Proposal {
    /// Returns the legal move, if any.
    #[must_use]
    pub fn legal(self) -> Option<EdgeMove> {
        match self {
            Self::Legal(edge_move) => Some(edge_move),
            Self::Bridge { .. } => None,
        }
    }
}

/// Classifies the pair `{i, j}` without touching `graph`.
///
/// # Errors
/// Returns [`crate::SamplerError::SelfLoop`] when `i == j` and
/// [`crate::SamplerError::VertexOutOfBounds`] for unknown indices.
pub fn plan_move(graph: &Graph, i: usize, j: usize) -> Result<Proposal> {
    graph.check_pair(i, j)?;
    let (left, right) = canonical(i, j);
    if !graph.has_edge(left, right) {
        return Ok(Proposal::Legal(EdgeMove::Add { left, right }));
    }
    if graph.is_bridge(left, right)? {
        Ok(Proposal::Bridge { left, right })
    } else {
        Ok(Proposal::Legal(EdgeMove::Remove { left, right }))
    }
}

/// Builds the candidate graph for the pair `{i, j}`.
///
/// Returns `None` when the pair names a bridge. The input graph is never
/// modified; legal pairs produce a fresh graph sharing the vertex list.
///
/// # Errors
/// Returns the pair validation errors of [`plan_move`].
///
/// # Examples
/// ```
/// use edgewalk_core::{Graph, Point, propose};
///
/// let star = Graph::star(vec![
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(0.0, 1.0),
/// ])?;
/// assert!(propose(&star, 0, 1)?.is_none());
/// let triangle = propose(&star, 2, 1)?.expect("absent edges are always legal");
/// assert_eq!(triangle.edge_count(), 3);
/// assert_eq!(star.edge_count(), 2);
/// # Ok::<(), edgewalk_core::SamplerError>(())
/// ```
pub fn propose(graph: &Graph, i: usize, j: usize) -> Result<Option<Graph>> {
    let Some(edge_move) = plan_move(graph, i, j)?.legal() else {
        return Ok(None);
    };
    let mut candidate = graph.clone();
    candidate.apply(edge_move)?;
    Ok(Some(candidate))
}

impl Graph {
    /// Applies a planned move in place.
    pub(crate) fn apply(&mut self, edge_move: EdgeMove) -> Result<()> {
        match edge_move {
            EdgeMove::Add { left, right } => self.add_edge(left, right).map(|_| ()),
            EdgeMove::Remove { left, right } => self.remove_edge(left, right),
        }
    }

    /// Undoes a move previously passed to [`Graph::apply`].
    pub(crate) fn revert(&mut self, edge_move: EdgeMove) -> Result<()> {
        self.apply(edge_move.inverse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::{Point, SamplerError};

    fn triangle_points() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)]
    }

    #[rstest]
    #[case::absent_edge(1, 2, Proposal::Legal(EdgeMove::Add { left: 1, right: 2 }))]
    #[case::absent_edge_reversed(2, 1, Proposal::Legal(EdgeMove::Add { left: 1, right: 2 }))]
    #[case::star_bridge(0, 1, Proposal::Bridge { left: 0, right: 1 })]
    #[case::star_bridge_reversed(2, 0, Proposal::Bridge { left: 0, right: 2 })]
    fn plan_move_classifies_star_pairs(#[case] i: usize, #[case] j: usize, #[case] expected: Proposal) {
        let star = Graph::star(triangle_points()).expect("points must be valid");
        assert_eq!(plan_move(&star, i, j), Ok(expected));
    }

    #[test]
    fn plan_move_removes_cycle_edges() {
        let mut triangle = Graph::star(triangle_points()).expect("points must be valid");
        triangle.add_edge(1, 2).expect("edge must be valid");
        assert_eq!(
            plan_move(&triangle, 0, 1),
            Ok(Proposal::Legal(EdgeMove::Remove { left: 0, right: 1 }))
        );
    }

    #[rstest]
    #[case::same_vertex(1, 1, SamplerError::SelfLoop { vertex: 1 })]
    #[case::out_of_range(0, 7, SamplerError::VertexOutOfBounds { index: 7, vertex_count: 3 })]
    fn plan_move_rejects_invalid_pairs(#[case] i: usize, #[case] j: usize, #[case] expected: SamplerError) {
        let star = Graph::star(triangle_points()).expect("points must be valid");
        assert_eq!(plan_move(&star, i, j), Err(expected.clone()));
        assert_eq!(propose(&star, i, j), Err(expected));
    }

    #[test]
    fn propose_leaves_input_untouched() {
        let star = Graph::star(triangle_points()).expect("points must be valid");
        let before = star.clone();
        let candidate = propose(&star, 1, 2)
            .expect("pair must be valid")
            .expect("absent edge is legal");
        assert_eq!(star, before);
        assert!(candidate.has_edge(1, 2));
        assert_eq!(candidate.vertices(), star.vertices());
    }

    #[test]
    fn two_vertex_bridge_is_always_rejected() {
        let pair = Graph::star(vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)])
            .expect("points must be valid");
        assert_eq!(propose(&pair, 0, 1), Ok(None));
        assert_eq!(propose(&pair, 1, 0), Ok(None));
    }

    #[test]
    fn apply_then_revert_restores_graph() {
        let mut graph = Graph::star(triangle_points()).expect("points must be valid");
        let original = graph.clone();
        let edge_move = EdgeMove::Add { left: 1, right: 2 };
        graph.apply(edge_move).expect("add must succeed");
        graph.revert(edge_move).expect("revert must succeed");
        assert_eq!(graph, original);
    }

    #[test]
    fn inverse_swaps_direction() {
        let add = EdgeMove::Add { left: 0, right: 3 };
        assert_eq!(add.inverse(), EdgeMove::Remove { left: 0, right: 3 });
        assert_eq!(add.inverse().inverse(), add);
        assert_eq!(add.endpoints(), (0, 3));
    }
}
