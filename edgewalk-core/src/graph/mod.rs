//! Weighted undirected simple graphs over a fixed planar vertex set.
//!
//! The vertex list is shared read-only between every graph derived from the
//! same input, so cloning a [`Graph`] only copies its edge set. Edge weights
//! are never stored: they are recomputed from the vertex coordinates on
//! demand.

mod cut;
mod paths;

use std::{collections::BTreeSet, sync::Arc};

use crate::{
    error::{Result, SamplerError},
    point::{Point, validate_vertices},
    topology::TopologyKey,
};

pub use self::paths::PathSummary;

/// Weighted undirected simple graph whose vertices are planar points.
///
/// # Examples
/// ```
/// use edgewalk_core::{Graph, Point};
///
/// let mut graph = Graph::new(vec![
///     Point::new(0.0, 0.0),
///     Point::new(3.0, 4.0),
///     Point::new(3.0, 0.0),
/// ])?;
/// graph.add_edge(0, 1)?;
/// graph.add_edge(1, 2)?;
/// assert!(graph.has_edge(1, 0));
/// assert_eq!(graph.weighted_size(), 9.0);
/// assert_eq!(graph.min_cut_size(0, 2)?, 1);
/// # Ok::<(), edgewalk_core::SamplerError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
    vertices: Arc<[Point]>,
    adjacency: Vec<BTreeSet<usize>>,
    edge_count: usize,
}

impl Graph {
    /// Creates an edgeless graph over `vertices`.
    ///
    /// # Errors
    /// Returns [`SamplerError::NonFiniteCoordinate`] or
    /// [`SamplerError::DuplicateVertex`] when the vertex list is invalid.
    pub fn new(vertices: impl Into<Arc<[Point]>>) -> Result<Self> {
        let vertices = vertices.into();
        validate_vertices(&vertices)?;
        let adjacency = vec![BTreeSet::new(); vertices.len()];
        Ok(Self {
            vertices,
            adjacency,
            edge_count: 0,
        })
    }

    /// Creates the star graph joining vertex 0 to every other vertex.
    ///
    /// The star is connected for any non-empty vertex list and seeds every
    /// sampling chain.
    ///
    /// # Errors
    /// Returns [`SamplerError::EmptyVertexSet`] for an empty list, and the
    /// same validation errors as [`Graph::new`].
    pub fn star(vertices: impl Into<Arc<[Point]>>) -> Result<Self> {
        let mut graph = Self::new(vertices)?;
        if graph.vertex_count() == 0 {
            return Err(SamplerError::EmptyVertexSet);
        }
        for leaf in 1..graph.vertex_count() {
            graph.add_edge(0, leaf)?;
        }
        Ok(graph)
    }

    /// Returns the vertex coordinates in input order.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edge_count }

    /// Returns the number of edges incident to `vertex`.
    ///
    /// # Errors
    /// Returns [`SamplerError::VertexOutOfBounds`] for an unknown vertex.
    pub fn degree(&self, vertex: usize) -> Result<usize> {
        self.check_vertex(vertex)?;
        Ok(self.adjacency[vertex].len())
    }

    /// Returns `true` when the edge `{left, right}` is present.
    ///
    /// Unknown vertices are reported as absent.
    #[must_use]
    pub fn has_edge(&self, left: usize, right: usize) -> bool {
        self.adjacency
            .get(left)
            .is_some_and(|neighbours| neighbours.contains(&right))
    }

    /// Inserts the edge `{left, right}`.
    ///
    /// Returns `false` when the edge was already present.
    ///
    /// # Errors
    /// Returns [`SamplerError::SelfLoop`] when `left == right` and
    /// [`SamplerError::VertexOutOfBounds`] for unknown vertices.
    pub fn add_edge(&mut self, left: usize, right: usize) -> Result<bool> {
        self.check_pair(left, right)?;
        let inserted = self.adjacency[left].insert(right);
        if inserted {
            self.adjacency[right].insert(left);
            self.edge_count += 1;
        }
        Ok(inserted)
    }

    /// Removes the edge `{left, right}`.
    ///
    /// # Errors
    /// Returns [`SamplerError::EdgeAbsent`] when the edge is not present, plus
    /// the pair validation errors of [`Graph::add_edge`].
    pub fn remove_edge(&mut self, left: usize, right: usize) -> Result<()> {
        self.check_pair(left, right)?;
        if !self.adjacency[left].remove(&right) {
            let (left, right) = canonical(left, right);
            return Err(SamplerError::EdgeAbsent { left, right });
        }
        self.adjacency[right].remove(&left);
        self.edge_count -= 1;
        Ok(())
    }

    /// Euclidean weight of the (possibly absent) edge `{left, right}`.
    ///
    /// # Errors
    /// Returns [`SamplerError::VertexOutOfBounds`] for unknown vertices.
    pub fn weight(&self, left: usize, right: usize) -> Result<f64> {
        self.check_vertex(left)?;
        self.check_vertex(right)?;
        Ok(self.weight_unchecked(left, right))
    }

    /// Sum of all edge weights.
    #[must_use]
    pub fn weighted_size(&self) -> f64 {
        self.edges()
            .map(|(left, right)| self.weight_unchecked(left, right))
            .sum()
    }

    /// Iterates over the edges as `(lower, upper)` index pairs in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(left, neighbours)| {
                neighbours
                    .range(left.saturating_add(1)..)
                    .map(move |&right| (left, right))
            })
    }

    /// Iterates over the neighbours of `vertex` in ascending order.
    ///
    /// Unknown vertices have no neighbours.
    pub fn neighbours(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency.get(vertex).into_iter().flatten().copied()
    }

    /// Returns `true` when every vertex is reachable from vertex 0.
    ///
    /// The empty graph is treated as connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        if self.vertex_count() == 0 {
            return true;
        }
        let mut seen = vec![false; self.vertex_count()];
        let mut stack = vec![0];
        seen[0] = true;
        let mut reached = 1;
        while let Some(vertex) = stack.pop() {
            for &next in &self.adjacency[vertex] {
                if !seen[next] {
                    seen[next] = true;
                    reached += 1;
                    stack.push(next);
                }
            }
        }
        reached == self.vertex_count()
    }

    /// Returns the order-independent identity of the current edge set.
    #[must_use]
    pub fn topology_key(&self) -> TopologyKey {
        TopologyKey::from_sorted(self.edges().collect())
    }

    pub(crate) fn weight_unchecked(&self, left: usize, right: usize) -> f64 {
        self.vertices[left].distance(self.vertices[right])
    }

    pub(crate) fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(SamplerError::VertexOutOfBounds {
                index: vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }

    pub(crate) fn check_pair(&self, left: usize, right: usize) -> Result<()> {
        self.check_vertex(left)?;
        self.check_vertex(right)?;
        if left == right {
            return Err(SamplerError::SelfLoop { vertex: left });
        }
        Ok(())
    }
}

/// Orders an unordered pair as `(lower, upper)`.
pub(crate) fn canonical(left: usize, right: usize) -> (usize, usize) {
    if left <= right {
        (left, right)
    } else {
        (right, left)
    }
}

/// Number of unordered vertex pairs, `n (n - 1) / 2`.
#[must_use]
pub fn pair_count(vertex_count: usize) -> usize {
    vertex_count.saturating_mul(vertex_count.saturating_sub(1)) / 2
}

#[cfg(test)]
mod tests;
