//! Weighted shortest-path queries (Dijkstra over Euclidean edge weights).

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use super::Graph;
use crate::error::{Result, SamplerError};

/// Aggregate of shortest-path distances from vertex 0 to every other vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSummary {
    /// Sum of the distances from vertex 0 to vertices `1..n`.
    pub total: f64,
    /// Largest distance from vertex 0 to any vertex.
    pub max: f64,
}

#[derive(Clone, Copy, Debug)]
struct Frontier {
    distance: f64,
    vertex: usize,
}

impl Eq for Frontier {}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.vertex.cmp(&other.vertex))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Graph {
    /// Weighted shortest-path distance from `source` to every vertex.
    ///
    /// Unreachable vertices are reported as `None`.
    ///
    /// # Errors
    /// Returns [`SamplerError::VertexOutOfBounds`] for an unknown source.
    pub fn shortest_path_lengths(&self, source: usize) -> Result<Vec<Option<f64>>> {
        self.check_vertex(source)?;
        let mut distances: Vec<Option<f64>> = vec![None; self.vertex_count()];
        let mut settled = vec![false; self.vertex_count()];
        let mut heap = BinaryHeap::new();
        distances[source] = Some(0.0);
        heap.push(Reverse(Frontier {
            distance: 0.0,
            vertex: source,
        }));

        while let Some(Reverse(Frontier { distance, vertex })) = heap.pop() {
            if settled[vertex] {
                continue;
            }
            settled[vertex] = true;
            for next in self.neighbours(vertex) {
                if settled[next] {
                    continue;
                }
                let candidate = distance + self.weight_unchecked(vertex, next);
                if distances[next].is_none_or(|known| candidate < known) {
                    distances[next] = Some(candidate);
                    heap.push(Reverse(Frontier {
                        distance: candidate,
                        vertex: next,
                    }));
                }
            }
        }
        Ok(distances)
    }

    /// Weighted shortest-path distance between two vertices.
    ///
    /// # Errors
    /// Returns [`SamplerError::Unreachable`] when no path exists, and
    /// [`SamplerError::VertexOutOfBounds`] for unknown vertices.
    pub fn shortest_path_length(&self, source: usize, target: usize) -> Result<f64> {
        self.check_vertex(target)?;
        self.shortest_path_lengths(source)?[target].ok_or(SamplerError::Unreachable {
            source_vertex: source,
            target,
        })
    }

    /// Summarises the distances from vertex 0 to every other vertex.
    ///
    /// # Errors
    /// Returns [`SamplerError::EmptyVertexSet`] for a graph without vertices
    /// and [`SamplerError::Unreachable`] when the graph is disconnected.
    pub fn path_summary(&self) -> Result<PathSummary> {
        if self.vertex_count() == 0 {
            return Err(SamplerError::EmptyVertexSet);
        }
        let mut summary = PathSummary {
            total: 0.0,
            max: 0.0,
        };
        for (target, distance) in self.shortest_path_lengths(0)?.into_iter().enumerate() {
            let distance = distance.ok_or(SamplerError::Unreachable {
                source_vertex: 0,
                target,
            })?;
            summary.total += distance;
            summary.max = summary.max.max(distance);
        }
        Ok(summary)
    }
}
