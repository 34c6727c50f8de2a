//! Edge-cut queries: pairwise minimum cuts and bridge detection.
//!
//! `min_cut_size` runs unit-capacity augmenting-path max-flow (Edmonds-Karp)
//! and is the reference definition of a bridge. Bridge detection on the hot
//! path uses cheaper equivalents: a single avoiding search for one edge and a
//! low-link depth-first search for the whole graph.

use std::collections::{VecDeque, btree_set};

use super::Graph;
use crate::error::{Result, SamplerError};

const UNVISITED: usize = usize::MAX;

impl Graph {
    /// Minimum number of edges whose removal disconnects `source` from `sink`.
    ///
    /// Returns `0` when the vertices are already disconnected.
    ///
    /// # Errors
    /// Returns [`SamplerError::SelfLoop`] when `source == sink` and
    /// [`SamplerError::VertexOutOfBounds`] for unknown vertices.
    pub fn min_cut_size(&self, source: usize, sink: usize) -> Result<usize> {
        self.check_pair(source, sink)?;
        let n = self.vertex_count();
        // flow[a][b] is the net flow pushed along a -> b; each undirected edge
        // carries unit capacity in both directions.
        let mut flow = vec![vec![0_i8; n]; n];
        let mut cut = 0;
        while let Some(parents) = self.augmenting_path(&flow, source, sink) {
            let mut vertex = sink;
            while vertex != source {
                let parent = parents[vertex];
                flow[parent][vertex] += 1;
                flow[vertex][parent] -= 1;
                vertex = parent;
            }
            cut += 1;
        }
        Ok(cut)
    }

    fn augmenting_path(&self, flow: &[Vec<i8>], source: usize, sink: usize) -> Option<Vec<usize>> {
        let mut parents = vec![UNVISITED; self.vertex_count()];
        parents[source] = source;
        let mut queue = VecDeque::from([source]);
        while let Some(vertex) = queue.pop_front() {
            for next in self.neighbours(vertex) {
                if parents[next] == UNVISITED && flow[vertex][next] < 1 {
                    parents[next] = vertex;
                    if next == sink {
                        return Some(parents);
                    }
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Returns `true` when `{left, right}` is present and is a bridge.
    ///
    /// Equivalent to `has_edge(left, right) && min_cut_size(left, right) == 1`:
    /// the edge is a bridge exactly when no other path joins its endpoints.
    ///
    /// # Errors
    /// Returns the pair validation errors of [`Graph::min_cut_size`].
    pub fn is_bridge(&self, left: usize, right: usize) -> Result<bool> {
        self.check_pair(left, right)?;
        if !self.has_edge(left, right) {
            return Ok(false);
        }
        let mut seen = vec![false; self.vertex_count()];
        seen[left] = true;
        let mut stack = vec![left];
        while let Some(vertex) = stack.pop() {
            for next in self.neighbours(vertex) {
                if vertex == left && next == right {
                    continue;
                }
                if next == right {
                    return Ok(false);
                }
                if !seen[next] {
                    seen[next] = true;
                    stack.push(next);
                }
            }
        }
        Ok(true)
    }

    /// Counts the bridges of the graph.
    ///
    /// Uses an iterative low-link search so deep path graphs cannot exhaust
    /// the call stack.
    #[must_use]
    pub fn bridge_count(&self) -> usize {
        struct Frame<'a> {
            vertex: usize,
            parent: usize,
            neighbours: btree_set::Iter<'a, usize>,
        }

        let n = self.vertex_count();
        let mut discovery = vec![UNVISITED; n];
        let mut low = vec![0; n];
        let mut timer = 0;
        let mut bridges = 0;

        for root in 0..n {
            if discovery[root] != UNVISITED {
                continue;
            }
            discovery[root] = timer;
            low[root] = timer;
            timer += 1;
            let mut stack = vec![Frame {
                vertex: root,
                parent: UNVISITED,
                neighbours: self.adjacency[root].iter(),
            }];

            while let Some(frame) = stack.last_mut() {
                let vertex = frame.vertex;
                let parent = frame.parent;
                match frame.neighbours.next() {
                    Some(&next) if next == parent => {}
                    Some(&next) if discovery[next] == UNVISITED => {
                        discovery[next] = timer;
                        low[next] = timer;
                        timer += 1;
                        stack.push(Frame {
                            vertex: next,
                            parent: vertex,
                            neighbours: self.adjacency[next].iter(),
                        });
                    }
                    Some(&next) => low[vertex] = low[vertex].min(discovery[next]),
                    None => {
                        stack.pop();
                        if parent != UNVISITED {
                            low[parent] = low[parent].min(low[vertex]);
                            if low[vertex] > discovery[parent] {
                                bridges += 1;
                            }
                        }
                    }
                }
            }
        }
        bridges
    }
}
