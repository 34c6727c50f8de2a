//! Topology identities, visit-frequency tables, and top-fraction extraction.

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
};

use crate::point::Point;

/// Fraction of distinct topologies reported by [`FrequencyTable::top_fraction`].
pub const TOP_FRACTION: f64 = 0.01;

/// Order-independent identity of a graph's edge set.
///
/// Edges are stored as `(lower, upper)` vertex indices in ascending order, so
/// two graphs over the same vertex list share a key exactly when they share
/// an edge set. Keys are totally ordered (lexicographically by edge list),
/// which gives ranking ties a deterministic resolution.
///
/// # Examples
/// ```
/// use edgewalk_core::TopologyKey;
///
/// let forward = TopologyKey::from_edges([(0, 1), (2, 1)]);
/// let reverse = TopologyKey::from_edges([(1, 2), (1, 0)]);
/// assert_eq!(forward, reverse);
/// assert_eq!(forward.edges(), &[(0, 1), (1, 2)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TopologyKey(Box<[(usize, usize)]>);

impl TopologyKey {
    /// Builds a key from edges given in any order and orientation.
    ///
    /// Self loops are dropped and repeated edges collapse.
    #[must_use]
    pub fn from_edges(edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut edges: Vec<_> = edges
            .into_iter()
            .filter(|(left, right)| left != right)
            .map(|(left, right)| crate::graph::canonical(left, right))
            .collect();
        edges.sort_unstable();
        edges.dedup();
        Self(edges.into_boxed_slice())
    }

    pub(crate) fn from_sorted(edges: Vec<(usize, usize)>) -> Self {
        debug_assert!(edges.windows(2).all(|pair| pair[0] < pair[1]));
        Self(edges.into_boxed_slice())
    }

    /// Returns the canonical edge list.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[(usize, usize)] { &self.0 }

    /// Returns the number of edges in the topology.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the edgeless topology.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the edge set with the coordinates of `vertices`.
    ///
    /// # Examples
    /// ```
    /// use edgewalk_core::{Point, TopologyKey};
    ///
    /// let vertices = [Point::new(0.0, 0.0), Point::new(1.0, 0.5)];
    /// let key = TopologyKey::from_edges([(0, 1)]);
    /// assert_eq!(key.display(&vertices).to_string(), "{(0.0, 0.0)-(1.0, 0.5)}");
    /// ```
    #[must_use]
    pub fn display<'a>(&'a self, vertices: &'a [Point]) -> TopologyDisplay<'a> {
        TopologyDisplay {
            key: self,
            vertices,
        }
    }
}

/// [`fmt::Display`] adapter writing a topology as a coordinate edge set.
#[derive(Clone, Copy, Debug)]
pub struct TopologyDisplay<'a> {
    key: &'a TopologyKey,
    vertices: &'a [Point],
}

impl fmt::Display for TopologyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (position, &(left, right)) in self.key.edges().iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write_vertex(f, self.vertices, left)?;
            f.write_str("-")?;
            write_vertex(f, self.vertices, right)?;
        }
        f.write_str("}")
    }
}

fn write_vertex(f: &mut fmt::Formatter<'_>, vertices: &[Point], index: usize) -> fmt::Result {
    match vertices.get(index) {
        Some(point) => write!(f, "{point}"),
        None => write!(f, "#{index}"),
    }
}

/// Visit counts per topology, accumulated over one or more chains.
///
/// # Examples
/// ```
/// use edgewalk_core::{FrequencyTable, TopologyKey};
///
/// let mut left = FrequencyTable::new();
/// left.record(TopologyKey::from_edges([(0, 1)]));
/// let mut right = FrequencyTable::new();
/// right.record(TopologyKey::from_edges([(1, 0)]));
/// left.merge(right);
/// assert_eq!(left.len(), 1);
/// assert_eq!(left.total(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<TopologyKey, u64>,
}

impl FrequencyTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one visit of `key`.
    pub fn record(&mut self, key: TopologyKey) {
        self.record_many(key, 1);
    }

    /// Records one visit of a borrowed key, cloning it only on first sight.
    pub fn record_ref(&mut self, key: &TopologyKey) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.clone(), 1);
            }
        }
    }

    fn record_many(&mut self, key: TopologyKey, visits: u64) {
        match self.counts.entry(key) {
            Entry::Occupied(mut entry) => *entry.get_mut() += visits,
            Entry::Vacant(entry) => {
                entry.insert(visits);
            }
        }
    }

    /// Adds every count of `other` into `self`, summing identical keys.
    pub fn merge(&mut self, other: Self) {
        if self.counts.is_empty() {
            self.counts = other.counts;
            return;
        }
        for (key, visits) in other.counts {
            self.record_many(key, visits);
        }
    }

    /// Number of visits recorded for `key`.
    #[must_use]
    pub fn count(&self, key: &TopologyKey) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct topologies observed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all visit counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates over `(key, count)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&TopologyKey, u64)> + '_ {
        self.counts.iter().map(|(key, &count)| (key, count))
    }

    /// Returns every entry sorted by count (descending), ties by ascending key.
    #[must_use]
    pub fn ranked(&self) -> Vec<(&TopologyKey, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|(left_key, left), (right_key, right)| {
            right.cmp(left).then_with(|| left_key.cmp(right_key))
        });
        entries
    }

    /// Returns the most frequently visited topologies.
    ///
    /// The top [`TOP_FRACTION`] of distinct topologies is kept, rounded half
    /// away from zero. When that fraction is below one topology the single
    /// most frequent topology is returned, and an empty table yields an empty
    /// list.
    ///
    /// # Examples
    /// ```
    /// use edgewalk_core::{FrequencyTable, TopologyKey};
    ///
    /// let mut table = FrequencyTable::new();
    /// table.record(TopologyKey::from_edges([(0, 1)]));
    /// table.record(TopologyKey::from_edges([(0, 1), (1, 2)]));
    /// table.record(TopologyKey::from_edges([(0, 1), (1, 2)]));
    /// assert_eq!(
    ///     table.top_fraction(),
    ///     vec![TopologyKey::from_edges([(0, 1), (1, 2)])]
    /// );
    /// ```
    #[must_use]
    pub fn top_fraction(&self) -> Vec<TopologyKey> {
        let keep = top_fraction_len(self.len());
        self.ranked()
            .into_iter()
            .take(keep)
            .map(|(key, _)| key.clone())
            .collect()
    }
}

impl Extend<TopologyKey> for FrequencyTable {
    fn extend<I: IntoIterator<Item = TopologyKey>>(&mut self, keys: I) {
        for key in keys {
            self.record(key);
        }
    }
}

impl FromIterator<TopologyKey> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = TopologyKey>>(keys: I) -> Self {
        let mut table = Self::new();
        table.extend(keys);
        table
    }
}

/// Number of topologies [`FrequencyTable::top_fraction`] keeps out of `distinct`.
#[must_use]
pub fn top_fraction_len(distinct: usize) -> usize {
    if distinct == 0 {
        return 0;
    }
    let top = distinct as f64 * TOP_FRACTION;
    if top < 1.0 { 1 } else { top.round() as usize }
}
