//! Seeded planar inputs for benchmarking.
//!
//! Points are drawn uniformly from the unit square with a fixed seed so
//! every benchmark run samples the same vertex set.

use edgewalk_core::{Graph, Point, SamplerError};
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::index};

/// Errors that may occur during point generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum PointSetError {
    /// The requested point count was zero.
    #[error("point count must be greater than zero")]
    ZeroPoints,
}

/// Configuration for point generation.
#[derive(Clone, Copy, Debug)]
pub struct PointSetConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Generates `config.point_count` points uniformly in `[0, 1)²`.
///
/// # Errors
/// Returns [`PointSetError::ZeroPoints`] if `point_count` is zero.
///
/// # Examples
/// ```
/// use edgewalk_benches::points::{PointSetConfig, generate_points};
///
/// let points = generate_points(&PointSetConfig { point_count: 5, seed: 7 })
///     .expect("valid config");
/// assert_eq!(points.len(), 5);
/// ```
pub fn generate_points(config: &PointSetConfig) -> Result<Vec<Point>, PointSetError> {
    if config.point_count == 0 {
        return Err(PointSetError::ZeroPoints);
    }
    let mut rng = SmallRng::seed_from_u64(config.seed);
    Ok((0..config.point_count)
        .map(|_| Point::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect())
}

/// Builds the star over `points` and adds up to `extra_edges` random chords.
///
/// Chords that already exist are skipped, so dense requests may add fewer.
///
/// # Errors
/// Returns the vertex validation errors of [`Graph::star`].
pub fn star_with_chords(
    points: Vec<Point>,
    extra_edges: usize,
    seed: u64,
) -> Result<Graph, SamplerError> {
    let mut graph = Graph::star(points)?;
    let vertex_count = graph.vertex_count();
    if vertex_count < 2 {
        return Ok(graph);
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    for _ in 0..extra_edges {
        let pair = index::sample(&mut rng, vertex_count, 2);
        graph.add_edge(pair.index(0), pair.index(1))?;
    }
    Ok(graph)
}
