//! Graph query benchmarks.
//!
//! Measures the queries every proposal or statistics update performs: the
//! single-edge bridge test, the whole-graph bridge count behind the legal
//! move count, and the shortest-path summary from vertex 0.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use edgewalk_benches::{
    error::BenchSetupError,
    params::GraphBenchParams,
    points::{PointSetConfig, generate_points, star_with_chords},
};
use edgewalk_core::Graph;

/// Seed used for points and chords.
const SEED: u64 = 7;

/// Graph shapes to benchmark.
const SHAPES: &[GraphBenchParams] = &[
    GraphBenchParams {
        vertex_count: 16,
        extra_edges: 16,
    },
    GraphBenchParams {
        vertex_count: 64,
        extra_edges: 64,
    },
    GraphBenchParams {
        vertex_count: 256,
        extra_edges: 512,
    },
];

fn build(params: GraphBenchParams) -> Result<Graph, BenchSetupError> {
    let points = generate_points(&PointSetConfig {
        point_count: params.vertex_count,
        seed: SEED,
    })?;
    Ok(star_with_chords(points, params.extra_edges, SEED)?)
}

fn graph_queries_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("graph_queries");
    group.sample_size(20);

    for &params in SHAPES {
        let graph = build(params)?;
        let edges: Vec<(usize, usize)> = graph.edges().collect();

        group.bench_with_input(BenchmarkId::new("bridge_count", params), &graph, |b, graph| {
            b.iter(|| graph.bridge_count());
        });
        group.bench_with_input(
            BenchmarkId::new("is_bridge_all_edges", params),
            &(&graph, &edges),
            |b, &(graph, edges)| {
                b.iter(|| {
                    edges
                        .iter()
                        .filter(|&&(left, right)| graph.is_bridge(left, right).unwrap_or(false))
                        .count()
                });
            },
        );
        group.bench_with_input(BenchmarkId::new("path_summary", params), &graph, |b, graph| {
            b.iter(|| graph.path_summary());
        });
    }

    group.finish();
    Ok(())
}

fn graph_queries(c: &mut Criterion) {
    if let Err(err) = graph_queries_impl(c) {
        panic!("graph_queries benchmark setup failed: {err}");
    }
}

criterion_group!(benches, graph_queries);
criterion_main!(benches);
