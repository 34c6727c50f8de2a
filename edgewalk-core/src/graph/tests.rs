//! Unit tests for the graph model.

use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rstest::rstest;

use crate::{Point, SamplerError, test_utils::suite_proptest_config};

use super::{Graph, pair_count};

fn square() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ]
}

fn line(count: usize) -> Vec<Point> {
    (0..count).map(|index| Point::new(index as f64, 0.0)).collect()
}

fn graph_with(vertices: Vec<Point>, edges: &[(usize, usize)]) -> Graph {
    let mut graph = Graph::new(vertices).expect("vertices must be valid");
    for &(left, right) in edges {
        graph.add_edge(left, right).expect("edge must be valid");
    }
    graph
}

fn random_connected_graph(rng: &mut SmallRng, vertex_count: usize) -> Graph {
    let vertices = (0..vertex_count)
        .map(|index| Point::new(index as f64, rng.gen_range(-10.0..10.0)))
        .collect::<Vec<_>>();
    let mut graph = Graph::new(vertices).expect("vertices must be distinct");
    for vertex in 1..vertex_count {
        let parent = rng.gen_range(0..vertex);
        graph.add_edge(parent, vertex).expect("tree edge must be valid");
    }
    for _ in 0..vertex_count {
        let left = rng.gen_range(0..vertex_count);
        let right = rng.gen_range(0..vertex_count);
        if left != right {
            graph.add_edge(left, right).expect("extra edge must be valid");
        }
    }
    graph
}

#[test]
fn new_graph_is_edgeless() {
    let graph = Graph::new(square()).expect("square must be valid");
    assert_eq!(graph.vertex_count(), 4);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.weighted_size(), 0.0);
    assert!(!graph.is_connected());
}

#[test]
fn star_joins_vertex_zero_to_every_vertex() {
    let graph = Graph::star(square()).expect("square must be valid");
    assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1), (0, 2), (0, 3)]);
    assert_eq!(graph.degree(0), Ok(3));
    assert!(graph.is_connected());
}

#[test]
fn star_rejects_empty_vertex_set() {
    assert_eq!(Graph::star(Vec::new()), Err(SamplerError::EmptyVertexSet));
}

#[test]
fn single_vertex_star_has_no_edges() {
    let graph = Graph::star(vec![Point::new(4.0, 2.0)]).expect("single vertex is valid");
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.is_connected());
    assert_eq!(graph.path_summary().map(|summary| summary.max), Ok(0.0));
}

#[test]
fn add_edge_rejects_self_loops() {
    let mut graph = Graph::new(square()).expect("square must be valid");
    assert_eq!(graph.add_edge(2, 2), Err(SamplerError::SelfLoop { vertex: 2 }));
}

#[test]
fn add_edge_rejects_unknown_vertices() {
    let mut graph = Graph::new(square()).expect("square must be valid");
    assert_eq!(
        graph.add_edge(0, 4),
        Err(SamplerError::VertexOutOfBounds {
            index: 4,
            vertex_count: 4
        })
    );
}

#[test]
fn add_edge_reports_existing_edges() {
    let mut graph = Graph::new(square()).expect("square must be valid");
    assert_eq!(graph.add_edge(0, 1), Ok(true));
    assert_eq!(graph.add_edge(1, 0), Ok(false));
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn remove_edge_rejects_absent_edges() {
    let mut graph = graph_with(square(), &[(0, 1)]);
    assert_eq!(
        graph.remove_edge(3, 1),
        Err(SamplerError::EdgeAbsent { left: 1, right: 3 })
    );
    graph.remove_edge(1, 0).expect("present edge must be removable");
    assert!(!graph.has_edge(0, 1));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn has_edge_is_symmetric_and_tolerates_unknown_vertices() {
    let graph = graph_with(square(), &[(1, 2)]);
    assert!(graph.has_edge(1, 2));
    assert!(graph.has_edge(2, 1));
    assert!(!graph.has_edge(0, 1));
    assert!(!graph.has_edge(9, 1));
}

#[test]
fn weighted_size_sums_euclidean_weights() {
    let graph = graph_with(square(), &[(0, 1), (1, 2), (0, 2)]);
    let expected = 2.0 + 2.0_f64.sqrt();
    assert!((graph.weighted_size() - expected).abs() < 1e-12);
}

#[test]
fn shortest_paths_prefer_lighter_routes() {
    let graph = graph_with(square(), &[(0, 1), (1, 2), (2, 3), (0, 2)]);
    let distances = graph.shortest_path_lengths(0).expect("source must exist");
    assert_eq!(distances[0], Some(0.0));
    assert_eq!(distances[1], Some(1.0));
    assert!((distances[2].expect("reachable") - 2.0_f64.sqrt()).abs() < 1e-12);
    assert!((distances[3].expect("reachable") - (1.0 + 2.0_f64.sqrt())).abs() < 1e-12);
}

#[test]
fn shortest_paths_report_unreachable_vertices() {
    let graph = graph_with(square(), &[(0, 1)]);
    let distances = graph.shortest_path_lengths(0).expect("source must exist");
    assert_eq!(distances[3], None);
    assert_eq!(
        graph.shortest_path_length(0, 3),
        Err(SamplerError::Unreachable {
            source_vertex: 0,
            target: 3
        })
    );
    assert!(matches!(
        graph.path_summary(),
        Err(SamplerError::Unreachable { source_vertex: 0, .. })
    ));
}

#[test]
fn max_shortest_path_of_three_vertex_star() {
    let vertices = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 2.0)];
    let graph = Graph::star(vertices).expect("vertices must be valid");
    let summary = graph.path_summary().expect("star is connected");
    assert_eq!(summary.max, 2.0);
    assert_eq!(summary.total, 3.0);
}

#[rstest]
#[case::single_edge(line(2), vec![(0, 1)], 0, 1, 1)]
#[case::path(line(4), vec![(0, 1), (1, 2), (2, 3)], 0, 3, 1)]
#[case::cycle(square(), vec![(0, 1), (1, 2), (2, 3), (3, 0)], 0, 2, 2)]
#[case::complete(square(), vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)], 0, 1, 3)]
#[case::disconnected(square(), vec![(0, 1), (2, 3)], 0, 3, 0)]
fn min_cut_size_counts_edge_disjoint_paths(
    #[case] vertices: Vec<Point>,
    #[case] edges: Vec<(usize, usize)>,
    #[case] source: usize,
    #[case] sink: usize,
    #[case] expected: usize,
) {
    let graph = graph_with(vertices, &edges);
    assert_eq!(graph.min_cut_size(source, sink), Ok(expected));
}

#[test]
fn min_cut_size_rejects_identical_endpoints() {
    let graph = Graph::star(square()).expect("square must be valid");
    assert_eq!(graph.min_cut_size(1, 1), Err(SamplerError::SelfLoop { vertex: 1 }));
}

#[rstest]
#[case::triangle(square(), vec![(0, 1), (1, 2), (2, 0)], 0)]
#[case::star(line(6), vec![(0, 1), (0, 2), (0, 3), (0, 4), (0, 5)], 5)]
#[case::path(line(4), vec![(0, 1), (1, 2), (2, 3)], 3)]
#[case::cycle_with_tail(line(5), vec![(0, 1), (1, 2), (2, 0), (2, 3), (3, 4)], 2)]
fn bridge_count_matches_known_graphs(
    #[case] vertices: Vec<Point>,
    #[case] edges: Vec<(usize, usize)>,
    #[case] expected: usize,
) {
    let graph = graph_with(vertices, &edges);
    assert_eq!(graph.bridge_count(), expected);
}

#[test]
fn two_vertex_edge_is_always_a_bridge() {
    let graph = Graph::star(line(2)).expect("line must be valid");
    assert_eq!(graph.is_bridge(0, 1), Ok(true));
    assert_eq!(graph.bridge_count(), 1);
}

#[test]
fn bridge_count_handles_long_paths_without_recursion() {
    let count = 20_000;
    let edges: Vec<_> = (1..count).map(|vertex| (vertex - 1, vertex)).collect();
    let graph = graph_with(line(count), &edges);
    assert_eq!(graph.bridge_count(), count - 1);
}

#[test]
fn topology_key_ignores_insertion_order() {
    let forward = graph_with(square(), &[(0, 1), (2, 3), (1, 2)]);
    let backward = graph_with(square(), &[(2, 1), (3, 2), (1, 0)]);
    assert_eq!(forward.topology_key(), backward.topology_key());
}

#[rstest]
#[case(0, 0)]
#[case(1, 0)]
#[case(2, 1)]
#[case(3, 3)]
#[case(6, 15)]
fn pair_count_is_n_choose_two(#[case] vertices: usize, #[case] expected: usize) {
    assert_eq!(pair_count(vertices), expected);
}

fn bridge_definitions_agree(seed: u64, vertex_count: usize) -> Result<(), TestCaseError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let graph = random_connected_graph(&mut rng, vertex_count);
    let mut by_min_cut = 0;
    for (left, right) in graph.edges() {
        let is_bridge = graph
            .is_bridge(left, right)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let cut = graph
            .min_cut_size(left, right)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert_eq!(is_bridge, cut == 1, "edge ({}, {})", left, right);
        if cut == 1 {
            by_min_cut += 1;
        }
    }
    prop_assert_eq!(graph.bridge_count(), by_min_cut);
    Ok(())
}

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn bridge_detection_matches_min_cut(seed in any::<u64>(), vertex_count in 2_usize..14) {
        bridge_definitions_agree(seed, vertex_count)?;
    }
}
