//! Integration tests for Prim and Kruskal
//!
//! Tests cover:
//! - The worked scenarios (triangle, textbook graph)
//! - Disconnected input and how it is reported
//! - Determinism across repeated runs
//! - Running Prim over a different heap implementation

use greedy_structures::graph::{build_graph, Graph, GraphBuilder, Weight};
use greedy_structures::mst::{prim_with_heap, run_kruskal, run_prim, MstAlgorithm};
use greedy_structures::{EngineError, Heap};

// ============================================================================
// Fixtures
// ============================================================================

fn triangle() -> Graph<&'static str> {
    build_graph([("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 4.0)]).unwrap()
}

/// The sample graph shipped in `data/graphs/example.csv`
fn sample() -> Graph<String> {
    let rows = [
        ("A", "B", 4.0),
        ("A", "H", 8.0),
        ("B", "C", 8.0),
        ("B", "H", 11.0),
        ("C", "D", 7.0),
        ("C", "F", 4.0),
        ("C", "I", 2.0),
        ("D", "E", 9.0),
        ("D", "F", 14.0),
        ("E", "F", 10.0),
        ("F", "G", 2.0),
        ("G", "H", 1.0),
        ("G", "I", 6.0),
        ("H", "I", 7.0),
    ];
    build_graph(rows.map(|(u, v, w)| (u.to_string(), v.to_string(), w))).unwrap()
}

/// A heap that keeps a sorted `Vec`; stable because it inserts after equal keys.
struct SortedVecHeap<T, P> {
    data: Vec<(P, T)>,
}

impl<T, P: Ord> Heap<T, P> for SortedVecHeap<T, P> {
    fn new() -> Self {
        SortedVecHeap { data: Vec::new() }
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, priority: P, item: T) {
        let pos = self.data.partition_point(|(p, _)| *p <= priority);
        self.data.insert(pos, (priority, item));
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.data.first().map(|(p, t)| (p, t))
    }

    fn pop(&mut self) -> Option<(P, T)> {
        if self.data.is_empty() {
            None
        } else {
            Some(self.data.remove(0))
        }
    }
}

// ============================================================================
// Worked scenarios
// ============================================================================

#[test]
fn test_triangle_both_algorithms() {
    let graph = triangle();
    for mst in [run_prim(&graph, None).unwrap(), run_kruskal(&graph).unwrap()] {
        assert_eq!(mst.total_weight, 3.0, "{}", mst.algorithm);
        assert_eq!(mst.edge_count(), 2);
        assert!(mst.contains_edge(&"A", &"B"));
        assert!(mst.contains_edge(&"B", &"C"));
        assert!(!mst.contains_edge(&"A", &"C"));
        assert!(mst.is_spanning());
    }
}

#[test]
fn test_sample_graph() {
    let graph = sample();
    let prim = run_prim(&graph, None).unwrap();
    let kruskal = run_kruskal(&graph).unwrap();

    assert_eq!(prim.algorithm, MstAlgorithm::Prim);
    assert_eq!(kruskal.algorithm, MstAlgorithm::Kruskal);
    assert_eq!(prim.total_weight, 37.0);
    assert_eq!(kruskal.total_weight, 37.0);
    assert_eq!(prim.edge_count(), graph.node_count() - 1);
    assert_eq!(kruskal.edge_count(), graph.node_count() - 1);
}

#[test]
fn test_prim_every_start_same_weight() {
    let graph = sample();
    for node in graph.nodes() {
        let mst = run_prim(&graph, Some(node)).unwrap();
        assert_eq!(mst.total_weight, 37.0, "start {node}");
        assert_eq!(mst.root.as_ref(), Some(node));
    }
}

#[test]
fn test_kruskal_accepts_in_weight_order() {
    let mst = run_kruskal(&sample()).unwrap();
    let weights: Vec<f64> = mst.edges.iter().map(|e| e.weight).collect();
    let mut sorted = weights.clone();
    sorted.sort_by(f64::total_cmp);
    assert_eq!(weights, sorted);
}

// ============================================================================
// Disconnected graphs
// ============================================================================

#[test]
fn test_disconnected_graph_lists_unreached() {
    let mut builder = GraphBuilder::new();
    builder.add_edge("A", "B", 1.0).unwrap();
    builder.add_edge("B", "C", 1.0).unwrap();
    builder.add_edge("X", "Y", 2.0).unwrap();
    builder.add_node("Z");
    let graph = builder.build();

    let prim = run_prim(&graph, None).unwrap();
    let kruskal = run_kruskal(&graph).unwrap();
    for mst in [&prim, &kruskal] {
        assert!(!mst.is_spanning());
        assert_eq!(mst.unreached, vec!["X", "Y", "Z"]);
        assert_eq!(mst.edge_count(), 2);
        assert!(mst.edge_count() < graph.node_count() - 1);
        assert_eq!(mst.total_weight, 2.0);
    }
}

#[test]
fn test_unknown_start_fails_before_work() {
    let err = run_prim(&triangle(), Some(&"nope")).unwrap_err();
    assert!(matches!(err, EngineError::UnknownNode(_)));
    assert!(!err.is_internal());
}

// ============================================================================
// Determinism and heap seam
// ============================================================================

#[test]
fn test_repeated_runs_identical() {
    let graph = build_graph([
        (1, 2, 1.0),
        (2, 3, 1.0),
        (3, 4, 1.0),
        (4, 1, 1.0),
        (1, 3, 1.0),
        (2, 4, 1.0),
    ])
    .unwrap();

    let prim = run_prim(&graph, None).unwrap();
    let kruskal = run_kruskal(&graph).unwrap();
    for _ in 0..20 {
        assert_eq!(run_prim(&graph, None).unwrap().edges, prim.edges);
        assert_eq!(run_kruskal(&graph).unwrap().edges, kruskal.edges);
    }
}

#[test]
fn test_prim_with_other_heap_matches_default() {
    let graph = sample();
    let default = run_prim(&graph, None).unwrap();
    let sorted = prim_with_heap::<_, SortedVecHeap<usize, Weight>>(&graph, None).unwrap();
    assert_eq!(default.edges, sorted.edges);
    assert_eq!(default.total_weight, sorted.total_weight);
}

#[test]
fn test_duplicate_edges_use_minimum_weight() {
    let graph = build_graph([("A", "B", 9.0), ("A", "B", 1.0), ("B", "C", 1.0), ("C", "A", 5.0)])
        .unwrap();
    assert_eq!(run_prim(&graph, None).unwrap().total_weight, 2.0);
    assert_eq!(run_kruskal(&graph).unwrap().total_weight, 2.0);
}
