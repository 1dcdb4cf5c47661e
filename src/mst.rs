//! Minimum spanning trees: Prim and Kruskal
//!
//! Both algorithms return an [`MstResult`] covering one connected component:
//! the start node's for Prim, the component of the first node in canonical
//! order for Kruskal. On a disconnected graph the nodes outside that
//! component are listed in [`MstResult::unreached`] and a warning is logged;
//! the result never pretends to span the whole graph.
//!
//! For any connected graph both algorithms produce trees of equal total
//! weight. The edge sets can differ when weights tie.
//!
//! # Example
//!
//! ```rust
//! use greedy_structures::graph::build_graph;
//! use greedy_structures::mst::{run_kruskal, run_prim};
//!
//! let graph = build_graph([("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 4.0)]).unwrap();
//!
//! let prim = run_prim(&graph, None).unwrap();
//! let kruskal = run_kruskal(&graph).unwrap();
//! assert_eq!(prim.total_weight, 3.0);
//! assert_eq!(kruskal.total_weight, 3.0);
//! assert!(prim.is_spanning());
//! ```

use crate::disjoint_set::DisjointSetForest;
use crate::error::{EngineError, Result};
use crate::graph::{Edge, Graph, Node, Weight};
use crate::priority_queue::PriorityQueue;
use crate::simple_binary::SimpleBinaryHeap;
use crate::traits::Heap;
use serde::Serialize;
use std::fmt;

/// Which algorithm produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MstAlgorithm {
    Prim,
    Kruskal,
}

impl fmt::Display for MstAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MstAlgorithm::Prim => write!(f, "Prim"),
            MstAlgorithm::Kruskal => write!(f, "Kruskal"),
        }
    }
}

/// A minimum spanning tree of one connected component.
#[derive(Debug, Clone, Serialize)]
pub struct MstResult<N> {
    pub algorithm: MstAlgorithm,
    /// Node the tree was grown from; `None` only for an empty graph
    pub root: Option<N>,
    /// Selected edges in the order the algorithm accepted them
    pub edges: Vec<Edge<N>>,
    /// Sum of the selected edge weights
    pub total_weight: f64,
    /// Nodes outside the root's component, in canonical order
    pub unreached: Vec<N>,
}

impl<N: Node> MstResult<N> {
    fn empty(algorithm: MstAlgorithm) -> Self {
        MstResult {
            algorithm,
            root: None,
            edges: Vec::new(),
            total_weight: 0.0,
            unreached: Vec::new(),
        }
    }

    /// Returns true if the tree reaches every node of the graph.
    pub fn is_spanning(&self) -> bool {
        self.unreached.is_empty()
    }

    /// Number of selected edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if an edge between `a` and `b` was selected.
    pub fn contains_edge(&self, a: &N, b: &N) -> bool {
        self.edges.iter().any(|e| e.connects(a, b))
    }

    fn warn_if_disconnected(&self, node_count: usize) {
        if !self.is_spanning() {
            tracing::warn!(
                algorithm = %self.algorithm,
                root = ?self.root,
                unreached = self.unreached.len(),
                nodes = node_count,
                "graph is disconnected, tree covers only the root's component"
            );
        }
    }
}

/// Runs Prim's algorithm from `start`, or from the first node in canonical
/// order when `start` is `None`.
///
/// # Errors
/// [`EngineError::UnknownNode`] if `start` is not in the graph.
pub fn run_prim<N: Node>(graph: &Graph<N>, start: Option<&N>) -> Result<MstResult<N>> {
    prim_with_heap::<N, SimpleBinaryHeap<usize, Weight>>(graph, start)
}

/// Prim's algorithm over a caller-chosen heap.
///
/// The frontier queue is keyed by the cheapest known edge joining each
/// outside node to the tree. Improvements go through lazy decrease-key, so a
/// node can sit in the heap several times; only its live entry is extracted.
///
/// # Time Complexity
/// O(E log V)
pub fn prim_with_heap<N, H>(graph: &Graph<N>, start: Option<&N>) -> Result<MstResult<N>>
where
    N: Node,
    H: Heap<usize, Weight>,
{
    let start_idx = match start {
        Some(node) => graph
            .node_index(node)
            .ok_or_else(|| EngineError::unknown_node(node))?,
        None if graph.is_empty() => return Ok(MstResult::empty(MstAlgorithm::Prim)),
        None => 0,
    };

    let n = graph.node_count();
    let mut in_tree = vec![false; n];
    // Tree-side endpoint and weight of the cheapest known connecting edge
    let mut connection: Vec<Option<(usize, f64)>> = vec![None; n];
    let mut queue: PriorityQueue<usize, Weight, H> = PriorityQueue::new();

    let mut result = MstResult::empty(MstAlgorithm::Prim);
    result.root = Some(graph.node_at(start_idx).clone());
    tracing::debug!(start = ?graph.node_at(start_idx), nodes = n, "prim started");

    let mut current = start_idx;
    in_tree[current] = true;
    loop {
        for adj in graph.adjacency(current) {
            if !in_tree[adj.node] && queue.decrease_key(adj.node, Weight(adj.weight)) {
                connection[adj.node] = Some((current, adj.weight));
            }
        }

        if queue.is_empty() {
            break;
        }
        let (_, next) = queue.extract_min()?;
        if in_tree[next] {
            continue;
        }
        // every queued node was queued together with its connection
        let Some((parent, weight)) = connection[next] else {
            continue;
        };
        in_tree[next] = true;

        tracing::trace!(from = ?graph.node_at(parent), to = ?graph.node_at(next), weight, "prim accepted edge");
        result.edges.push(Edge {
            origin: graph.node_at(parent).clone(),
            destination: graph.node_at(next).clone(),
            weight,
        });
        result.total_weight += weight;
        current = next;
    }

    result.unreached = (0..n)
        .filter(|&i| !in_tree[i])
        .map(|i| graph.node_at(i).clone())
        .collect();
    result.warn_if_disconnected(n);
    tracing::debug!(
        edges = result.edges.len(),
        total_weight = result.total_weight,
        "prim finished"
    );
    Ok(result)
}

/// Runs Kruskal's algorithm.
///
/// Edges are scanned in ascending weight order, ties in declaration order;
/// an edge is accepted when its endpoints are still in different components.
/// The scan stops early once |V| − 1 edges have been accepted.
///
/// # Time Complexity
/// O(E log E), dominated by the sort.
pub fn run_kruskal<N: Node>(graph: &Graph<N>) -> Result<MstResult<N>> {
    if graph.is_empty() {
        return Ok(MstResult::empty(MstAlgorithm::Kruskal));
    }

    let n = graph.node_count();
    let records = graph.edge_records();
    tracing::debug!(nodes = n, edges = records.len(), "kruskal started");

    let mut order: Vec<usize> = (0..records.len()).collect();
    // stable: equal weights keep declaration order
    order.sort_by_key(|&e| Weight(records[e].weight));

    let mut forest = DisjointSetForest::with_capacity(n);
    for node in 0..n {
        forest.make_set(node)?;
    }

    let mut accepted = Vec::with_capacity(n - 1);
    for e in order {
        if accepted.len() == n - 1 {
            break;
        }
        let record = &records[e];
        if forest.union(&record.origin, &record.destination)? {
            tracing::trace!(
                origin = ?graph.node_at(record.origin),
                destination = ?graph.node_at(record.destination),
                weight = record.weight,
                "kruskal accepted edge"
            );
            accepted.push(e);
        }
    }

    // Restrict the forest to the first node's component
    let root_rep = *forest.find(&0)?;
    let mut result = MstResult::empty(MstAlgorithm::Kruskal);
    result.root = Some(graph.node_at(0).clone());
    for e in accepted {
        let record = &records[e];
        if *forest.find(&record.origin)? == root_rep {
            result.total_weight += record.weight;
            result.edges.push(graph.edge_from_record(record));
        }
    }
    for node in 0..n {
        if *forest.find(&node)? != root_rep {
            result.unreached.push(graph.node_at(node).clone());
        }
    }

    result.warn_if_disconnected(n);
    tracing::debug!(
        edges = result.edges.len(),
        total_weight = result.total_weight,
        "kruskal finished"
    );
    Ok(result)
}
