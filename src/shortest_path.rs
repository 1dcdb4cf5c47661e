//! Single-source shortest paths with Dijkstra's algorithm
//!
//! The search keeps one [`NodeEntry`] per graph node (tentative distance,
//! predecessor, closed flag) and a [`PriorityQueue`] of open nodes keyed by
//! tentative distance. Relaxations use lazy decrease-key; a node popped after
//! it was closed is skipped.
//!
//! Unlike a goal-directed search the algorithm always runs to exhaustion, so
//! the resulting [`ShortestPathTree`] holds final distances for every node.
//!
//! # Example
//!
//! ```rust
//! use greedy_structures::graph::build_graph;
//! use greedy_structures::shortest_path::run_dijkstra;
//!
//! let graph = build_graph([("S", "T", 10.0), ("S", "M", 3.0), ("M", "T", 4.0)]).unwrap();
//! let tree = run_dijkstra(&graph, &"S").unwrap();
//!
//! assert_eq!(tree.distance(&"T"), Some(7.0));
//! assert_eq!(tree.predecessor(&"T"), Some(&"M"));
//! assert_eq!(tree.path_to(&"T"), Some(vec!["S", "M", "T"]));
//! ```

use crate::error::{EngineError, Result};
use crate::graph::{Edge, Graph, Node, Weight};
use crate::priority_queue::PriorityQueue;
use crate::simple_binary::SimpleBinaryHeap;
use crate::traits::Heap;
use serde::Serialize;

/// Search state for one node.
#[derive(Debug, Clone, Copy)]
struct NodeEntry {
    /// Best known distance from the source
    distance: Weight,
    /// Previous node on the best known path
    came_from: Option<usize>,
    /// Whether the distance is final
    closed: bool,
}

/// Final distance and predecessor of one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathEntry<N> {
    pub node: N,
    /// `f64::INFINITY` when unreachable
    pub distance: f64,
    pub predecessor: Option<N>,
}

/// The result of a Dijkstra run.
///
/// Entries are stored in the graph's canonical node order.
#[derive(Debug, Clone, Serialize)]
pub struct ShortestPathTree<N: Node> {
    pub source: N,
    pub entries: Vec<PathEntry<N>>,
    /// Weight of each predecessor edge, parallel to `entries`
    #[serde(skip)]
    link_weights: Vec<Option<f64>>,
    #[serde(skip)]
    index: rustc_hash::FxHashMap<N, usize>,
}

impl<N: Node> ShortestPathTree<N> {
    fn entry(&self, node: &N) -> Option<&PathEntry<N>> {
        self.index.get(node).map(|&i| &self.entries[i])
    }

    /// Shortest distance from the source; `None` if `node` is not in the graph.
    ///
    /// Unreachable nodes report `f64::INFINITY`.
    pub fn distance(&self, node: &N) -> Option<f64> {
        self.entry(node).map(|e| e.distance)
    }

    /// Previous node on the shortest path to `node`.
    pub fn predecessor(&self, node: &N) -> Option<&N> {
        self.entry(node).and_then(|e| e.predecessor.as_ref())
    }

    /// Returns true if `node` can be reached from the source.
    pub fn is_reachable(&self, node: &N) -> bool {
        self.distance(node).is_some_and(f64::is_finite)
    }

    /// Nodes that cannot be reached from the source, in canonical order.
    pub fn unreached(&self) -> Vec<&N> {
        self.entries
            .iter()
            .filter(|e| !e.distance.is_finite())
            .map(|e| &e.node)
            .collect()
    }

    /// Node sequence from the source to `target`, both inclusive.
    ///
    /// `None` if `target` is unknown or unreachable.
    pub fn path_to(&self, target: &N) -> Option<Vec<N>> {
        let mut current = *self.index.get(target)?;
        if !self.entries[current].distance.is_finite() {
            return None;
        }

        let mut path = vec![self.entries[current].node.clone()];
        while let Some(prev) = &self.entries[current].predecessor {
            current = self.index[prev];
            path.push(prev.clone());
        }
        path.reverse();
        Some(path)
    }

    /// Predecessor edges (predecessor -> node), one per reachable non-source
    /// node, in canonical order of the child node.
    pub fn tree_edges(&self) -> Vec<Edge<N>> {
        self.entries
            .iter()
            .zip(&self.link_weights)
            .filter_map(|(entry, weight)| {
                Some(Edge {
                    origin: entry.predecessor.clone()?,
                    destination: entry.node.clone(),
                    weight: (*weight)?,
                })
            })
            .collect()
    }
}

/// Runs Dijkstra's algorithm from `source`.
///
/// Distances are plain `f64` sums. A path whose length exceeds `f64::MAX`
/// rounds to `+∞` and is indistinguishable from no path: its target is
/// reported as unreached, with no predecessor.
///
/// # Errors
/// - [`EngineError::UnknownNode`] if `source` is not in the graph
/// - [`EngineError::NegativeWeight`] if any edge weight is negative or not
///   finite; checked before the search starts
pub fn run_dijkstra<N: Node>(graph: &Graph<N>, source: &N) -> Result<ShortestPathTree<N>> {
    dijkstra_with_heap::<N, SimpleBinaryHeap<usize, Weight>>(graph, source)
}

/// Dijkstra's algorithm over a caller-chosen heap.
///
/// # Time Complexity
/// O(E log V)
pub fn dijkstra_with_heap<N, H>(graph: &Graph<N>, source: &N) -> Result<ShortestPathTree<N>>
where
    N: Node,
    H: Heap<usize, Weight>,
{
    let source_idx = graph
        .node_index(source)
        .ok_or_else(|| EngineError::unknown_node(source))?;
    graph.check_non_negative()?;

    let n = graph.node_count();
    let mut nodes = vec![
        NodeEntry {
            distance: Weight::INFINITY,
            came_from: None,
            closed: false,
        };
        n
    ];
    let mut link_weights: Vec<Option<f64>> = vec![None; n];
    let mut queue: PriorityQueue<usize, Weight, H> = PriorityQueue::new();

    tracing::debug!(source = ?source, nodes = n, "dijkstra started");
    nodes[source_idx].distance = Weight::ZERO;
    queue.insert(Weight::ZERO, source_idx);

    let mut settled = 0usize;
    while !queue.is_empty() {
        let (distance, current) = queue.extract_min()?;
        if nodes[current].closed {
            continue;
        }
        nodes[current].closed = true;
        settled += 1;

        for adj in graph.adjacency(current) {
            let neighbor = &mut nodes[adj.node];
            if neighbor.closed {
                continue;
            }
            let tentative = distance + Weight(adj.weight);
            if tentative < neighbor.distance {
                neighbor.distance = tentative;
                neighbor.came_from = Some(current);
                link_weights[adj.node] = Some(adj.weight);
                queue.decrease_key(adj.node, tentative);
                tracing::trace!(
                    node = ?graph.node_at(adj.node),
                    via = ?graph.node_at(current),
                    distance = tentative.get(),
                    "relaxed"
                );
            }
        }
    }

    if settled < n {
        tracing::warn!(
            source = ?source,
            unreached = n - settled,
            "some nodes are unreachable from the source"
        );
    }
    tracing::debug!(settled, "dijkstra finished");

    let entries = nodes
        .iter()
        .enumerate()
        .map(|(i, entry)| PathEntry {
            node: graph.node_at(i).clone(),
            distance: entry.distance.get(),
            predecessor: entry.came_from.map(|p| graph.node_at(p).clone()),
        })
        .collect();
    let index = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| (node.clone(), i))
        .collect();

    Ok(ShortestPathTree {
        source: source.clone(),
        entries,
        link_weights,
        index,
    })
}
