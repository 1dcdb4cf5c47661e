//! Undirected weighted graph
//!
//! [`Graph`] is built once through [`GraphBuilder`] (or [`build_graph`]) and
//! is immutable afterwards. Nodes are numbered in the order they are first
//! seen; that numbering is the canonical order every algorithm uses for its
//! deterministic choices (default start node, tie-breaks, result ordering).
//!
//! # Duplicate edges
//!
//! Declaring the same unordered pair twice keeps a single edge carrying the
//! minimum weight. The edge stays at the position of the pair's first
//! declaration; on equal weights the first declaration (including its
//! origin/destination orientation) is kept.
//!
//! # Example
//!
//! ```rust
//! use greedy_structures::graph::build_graph;
//!
//! let graph = build_graph([("A", "B", 1.0), ("B", "C", 2.0), ("C", "A", 4.0)]).unwrap();
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.edge_count(), 3);
//! assert_eq!(graph.nodes(), &["A", "B", "C"]);
//! ```

use crate::error::{EngineError, Result};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Add;

/// Trait for node labels.
///
/// Any cloneable, hashable label works: `&str`, `String`, `u32`, `char`, ...
pub trait Node: Clone + Eq + Hash + Debug {}

impl<T> Node for T where T: Clone + Eq + Hash + Debug {}

/// A totally ordered `f64`, used as the priority for edge weights and
/// path distances.
///
/// Ordering follows [`f64::total_cmp`], so `+∞` sorts after every finite
/// weight.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(transparent)]
pub struct Weight(pub f64);

impl Weight {
    pub const ZERO: Weight = Weight(0.0);
    pub const INFINITY: Weight = Weight(f64::INFINITY);

    /// The wrapped value.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for Weight {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Weight {}

impl PartialOrd for Weight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Weight {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Weight) -> Weight {
        Weight(self.0 + rhs.0)
    }
}

/// An undirected weighted edge as seen by callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge<N> {
    pub origin: N,
    pub destination: N,
    pub weight: f64,
}

impl<N: Node> Edge<N> {
    /// Returns true if the edge joins `a` and `b`, in either direction.
    pub fn connects(&self, a: &N, b: &N) -> bool {
        (self.origin == *a && self.destination == *b)
            || (self.origin == *b && self.destination == *a)
    }
}

/// Index-based edge storage.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeRecord {
    pub(crate) origin: usize,
    pub(crate) destination: usize,
    pub(crate) weight: f64,
}

/// One entry of a node's adjacency list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Adjacent {
    pub(crate) node: usize,
    pub(crate) weight: f64,
    pub(crate) edge: usize,
}

/// An immutable undirected weighted graph.
#[derive(Debug, Clone)]
pub struct Graph<N: Node> {
    nodes: Vec<N>,
    index: FxHashMap<N, usize>,
    edges: Vec<EdgeRecord>,
    adjacency: Vec<Vec<Adjacent>>,
}

impl<N: Node> Graph<N> {
    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct edges (after duplicate resolution).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in canonical (first-seen) order.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Returns true if `node` belongs to the graph.
    pub fn contains_node(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Canonical position of `node`.
    pub fn node_index(&self, node: &N) -> Option<usize> {
        self.index.get(node).copied()
    }

    /// Edges in declaration order.
    pub fn edges(&self) -> impl Iterator<Item = Edge<N>> + '_ {
        self.edges.iter().map(|record| self.edge_from_record(record))
    }

    /// Neighbors of `node` with the weight of the connecting edge.
    ///
    /// # Errors
    /// [`EngineError::UnknownNode`] if `node` is not in the graph.
    pub fn neighbors(&self, node: &N) -> Result<impl Iterator<Item = (&N, f64)> + '_> {
        let idx = self
            .node_index(node)
            .ok_or_else(|| EngineError::unknown_node(node))?;
        Ok(self.adjacency[idx]
            .iter()
            .map(|adj| (&self.nodes[adj.node], adj.weight)))
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    pub(crate) fn node_at(&self, idx: usize) -> &N {
        &self.nodes[idx]
    }

    pub(crate) fn adjacency(&self, idx: usize) -> &[Adjacent] {
        &self.adjacency[idx]
    }

    pub(crate) fn edge_records(&self) -> &[EdgeRecord] {
        &self.edges
    }

    pub(crate) fn edge_from_record(&self, record: &EdgeRecord) -> Edge<N> {
        Edge {
            origin: self.nodes[record.origin].clone(),
            destination: self.nodes[record.destination].clone(),
            weight: record.weight,
        }
    }

    /// Returns an error for the first edge whose weight is negative or not
    /// finite.
    pub(crate) fn check_non_negative(&self) -> Result<()> {
        match self
            .edges
            .iter()
            .find(|e| !e.weight.is_finite() || e.weight < 0.0)
        {
            Some(e) => Err(EngineError::NegativeWeight {
                origin: format!("{:?}", self.nodes[e.origin]),
                destination: format!("{:?}", self.nodes[e.destination]),
                weight: e.weight,
            }),
            None => Ok(()),
        }
    }
}

/// Incremental constructor for [`Graph`].
///
/// Every edge is validated as it is added; a rejected edge leaves the builder
/// untouched.
#[derive(Debug, Clone)]
pub struct GraphBuilder<N: Node> {
    nodes: Vec<N>,
    index: FxHashMap<N, usize>,
    edges: Vec<EdgeRecord>,
    /// Normalized (min, max) endpoint pair -> position in `edges`
    pairs: FxHashMap<(usize, usize), usize>,
}

impl<N: Node> GraphBuilder<N> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        GraphBuilder {
            nodes: Vec::new(),
            index: FxHashMap::default(),
            edges: Vec::new(),
            pairs: FxHashMap::default(),
        }
    }

    /// Adds a node with no edges (or returns the position of an existing one).
    pub fn add_node(&mut self, node: N) -> usize {
        if let Some(&idx) = self.index.get(&node) {
            return idx;
        }
        let idx = self.nodes.len();
        self.index.insert(node.clone(), idx);
        self.nodes.push(node);
        idx
    }

    /// Adds an undirected edge, registering unseen endpoints.
    ///
    /// # Errors
    /// [`EngineError::MalformedEdge`] if `weight` is negative or not finite.
    pub fn add_edge(&mut self, origin: N, destination: N, weight: f64) -> Result<()> {
        let reason = if !weight.is_finite() {
            Some(format!("weight {weight} is not a finite number"))
        } else if weight < 0.0 {
            Some(format!("weight {weight} is negative"))
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(EngineError::MalformedEdge {
                origin: format!("{origin:?}"),
                destination: format!("{destination:?}"),
                reason,
            });
        }

        let u = self.add_node(origin);
        let v = self.add_node(destination);
        // -0.0 and 0.0 are the same weight
        let weight = weight + 0.0;
        let key = (u.min(v), u.max(v));

        match self.pairs.get(&key) {
            Some(&pos) => {
                if weight < self.edges[pos].weight {
                    tracing::debug!(
                        origin = ?self.nodes[u],
                        destination = ?self.nodes[v],
                        old = self.edges[pos].weight,
                        new = weight,
                        "duplicate edge lowers weight"
                    );
                    self.edges[pos] = EdgeRecord {
                        origin: u,
                        destination: v,
                        weight,
                    };
                }
            }
            None => {
                self.pairs.insert(key, self.edges.len());
                self.edges.push(EdgeRecord {
                    origin: u,
                    destination: v,
                    weight,
                });
            }
        }
        Ok(())
    }

    /// Freezes the builder into a [`Graph`].
    pub fn build(self) -> Graph<N> {
        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        for (edge, record) in self.edges.iter().enumerate() {
            adjacency[record.origin].push(Adjacent {
                node: record.destination,
                weight: record.weight,
                edge,
            });
            if record.origin != record.destination {
                adjacency[record.destination].push(Adjacent {
                    node: record.origin,
                    weight: record.weight,
                    edge,
                });
            }
        }

        Graph {
            nodes: self.nodes,
            index: self.index,
            edges: self.edges,
            adjacency,
        }
    }
}

impl<N: Node> Default for GraphBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a graph from `(origin, destination, weight)` triples.
///
/// Fails fast: the first malformed edge aborts construction.
pub fn build_graph<N, I>(edges: I) -> Result<Graph<N>>
where
    N: Node,
    I: IntoIterator<Item = (N, N, f64)>,
{
    let mut builder = GraphBuilder::new();
    for (origin, destination, weight) in edges {
        builder.add_edge(origin, destination, weight)?;
    }
    let graph = builder.build();
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph built"
    );
    Ok(graph)
}
