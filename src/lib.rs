//! Greedy optimal structures over a shared binary heap
//!
//! This crate computes four classical optimal structures:
//!
//! - **Minimum spanning tree** with Prim's algorithm (node growth over a
//!   priority queue) or Kruskal's algorithm (sorted edges over a
//!   disjoint-set forest)
//! - **Shortest-path tree** from a single source with Dijkstra's algorithm
//! - **Huffman code** for a symbol-frequency table
//!
//! The supporting data structures are public as well: a stable binary
//! min-heap ([`simple_binary::SimpleBinaryHeap`]), a keyed priority queue with
//! lazy decrease-key ([`priority_queue::PriorityQueue`]) and a union-find
//! forest ([`disjoint_set::DisjointSetForest`]).
//!
//! Every algorithm is a pure function of its input: each call builds its own
//! working structures and returns an owned result. Equal-priority choices are
//! broken by insertion order, so identical input always gives identical
//! output.
//!
//! # Example
//!
//! ```rust
//! use greedy_structures::{build_graph, run_dijkstra, run_kruskal, run_prim};
//!
//! let graph = build_graph([("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 4.0)]).unwrap();
//!
//! let prim = run_prim(&graph, None).unwrap();
//! let kruskal = run_kruskal(&graph).unwrap();
//! assert_eq!(prim.total_weight, kruskal.total_weight);
//!
//! let paths = run_dijkstra(&graph, &"A").unwrap();
//! assert_eq!(paths.distance(&"C"), Some(3.0));
//! ```

pub mod disjoint_set;
pub mod error;
pub mod graph;
pub mod huffman;
pub mod loader;
pub mod mst;
pub mod priority_queue;
pub mod shortest_path;
pub mod simple_binary;
pub mod traits;

pub use error::{EngineError, Result};
pub use graph::{build_graph, Edge, Graph, GraphBuilder, Node};
pub use huffman::{build_frequency_table, run_huffman, Codebook, FrequencyTable, HuffmanTree};
pub use mst::{run_kruskal, run_prim, MstResult};
pub use shortest_path::{run_dijkstra, ShortestPathTree};
pub use traits::Heap;
