//! Error type shared by every algorithm in the crate
//!
//! Input-validation failures are detected before an algorithm touches its
//! working structures, so an `Err` never comes with a partial result.
//! [`EngineError::EmptyQueue`] is the one exception: it signals a broken
//! internal invariant rather than bad input (see [`EngineError::is_internal`]).

use thiserror::Error;

/// Errors produced by graph construction, the algorithms and the loaders.
///
/// Node and symbol labels are carried in their `Debug` rendering so the error
/// type stays independent of the label type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An operation referenced a node that is not part of the structure.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// A node was registered twice in a disjoint-set forest.
    #[error("node already registered: {0}")]
    DuplicateNode(String),

    /// Extraction from a queue with no live entries.
    #[error("extract_min called on an empty priority queue")]
    EmptyQueue,

    /// An input edge could not be accepted.
    #[error("malformed edge {origin} -> {destination}: {reason}")]
    MalformedEdge {
        origin: String,
        destination: String,
        reason: String,
    },

    /// Dijkstra was handed an edge with a negative or non-finite weight.
    #[error("edge {origin} -> {destination} has weight {weight}, shortest paths need non-negative weights")]
    NegativeWeight {
        origin: String,
        destination: String,
        weight: f64,
    },

    /// A symbol was given a non-positive frequency.
    #[error("symbol {symbol} has frequency {frequency}, frequencies must be positive")]
    InvalidFrequency { symbol: String, frequency: i64 },

    /// The summed frequencies no longer fit in a `u64`.
    #[error("frequency total overflows u64 at {0}")]
    FrequencyOverflow(String),

    /// A Huffman code was requested for an empty frequency table.
    #[error("frequency table is empty")]
    EmptyFrequencyTable,

    /// A symbol to encode has no code in the codebook.
    #[error("symbol {0} has no code in the codebook")]
    UnknownSymbol(String),

    /// A bit string could not be decoded.
    #[error("invalid encoding at bit {position}: {reason}")]
    InvalidEncoding { position: usize, reason: String },

    /// Failure reading input from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure parsing CSV input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl EngineError {
    /// Returns true for invariant violations that indicate a bug in the crate
    /// rather than a problem with the caller's input.
    pub fn is_internal(&self) -> bool {
        matches!(self, EngineError::EmptyQueue)
    }

    pub(crate) fn unknown_node<N: std::fmt::Debug>(node: &N) -> Self {
        EngineError::UnknownNode(format!("{node:?}"))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
