//! Huffman coding
//!
//! Builds an optimal prefix-free binary code from a symbol-frequency table.
//!
//! # Design
//!
//! The tree is an arena: every [`HuffmanNode`] lives in one `Vec` and children
//! are referenced by [`NodeId`]. Leaves occupy ids `0..n` in the frequency
//! table's first-seen order; internal nodes follow in creation order. Nothing
//! is re-parented after creation, so the arena doubles as a record of the
//! merge sequence.
//!
//! Construction pulls the two lightest nodes from a [`PriorityQueue`], makes
//! the first one extracted the left child, and queues their parent. The
//! queue breaks frequency ties by insertion order, so the same table always
//! yields the same tree.
//!
//! A table with a single symbol produces a lone leaf; its code is `"0"`.
//!
//! # Example
//!
//! ```rust
//! use greedy_structures::huffman::{build_frequency_table, run_huffman};
//!
//! let table = build_frequency_table("abracadabra".chars());
//! let (tree, codebook) = run_huffman(&table).unwrap();
//!
//! assert_eq!(tree.total_frequency(), 11);
//! assert_eq!(codebook.get(&'a').map(str::len), Some(1));
//!
//! let bits = codebook.encode("abracadabra".chars()).unwrap();
//! let decoded: String = codebook.decode(&bits).unwrap().into_iter().collect();
//! assert_eq!(decoded, "abracadabra");
//! ```

use crate::error::{EngineError, Result};
use crate::priority_queue::PriorityQueue;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::hash::Hash;

/// Trait for symbols that can be coded.
pub trait Symbol: Clone + Eq + Hash + Debug {}

impl<T> Symbol for T where T: Clone + Eq + Hash + Debug {}

/// Position of a node in the tree arena.
pub type NodeId = usize;

/// Label of the edge from a node to one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Symbol counts in first-seen order.
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyTable<S: Symbol> {
    entries: Vec<(S, u64)>,
    #[serde(skip)]
    index: FxHashMap<S, usize>,
    /// Sum of all counts; always fits in a `u64`
    #[serde(skip)]
    total: u64,
}

impl<S: Symbol> FrequencyTable<S> {
    /// Creates an empty table.
    pub fn new() -> Self {
        FrequencyTable {
            entries: Vec::new(),
            index: FxHashMap::default(),
            total: 0,
        }
    }

    /// Builds a table from explicit counts.
    ///
    /// Repeated symbols have their counts added together.
    ///
    /// # Errors
    /// - [`EngineError::InvalidFrequency`] for a zero or negative count
    /// - [`EngineError::FrequencyOverflow`] if the counts sum past `u64::MAX`
    pub fn from_counts<I>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
    {
        let mut table = Self::new();
        for (symbol, count) in counts {
            if count <= 0 {
                return Err(EngineError::InvalidFrequency {
                    symbol: format!("{symbol:?}"),
                    frequency: count,
                });
            }
            table.add_count(symbol, count.unsigned_abs())?;
        }
        Ok(table)
    }

    /// Counts one occurrence of `symbol`.
    pub fn add(&mut self, symbol: S) {
        // one occurrence at a time cannot exhaust a u64
        *self.count_mut(symbol) += 1;
        self.total += 1;
    }

    fn add_count(&mut self, symbol: S, count: u64) -> Result<()> {
        let total = self
            .total
            .checked_add(count)
            .ok_or_else(|| EngineError::FrequencyOverflow(format!("symbol {symbol:?}")))?;
        // a single count never exceeds the total
        *self.count_mut(symbol) += count;
        self.total = total;
        Ok(())
    }

    fn count_mut(&mut self, symbol: S) -> &mut u64 {
        let i = match self.index.get(&symbol) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.index.insert(symbol.clone(), i);
                self.entries.push((symbol, 0));
                i
            }
        };
        &mut self.entries[i].1
    }

    /// Count for `symbol`, if it occurs.
    pub fn get(&self, symbol: &S) -> Option<u64> {
        self.index.get(symbol).map(|&i| self.entries[i].1)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Symbols and counts in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, u64)> {
        self.entries.iter().map(|(symbol, count)| (symbol, *count))
    }
}

impl<S: Symbol> Default for FrequencyTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts the symbols of a stream.
///
/// ```rust
/// use greedy_structures::huffman::build_frequency_table;
///
/// let table = build_frequency_table("hello".chars());
/// assert_eq!(table.get(&'l'), Some(2));
/// assert_eq!(table.iter().map(|(s, _)| *s).collect::<String>(), "helo");
/// ```
pub fn build_frequency_table<S, I>(symbols: I) -> FrequencyTable<S>
where
    S: Symbol,
    I: IntoIterator<Item = S>,
{
    let mut table = FrequencyTable::new();
    for symbol in symbols {
        table.add(symbol);
    }
    table
}

/// A node of the Huffman tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HuffmanNode<S> {
    Leaf {
        symbol: S,
        frequency: u64,
    },
    Internal {
        /// Sum of the children's frequencies
        frequency: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl<S> HuffmanNode<S> {
    pub fn frequency(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { frequency, .. } | HuffmanNode::Internal { frequency, .. } => {
                *frequency
            }
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

/// An immutable Huffman tree stored as an arena.
#[derive(Debug, Clone, Serialize)]
pub struct HuffmanTree<S> {
    nodes: Vec<HuffmanNode<S>>,
    /// Parent id and the bit on the edge from the parent, per node
    parents: Vec<Option<(NodeId, Bit)>>,
    root: NodeId,
}

impl<S: Symbol> HuffmanTree<S> {
    /// Builds the tree for `table`.
    ///
    /// # Errors
    /// [`EngineError::EmptyFrequencyTable`] if `table` has no symbols.
    ///
    /// # Time Complexity
    /// O(n log n) for n distinct symbols.
    pub fn build(table: &FrequencyTable<S>) -> Result<Self> {
        if table.is_empty() {
            return Err(EngineError::EmptyFrequencyTable);
        }

        let capacity = 2 * table.len() - 1;
        let mut nodes = Vec::with_capacity(capacity);
        let mut parents = vec![None; capacity];
        let mut queue: PriorityQueue<NodeId, u64> = PriorityQueue::new();

        for (symbol, frequency) in table.iter() {
            queue.insert(frequency, nodes.len());
            nodes.push(HuffmanNode::Leaf {
                symbol: symbol.clone(),
                frequency,
            });
        }

        while queue.len() > 1 {
            let (left_freq, left) = queue.extract_min()?;
            let (right_freq, right) = queue.extract_min()?;
            let id = nodes.len();
            let frequency = left_freq.checked_add(right_freq).ok_or_else(|| {
                EngineError::FrequencyOverflow(format!("merge of nodes {left} and {right}"))
            })?;

            parents[left] = Some((id, Bit::Zero));
            parents[right] = Some((id, Bit::One));
            nodes.push(HuffmanNode::Internal {
                frequency,
                left,
                right,
            });
            queue.insert(frequency, id);
        }
        let (_, root) = queue.extract_min()?;

        tracing::debug!(
            symbols = table.len(),
            nodes = nodes.len(),
            total = nodes[root].frequency(),
            "huffman tree built"
        );
        Ok(HuffmanTree {
            nodes,
            parents,
            root,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node at `id`.
    ///
    /// # Panics
    /// If `id` is not a node of this tree.
    pub fn node(&self, id: NodeId) -> &HuffmanNode<S> {
        &self.nodes[id]
    }

    /// All nodes; leaves first, then internal nodes in merge order.
    pub fn nodes(&self) -> &[HuffmanNode<S>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parent of `id`; `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id].map(|(parent, _)| parent)
    }

    /// Bit on the edge from the parent of `id`; `None` for the root.
    pub fn bit_label(&self, id: NodeId) -> Option<Bit> {
        self.parents[id].map(|(_, bit)| bit)
    }

    /// Frequency of the root, i.e. the total of all symbol counts.
    pub fn total_frequency(&self) -> u64 {
        self.nodes[self.root].frequency()
    }

    /// Number of edges between the root and `id`.
    pub fn depth(&self, mut id: NodeId) -> usize {
        let mut depth = 0;
        while let Some(parent) = self.parent(id) {
            depth += 1;
            id = parent;
        }
        depth
    }

    /// Sum over leaves of frequency × code length: the size in bits of the
    /// encoded input. Saturates at `u64::MAX`.
    pub fn weighted_path_length(&self) -> u64 {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_leaf())
            .map(|(id, node)| node.frequency().saturating_mul(self.depth(id).max(1) as u64))
            .fold(0, u64::saturating_add)
    }

    /// Derives the codebook by walking the tree: `0` for left, `1` for right.
    pub fn codebook(&self) -> Codebook<S> {
        let mut codes: Vec<Option<String>> = vec![None; self.nodes.len()];
        let mut stack = vec![(self.root, String::new())];

        while let Some((id, prefix)) = stack.pop() {
            match &self.nodes[id] {
                HuffmanNode::Leaf { .. } => {
                    codes[id] = Some(if prefix.is_empty() {
                        "0".to_string()
                    } else {
                        prefix
                    });
                }
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((*right, format!("{prefix}1")));
                    stack.push((*left, format!("{prefix}0")));
                }
            }
        }

        let entries = self
            .nodes
            .iter()
            .zip(codes)
            .filter_map(|(node, code)| match (node, code) {
                (HuffmanNode::Leaf { symbol, frequency }, Some(code)) => Some(CodeEntry {
                    symbol: symbol.clone(),
                    frequency: *frequency,
                    code,
                }),
                _ => None,
            })
            .collect();
        Codebook::from_entries(entries)
    }

    /// Decodes `bits` by walking the tree from the root.
    ///
    /// # Errors
    /// [`EngineError::InvalidEncoding`] on a character other than `0`/`1`, or
    /// when the input stops in the middle of a code.
    pub fn decode(&self, bits: &str) -> Result<Vec<S>> {
        let mut symbols = Vec::new();
        let mut current = self.root;
        let mut code_start = 0;

        for (position, ch) in bits.chars().enumerate() {
            let bit = parse_bit(ch, position)?;
            current = match (&self.nodes[current], bit) {
                (HuffmanNode::Internal { left, .. }, Bit::Zero) => *left,
                (HuffmanNode::Internal { right, .. }, Bit::One) => *right,
                // a lone leaf is coded as "0"
                (HuffmanNode::Leaf { .. }, Bit::Zero) => current,
                (HuffmanNode::Leaf { .. }, Bit::One) => {
                    return Err(EngineError::InvalidEncoding {
                        position,
                        reason: "single-symbol code only uses 0".to_string(),
                    })
                }
            };
            if let HuffmanNode::Leaf { symbol, .. } = &self.nodes[current] {
                symbols.push(symbol.clone());
                current = self.root;
                code_start = position + 1;
            }
        }

        if current != self.root {
            return Err(EngineError::InvalidEncoding {
                position: code_start,
                reason: "input ends inside a code".to_string(),
            });
        }
        Ok(symbols)
    }
}

fn parse_bit(ch: char, position: usize) -> Result<Bit> {
    match ch {
        '0' => Ok(Bit::Zero),
        '1' => Ok(Bit::One),
        other => Err(EngineError::InvalidEncoding {
            position,
            reason: format!("unexpected character {other:?}"),
        }),
    }
}

/// One row of a [`Codebook`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeEntry<S> {
    pub symbol: S,
    pub frequency: u64,
    pub code: String,
}

/// Mapping from symbol to its binary code.
///
/// Entries are kept in the frequency table's first-seen order.
#[derive(Debug, Clone, Serialize)]
pub struct Codebook<S: Symbol> {
    entries: Vec<CodeEntry<S>>,
    #[serde(skip)]
    by_symbol: FxHashMap<S, usize>,
    #[serde(skip)]
    by_code: FxHashMap<String, usize>,
}

impl<S: Symbol> Codebook<S> {
    fn from_entries(entries: Vec<CodeEntry<S>>) -> Self {
        let by_symbol = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.symbol.clone(), i))
            .collect();
        let by_code = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.code.clone(), i))
            .collect();
        Codebook {
            entries,
            by_symbol,
            by_code,
        }
    }

    /// Code for `symbol`.
    pub fn get(&self, symbol: &S) -> Option<&str> {
        self.by_symbol
            .get(symbol)
            .map(|&i| self.entries[i].code.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[CodeEntry<S>] {
        &self.entries
    }

    /// Entries by descending frequency; equal frequencies keep first-seen order.
    pub fn by_frequency(&self) -> Vec<&CodeEntry<S>> {
        let mut sorted: Vec<&CodeEntry<S>> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        sorted
    }

    /// Returns true if no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&str> = self.entries.iter().map(|e| e.code.as_str()).collect();
        codes.sort_unstable();
        // after sorting, a prefix sorts directly before some code it prefixes
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.entries.iter().map(|e| e.code.len()).max().unwrap_or(0)
    }

    /// Concatenates the codes of `symbols`.
    ///
    /// # Errors
    /// [`EngineError::UnknownSymbol`] for a symbol without a code.
    pub fn encode<I>(&self, symbols: I) -> Result<String>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        let mut bits = String::new();
        for symbol in symbols {
            let symbol = symbol.borrow();
            let code = self
                .get(symbol)
                .ok_or_else(|| EngineError::UnknownSymbol(format!("{symbol:?}")))?;
            bits.push_str(code);
        }
        Ok(bits)
    }

    /// Splits `bits` back into symbols.
    ///
    /// Works from the codebook alone; prefix-freeness makes the first code
    /// that matches the only possible one.
    ///
    /// # Errors
    /// [`EngineError::InvalidEncoding`] on a character other than `0`/`1`, on
    /// a bit run that cannot start any code, or on a truncated final code.
    pub fn decode(&self, bits: &str) -> Result<Vec<S>> {
        let max_len = self.max_code_len();
        let mut symbols = Vec::new();
        let mut pending = String::new();
        let mut code_start = 0;

        for (position, ch) in bits.chars().enumerate() {
            pending.push(parse_bit(ch, position)?.as_char());
            if let Some(&i) = self.by_code.get(&pending) {
                symbols.push(self.entries[i].symbol.clone());
                pending.clear();
                code_start = position + 1;
            } else if pending.len() >= max_len {
                return Err(EngineError::InvalidEncoding {
                    position: code_start,
                    reason: format!("no code matches {pending}"),
                });
            }
        }

        if !pending.is_empty() {
            return Err(EngineError::InvalidEncoding {
                position: code_start,
                reason: "input ends inside a code".to_string(),
            });
        }
        Ok(symbols)
    }
}

/// Builds the Huffman tree and its codebook.
///
/// # Errors
/// [`EngineError::EmptyFrequencyTable`] if `table` has no symbols.
pub fn run_huffman<S: Symbol>(table: &FrequencyTable<S>) -> Result<(HuffmanTree<S>, Codebook<S>)> {
    let tree = HuffmanTree::build(table)?;
    let codebook = tree.codebook();
    tracing::debug!(
        symbols = codebook.len(),
        max_code_len = codebook.max_code_len(),
        encoded_bits = tree.weighted_path_length(),
        "huffman codebook derived"
    );
    Ok((tree, codebook))
}
