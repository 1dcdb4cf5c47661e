//! Disjoint-set forest (union-find)
//!
//! Elements are arbitrary hashable labels registered with
//! [`DisjointSetForest::make_set`]. Internally every label gets a dense
//! ordinal, and the forest itself is two parallel vectors over those ordinals.
//!
//! `find` uses iterative path halving: every node visited is pointed at its
//! grandparent, so no recursion and no second pass are needed. `union` links
//! by rank; when ranks are equal the root with the lower ordinal (the label
//! registered first) stays the root, so representatives depend only on the
//! sequence of unions, never on hashing.
//!
//! Amortized cost per operation is O(α(n)).
//!
//! # Example
//!
//! ```rust
//! use greedy_structures::disjoint_set::DisjointSetForest;
//!
//! let mut forest = DisjointSetForest::new();
//! for node in ["a", "b", "c"] {
//!     forest.make_set(node).unwrap();
//! }
//! assert!(forest.union(&"a", &"b").unwrap());
//! assert!(!forest.union(&"b", &"a").unwrap());
//! assert!(forest.connected(&"a", &"b").unwrap());
//! assert!(!forest.connected(&"a", &"c").unwrap());
//! assert_eq!(forest.set_count(), 2);
//! ```

use crate::error::{EngineError, Result};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

/// A union-find structure with path halving and union by rank.
#[derive(Debug, Clone)]
pub struct DisjointSetForest<N> {
    /// Label -> ordinal
    index: FxHashMap<N, usize>,
    /// Ordinal -> label
    labels: Vec<N>,
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl<N> DisjointSetForest<N>
where
    N: Clone + Eq + Hash + Debug,
{
    /// Creates an empty forest.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty forest with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        DisjointSetForest {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            labels: Vec::with_capacity(capacity),
            parent: Vec::with_capacity(capacity),
            rank: Vec::with_capacity(capacity),
            sets: 0,
        }
    }

    /// Registers `node` as a singleton set.
    ///
    /// # Errors
    /// [`EngineError::DuplicateNode`] if `node` was registered before.
    pub fn make_set(&mut self, node: N) -> Result<()> {
        if self.index.contains_key(&node) {
            return Err(EngineError::DuplicateNode(format!("{node:?}")));
        }
        let ordinal = self.labels.len();
        self.index.insert(node.clone(), ordinal);
        self.labels.push(node);
        self.parent.push(ordinal);
        self.rank.push(0);
        self.sets += 1;
        Ok(())
    }

    /// Returns the representative of the set containing `node`.
    ///
    /// # Errors
    /// [`EngineError::UnknownNode`] if `node` was never registered.
    pub fn find(&mut self, node: &N) -> Result<&N> {
        let root = self.find_root(node)?;
        Ok(&self.labels[root])
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// Returns `false` if they already shared a representative.
    pub fn union(&mut self, a: &N, b: &N) -> Result<bool> {
        let ra = self.find_root(a)?;
        let rb = self.find_root(b)?;

        if ra == rb {
            return Ok(false);
        }

        match self.rank[ra].cmp(&self.rank[rb]) {
            Ordering::Less => self.parent[ra] = rb,
            Ordering::Greater => self.parent[rb] = ra,
            Ordering::Equal => {
                let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
                self.parent[child] = root;
                self.rank[root] += 1;
            }
        }
        self.sets -= 1;
        Ok(true)
    }

    /// Returns true if `a` and `b` are in the same set.
    pub fn connected(&mut self, a: &N, b: &N) -> Result<bool> {
        Ok(self.find_root(a)? == self.find_root(b)?)
    }

    /// Returns true if `node` has been registered.
    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no element has been registered.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    fn find_root(&mut self, node: &N) -> Result<usize> {
        let mut x = *self
            .index
            .get(node)
            .ok_or_else(|| EngineError::unknown_node(node))?;
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        Ok(x)
    }
}

impl<N> Default for DisjointSetForest<N>
where
    N: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest_of(n: usize) -> DisjointSetForest<usize> {
        let mut forest = DisjointSetForest::with_capacity(n);
        for i in 0..n {
            forest.make_set(i).unwrap();
        }
        forest
    }

    #[test]
    fn test_new_sets_are_singletons() {
        let mut forest = forest_of(5);
        for i in 0..5 {
            assert_eq!(*forest.find(&i).unwrap(), i);
        }
        assert_eq!(forest.set_count(), 5);
        assert_eq!(forest.len(), 5);
    }

    #[test]
    fn test_duplicate_make_set() {
        let mut forest = forest_of(2);
        let err = forest.make_set(1).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateNode(_)));
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn test_unknown_node() {
        let mut forest = forest_of(2);
        assert!(matches!(forest.find(&7), Err(EngineError::UnknownNode(_))));
        assert!(matches!(forest.union(&0, &7), Err(EngineError::UnknownNode(_))));
    }

    #[test]
    fn test_union_reports_merges() {
        let mut forest = forest_of(4);
        assert!(forest.union(&0, &1).unwrap());
        assert!(forest.union(&2, &3).unwrap());
        assert!(!forest.union(&1, &0).unwrap());
        assert_eq!(forest.set_count(), 2);

        assert!(forest.union(&1, &3).unwrap());
        assert_eq!(forest.set_count(), 1);
        for i in 0..4 {
            assert!(forest.connected(&0, &i).unwrap());
        }
    }

    #[test]
    fn test_equal_rank_keeps_lower_ordinal_root() {
        let mut forest = forest_of(2);
        forest.union(&1, &0).unwrap();
        assert_eq!(*forest.find(&1).unwrap(), 0);
    }

    #[test]
    fn test_long_chain_compresses() {
        let n = 1000;
        let mut forest = forest_of(n);
        for i in 1..n {
            forest.union(&(i - 1), &i).unwrap();
        }
        let root = *forest.find(&(n - 1)).unwrap();
        for i in 0..n {
            assert_eq!(*forest.find(&i).unwrap(), root);
        }
        assert_eq!(forest.set_count(), 1);
    }

    #[test]
    fn test_string_labels() {
        let mut forest = DisjointSetForest::new();
        forest.make_set("x".to_string()).unwrap();
        forest.make_set("y".to_string()).unwrap();
        assert!(forest.contains(&"x".to_string()));
        assert!(!forest.connected(&"x".to_string(), &"y".to_string()).unwrap());
    }
}
