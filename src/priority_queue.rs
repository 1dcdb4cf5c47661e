//! Keyed priority queue with lazy decrease-key
//!
//! The queue sits on top of any [`Heap`] and adds a "current best" table that
//! maps each payload to the smallest priority it has been queued with.
//! `decrease_key` never touches the heap in place: it pushes a fresh entry and
//! updates the table. Entries whose priority no longer matches the table are
//! stale and are silently dropped by [`PriorityQueue::extract_min`].
//!
//! This trades a few extra heap entries for not having to track heap
//! positions, and keeps the underlying heap a plain array.
//!
//! # Example
//!
//! ```rust
//! use greedy_structures::priority_queue::PriorityQueue;
//!
//! let mut queue: PriorityQueue<&str, u32> = PriorityQueue::new();
//! queue.insert(10, "a");
//! queue.insert(7, "b");
//! assert!(queue.decrease_key("a", 3));
//! assert!(!queue.decrease_key("b", 9));
//!
//! assert_eq!(queue.extract_min().unwrap(), (3, "a"));
//! assert_eq!(queue.extract_min().unwrap(), (7, "b"));
//! assert!(queue.extract_min().is_err()); // the stale (10, "a") entry is skipped
//! ```

use crate::error::{EngineError, Result};
use crate::simple_binary::SimpleBinaryHeap;
use crate::traits::Heap;
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// A min-priority queue keyed by payload, with lazy deletion.
///
/// # Type Parameters
/// - `K`: payload type; identifies the element whose priority is tracked
/// - `P`: priority type
/// - `H`: underlying heap, [`SimpleBinaryHeap`] by default
///
/// Ties between equal priorities follow the heap's ordering contract, which
/// for every heap in this crate is insertion order.
#[derive(Debug)]
pub struct PriorityQueue<K, P, H = SimpleBinaryHeap<K, P>>
where
    K: Clone + Eq + Hash,
    P: Ord + Clone,
    H: Heap<K, P>,
{
    heap: H,
    /// Smallest queued priority for every payload that is still live
    best: FxHashMap<K, P>,
}

impl<K, P, H> PriorityQueue<K, P, H>
where
    K: Clone + Eq + Hash,
    P: Ord + Clone,
    H: Heap<K, P>,
{
    /// Creates a new empty queue.
    pub fn new() -> Self {
        PriorityQueue {
            heap: H::new(),
            best: FxHashMap::default(),
        }
    }

    /// Queues `payload` with `priority`.
    ///
    /// If the payload is already queued with a smaller or equal priority the
    /// new entry is immediately stale and will never be returned.
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn insert(&mut self, priority: P, payload: K) {
        let improves = self
            .best
            .get(&payload)
            .map_or(true, |current| priority < *current);
        if improves {
            self.best.insert(payload.clone(), priority.clone());
        }
        self.heap.push(priority, payload);
    }

    /// Lowers the priority of `payload` to `new_priority`, queuing it if it is
    /// not currently live.
    ///
    /// Returns `true` if the queue changed, `false` if the payload already had
    /// a priority no greater than `new_priority`.
    pub fn decrease_key(&mut self, payload: K, new_priority: P) -> bool {
        if let Some(current) = self.best.get(&payload) {
            if new_priority >= *current {
                return false;
            }
        }
        self.best.insert(payload.clone(), new_priority.clone());
        self.heap.push(new_priority, payload);
        true
    }

    /// Removes and returns the live entry with the smallest priority.
    ///
    /// Stale entries encountered on the way are discarded. After extraction
    /// the payload is no longer live; queuing it again starts afresh.
    ///
    /// # Errors
    /// [`EngineError::EmptyQueue`] if no live entry remains.
    pub fn extract_min(&mut self) -> Result<(P, K)> {
        self.try_extract_min().ok_or(EngineError::EmptyQueue)
    }

    /// Like [`extract_min`](Self::extract_min) but returns `None` when empty.
    pub fn try_extract_min(&mut self) -> Option<(P, K)> {
        while let Some((priority, payload)) = self.heap.pop() {
            let is_live = self
                .best
                .get(&payload)
                .is_some_and(|current| *current == priority);
            if is_live {
                self.best.remove(&payload);
                return Some((priority, payload));
            }
        }
        None
    }

    /// Current priority of a live payload.
    pub fn best_key(&self, payload: &K) -> Option<&P> {
        self.best.get(payload)
    }

    /// Returns true if no live entries remain.
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.best.len()
    }

    /// Number of entries held by the heap, stale ones included.
    pub fn heap_len(&self) -> usize {
        self.heap.len()
    }
}

impl<K, P, H> Default for PriorityQueue<K, P, H>
where
    K: Clone + Eq + Hash,
    P: Ord + Clone,
    H: Heap<K, P>,
{
    fn default() -> Self {
        Self::new()
    }
}
