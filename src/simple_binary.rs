//! Simple Binary Heap implementation
//!
//! A binary min-heap stored in a `Vec`, with a per-entry insertion sequence
//! number so that entries with equal priorities come out in the order they
//! went in.
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `push`    | O(log n)   |
//! | `pop`     | O(log n)   |
//! | `peek`    | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use greedy_structures::Heap;
//! use greedy_structures::simple_binary::SimpleBinaryHeap;
//!
//! let mut heap = SimpleBinaryHeap::new();
//! heap.push(3, "three");
//! heap.push(1, "one");
//! heap.push(2, "two");
//!
//! assert_eq!(heap.peek(), Some((&1, &"one")));
//! assert_eq!(heap.pop(), Some((1, "one")));
//! assert_eq!(heap.pop(), Some((2, "two")));
//! assert_eq!(heap.pop(), Some((3, "three")));
//! assert_eq!(heap.pop(), None);
//! ```

use crate::traits::Heap;

/// One slot of the heap array.
#[derive(Debug)]
struct Entry<T, P> {
    priority: P,
    /// Insertion sequence number, the secondary ordering key
    seq: u64,
    item: T,
}

impl<T, P: Ord> Entry<T, P> {
    /// Strict "comes before" under (priority, seq) ordering.
    fn precedes(&self, other: &Self) -> bool {
        (&self.priority, self.seq) < (&other.priority, other.seq)
    }
}

/// A simple binary min-heap with stable tie-breaking
///
/// This heap stores (priority, item) pairs and always returns the element
/// with the minimum priority first. Among equal priorities the earliest
/// pushed element wins.
#[derive(Debug)]
pub struct SimpleBinaryHeap<T, P: Ord> {
    /// The heap data stored in level order
    data: Vec<Entry<T, P>>,
    /// Sequence number handed to the next pushed entry
    next_seq: u64,
}

impl<T, P: Ord> Heap<T, P> for SimpleBinaryHeap<T, P> {
    fn new() -> Self {
        Self {
            data: Vec::new(),
            next_seq: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, priority: P, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.data.push(Entry {
            priority,
            seq,
            item,
        });
        self.sift_up(self.data.len() - 1);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.data.first().map(|e| (&e.priority, &e.item))
    }

    fn pop(&mut self) -> Option<(P, T)> {
        if self.data.is_empty() {
            return None;
        }

        let last_idx = self.data.len() - 1;
        self.data.swap(0, last_idx);
        let result = self.data.pop();

        if !self.data.is_empty() {
            self.sift_down(0);
        }

        result.map(|e| (e.priority, e.item))
    }
}

impl<T, P: Ord> SimpleBinaryHeap<T, P> {
    /// Creates an empty heap with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.data[index].precedes(&self.data[parent]) {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.data[left].precedes(&self.data[smallest]) {
                smallest = left;
            }
            if right < len && self.data[right].precedes(&self.data[smallest]) {
                smallest = right;
            }

            if smallest != index {
                self.data.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}

impl<T, P: Ord> Default for SimpleBinaryHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}
