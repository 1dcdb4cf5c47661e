//! Common traits for the heap behind every priority queue in the crate
//!
//! Prim, Dijkstra and Huffman construction all drive their queues through
//! [`Heap`], so the underlying heap can be swapped (for benchmarking, or for a
//! heap with different constant factors) without touching the algorithms.

/// Base trait for min-heap data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element
/// - `pop` removes and returns the minimum
/// - `peek` returns the minimum without removing it
///
/// Unlike `BinaryHeap`, which stores values directly (using `Ord`), these heaps
/// store (priority, item) pairs to separate the ordering key from the data.
///
/// # Ordering contract
///
/// Implementations must be *stable*: among entries with equal priorities,
/// `pop` returns them in the order they were pushed. The algorithms rely on
/// this to produce identical output on identical input.
///
/// # Example
///
/// ```rust
/// use greedy_structures::Heap;
/// use greedy_structures::simple_binary::SimpleBinaryHeap;
///
/// let mut heap = SimpleBinaryHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(1, "uno");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// assert_eq!(heap.pop(), Some((1, "uno")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    ///
    /// # Time Complexity
    /// O(log n)
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    ///
    /// Note that `BinaryHeap` is a max-heap, while these heaps are min-heaps.
    ///
    /// # Time Complexity
    /// O(log n)
    fn pop(&mut self) -> Option<(P, T)>;
}
