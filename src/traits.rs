//! Priority-queue traits and the heap error type
//!
//! Two layers:
//!
//! - [`Heap`]: push, peek, pop and merge over `(priority, item)` pairs
//! - [`DecreaseKeyHeap`]: adds handle-returning insertion and `decrease_key`
//!
//! The graph algorithms in [`crate::shortest_paths`] and [`crate::mst`] only
//! ask for [`DecreaseKeyHeap`], so they can be driven by any heap that hands
//! out stable handles.

use std::fmt;

/// Why a heap operation was refused
///
/// Errors are detected before any mutation, so a heap that returned `Err`
/// is in the same state as before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `extract_min` on a heap with no elements
    EmptyHeap,
    /// `decrease_key` was asked to raise the key
    InvalidKey,
    /// The handle names an element that was extracted, cleared, or never
    /// belonged to this heap
    InvalidHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyHeap => write!(f, "heap is empty"),
            HeapError::InvalidKey => write!(f, "new key is larger than the current key"),
            HeapError::InvalidHandle => write!(f, "handle does not refer to an element of this heap"),
        }
    }
}

impl std::error::Error for HeapError {}

/// Marker for element handles
///
/// A handle identifies one element across later operations without owning it.
pub trait Handle: Clone + PartialEq + Eq {}

/// Min-priority queue over `(priority, item)` pairs
///
/// Shaped after `BinaryHeap`, but the ordering comes from a separate
/// priority instead of the item's own `Ord`.
///
/// # Example
///
/// ```rust
/// use arena_fibonacci_heap::Heap;
/// use arena_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// let mut queue: FibonacciHeap<u32, char> = Heap::new();
/// queue.push(30, 'c');
/// queue.push(10, 'a');
/// queue.push(20, 'b');
///
/// assert_eq!(queue.peek(), Some((&10, &'a')));
/// assert_eq!(queue.pop(), Some((10, 'a')));
/// assert_eq!(queue.len(), 2);
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates an empty heap.
    fn new() -> Self;

    /// Returns true if the heap holds no elements.
    fn is_empty(&self) -> bool;

    /// Number of elements in the heap.
    fn len(&self) -> usize;

    /// Adds `item` under `priority`.
    fn push(&mut self, priority: P, item: T);

    /// The smallest priority and its item, if any.
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes the smallest priority and its item, if any.
    fn pop(&mut self) -> Option<(P, T)>;

    /// Moves all of `other`'s elements into `self`.
    fn merge(&mut self, other: Self);
}

/// A [`Heap`] whose elements can be reached again through handles
///
/// # Example
///
/// ```rust
/// use arena_fibonacci_heap::{DecreaseKeyHeap, Heap, HeapError};
/// use arena_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// let mut queue: FibonacciHeap<u32, &str> = Heap::new();
/// let job = queue.push_with_handle(50, "job");
/// queue.push(20, "other");
///
/// DecreaseKeyHeap::decrease_key(&mut queue, &job, 5).unwrap();
/// assert_eq!(queue.peek(), Some((&5, &"job")));
/// assert_eq!(
///     DecreaseKeyHeap::decrease_key(&mut queue, &job, 9),
///     Err(HeapError::InvalidKey)
/// );
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    type Handle: Handle;

    /// Like [`Heap::push`], returning a handle to the new element.
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Lowers the priority of the element behind `handle`.
    ///
    /// # Errors
    /// - [`HeapError::InvalidKey`] if `new_priority` is above the current priority
    /// - [`HeapError::InvalidHandle`] if the element is gone from this heap
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;
}
