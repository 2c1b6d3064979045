//! Arena-backed Fibonacci Heap for Rust
//!
//! This crate provides a Fibonacci heap whose nodes live in a generational
//! arena, together with the graph algorithms that lean on its cheap
//! `decrease_key`.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) amortized insert, decrease_key, and merge; O(log n) amortized extract_min
//! - **Checked handles**: a handle to an extracted element is rejected with
//!   [`HeapError::InvalidHandle`] rather than reading reused memory, and
//!   handles keep working after their heap is merged into another
//! - **Invariant verifier**: [`FibonacciHeap::verify_invariants`] walks the
//!   structure and reports the first broken invariant
//! - **Consumers**: Dijkstra's shortest paths, Prim's spanning tree and Huffman
//!   coding, all driven through the heap traits
//!
//! # Example
//!
//! ```rust
//! use arena_fibonacci_heap::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.insert(5, "item1");
//! heap.insert(3, "item2");
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.minimum(), Some((&1, &"item1")));
//! ```

pub mod degree;
pub mod fibonacci;
pub mod graph;
pub mod huffman;
pub mod mst;
pub mod shortest_paths;
pub mod storage;
pub mod traits;

// Re-export the main types for convenience
pub use fibonacci::{FibonacciHandle, FibonacciHeap, InvariantViolation};
pub use traits::{DecreaseKeyHeap, Heap, HeapError};
