//! Circular doubly-linked list primitives over index-addressed storage.
//!
//! The links themselves live wherever the caller keeps its nodes (an arena,
//! a `Vec`, a slot map). This crate only needs to read and write the `next`
//! and `prev` fields of a node identified by some copyable id, which is what
//! the [`RingLinks`] trait provides.
//!
//! # Circular vs Linear Lists
//!
//! In a circular list:
//! - A single node points to itself (both `next` and `prev`)
//! - There is no head or tail - any node can be the "entry point"
//! - Splicing two rings together is O(1)
//! - Iteration wraps around (must track starting point)
//!
//! This is the shape Fibonacci heaps use for both the root list and every
//! child list.
//!
//! # Example
//!
//! ```rust
//! use index_ring::{RingLinks, RingOps};
//!
//! struct Links {
//!     next: Vec<usize>,
//!     prev: Vec<usize>,
//! }
//!
//! impl RingLinks for Links {
//!     type Id = usize;
//!     fn next(&self, id: usize) -> usize { self.next[id] }
//!     fn prev(&self, id: usize) -> usize { self.prev[id] }
//!     fn set_next(&mut self, id: usize, next: usize) { self.next[id] = next; }
//!     fn set_prev(&mut self, id: usize, prev: usize) { self.prev[id] = prev; }
//! }
//!
//! let mut links = Links { next: vec![0, 1, 2], prev: vec![0, 1, 2] };
//! let ops = RingOps::new();
//!
//! ops.splice_in(&mut links, 0, 1);
//! ops.splice_in(&mut links, 1, 2);
//! assert_eq!(ops.snapshot(&links, 0), vec![0, 1, 2]);
//!
//! assert_eq!(ops.splice_out(&mut links, 1), Some(2));
//! assert_eq!(ops.snapshot(&links, 0), vec![0, 2]);
//! assert!(ops.is_singleton(&links, 1));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

// =============================================================================
// RingLinks
// =============================================================================

/// Access to the `next`/`prev` fields of nodes addressed by [`RingLinks::Id`].
///
/// Every id handed to [`RingOps`] must be live in the storage. A node that is
/// not in any larger ring is a singleton: its `next` and `prev` are itself.
pub trait RingLinks {
    /// Identifier of a node in the backing storage.
    type Id: Copy + Eq;

    /// Gets the next node in the ring.
    fn next(&self, id: Self::Id) -> Self::Id;

    /// Gets the previous node in the ring.
    fn prev(&self, id: Self::Id) -> Self::Id;

    /// Sets the next pointer of `id`.
    fn set_next(&mut self, id: Self::Id, next: Self::Id);

    /// Sets the previous pointer of `id`.
    fn set_prev(&mut self, id: Self::Id, prev: Self::Id);
}

// =============================================================================
// RingOps
// =============================================================================

/// Operations for manipulating circular doubly-linked lists.
///
/// All operations are O(1) except [`RingOps::count`], [`RingOps::snapshot`]
/// and iteration, which are linear in the ring length.
#[derive(Clone, Copy, Default, Debug)]
pub struct RingOps;

impl RingOps {
    /// Creates a new `RingOps`.
    #[inline]
    pub const fn new() -> Self {
        RingOps
    }

    /// Makes `id` a ring of one element.
    ///
    /// After this, `next(id) == id` and `prev(id) == id`.
    #[inline]
    pub fn make_singleton<L: RingLinks>(&self, links: &mut L, id: L::Id) {
        links.set_next(id, id);
        links.set_prev(id, id);
    }

    /// Returns true if `id` is the only element of its ring.
    #[inline]
    pub fn is_singleton<L: RingLinks>(&self, links: &L, id: L::Id) -> bool {
        links.next(id) == id
    }

    /// Inserts the singleton `node` immediately after `anchor`.
    ///
    /// Works whether `anchor`'s ring has one element or many.
    #[inline]
    pub fn splice_in<L: RingLinks>(&self, links: &mut L, anchor: L::Id, node: L::Id) {
        debug_assert!(self.is_singleton(links, node), "node is already linked");

        let next = links.next(anchor);

        links.set_next(anchor, node);
        links.set_prev(node, anchor);
        links.set_next(node, next);
        links.set_prev(next, node);
    }

    /// Removes `node` from its ring and leaves it as a singleton.
    ///
    /// Returns a surviving neighbour of `node`, or `None` if `node` was the
    /// only element (the ring it belonged to is now empty).
    #[inline]
    pub fn splice_out<L: RingLinks>(&self, links: &mut L, node: L::Id) -> Option<L::Id> {
        let next = links.next(node);
        if next == node {
            return None;
        }
        let prev = links.prev(node);

        links.set_next(prev, next);
        links.set_prev(next, prev);
        self.make_singleton(links, node);
        Some(next)
    }

    /// Splices the ring containing `b` into the ring containing `a`.
    ///
    /// The two rings must be distinct. The merge is O(1) - it just
    /// reconnects the endpoints.
    pub fn concatenate<L: RingLinks>(&self, links: &mut L, a: L::Id, b: L::Id) {
        // Before:
        //   Ring A: ... <-> a_prev <-> a <-> ...
        //   Ring B: ... <-> b_prev <-> b <-> ...
        //
        // After:
        //   ... <-> a_prev <-> b <-> ... <-> b_prev <-> a <-> ...
        let a_prev = links.prev(a);
        let b_prev = links.prev(b);

        links.set_next(a_prev, b);
        links.set_prev(b, a_prev);

        links.set_next(b_prev, a);
        links.set_prev(a, b_prev);
    }

    /// Counts the number of elements in the ring containing `start`.
    ///
    /// This is O(n) - use sparingly.
    pub fn count<L: RingLinks>(&self, links: &L, start: L::Id) -> usize {
        self.iter(links, start).count()
    }

    /// Copies every member of the ring containing `anchor` into a `Vec`,
    /// starting at `anchor` and following `next`.
    ///
    /// Use this instead of [`RingOps::iter`] whenever the ring will be
    /// restructured while the members are being visited.
    pub fn snapshot<L: RingLinks>(&self, links: &L, anchor: L::Id) -> Vec<L::Id> {
        self.iter(links, anchor).collect()
    }

    /// Borrowing traversal of the ring containing `start`.
    ///
    /// The borrow prevents structural changes while iterating.
    pub fn iter<'a, L: RingLinks>(&self, links: &'a L, start: L::Id) -> RingIter<'a, L> {
        RingIter {
            links,
            start,
            next: Some(start),
        }
    }
}

// =============================================================================
// RingIter
// =============================================================================

/// Iterator over one ring, visiting every member exactly once.
pub struct RingIter<'a, L: RingLinks> {
    links: &'a L,
    start: L::Id,
    next: Option<L::Id>,
}

impl<L: RingLinks> Iterator for RingIter<'_, L> {
    type Item = L::Id;

    fn next(&mut self) -> Option<L::Id> {
        let current = self.next?;
        let following = self.links.next(current);
        self.next = if following == self.start {
            None
        } else {
            Some(following)
        };
        Some(current)
    }
}

impl<L: RingLinks> fmt::Debug for RingIter<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingIter")
            .field("done", &self.next.is_none())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
