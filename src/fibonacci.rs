//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert, decrease_key, and merge
//! - O(log n) amortized extract_min
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list, and so is every group of siblings. The heap
//! keeps a pointer to the minimum root.
//!
//! All restructuring is deferred. `insert` and `merge` only touch the root
//! list; `extract_min` pays for them by *consolidating* the roots until no two
//! share a degree; `decrease_key` repairs heap order by cutting the node loose
//! and, through the mark bits, cutting any ancestor that has now lost two
//! children. Those two rules keep every node of degree `k` at the top of at
//! least `Fib(k + 2)` nodes, which is where the logarithmic degree bound comes
//! from.
//!
//! # Storage
//!
//! Nodes live in a [`NodeArena`] and refer to each other by [`NodeRef`]
//! (segment id + generational slot key). A [`FibonacciHandle`] is just such a
//! reference, so a handle to an extracted node stops resolving and is reported
//! as [`HeapError::InvalidHandle`] instead of touching reused memory.

use crate::degree::{self, Degree};
use crate::storage::{NodeArena, NodeRef};
use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
use index_ring::{RingLinks, RingOps};
use log::trace;
use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};
use std::fmt;

const RING: RingOps = RingOps::new();

/// Handle to an element in a Fibonacci heap
///
/// Handles are cheap to copy and never own the element. They stay valid until
/// the element is extracted (or the heap is cleared), including across
/// [`FibonacciHeap::merge`] into another heap.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    node: NodeRef,
}

impl Handle for FibonacciHandle {}

struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<NodeRef>,
    child: Option<NodeRef>,
    left: NodeRef,
    right: NodeRef,
    degree: Degree,
    marked: bool,
}

impl<K, V> RingLinks for NodeArena<Node<K, V>> {
    type Id = NodeRef;

    #[inline]
    fn next(&self, id: NodeRef) -> NodeRef {
        self[id].right
    }

    #[inline]
    fn prev(&self, id: NodeRef) -> NodeRef {
        self[id].left
    }

    #[inline]
    fn set_next(&mut self, id: NodeRef, next: NodeRef) {
        self[id].right = next;
    }

    #[inline]
    fn set_prev(&mut self, id: NodeRef, prev: NodeRef) {
        self[id].left = prev;
    }
}

/// A structural invariant found broken by [`FibonacciHeap::verify_invariants`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A child's key is smaller than its parent's key
    HeapOrder,
    /// A node's `degree` differs from the length of its child list
    DegreeMismatch { degree: usize, children: usize },
    /// A child does not point back at the node whose child list holds it
    ParentLink,
    /// `next`/`prev` disagree somewhere in a sibling or root list
    SiblingLinks,
    /// A subtree is smaller than `Fib(degree + 2)`
    SubtreeTooSmall { degree: usize, size: usize },
    /// Some root has a smaller key than the recorded minimum
    StaleMinimum,
    /// Reachable nodes, `len()` and arena occupancy disagree
    CountMismatch { len: usize, reachable: usize, stored: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::HeapOrder => write!(f, "child key is smaller than its parent key"),
            InvariantViolation::DegreeMismatch { degree, children } => {
                write!(f, "degree {degree} recorded for a node with {children} children")
            }
            InvariantViolation::ParentLink => write!(f, "child does not point back to its parent"),
            InvariantViolation::SiblingLinks => write!(f, "circular list links are inconsistent"),
            InvariantViolation::SubtreeTooSmall { degree, size } => {
                write!(f, "degree {degree} node roots only {size} nodes")
            }
            InvariantViolation::StaleMinimum => write!(f, "minimum pointer is not the smallest root"),
            InvariantViolation::CountMismatch {
                len,
                reachable,
                stored,
            } => write!(
                f,
                "len() is {len} but {reachable} nodes are reachable and {stored} are stored"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Fibonacci Heap
///
/// A min-heap of `(key, value)` pairs ordered by `key`.
///
/// # Example
///
/// ```rust
/// use arena_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(10, "a");
/// heap.insert(3, "b");
///
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.minimum(), Some((&1, &"a")));
/// assert_eq!(heap.extract_min(), Ok((1, "a")));
/// ```
pub struct FibonacciHeap<K, V> {
    nodes: NodeArena<Node<K, V>>,
    min: Option<NodeRef>,
    len: usize,
}

impl<K: Ord, V> FibonacciHeap<K, V> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty heap that can hold `capacity` elements before its
    /// arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        FibonacciHeap {
            nodes: NodeArena::with_capacity(capacity),
            min: None,
            len: 0,
        }
    }

    /// Returns true if the heap holds no elements.
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Number of elements in the heap.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Inserts `value` with priority `key` as a new singleton root.
    ///
    /// On a tie with the current minimum the existing minimum is kept.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, key: K, value: V) -> FibonacciHandle {
        let node = self.nodes.insert_with(|this| Node {
            key,
            value,
            parent: None,
            child: None,
            left: this,
            right: this,
            degree: 0,
            marked: false,
        });

        self.add_root(node);
        if let Some(min) = self.min {
            if self.nodes[node].key < self.nodes[min].key {
                self.min = Some(node);
            }
        }

        self.len += 1;
        FibonacciHandle { node }
    }

    /// Returns the minimum key and its value without removing them.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn minimum(&self) -> Option<(&K, &V)> {
        self.min.map(|min| {
            let node = &self.nodes[min];
            (&node.key, &node.value)
        })
    }

    /// Looks up the element behind `handle`, `None` if it has been extracted.
    pub fn get(&self, handle: &FibonacciHandle) -> Option<(&K, &V)> {
        self.nodes
            .get(handle.node)
            .map(|node| (&node.key, &node.value))
    }

    /// Returns true if `handle` still refers to an element of this heap.
    pub fn contains(&self, handle: &FibonacciHandle) -> bool {
        self.nodes.contains(handle.node)
    }

    /// Removes and returns the element with the smallest key.
    ///
    /// The children of the removed node join the root list and the roots are
    /// then consolidated so that no two share a degree.
    ///
    /// # Errors
    /// `HeapError::EmptyHeap` if there is nothing to remove.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn extract_min(&mut self) -> Result<(K, V), HeapError> {
        let z = self.min.ok_or(HeapError::EmptyHeap)?;

        // Promote children. Their marks are left as they are.
        if let Some(child) = self.nodes[z].child.take() {
            for x in RING.snapshot(&self.nodes, child) {
                self.nodes[x].parent = None;
            }
            RING.concatenate(&mut self.nodes, z, child);
            self.nodes[z].degree = 0;
        }

        let survivor = RING.splice_out(&mut self.nodes, z);
        let Node { key, value, .. } = self.take_node(z);
        self.len -= 1;

        match survivor {
            None => self.min = None,
            Some(root) => {
                self.min = Some(root);
                self.consolidate(root);
            }
        }

        Ok((key, value))
    }

    /// Lowers the key of the element behind `handle` to `new_key`.
    ///
    /// A key equal to the current one is accepted and changes nothing. If the
    /// node now violates heap order it is cut from its parent, followed by a
    /// cascading cut up the chain of marked ancestors.
    ///
    /// # Errors
    /// - `HeapError::InvalidHandle` if the element was extracted or belongs to another heap
    /// - `HeapError::InvalidKey` if `new_key` is greater than the current key
    ///
    /// Either way the heap is left untouched.
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_key(&mut self, handle: &FibonacciHandle, new_key: K) -> Result<(), HeapError> {
        let x = handle.node;
        let node = self.nodes.get_mut(x).ok_or(HeapError::InvalidHandle)?;
        if new_key > node.key {
            return Err(HeapError::InvalidKey);
        }
        node.key = new_key;
        let parent = node.parent;

        if let Some(p) = parent {
            if self.nodes[x].key < self.nodes[p].key {
                self.cut(x, p);
                self.cascading_cut(p);
            }
        }

        let min = self.min;
        match min {
            Some(min) if self.nodes[x].key < self.nodes[min].key => self.min = Some(x),
            None => self.min = Some(x),
            _ => {}
        }
        Ok(())
    }

    /// Moves every element of `other` into `self`, leaving `other` empty but usable.
    ///
    /// Handles issued by `other` remain valid and now refer to elements of `self`.
    ///
    /// # Time Complexity
    /// O(1) in the number of elements
    pub fn absorb(&mut self, other: &mut Self) {
        let Some(other_min) = other.min.take() else {
            return;
        };
        let other_len = std::mem::take(&mut other.len);
        self.nodes.absorb(&mut other.nodes);
        trace!(
            "absorbed {} elements, arena now spans {} segments",
            other_len,
            self.nodes.segment_count()
        );

        let min = self.min;
        match min {
            None => self.min = Some(other_min),
            Some(min) => {
                RING.concatenate(&mut self.nodes, min, other_min);
                if self.nodes[other_min].key < self.nodes[min].key {
                    self.min = Some(other_min);
                }
            }
        }
        self.len += other_len;
    }

    /// Merges `other` into `self`, consuming it. Returns `self` so merges
    /// can be chained.
    ///
    /// See [`FibonacciHeap::absorb`].
    pub fn merge(&mut self, mut other: Self) -> &mut Self {
        self.absorb(&mut other);
        self
    }

    /// Removes every element. Outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.min = None;
        self.len = 0;
    }

    /// Walks the whole structure and checks every invariant the amortized
    /// bounds rely on.
    ///
    /// Checked: circular-list symmetry, parent back-links, heap order, degree
    /// bookkeeping, the `Fib(degree + 2)` subtree-size bound, the minimum
    /// pointer, and that `len()` matches both the reachable and the stored
    /// node counts. Roots are allowed to carry a mark: children promoted by
    /// `extract_min` keep theirs, and a mark on a root is never acted upon.
    ///
    /// This is O(n) and meant for tests and debugging.
    pub fn verify_invariants(&self) -> Result<(), InvariantViolation> {
        let stored = self.nodes.len();
        let Some(min) = self.min else {
            return if self.len == 0 && stored == 0 {
                Ok(())
            } else {
                Err(InvariantViolation::CountMismatch {
                    len: self.len,
                    reachable: 0,
                    stored,
                })
            };
        };

        let roots = self.ring_members(min)?;
        let mut reachable = 0usize;
        for &root in &roots {
            if self.nodes[root].parent.is_some() {
                return Err(InvariantViolation::ParentLink);
            }
            if self.nodes[root].key < self.nodes[min].key {
                return Err(InvariantViolation::StaleMinimum);
            }
            reachable += self.verify_tree(root)?;
        }

        if reachable != self.len || stored != self.len {
            return Err(InvariantViolation::CountMismatch {
                len: self.len,
                reachable,
                stored,
            });
        }
        Ok(())
    }

    // ---- Internal helpers ----

    /// Splices a singleton into the root list without touching `min`,
    /// unless the root list is empty.
    fn add_root(&mut self, node: NodeRef) {
        let min = self.min;
        match min {
            Some(min) => RING.splice_in(&mut self.nodes, min, node),
            None => self.min = Some(node),
        }
    }

    fn take_node(&mut self, node: NodeRef) -> Node<K, V> {
        match self.nodes.remove(node) {
            Some(n) => n,
            None => panic!("dangling node link {node:?}"),
        }
    }

    /// Links trees of equal degree until every root degree is distinct, then
    /// rebuilds the root list and finds the new minimum.
    fn consolidate(&mut self, start: NodeRef) {
        let roots = RING.snapshot(&self.nodes, start);
        let mut table: SmallVec<[Option<NodeRef>; 32]> = smallvec![None; degree::table_len(self.len)];
        let mut links = 0usize;

        for &root in &roots {
            let mut x = root;
            let mut d = usize::from(self.nodes[x].degree);
            loop {
                if d >= table.len() {
                    table.resize(d + 1, None);
                }
                let Some(mut y) = table[d].take() else {
                    break;
                };
                // On equal keys the tree already in the slot stays on top.
                if self.nodes[y].key <= self.nodes[x].key {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                links += 1;
                d += 1;
            }
            table[d] = Some(x);
        }

        self.min = None;
        let mut survivors = 0usize;
        for root in table.into_iter().flatten() {
            RING.make_singleton(&mut self.nodes, root);
            let min = self.min;
            match min {
                None => self.min = Some(root),
                Some(min) => {
                    RING.splice_in(&mut self.nodes, min, root);
                    if self.nodes[root].key < self.nodes[min].key {
                        self.min = Some(root);
                    }
                }
            }
            survivors += 1;
        }

        trace!(
            "consolidated {} roots into {} with {} links",
            roots.len(),
            survivors,
            links
        );
    }

    /// Makes root `y` a child of root `x`.
    fn link(&mut self, y: NodeRef, x: NodeRef) {
        RING.splice_out(&mut self.nodes, y);
        let child = &mut self.nodes[y];
        child.parent = Some(x);
        child.marked = false;

        let first_child = self.nodes[x].child;
        match first_child {
            Some(first) => RING.splice_in(&mut self.nodes, first, y),
            None => self.nodes[x].child = Some(y),
        }
        let parent = &mut self.nodes[x];
        parent.degree = degree::checked_increment(parent.degree);
    }

    /// Detaches `x` from its parent `p` and makes it an unmarked root.
    fn cut(&mut self, x: NodeRef, p: NodeRef) {
        let sibling = RING.splice_out(&mut self.nodes, x);

        let parent = &mut self.nodes[p];
        if parent.child == Some(x) {
            parent.child = sibling;
        }
        parent.degree = degree::saturating_decrement(parent.degree);

        let node = &mut self.nodes[x];
        node.parent = None;
        node.marked = false;
        self.add_root(x);
    }

    /// Walks up from `node`: marks the first unmarked non-root ancestor and
    /// cuts every marked one on the way.
    fn cascading_cut(&mut self, mut node: NodeRef) {
        let mut cuts = 0usize;
        while let Some(parent) = self.nodes[node].parent {
            if !self.nodes[node].marked {
                self.nodes[node].marked = true;
                break;
            }
            self.cut(node, parent);
            cuts += 1;
            node = parent;
        }
        if cuts > 0 {
            trace!("cascading cut promoted {} marked ancestors", cuts);
        }
    }

    /// Members of the ring through `start`, failing on asymmetric links or a
    /// ring longer than the heap.
    fn ring_members(&self, start: NodeRef) -> Result<Vec<NodeRef>, InvariantViolation> {
        let mut members = Vec::new();
        for id in RING.iter(&self.nodes, start) {
            if members.len() == self.len || !self.nodes.contains(self.nodes[id].right) {
                return Err(InvariantViolation::SiblingLinks);
            }
            if self.nodes[self.nodes[id].right].left != id {
                return Err(InvariantViolation::SiblingLinks);
            }
            members.push(id);
        }
        Ok(members)
    }

    /// Checks the tree under `root` and returns its size.
    fn verify_tree(&self, root: NodeRef) -> Result<usize, InvariantViolation> {
        // Pre-order walk, then sizes are accumulated in reverse.
        let mut order = vec![root];
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let n = &self.nodes[node];
            let children = match n.child {
                Some(first) => self.ring_members(first)?,
                None => Vec::new(),
            };
            if children.len() != usize::from(n.degree) {
                return Err(InvariantViolation::DegreeMismatch {
                    degree: usize::from(n.degree),
                    children: children.len(),
                });
            }
            for child in children {
                let c = &self.nodes[child];
                if c.parent != Some(node) {
                    return Err(InvariantViolation::ParentLink);
                }
                if c.key < n.key {
                    return Err(InvariantViolation::HeapOrder);
                }
                order.push(child);
                stack.push(child);
                if order.len() > self.len {
                    return Err(InvariantViolation::SiblingLinks);
                }
            }
        }

        let mut sizes: FxHashMap<NodeRef, usize> = FxHashMap::default();
        for &node in order.iter().rev() {
            let size = *sizes.entry(node).or_insert(1);
            let n = &self.nodes[node];
            let required = degree::fibonacci(usize::from(n.degree) + 2);
            if (size as u64) < required {
                return Err(InvariantViolation::SubtreeTooSmall {
                    degree: usize::from(n.degree),
                    size,
                });
            }
            if let Some(parent) = n.parent {
                *sizes.entry(parent).or_insert(1) += size;
            }
        }
        Ok(sizes.get(&root).copied().unwrap_or(1))
    }
}

impl<K: Ord, V> Default for FibonacciHeap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + fmt::Debug, V> fmt::Debug for FibonacciHeap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("min", &self.minimum().map(|(key, _)| key))
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl<K: Ord, V> Heap<V, K> for FibonacciHeap<K, V> {
    fn new() -> Self {
        FibonacciHeap::new()
    }

    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn push(&mut self, priority: K, item: V) {
        self.insert(priority, item);
    }

    fn peek(&self) -> Option<(&K, &V)> {
        self.minimum()
    }

    fn pop(&mut self) -> Option<(K, V)> {
        self.extract_min().ok()
    }

    fn merge(&mut self, mut other: Self) {
        self.absorb(&mut other);
    }
}

impl<K: Ord, V> DecreaseKeyHeap<V, K> for FibonacciHeap<K, V> {
    type Handle = FibonacciHandle;

    fn push_with_handle(&mut self, priority: K, item: V) -> FibonacciHandle {
        self.insert(priority, item)
    }

    fn decrease_key(&mut self, handle: &FibonacciHandle, new_priority: K) -> Result<(), HeapError> {
        FibonacciHeap::decrease_key(self, handle, new_priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth<K: Ord, V>(heap: &FibonacciHeap<K, V>, mut node: NodeRef) -> usize {
        let mut depth = 0;
        while let Some(parent) = heap.nodes[node].parent {
            depth += 1;
            node = parent;
        }
        depth
    }

    fn handle_of(node: NodeRef) -> FibonacciHandle {
        FibonacciHandle { node }
    }

    #[test]
    fn test_basic_operations() {
        let mut heap = FibonacciHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.insert(5, "a");
        heap.insert(3, "b");
        heap.insert(7, "c");

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.minimum(), Some((&3, &"b")));

        assert_eq!(heap.extract_min(), Ok((3, "b")));
        assert_eq!(heap.minimum(), Some((&5, &"a")));
        heap.verify_invariants().unwrap();
    }

    #[test]
    fn test_insert_tie_keeps_existing_min() {
        let mut heap = FibonacciHeap::new();
        let first = heap.insert(1, "first");
        heap.insert(1, "second");

        assert_eq!(heap.minimum(), Some((&1, &"first")));
        assert_eq!(heap.min, Some(first.node));
    }

    #[test]
    fn test_extract_from_empty() {
        let mut heap: FibonacciHeap<i32, ()> = FibonacciHeap::new();
        assert_eq!(heap.extract_min(), Err(HeapError::EmptyHeap));
        assert_eq!(heap.minimum(), None);
    }

    #[test]
    fn test_consolidation_leaves_distinct_degrees() {
        let mut heap = FibonacciHeap::new();
        for i in 0..17 {
            heap.insert(i, ());
        }
        heap.extract_min().unwrap();

        // 16 singletons consolidate into exactly one tree of degree 4.
        let min = heap.min.unwrap();
        assert!(RING.is_singleton(&heap.nodes, min));
        assert_eq!(heap.nodes[min].degree, 4);
        assert_eq!(heap.nodes[min].key, 1);
        heap.verify_invariants().unwrap();
    }

    #[test]
    fn test_decrease_key_on_root_updates_min() {
        let mut heap = FibonacciHeap::new();
        heap.insert(10, "a");
        let h2 = heap.insert(20, "b");
        let h3 = heap.insert(30, "c");

        heap.decrease_key(&h2, 5).unwrap();
        assert_eq!(heap.minimum(), Some((&5, &"b")));

        heap.decrease_key(&h3, 1).unwrap();
        assert_eq!(heap.minimum(), Some((&1, &"c")));
        heap.verify_invariants().unwrap();
    }

    #[test]
    fn test_decrease_key_without_violation_does_not_cut() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..9).map(|i| heap.insert(i * 10, i)).collect();
        heap.extract_min().unwrap();

        let child = handles
            .iter()
            .find(|h| heap.contains(h) && heap.nodes[h.node].parent.is_some())
            .copied()
            .unwrap();
        let parent = heap.nodes[child.node].parent.unwrap();
        let parent_key = heap.nodes[parent].key;

        heap.decrease_key(&child, parent_key).unwrap();

        assert_eq!(heap.nodes[child.node].parent, Some(parent));
        assert!(!heap.nodes[parent].marked);
        heap.verify_invariants().unwrap();
    }

    #[test]
    fn test_cascading_cut_promotes_marked_parent() {
        let mut heap = FibonacciHeap::new();
        for i in 0..17 {
            heap.insert(i * 10, i);
        }
        heap.extract_min().unwrap();

        // In the single degree-4 tree, find a depth-2 node with two children.
        let all: Vec<NodeRef> = {
            let mut out = Vec::new();
            let mut stack = vec![heap.min.unwrap()];
            while let Some(n) = stack.pop() {
                out.push(n);
                if let Some(first) = heap.nodes[n].child {
                    stack.extend(RING.snapshot(&heap.nodes, first));
                }
            }
            out
        };
        let p = all
            .iter()
            .copied()
            .find(|&n| depth(&heap, n) == 2 && heap.nodes[n].degree >= 2)
            .unwrap();
        let g = heap.nodes[p].parent.unwrap();
        let first = heap.nodes[p].child.unwrap();
        let kids = RING.snapshot(&heap.nodes, first);

        heap.decrease_key(&handle_of(kids[0]), -1).unwrap();
        assert!(heap.nodes[p].marked);
        assert_eq!(heap.nodes[p].parent, Some(g));
        assert_eq!(heap.minimum().map(|(k, _)| *k), Some(-1));

        heap.decrease_key(&handle_of(kids[1]), -2).unwrap();
        assert_eq!(heap.nodes[p].parent, None);
        assert!(!heap.nodes[p].marked);
        assert!(heap.nodes[g].marked);
        assert_eq!(heap.len(), 16);
        assert_eq!(heap.minimum().map(|(k, _)| *k), Some(-2));
        heap.verify_invariants().unwrap();
    }

    #[test]
    fn test_rejected_decrease_leaves_heap_unchanged() {
        let mut heap = FibonacciHeap::new();
        let h = heap.insert(10, "a");
        heap.insert(3, "b");

        assert_eq!(heap.decrease_key(&h, 11), Err(HeapError::InvalidKey));
        assert_eq!(heap.get(&h), Some((&10, &"a")));
        assert_eq!(heap.minimum(), Some((&3, &"b")));
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn test_stale_handle_is_rejected() {
        let mut heap = FibonacciHeap::new();
        let h = heap.insert(1, "a");
        heap.extract_min().unwrap();

        // The slot gets reused by the next insert.
        let fresh = heap.insert(5, "b");
        assert_ne!(h, fresh);
        assert!(!heap.contains(&h));
        assert_eq!(heap.decrease_key(&h, 0), Err(HeapError::InvalidHandle));
        assert_eq!(heap.minimum(), Some((&5, &"b")));
    }

    #[test]
    fn test_handle_from_other_heap_is_rejected() {
        let mut a = FibonacciHeap::new();
        let mut b = FibonacciHeap::new();
        let in_a = a.insert(1, ());
        b.insert(2, ());

        assert_eq!(b.decrease_key(&in_a, 0), Err(HeapError::InvalidHandle));
        assert_eq!(b.get(&in_a), None);
    }

    #[test]
    fn test_merge() {
        let mut heap1 = FibonacciHeap::new();
        heap1.insert(5, "a");
        heap1.insert(10, "b");

        let mut heap2 = FibonacciHeap::new();
        heap2.insert(3, "c");
        let h = heap2.insert(7, "d");

        heap1.merge(heap2);
        assert_eq!(heap1.minimum(), Some((&3, &"c")));
        assert_eq!(heap1.len(), 4);

        heap1.decrease_key(&h, 1).unwrap();
        assert_eq!(heap1.minimum(), Some((&1, &"d")));
        heap1.verify_invariants().unwrap();
    }

    #[test]
    fn test_merge_chains() {
        let mut a = FibonacciHeap::new();
        let mut b = FibonacciHeap::new();
        let mut c = FibonacciHeap::new();
        a.insert(4, 'a');
        let hb = b.insert(6, 'b');
        c.insert(2, 'c');

        a.merge(b).merge(c).insert(5, 'd');
        assert_eq!(a.len(), 4);
        assert_eq!(a.minimum(), Some((&2, &'c')));

        a.decrease_key(&hb, 1).unwrap();
        let drained: Vec<char> = std::iter::from_fn(|| a.extract_min().ok()).map(|(_, v)| v).collect();
        assert_eq!(drained, vec!['b', 'c', 'a', 'd']);
    }

    #[test]
    fn test_absorb_leaves_other_empty_and_usable() {
        let mut a = FibonacciHeap::new();
        let mut b = FibonacciHeap::new();
        a.insert(2, ());
        b.insert(1, ());

        a.absorb(&mut b);
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
        assert_eq!(b.minimum(), None);
        b.verify_invariants().unwrap();

        b.insert(9, ());
        assert_eq!(b.len(), 1);
        assert_eq!(a.len(), 2);
        assert_eq!(a.minimum(), Some((&1, &())));
    }

    #[test]
    fn test_clear_invalidates_handles() {
        let mut heap = FibonacciHeap::new();
        let h = heap.insert(1, ());
        heap.clear();

        assert!(heap.is_empty());
        assert_eq!(heap.decrease_key(&h, 0), Err(HeapError::InvalidHandle));
        heap.verify_invariants().unwrap();
    }

    #[test]
    fn test_verifier_detects_broken_heap_order() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..5).map(|i| heap.insert(i, ())).collect();
        heap.extract_min().unwrap();

        let child = handles
            .iter()
            .find(|h| heap.contains(h) && heap.nodes[h.node].parent.is_some())
            .unwrap();
        heap.nodes[child.node].key = -100;

        assert_eq!(heap.verify_invariants(), Err(InvariantViolation::HeapOrder));
    }
}
