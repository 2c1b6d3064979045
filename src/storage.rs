//! Arena storage for heap nodes
//!
//! Nodes live in [`slotmap::SlotMap`]s rather than in individual boxes. A slot
//! map hands out generational keys: once a node is removed its key stops
//! resolving, even if the slot is reused later. That is what lets a heap
//! validate handles instead of trusting raw addresses.
//!
//! # Segments
//!
//! A heap's arena is one *home* segment plus any number of *foreign* segments.
//! Each segment carries a process-unique [`ArenaId`], and every [`NodeRef`]
//! names the segment it lives in. Merging two heaps moves whole segments
//! across (no node is copied or re-keyed), so:
//!
//! - the merge cost does not depend on how many nodes the absorbed heap holds
//! - handles issued by the absorbed heap keep resolving in the receiver
//! - a `NodeRef` minted by an unrelated heap never resolves here
//!
//! New nodes always go into the home segment. A foreign segment is dropped as
//! soon as its last node is removed.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

new_key_type! {
    /// Generational key of a node within one segment
    pub struct NodeKey;
}

/// Process-unique identity of one arena segment
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ArenaId(u64);

impl ArenaId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        ArenaId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Address of a node: which segment, and which generational slot in it
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    arena: ArenaId,
    key: NodeKey,
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({}:{:?})", self.arena.0, self.key)
    }
}

/// Segmented, generational node storage
pub struct NodeArena<N> {
    home_id: ArenaId,
    home: SlotMap<NodeKey, N>,
    foreign: FxHashMap<ArenaId, SlotMap<NodeKey, N>>,
}

impl<N> NodeArena<N> {
    /// Creates an empty arena with a fresh home segment.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty arena whose home segment can hold `capacity` nodes
    /// without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            home_id: ArenaId::fresh(),
            home: SlotMap::with_capacity_and_key(capacity),
            foreign: FxHashMap::default(),
        }
    }

    /// Total number of live nodes across all segments.
    pub fn len(&self) -> usize {
        self.home.len() + self.foreign.values().map(SlotMap::len).sum::<usize>()
    }

    /// Returns true if no segment holds a node.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of segments, home included.
    pub fn segment_count(&self) -> usize {
        1 + self.foreign.len()
    }

    /// Stores `node` in the home segment.
    pub fn insert(&mut self, node: N) -> NodeRef {
        NodeRef {
            arena: self.home_id,
            key: self.home.insert(node),
        }
    }

    /// Stores a node built from its own address.
    ///
    /// Used for nodes whose links must start out pointing at themselves.
    pub fn insert_with(&mut self, f: impl FnOnce(NodeRef) -> N) -> NodeRef {
        let arena = self.home_id;
        let key = self.home.insert_with_key(|key| f(NodeRef { arena, key }));
        NodeRef { arena, key }
    }

    /// Removes a node, returning it if `node` was live.
    pub fn remove(&mut self, node: NodeRef) -> Option<N> {
        if node.arena == self.home_id {
            return self.home.remove(node.key);
        }
        let segment = self.foreign.get_mut(&node.arena)?;
        let removed = segment.remove(node.key);
        if segment.is_empty() {
            self.foreign.remove(&node.arena);
        }
        removed
    }

    /// Returns true if `node` names a live node of this arena.
    pub fn contains(&self, node: NodeRef) -> bool {
        self.get(node).is_some()
    }

    /// Looks up a node, `None` if the reference is stale or foreign to this arena.
    #[inline]
    pub fn get(&self, node: NodeRef) -> Option<&N> {
        if node.arena == self.home_id {
            self.home.get(node.key)
        } else {
            self.foreign.get(&node.arena)?.get(node.key)
        }
    }

    /// Mutable lookup, `None` if the reference is stale or foreign to this arena.
    #[inline]
    pub fn get_mut(&mut self, node: NodeRef) -> Option<&mut N> {
        if node.arena == self.home_id {
            self.home.get_mut(node.key)
        } else {
            self.foreign.get_mut(&node.arena)?.get_mut(node.key)
        }
    }

    /// Moves every segment of `other` into `self`.
    ///
    /// `other` is left empty with a brand-new home segment, so references it
    /// handed out before the call now only resolve in `self`.
    pub fn absorb(&mut self, other: &mut NodeArena<N>) {
        let other_home = std::mem::take(&mut other.home);
        let other_home_id = std::mem::replace(&mut other.home_id, ArenaId::fresh());

        if !other_home.is_empty() {
            self.foreign.insert(other_home_id, other_home);
        }
        self.foreign.extend(
            other
                .foreign
                .drain()
                .filter(|(_, segment)| !segment.is_empty()),
        );
    }

    /// Removes every node. All outstanding references become stale.
    pub fn clear(&mut self) {
        self.home.clear();
        self.foreign.clear();
    }
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Index<NodeRef> for NodeArena<N> {
    type Output = N;

    /// # Panics
    /// Panics if `node` is stale, which means a structural link is dangling.
    fn index(&self, node: NodeRef) -> &N {
        match self.get(node) {
            Some(n) => n,
            None => panic!("dangling node link {node:?}"),
        }
    }
}

impl<N> IndexMut<NodeRef> for NodeArena<N> {
    fn index_mut(&mut self, node: NodeRef) -> &mut N {
        match self.get_mut(node) {
            Some(n) => n,
            None => panic!("dangling node link {node:?}"),
        }
    }
}

impl<N> fmt::Debug for NodeArena<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeArena")
            .field("home", &self.home_id.0)
            .field("segments", &self.segment_count())
            .field("len", &self.len())
            .finish()
    }
}
