//! Weighted adjacency-list graph over arbitrary vertex ids
//!
//! Vertices can be any `Clone + Eq + Hash` type (integers, strings, tuples).
//! Internally each vertex gets a dense index in insertion order, so the graph
//! algorithms can keep their per-vertex state in plain `Vec`s and store only
//! `usize` indices in the heap.
//!
//! # Example
//!
//! ```rust
//! use arena_fibonacci_heap::graph::Graph;
//!
//! let mut graph = Graph::undirected();
//! graph.add_edge("a", "b", 3);
//! graph.add_edge("b", "c", 1);
//!
//! assert_eq!(graph.vertex_count(), 3);
//! assert_eq!(graph.edge_count(), 2);
//! let around_b: Vec<_> = graph.neighbors(&"b").collect();
//! assert_eq!(around_b, vec![(&"a", 3), (&"c", 1)]);
//! ```

use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::Add;

/// Trait for types that can be used as edge weights.
///
/// This requires the type to be orderable, copyable, and support addition.
/// `Default` supplies the zero weight. Path lengths are summed with
/// [`Weight::checked_add`], so an overflowing sum is reported as
/// [`GraphError::WeightOverflow`] instead of panicking or wrapping.
pub trait Weight: Ord + Copy + Add<Output = Self> + Default {
    /// `self + rhs`, or `None` if the sum does not fit.
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }
            }
        )*
    };
}

impl_weight!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Errors reported by the graph algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// The requested start vertex is not in the graph
    UnknownVertex,
    /// An edge weight is below zero where only non-negative weights are
    /// allowed. `bellman_ford` accepts such graphs.
    NegativeWeight,
    /// A negative-weight cycle is reachable from the source
    NegativeCycle,
    /// A path length or tree weight does not fit in the weight type
    WeightOverflow,
    /// The algorithm needs an undirected graph
    DirectedGraph,
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::UnknownVertex => write!(f, "vertex is not in the graph"),
            GraphError::NegativeWeight => write!(f, "edge weight is negative"),
            GraphError::NegativeCycle => write!(f, "negative-weight cycle reachable from the source"),
            GraphError::WeightOverflow => write!(f, "weight sum overflows"),
            GraphError::DirectedGraph => write!(f, "graph must be undirected"),
        }
    }
}

impl std::error::Error for GraphError {}

/// One stored adjacency entry: the index of the head vertex and the weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Arc<W> {
    pub(crate) to: usize,
    pub(crate) weight: W,
}

/// Adjacency-list graph, directed or undirected
#[derive(Clone)]
pub struct Graph<V, W> {
    directed: bool,
    index: FxHashMap<V, usize>,
    vertices: Vec<V>,
    adjacency: Vec<Vec<Arc<W>>>,
    edges: usize,
}

impl<V: Clone + Eq + Hash, W: Copy> Graph<V, W> {
    /// Creates an empty graph.
    pub fn new(directed: bool) -> Self {
        Graph {
            directed,
            index: FxHashMap::default(),
            vertices: Vec::new(),
            adjacency: Vec::new(),
            edges: 0,
        }
    }

    /// Creates an empty directed graph.
    pub fn directed() -> Self {
        Self::new(true)
    }

    /// Creates an empty undirected graph.
    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// Creates a graph holding `vertices` and no edges.
    pub fn with_vertices(vertices: impl IntoIterator<Item = V>, directed: bool) -> Self {
        let mut graph = Self::new(directed);
        for v in vertices {
            graph.add_vertex(v);
        }
        graph
    }

    /// Adds `v` if it is not present yet. Returns its dense index.
    pub fn add_vertex(&mut self, v: V) -> usize {
        if let Some(&i) = self.index.get(&v) {
            return i;
        }
        let i = self.vertices.len();
        self.index.insert(v.clone(), i);
        self.vertices.push(v);
        self.adjacency.push(Vec::new());
        i
    }

    /// Adds an edge, creating either endpoint on demand.
    ///
    /// In an undirected graph the edge is stored in both directions but
    /// counted once.
    pub fn add_edge(&mut self, u: V, v: V, weight: W) {
        let u = self.add_vertex(u);
        let v = self.add_vertex(v);
        self.adjacency[u].push(Arc { to: v, weight });
        if !self.directed {
            self.adjacency[v].push(Arc { to: u, weight });
        }
        self.edges += 1;
    }

    /// Outgoing edges of `v` as `(head, weight)`; empty if `v` is unknown.
    pub fn neighbors<'a>(&'a self, v: &V) -> impl Iterator<Item = (&'a V, W)> + 'a {
        let arcs: &'a [Arc<W>] = match self.index.get(v) {
            Some(&i) => &self.adjacency[i],
            None => &[],
        };
        arcs.iter().map(move |arc| (&self.vertices[arc.to], arc.weight))
    }

    /// All vertices in insertion order.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Returns true if `v` is a vertex of the graph.
    pub fn contains(&self, v: &V) -> bool {
        self.index.contains_key(v)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges added (undirected edges count once).
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub(crate) fn index_of(&self, v: &V) -> Option<usize> {
        self.index.get(v).copied()
    }

    pub(crate) fn vertex(&self, i: usize) -> &V {
        &self.vertices[i]
    }

    pub(crate) fn arcs(&self, i: usize) -> &[Arc<W>] {
        &self.adjacency[i]
    }
}

impl<V: fmt::Debug, W> fmt::Debug for Graph<V, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("directed", &self.directed)
            .field("vertices", &self.vertices)
            .field("edges", &self.edges)
            .finish()
    }
}
