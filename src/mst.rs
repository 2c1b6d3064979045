//! Minimum spanning trees: Prim and Kruskal
//!
//! In [`prim`] the heap is keyed by the cheapest known edge into the growing
//! tree. A vertex is pushed when first discovered and afterwards only ever
//! moved up with `decrease_key`, so the heap never holds more than one entry
//! per vertex. Only the component containing the start vertex is spanned.
//!
//! [`kruskal`] scans all edges by weight and keeps those that join two
//! different components of a [`DisjointSet`]. On a disconnected graph it
//! returns a minimum spanning forest.

use crate::degree::{self, Degree};
use crate::fibonacci::FibonacciHeap;
use crate::graph::{Graph, GraphError, Weight};
use crate::traits::DecreaseKeyHeap;
use log::debug;
use std::cmp::Ordering;
use std::hash::Hash;

/// A spanning tree grown from one start vertex
pub struct SpanningTree<'g, V, W> {
    graph: &'g Graph<V, W>,
    order: Vec<usize>,
    parent: Vec<Option<usize>>,
    link: Vec<Option<W>>,
    in_tree: Vec<bool>,
    total: W,
}

impl<'g, V: Clone + Eq + Hash, W: Weight> SpanningTree<'g, V, W> {
    /// Vertices in the order they joined the tree, start vertex first.
    pub fn order(&self) -> Vec<&'g V> {
        self.order.iter().map(|&i| self.graph.vertex(i)).collect()
    }

    /// Tree edges as `(parent, vertex, weight)`, in the order they were chosen.
    pub fn edges(&self) -> Vec<(&'g V, &'g V, W)> {
        self.order
            .iter()
            .filter_map(|&v| {
                let p = self.parent[v]?;
                let w = self.link[v]?;
                Some((self.graph.vertex(p), self.graph.vertex(v), w))
            })
            .collect()
    }

    /// Sum of the weights of all tree edges.
    pub fn total_weight(&self) -> W {
        self.total
    }

    /// The vertex `v` hangs from in the tree. The start vertex has none.
    pub fn parent(&self, v: &V) -> Option<&'g V> {
        let i = self.parent[self.graph.index_of(v)?]?;
        Some(self.graph.vertex(i))
    }

    /// Returns true if `v` is part of the tree.
    pub fn contains(&self, v: &V) -> bool {
        self.graph
            .index_of(v)
            .is_some_and(|i| self.in_tree[i])
    }

    /// Number of vertices in the tree.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Runs Prim from `start` using a [`FibonacciHeap`].
///
/// # Errors
/// - [`GraphError::UnknownVertex`] if `start` is not in the graph
/// - [`GraphError::DirectedGraph`] if the graph is directed
/// - [`GraphError::WeightOverflow`] if the tree weight does not fit in `W`
pub fn prim<'g, V, W>(graph: &'g Graph<V, W>, start: &V) -> Result<SpanningTree<'g, V, W>, GraphError>
where
    V: Clone + Eq + Hash,
    W: Weight,
{
    prim_with::<FibonacciHeap<W, usize>, V, W>(graph, start)
}

/// Runs Prim from `start` with any heap that supports `decrease_key`.
pub fn prim_with<'g, H, V, W>(
    graph: &'g Graph<V, W>,
    start: &V,
) -> Result<SpanningTree<'g, V, W>, GraphError>
where
    H: DecreaseKeyHeap<usize, W>,
    V: Clone + Eq + Hash,
    W: Weight,
{
    if graph.is_directed() {
        return Err(GraphError::DirectedGraph);
    }
    let root = graph.index_of(start).ok_or(GraphError::UnknownVertex)?;
    let n = graph.vertex_count();

    let mut link: Vec<Option<W>> = vec![None; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut handles: Vec<Option<H::Handle>> = vec![None; n];
    let mut in_tree = vec![false; n];
    let mut order = Vec::new();
    let mut total = W::default();

    let mut heap = H::new();
    handles[root] = Some(heap.push_with_handle(W::default(), root));

    while let Some((_, u)) = heap.pop() {
        in_tree[u] = true;
        handles[u] = None;
        order.push(u);
        if let Some(w) = link[u] {
            total = total.checked_add(w).ok_or(GraphError::WeightOverflow)?;
        }

        for arc in graph.arcs(u) {
            let v = arc.to;
            if in_tree[v] {
                continue;
            }
            match link[v] {
                None => {
                    link[v] = Some(arc.weight);
                    parent[v] = Some(u);
                    handles[v] = Some(heap.push_with_handle(arc.weight, v));
                }
                Some(best) if arc.weight < best => {
                    let Some(handle) = &handles[v] else { continue };
                    if heap.decrease_key(handle, arc.weight).is_ok() {
                        link[v] = Some(arc.weight);
                        parent[v] = Some(u);
                    }
                }
                Some(_) => {}
            }
        }
    }

    debug!("prim: spanned {} of {} vertices", order.len(), n);

    Ok(SpanningTree {
        graph,
        order,
        parent,
        link,
        in_tree,
        total,
    })
}

/// Union-find over `0..n` with path compression and union by rank
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    // Bounded by log2(n).
    rank: Vec<Degree>,
    sets: usize,
}

impl DisjointSet {
    /// `n` singleton sets.
    pub fn new(n: usize) -> Self {
        DisjointSet {
            parent: (0..n).collect(),
            rank: vec![0; n],
            sets: n,
        }
    }

    /// Representative of the set holding `x`.
    ///
    /// # Panics
    /// If `x >= n`.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Joins the sets of `a` and `b`. Returns false if they were already one set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            Ordering::Less => self.parent[ra] = rb,
            Ordering::Greater => self.parent[rb] = ra,
            Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] = degree::checked_increment(self.rank[ra]);
            }
        }
        self.sets -= 1;
        true
    }

    /// Returns true if `a` and `b` are in the same set.
    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.sets
    }
}

/// A minimum spanning forest, one tree per connected component
pub struct SpanningForest<'g, V, W> {
    graph: &'g Graph<V, W>,
    edges: Vec<(usize, usize, W)>,
    total: W,
    components: usize,
}

impl<'g, V: Clone + Eq + Hash, W: Weight> SpanningForest<'g, V, W> {
    /// Forest edges as `(u, v, weight)` by non-decreasing weight.
    pub fn edges(&self) -> Vec<(&'g V, &'g V, W)> {
        self.edges
            .iter()
            .map(|&(u, v, w)| (self.graph.vertex(u), self.graph.vertex(v), w))
            .collect()
    }

    pub fn total_weight(&self) -> W {
        self.total
    }

    /// Number of trees, counting isolated vertices.
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Returns true if the forest is a single tree over every vertex.
    pub fn is_spanning_tree(&self) -> bool {
        self.components <= 1
    }

    /// Number of forest edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Runs Kruskal over the whole graph.
///
/// Ties between equal weights are broken by vertex insertion order, so the
/// result is deterministic. Self-loops are never chosen.
///
/// # Errors
/// - [`GraphError::DirectedGraph`] if the graph is directed
/// - [`GraphError::WeightOverflow`] if the forest weight does not fit in `W`
pub fn kruskal<V, W>(graph: &Graph<V, W>) -> Result<SpanningForest<'_, V, W>, GraphError>
where
    V: Clone + Eq + Hash,
    W: Weight,
{
    if graph.is_directed() {
        return Err(GraphError::DirectedGraph);
    }
    let n = graph.vertex_count();

    // Each undirected edge is stored twice; keep the copy with u < v.
    let mut candidates: Vec<(usize, usize, W)> = (0..n)
        .flat_map(|u| {
            graph
                .arcs(u)
                .iter()
                .filter(move |arc| u < arc.to)
                .map(move |arc| (u, arc.to, arc.weight))
        })
        .collect();
    candidates.sort_by_key(|&(u, v, w)| (w, u, v));

    let mut sets = DisjointSet::new(n);
    let mut edges = Vec::with_capacity(n.saturating_sub(1));
    let mut total = W::default();
    for (u, v, w) in candidates {
        if sets.set_count() <= 1 {
            break;
        }
        if sets.union(u, v) {
            total = total.checked_add(w).ok_or(GraphError::WeightOverflow)?;
            edges.push((u, v, w));
        }
    }

    debug!(
        "kruskal: {} edges, {} components over {} vertices",
        edges.len(),
        sets.set_count(),
        n
    );

    Ok(SpanningForest {
        graph,
        edges,
        total,
        components: sets.set_count(),
    })
}
