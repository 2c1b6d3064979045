//! Single-source shortest paths
//!
//! [`dijkstra`] pushes each discovered vertex once with a handle; later
//! improvements go through `decrease_key` on that handle instead of pushing
//! duplicates. With a [`FibonacciHeap`] this gives the `O(E + V log V)` bound.
//!
//! [`bellman_ford`] relaxes every edge in rounds. It is `O(V E)` but accepts
//! negative weights and reports a negative cycle reachable from the source.
//!
//! # Example
//!
//! ```rust
//! use arena_fibonacci_heap::graph::Graph;
//! use arena_fibonacci_heap::shortest_paths::dijkstra;
//!
//! let mut graph = Graph::directed();
//! graph.add_edge('s', 'a', 4);
//! graph.add_edge('s', 'b', 1);
//! graph.add_edge('b', 'a', 2);
//!
//! let paths = dijkstra(&graph, &'s').unwrap();
//! assert_eq!(paths.distance(&'a'), Some(3));
//! assert_eq!(paths.path_to(&'a'), Some(vec![&'s', &'b', &'a']));
//! ```

use crate::fibonacci::FibonacciHeap;
use crate::graph::{Graph, GraphError, Weight};
use crate::traits::DecreaseKeyHeap;
use log::debug;
use std::hash::Hash;

/// Result of a shortest-path search from one source vertex
///
/// Vertices that were never reached have no distance, no parent and no path.
pub struct ShortestPaths<'g, V, W> {
    graph: &'g Graph<V, W>,
    source: usize,
    order: Vec<usize>,
    dist: Vec<Option<W>>,
    parent: Vec<Option<usize>>,
}

impl<'g, V: Clone + Eq + Hash, W: Weight> ShortestPaths<'g, V, W> {
    /// The vertex the search started from.
    pub fn source(&self) -> &'g V {
        self.graph.vertex(self.source)
    }

    /// Vertices in the order their distance became final.
    ///
    /// For [`bellman_ford`] this is the reached vertices by non-decreasing
    /// distance, ties in insertion order.
    pub fn order(&self) -> Vec<&'g V> {
        self.order.iter().map(|&i| self.graph.vertex(i)).collect()
    }

    /// Shortest distance from the source, `None` if unreachable or unknown.
    pub fn distance(&self, v: &V) -> Option<W> {
        self.dist[self.graph.index_of(v)?]
    }

    /// Predecessor of `v` on its shortest path. The source has none.
    pub fn parent(&self, v: &V) -> Option<&'g V> {
        let i = self.parent[self.graph.index_of(v)?]?;
        Some(self.graph.vertex(i))
    }

    /// Returns true if `v` was reached from the source.
    pub fn is_reachable(&self, v: &V) -> bool {
        self.distance(v).is_some()
    }

    /// The vertices on a shortest path from the source to `v`, both ends included.
    pub fn path_to(&self, v: &V) -> Option<Vec<&'g V>> {
        let target = self.graph.index_of(v)?;
        self.dist[target]?;

        let mut path = vec![target];
        let mut current = target;
        while let Some(p) = self.parent[current] {
            path.push(p);
            current = p;
        }
        path.reverse();
        Some(path.into_iter().map(|i| self.graph.vertex(i)).collect())
    }

    /// Number of vertices reached, the source included.
    pub fn reached(&self) -> usize {
        self.order.len()
    }
}

/// Runs Dijkstra from `source` using a [`FibonacciHeap`].
///
/// # Errors
/// - [`GraphError::UnknownVertex`] if `source` is not in the graph
/// - [`GraphError::NegativeWeight`] if a reachable edge has a negative weight;
///   use [`bellman_ford`] for such graphs
/// - [`GraphError::WeightOverflow`] if a path length does not fit in `W`
pub fn dijkstra<'g, V, W>(
    graph: &'g Graph<V, W>,
    source: &V,
) -> Result<ShortestPaths<'g, V, W>, GraphError>
where
    V: Clone + Eq + Hash,
    W: Weight,
{
    dijkstra_with::<FibonacciHeap<W, usize>, V, W>(graph, source)
}

/// Runs Dijkstra from `source` with any heap that supports `decrease_key`.
pub fn dijkstra_with<'g, H, V, W>(
    graph: &'g Graph<V, W>,
    source: &V,
) -> Result<ShortestPaths<'g, V, W>, GraphError>
where
    H: DecreaseKeyHeap<usize, W>,
    V: Clone + Eq + Hash,
    W: Weight,
{
    let start = graph.index_of(source).ok_or(GraphError::UnknownVertex)?;
    let n = graph.vertex_count();
    let zero = W::default();

    let mut dist: Vec<Option<W>> = vec![None; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut handles: Vec<Option<H::Handle>> = vec![None; n];
    let mut done = vec![false; n];
    let mut order = Vec::new();

    let mut heap = H::new();
    dist[start] = Some(zero);
    handles[start] = Some(heap.push_with_handle(zero, start));

    while let Some((d, u)) = heap.pop() {
        done[u] = true;
        handles[u] = None;
        order.push(u);

        for arc in graph.arcs(u) {
            if arc.weight < zero {
                return Err(GraphError::NegativeWeight);
            }
            let v = arc.to;
            if done[v] {
                continue;
            }
            let candidate = d.checked_add(arc.weight).ok_or(GraphError::WeightOverflow)?;
            match dist[v] {
                None => {
                    dist[v] = Some(candidate);
                    parent[v] = Some(u);
                    handles[v] = Some(heap.push_with_handle(candidate, v));
                }
                Some(best) if candidate < best => {
                    let Some(handle) = &handles[v] else { continue };
                    if heap.decrease_key(handle, candidate).is_ok() {
                        dist[v] = Some(candidate);
                        parent[v] = Some(u);
                    }
                }
                Some(_) => {}
            }
        }
    }

    debug!(
        "dijkstra: finalized {} of {} vertices from index {}",
        order.len(),
        n,
        start
    );

    Ok(ShortestPaths {
        graph,
        source: start,
        order,
        dist,
        parent,
    })
}

/// Runs Bellman-Ford from `source`.
///
/// Negative weights are allowed. In an undirected graph a negative edge is
/// itself a negative cycle, since it can be walked back and forth.
///
/// # Errors
/// - [`GraphError::UnknownVertex`] if `source` is not in the graph
/// - [`GraphError::NegativeCycle`] if a negative cycle is reachable from `source`
/// - [`GraphError::WeightOverflow`] if a path length does not fit in `W`
pub fn bellman_ford<'g, V, W>(
    graph: &'g Graph<V, W>,
    source: &V,
) -> Result<ShortestPaths<'g, V, W>, GraphError>
where
    V: Clone + Eq + Hash,
    W: Weight,
{
    let start = graph.index_of(source).ok_or(GraphError::UnknownVertex)?;
    let n = graph.vertex_count();

    let mut dist: Vec<Option<W>> = vec![None; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    dist[start] = Some(W::default());

    // Without a negative cycle every distance is final after n - 1 improving
    // passes, so a change on pass n means a cycle.
    let mut passes = 0usize;
    let mut settled = false;
    while passes < n {
        passes += 1;
        if !relax_pass(graph, &mut dist, &mut parent)? {
            settled = true;
            break;
        }
    }
    if !settled {
        debug!("bellman_ford: negative cycle after {} passes", passes);
        return Err(GraphError::NegativeCycle);
    }

    let mut order: Vec<usize> = (0..n).filter(|&i| dist[i].is_some()).collect();
    order.sort_by_key(|&i| (dist[i], i));

    debug!(
        "bellman_ford: reached {} of {} vertices in {} passes",
        order.len(),
        n,
        passes
    );

    Ok(ShortestPaths {
        graph,
        source: start,
        order,
        dist,
        parent,
    })
}

/// One relaxation of every edge leaving a reached vertex. Returns true if
/// any distance improved.
fn relax_pass<V, W>(
    graph: &Graph<V, W>,
    dist: &mut [Option<W>],
    parent: &mut [Option<usize>],
) -> Result<bool, GraphError>
where
    V: Clone + Eq + Hash,
    W: Weight,
{
    let mut changed = false;
    for u in 0..dist.len() {
        let Some(du) = dist[u] else { continue };
        for arc in graph.arcs(u) {
            let candidate = du.checked_add(arc.weight).ok_or(GraphError::WeightOverflow)?;
            if dist[arc.to].map_or(true, |dv| candidate < dv) {
                dist[arc.to] = Some(candidate);
                parent[arc.to] = Some(u);
                changed = true;
            }
        }
    }
    Ok(changed)
}
