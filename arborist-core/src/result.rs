//! The arborescence returned by both solvers.

use crate::graph::{DirectedGraph, Edge, VertexId};

/// A spanning arborescence rooted at [`Self::root`].
///
/// Edges are sorted by `(head, tail)`, and every non-root vertex appears as a
/// head exactly once.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
///
/// use arborist_core::compute_msa_classical;
///
/// let weights = HashMap::from([((0, 1), 5.0), ((1, 2), 3.0), ((2, 0), 4.0)]);
/// let tree = compute_msa_classical(&[0, 1, 2], &[(0, 1), (1, 2), (2, 0)], 0, &weights)
///     .expect("every vertex is reachable");
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.parent(2), Some(1));
/// assert_eq!(tree.total_weight(), 8.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Arborescence<V> {
    root: V,
    edges: Vec<Edge<V>>,
}

impl<V: VertexId> Arborescence<V> {
    /// Builds the result from edge ids of `graph`.
    ///
    /// Ids index `graph.indexed_edges()`, which is ordered by `(head, tail)`,
    /// so sorting the ids orders the edges the same way.
    pub(crate) fn from_edge_ids(graph: &DirectedGraph<V>, root: usize, mut ids: Vec<usize>) -> Self {
        ids.sort_unstable();
        let indexed = graph.indexed_edges();
        let edges = ids
            .into_iter()
            .map(|id| graph.to_edge(&indexed[id]))
            .collect();
        Self {
            root: graph.vertex(root),
            edges,
        }
    }

    /// Returns the root vertex.
    #[must_use]
    #[rustfmt::skip]
    pub fn root(&self) -> V { self.root }

    /// Returns the tree edges ordered by `(head, tail)`.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge<V>] { &self.edges }

    /// Consumes the result and returns its edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn into_edges(self) -> Vec<Edge<V>> { self.edges }

    /// Returns the number of tree edges, one less than the vertex count.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.edges.len() }

    /// Returns `true` when the graph consisted of the root alone.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.edges.is_empty() }

    /// Sums the original weights of the tree edges.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(Edge::weight).sum()
    }

    /// Returns the tree parent of `vertex`, or `None` for the root and for
    /// vertices outside the tree.
    #[must_use]
    pub fn parent(&self, vertex: V) -> Option<V> {
        self.edges
            .binary_search_by(|edge| edge.head().cmp(&vertex))
            .ok()
            .and_then(|position| self.edges.get(position))
            .map(Edge::tail)
    }

    /// Returns `true` when `(tail, head)` is a tree edge.
    #[must_use]
    pub fn contains(&self, tail: V, head: V) -> bool {
        self.parent(head) == Some(tail)
    }
}
