//! Immutable directed graph model shared by both arborescence engines.
//!
//! Vertices are stored in ascending order and addressed internally by their
//! dense position, so "lowest index" and "lowest vertex identifier" coincide.
//! Edges are deduplicated on `(tail, head)` and indexed by destination, which
//! is the only traversal the engines perform.

use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::ops::Range;

use crate::error::InvalidGraphError;

/// Identifier types accepted as graph vertices.
///
/// Blanket-implemented for every `Copy + Ord + Hash + Debug` type that is
/// thread-safe and `'static`, which covers integers, `char` and `&'static str`.
pub trait VertexId: Copy + Ord + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> VertexId for T where T: Copy + Ord + Hash + fmt::Debug + Send + Sync + 'static {}

/// A weighted directed edge expressed in caller vertex identifiers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge<V> {
    tail: V,
    head: V,
    weight: f64,
}

impl<V: VertexId> Edge<V> {
    /// Creates an edge from `tail` to `head`.
    #[must_use]
    pub const fn new(tail: V, head: V, weight: f64) -> Self {
        Self { tail, head, weight }
    }

    /// Returns the source vertex.
    #[must_use]
    #[rustfmt::skip]
    pub const fn tail(&self) -> V { self.tail }

    /// Returns the destination vertex.
    #[must_use]
    #[rustfmt::skip]
    pub const fn head(&self) -> V { self.head }

    /// Returns the original edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> f64 { self.weight }
}

/// Edge stored against dense vertex indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct IndexedEdge {
    pub(crate) tail: usize,
    pub(crate) head: usize,
    pub(crate) weight: f64,
}

/// A validated, read-only weighted digraph.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
///
/// use arborist_core::DirectedGraph;
///
/// let weights = HashMap::from([((0, 1), 2.0), ((1, 2), 1.5)]);
/// let graph = DirectedGraph::build(&[0, 1, 2], &[(0, 1), (1, 2)], &weights)
///     .expect("graph is well formed");
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.weight(1, 2), Some(1.5));
/// assert_eq!(graph.in_edges(2).count(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct DirectedGraph<V> {
    vertices: Vec<V>,
    edges: Vec<IndexedEdge>,
    in_offsets: Vec<usize>,
}

impl<V: VertexId> DirectedGraph<V> {
    /// Validates the input and builds the in-edge index.
    ///
    /// Duplicate vertices and duplicate `(tail, head)` pairs are collapsed.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidGraphError`] when:
    /// - `vertices` is empty
    /// - an edge references a vertex outside `vertices`
    /// - an edge is a self-loop
    /// - an edge has no entry in `weights`, or its weight is non-finite
    pub fn build<S: BuildHasher>(
        vertices: &[V],
        edges: &[(V, V)],
        weights: &HashMap<(V, V), f64, S>,
    ) -> Result<Self, InvalidGraphError<V>> {
        if vertices.is_empty() {
            return Err(InvalidGraphError::EmptyGraph);
        }

        let mut sorted = vertices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut indexed = edges
            .iter()
            .map(|&(tail, head)| validate_edge(&sorted, tail, head, weights))
            .collect::<Result<Vec<_>, _>>()?;
        indexed.sort_unstable_by(|left, right| {
            left.head
                .cmp(&right.head)
                .then_with(|| left.tail.cmp(&right.tail))
        });
        indexed.dedup_by(|right, left| left.head == right.head && left.tail == right.tail);

        let in_offsets = build_in_offsets(sorted.len(), &indexed);

        Ok(Self {
            vertices: sorted,
            edges: indexed,
            in_offsets,
        })
    }

    /// Returns the number of distinct vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.vertices.len() }

    /// Returns the number of distinct edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Returns the vertices in ascending order.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertices(&self) -> &[V] { &self.vertices }

    /// Returns `true` when `vertex` belongs to the graph.
    #[must_use]
    pub fn contains_vertex(&self, vertex: V) -> bool {
        self.index_of(vertex).is_some()
    }

    /// Returns the weight of the edge `(tail, head)` if it exists.
    #[must_use]
    pub fn weight(&self, tail: V, head: V) -> Option<f64> {
        let tail = self.index_of(tail)?;
        let head = self.index_of(head)?;
        let range = self.in_edge_range(head);
        let incoming = self.edges.get(range)?;
        incoming
            .binary_search_by(|edge| edge.tail.cmp(&tail))
            .ok()
            .and_then(|position| incoming.get(position))
            .map(|edge| edge.weight)
    }

    /// Iterates the edges whose destination is `head`, ordered by tail.
    ///
    /// Unknown vertices yield an empty iterator.
    pub fn in_edges(&self, head: V) -> impl Iterator<Item = Edge<V>> + '_ {
        let range = self
            .index_of(head)
            .map_or(0..0, |index| self.in_edge_range(index));
        self.edges
            .get(range)
            .unwrap_or_default()
            .iter()
            .map(|edge| self.to_edge(edge))
    }

    pub(crate) fn index_of(&self, vertex: V) -> Option<usize> {
        self.vertices.binary_search(&vertex).ok()
    }

    pub(crate) fn resolve_root(&self, root: V) -> Result<usize, InvalidGraphError<V>> {
        self.index_of(root)
            .ok_or(InvalidGraphError::RootNotFound { root })
    }

    /// Maps a dense index back to its vertex. Indices always come from this
    /// graph, so the lookup cannot miss.
    pub(crate) fn vertex(&self, index: usize) -> V {
        self.vertices[index]
    }

    /// Edges sorted by `(head, tail)`; positions double as edge ids.
    pub(crate) fn indexed_edges(&self) -> &[IndexedEdge] {
        &self.edges
    }

    pub(crate) fn in_edge_range(&self, head: usize) -> Range<usize> {
        self.in_offsets[head]..self.in_offsets[head + 1]
    }

    pub(crate) fn to_edge(&self, edge: &IndexedEdge) -> Edge<V> {
        Edge::new(self.vertex(edge.tail), self.vertex(edge.head), edge.weight)
    }
}

fn validate_edge<V: VertexId, S: BuildHasher>(
    sorted: &[V],
    tail: V,
    head: V,
    weights: &HashMap<(V, V), f64, S>,
) -> Result<IndexedEdge, InvalidGraphError<V>> {
    let lookup = |vertex: V| {
        sorted
            .binary_search(&vertex)
            .map_err(|_| InvalidGraphError::UnknownVertex { tail, head, vertex })
    };
    let tail_index = lookup(tail)?;
    let head_index = lookup(head)?;

    if tail_index == head_index {
        return Err(InvalidGraphError::SelfLoop { vertex: tail });
    }

    let weight = *weights
        .get(&(tail, head))
        .ok_or(InvalidGraphError::MissingWeight { tail, head })?;
    if !weight.is_finite() {
        return Err(InvalidGraphError::NonFiniteWeight { tail, head, weight });
    }

    Ok(IndexedEdge {
        tail: tail_index,
        head: head_index,
        weight,
    })
}

/// Builds CSR offsets for edges sorted by head.
fn build_in_offsets(vertex_count: usize, edges: &[IndexedEdge]) -> Vec<usize> {
    let mut offsets = vec![0; vertex_count + 1];
    for edge in edges {
        offsets[edge.head + 1] += 1;
    }
    for index in 0..vertex_count {
        offsets[index + 1] += offsets[index];
    }
    offsets
}
