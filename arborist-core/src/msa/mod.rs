//! Minimum spanning arborescence engines.
//!
//! Two interchangeable engines compute the same optimum:
//! - [`edmonds()`] contracts every selection cycle of a level at once and
//!   re-indexes the graph between levels, `O(V * E)` worst case.
//! - [`ggst()`] grows a path of super-vertices, contracting one cycle at a
//!   time through union-find and mergeable heaps, `O(E log V)`.
//!
//! Both validate the root, wrap failures in [`MsaError`](crate::MsaError)
//! and report the same tracing events.

mod edmonds;
mod ggst;
mod heap;
mod union_find;

#[cfg(test)]
mod property;

use std::collections::HashMap;
use std::hash::BuildHasher;

use tracing::{info, instrument};

use crate::{
    error::Result,
    graph::{DirectedGraph, VertexId},
    result::Arborescence,
};

/// Chosen graph edge ids and bookkeeping shared by both engines.
#[derive(Clone, Debug)]
pub(crate) struct Solution {
    pub(crate) edge_ids: Vec<usize>,
    pub(crate) contractions: usize,
}

/// Computes a minimum spanning arborescence of `graph` rooted at `root` with
/// the level-by-level contraction algorithm.
///
/// # Errors
/// Returns [`MsaError::InvalidGraph`] when `root` is not a vertex of `graph`
/// and [`MsaError::Unreachable`] when some vertex has no path from `root`.
///
/// [`MsaError::InvalidGraph`]: crate::MsaError::InvalidGraph
/// [`MsaError::Unreachable`]: crate::MsaError::Unreachable
///
/// # Examples
/// ```
/// use std::collections::HashMap;
///
/// use arborist_core::{DirectedGraph, edmonds};
///
/// let weights = HashMap::from([((0, 1), 5.0), ((1, 2), 3.0), ((0, 2), 1.0), ((2, 0), 4.0)]);
/// let graph = DirectedGraph::build(&[0, 1, 2], &[(0, 1), (1, 2), (0, 2), (2, 0)], &weights)
///     .expect("graph is well formed");
/// let tree = edmonds(&graph, 0).expect("every vertex is reachable");
/// assert_eq!(tree.total_weight(), 6.0);
/// ```
#[instrument(
    name = "msa.classical",
    err,
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn edmonds<V: VertexId>(graph: &DirectedGraph<V>, root: V) -> Result<Arborescence<V>, V> {
    let root_index = graph.resolve_root(root)?;
    let solution = edmonds::solve(graph, root_index)?;
    Ok(finish(graph, root_index, solution, "classical"))
}

/// Computes a minimum spanning arborescence of `graph` rooted at `root` with
/// the growth-path algorithm.
///
/// Produces the same total weight as [`edmonds()`]; when several optimal
/// arborescences exist the two engines may return different ones.
///
/// # Errors
/// Returns [`MsaError::InvalidGraph`] when `root` is not a vertex of `graph`
/// and [`MsaError::Unreachable`] when some vertex has no path from `root`.
///
/// [`MsaError::InvalidGraph`]: crate::MsaError::InvalidGraph
/// [`MsaError::Unreachable`]: crate::MsaError::Unreachable
///
/// # Examples
/// ```
/// use std::collections::HashMap;
///
/// use arborist_core::{DirectedGraph, ggst};
///
/// let weights = HashMap::from([((0, 1), 5.0), ((1, 2), 3.0), ((2, 0), 4.0)]);
/// let graph = DirectedGraph::build(&[0, 1, 2], &[(0, 1), (1, 2), (2, 0)], &weights)
///     .expect("graph is well formed");
/// let tree = ggst(&graph, 0).expect("every vertex is reachable");
/// assert_eq!(tree.parent(1), Some(0));
/// assert_eq!(tree.parent(2), Some(1));
/// ```
#[instrument(
    name = "msa.fast",
    err,
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn ggst<V: VertexId>(graph: &DirectedGraph<V>, root: V) -> Result<Arborescence<V>, V> {
    let root_index = graph.resolve_root(root)?;
    let solution = ggst::solve(graph, root_index)?;
    Ok(finish(graph, root_index, solution, "fast"))
}

/// Validates the input and runs [`edmonds()`].
///
/// # Errors
/// Returns [`MsaError::InvalidGraph`] for malformed input (see
/// [`DirectedGraph::build`]) or an absent root, and
/// [`MsaError::Unreachable`] when no spanning arborescence exists.
///
/// [`MsaError::InvalidGraph`]: crate::MsaError::InvalidGraph
/// [`MsaError::Unreachable`]: crate::MsaError::Unreachable
///
/// # Examples
/// ```
/// use std::collections::HashMap;
///
/// use arborist_core::compute_msa_classical;
///
/// let weights = HashMap::from([(("a", "b"), 1.0), (("b", "c"), 1.0), (("a", "c"), 5.0)]);
/// let tree = compute_msa_classical(
///     &["a", "b", "c"],
///     &[("a", "b"), ("b", "c"), ("a", "c")],
///     "a",
///     &weights,
/// )
/// .expect("every vertex is reachable");
/// assert_eq!(tree.parent("c"), Some("b"));
/// ```
pub fn compute_msa_classical<V: VertexId, S: BuildHasher>(
    vertices: &[V],
    edges: &[(V, V)],
    root: V,
    weights: &HashMap<(V, V), f64, S>,
) -> Result<Arborescence<V>, V> {
    let graph = DirectedGraph::build(vertices, edges, weights)?;
    edmonds(&graph, root)
}

/// Validates the input and runs [`ggst()`].
///
/// # Errors
/// Returns [`MsaError::InvalidGraph`] for malformed input (see
/// [`DirectedGraph::build`]) or an absent root, and
/// [`MsaError::Unreachable`] when no spanning arborescence exists.
///
/// [`MsaError::InvalidGraph`]: crate::MsaError::InvalidGraph
/// [`MsaError::Unreachable`]: crate::MsaError::Unreachable
///
/// # Examples
/// ```
/// use std::collections::HashMap;
///
/// use arborist_core::{MsaError, compute_msa_fast};
///
/// let weights = HashMap::from([((0, 1), 1.0), ((2, 3), 1.0)]);
/// let error = compute_msa_fast(&[0, 1, 2, 3], &[(0, 1), (2, 3)], 0, &weights)
///     .expect_err("vertex 2 has no in-edge");
/// assert!(matches!(error, MsaError::Unreachable(_)));
/// ```
pub fn compute_msa_fast<V: VertexId, S: BuildHasher>(
    vertices: &[V],
    edges: &[(V, V)],
    root: V,
    weights: &HashMap<(V, V), f64, S>,
) -> Result<Arborescence<V>, V> {
    let graph = DirectedGraph::build(vertices, edges, weights)?;
    ggst(&graph, root)
}

fn finish<V: VertexId>(
    graph: &DirectedGraph<V>,
    root: usize,
    solution: Solution,
    algorithm: &'static str,
) -> Arborescence<V> {
    let contractions = solution.contractions;
    let tree = Arborescence::from_edge_ids(graph, root, solution.edge_ids);
    info!(
        algorithm,
        edges = tree.len(),
        total_weight = tree.total_weight(),
        contractions,
        "arborescence computed"
    );
    #[cfg(feature = "metrics")]
    record_solve(algorithm, contractions);
    tree
}

#[cfg(feature = "metrics")]
fn record_solve(algorithm: &'static str, contractions: usize) {
    metrics::counter!("msa_solves_total", "algorithm" => algorithm).increment(1);
    metrics::counter!("msa_contractions_total", "algorithm" => algorithm)
        .increment(u64::try_from(contractions).unwrap_or(u64::MAX));
}
