//! Builder utilities for configuring arborescence solves.
//!
//! Exposes the engine selection surface used to construct [`MsaSolver`]
//! instances.

use crate::{
    error::Result,
    graph::{DirectedGraph, VertexId},
    msa,
    result::Arborescence,
};

/// Selects the engine used by [`MsaSolver::solve`].
///
/// `Auto` resolves deterministically to [`Algorithm::Fast`], which has the
/// better asymptotic bound on every input shape.
///
/// # Examples
/// ```
/// use arborist_core::Algorithm;
///
/// assert_eq!(Algorithm::Auto.resolve(), Algorithm::Fast);
/// assert_eq!(Algorithm::Classical.as_str(), "classical");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Let the library pick an engine.
    #[default]
    Auto,
    /// Level-by-level cycle contraction.
    Classical,
    /// Growth-path contraction with mergeable heaps.
    Fast,
}

impl Algorithm {
    /// Returns the concrete engine this selection runs.
    #[must_use]
    pub const fn resolve(self) -> Self {
        match self {
            Self::Auto | Self::Fast => Self::Fast,
            Self::Classical => Self::Classical,
        }
    }

    /// Returns the lowercase name used in logs and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Classical => "classical",
            Self::Fast => "fast",
        }
    }
}

/// Configures and constructs [`MsaSolver`] instances.
///
/// # Examples
/// ```
/// use arborist_core::{Algorithm, MsaSolverBuilder};
///
/// let solver = MsaSolverBuilder::new()
///     .with_algorithm(Algorithm::Classical)
///     .build();
/// assert_eq!(solver.algorithm(), Algorithm::Classical);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MsaSolverBuilder {
    algorithm: Algorithm,
}

impl MsaSolverBuilder {
    /// Creates a builder that selects [`Algorithm::Auto`].
    ///
    /// # Examples
    /// ```
    /// use arborist_core::{Algorithm, MsaSolverBuilder};
    ///
    /// assert_eq!(MsaSolverBuilder::new().algorithm(), Algorithm::Auto);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the engine to run.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Returns the currently configured engine selection.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Constructs the solver.
    #[must_use]
    pub fn build(self) -> MsaSolver {
        MsaSolver {
            algorithm: self.algorithm,
        }
    }
}

/// Runs the configured engine against validated graphs.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
///
/// use arborist_core::{DirectedGraph, MsaSolverBuilder};
///
/// let weights = HashMap::from([((0, 1), 1.0), ((1, 2), 2.0), ((2, 3), 3.0)]);
/// let graph = DirectedGraph::build(&[0, 1, 2, 3], &[(0, 1), (1, 2), (2, 3)], &weights)
///     .expect("graph is well formed");
/// let tree = MsaSolverBuilder::new()
///     .build()
///     .solve(&graph, 0)
///     .expect("chain is reachable");
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.total_weight(), 6.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MsaSolver {
    algorithm: Algorithm,
}

impl MsaSolver {
    /// Returns the engine selection this solver was built with.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Computes a minimum spanning arborescence of `graph` rooted at `root`.
    ///
    /// # Errors
    /// Propagates the errors of [`edmonds`](crate::edmonds) or
    /// [`ggst`](crate::ggst), whichever the selection resolves to.
    pub fn solve<V: VertexId>(&self, graph: &DirectedGraph<V>, root: V) -> Result<Arborescence<V>, V> {
        match self.algorithm.resolve() {
            Algorithm::Classical => msa::edmonds(graph, root),
            Algorithm::Auto | Algorithm::Fast => msa::ggst(graph, root),
        }
    }
}
