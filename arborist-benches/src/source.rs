//! Synthetic weighted digraphs for benchmarking.
//!
//! Every graph is seeded from a random spanning arborescence so the root
//! reaches all vertices, then densified with extra random edges. Weights are
//! integers in `1..=1000` stored as `f64`.

use std::collections::HashMap;
use std::fmt;

use arborist_core::{DirectedGraph, MsaError};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::SmallRng};

const MAX_WEIGHT: u32 = 1_000;

/// Errors that may occur during synthetic graph generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested vertex count was zero.
    #[error("vertex count must be greater than zero")]
    ZeroVertices,
    /// The requested vertex count does not fit in a `u64` identifier.
    #[error("vertex count {0} exceeds the identifier range")]
    TooManyVertices(usize),
}

/// Edge density of a generated graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Density {
    /// About three in-edges per vertex.
    Sparse,
    /// About nine in-edges per vertex.
    Medium,
    /// Every ordered pair of distinct vertices.
    Dense,
}

impl Density {
    /// Random extra in-edges drawn per vertex, on top of the spanning tree.
    const fn extra_in_edges(self) -> usize {
        match self {
            Self::Sparse => 2,
            Self::Medium => 8,
            Self::Dense => 0,
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sparse => "sparse",
            Self::Medium => "medium",
            Self::Dense => "dense",
        })
    }
}

/// Configuration for synthetic graph generation.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of vertices to generate.
    pub vertex_count: usize,
    /// Edge density.
    pub density: Density,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A generated graph in the shape the solvers accept.
///
/// # Examples
///
/// ```
/// use arborist_benches::source::{Density, SyntheticGraph, SyntheticGraphConfig};
///
/// let config = SyntheticGraphConfig { vertex_count: 10, density: Density::Sparse, seed: 7 };
/// let graph = SyntheticGraph::generate(&config).expect("valid config");
/// assert_eq!(graph.vertices().len(), 10);
/// assert!(graph.edges().len() >= 9);
/// ```
#[derive(Clone, Debug)]
pub struct SyntheticGraph {
    vertices: Vec<u64>,
    edges: Vec<(u64, u64)>,
    weights: HashMap<(u64, u64), f64>,
    root: u64,
}

impl SyntheticGraph {
    /// Generates a graph from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::ZeroVertices`] for an empty request and
    /// [`SyntheticError::TooManyVertices`] when ids would overflow `u64`.
    pub fn generate(config: &SyntheticGraphConfig) -> Result<Self, SyntheticError> {
        if config.vertex_count == 0 {
            return Err(SyntheticError::ZeroVertices);
        }
        let count = u64::try_from(config.vertex_count)
            .map_err(|_| SyntheticError::TooManyVertices(config.vertex_count))?;

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let vertices: Vec<u64> = (0..count).collect();
        let mut order = vertices.clone();
        order.shuffle(&mut rng);

        let mut graph = Self {
            root: order.first().copied().unwrap_or_default(),
            vertices,
            edges: Vec::new(),
            weights: HashMap::new(),
        };
        for (position, &head) in order.iter().enumerate().skip(1) {
            if let Some(&tail) = order.get(rng.gen_range(0..position)) {
                graph.push(tail, head, &mut rng);
            }
        }

        match config.density {
            Density::Dense => {
                for tail in 0..count {
                    for head in 0..count {
                        graph.push(tail, head, &mut rng);
                    }
                }
            }
            density => {
                for head in 0..count {
                    for _ in 0..density.extra_in_edges() {
                        let tail = rng.gen_range(0..count);
                        graph.push(tail, head, &mut rng);
                    }
                }
            }
        }
        Ok(graph)
    }

    fn push(&mut self, tail: u64, head: u64, rng: &mut SmallRng) {
        if tail == head || self.weights.contains_key(&(tail, head)) {
            return;
        }
        self.edges.push((tail, head));
        self.weights
            .insert((tail, head), f64::from(rng.gen_range(1..=MAX_WEIGHT)));
    }

    /// Returns the vertex identifiers.
    #[must_use]
    pub fn vertices(&self) -> &[u64] {
        &self.vertices
    }

    /// Returns the edge list without duplicates.
    #[must_use]
    pub fn edges(&self) -> &[(u64, u64)] {
        &self.edges
    }

    /// Returns the weight of every edge.
    #[must_use]
    pub const fn weights(&self) -> &HashMap<(u64, u64), f64> {
        &self.weights
    }

    /// Returns the root of the seeding arborescence.
    #[must_use]
    pub const fn root(&self) -> u64 {
        self.root
    }

    /// Validates and indexes the graph for repeated solving.
    ///
    /// # Errors
    ///
    /// Returns [`MsaError::InvalidGraph`] if validation fails, which a
    /// generated graph never triggers.
    pub fn build(&self) -> Result<DirectedGraph<u64>, MsaError<u64>> {
        Ok(DirectedGraph::build(&self.vertices, &self.edges, &self.weights)?)
    }
}
