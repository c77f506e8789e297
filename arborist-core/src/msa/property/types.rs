//! Fixture and shape definitions for arborescence property tests.

use std::collections::HashMap;

use test_strategy::Arbitrary;

use crate::DirectedGraph;

/// Topology used when generating a fixture.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum GraphShape {
    /// A random spanning arborescence plus roughly `0.5n` to `n` extra edges.
    #[weight(2)]
    Sparse,
    /// Every ordered pair carries an edge with probability 0.2 to 0.4.
    #[weight(2)]
    Medium,
    /// Every ordered pair carries an edge with probability 0.7 to 0.95.
    #[weight(2)]
    Dense,
    /// Weights drawn from a pool of one to three values.
    #[weight(3)]
    ManyIdentical,
    /// Cheap cycles inside groups and cheap back edges between groups, so
    /// contractions nest several levels deep.
    #[weight(3)]
    NestedCycles,
}

/// Generated input graph with every non-root vertex reachable from the root.
#[derive(Clone, Debug)]
pub(super) struct MsaFixture {
    pub vertices: Vec<u32>,
    pub edges: Vec<(u32, u32)>,
    pub weights: HashMap<(u32, u32), f64>,
    pub root: u32,
    pub shape: GraphShape,
}

impl MsaFixture {
    /// Builds the validated graph. Generators never emit malformed input.
    pub(super) fn graph(&self) -> DirectedGraph<u32> {
        DirectedGraph::build(&self.vertices, &self.edges, &self.weights)
            .expect("generated fixtures must be well formed")
    }

    /// Short description used in failure messages.
    pub(super) fn describe(&self) -> String {
        format!(
            "shape={:?}, vertices={}, edges={}, root={}",
            self.shape,
            self.vertices.len(),
            self.edges.len(),
            self.root,
        )
    }
}
