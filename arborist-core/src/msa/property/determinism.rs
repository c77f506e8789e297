//! Determinism across repeated solves and input orderings.

use proptest::test_runner::{TestCaseError, TestCaseResult};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::{Arborescence, DirectedGraph, MsaError, edmonds, ggst};

use super::helpers::{edge_pairs, solve_failure};
use super::strategies::shuffle;
use super::types::MsaFixture;

type Engine = fn(&DirectedGraph<u32>, u32) -> Result<Arborescence<u32>, MsaError<u32>>;

/// Solving twice, or solving a shuffled copy of the input, must return the
/// same edges from each engine.
pub(super) fn run_determinism_property(fixture: &MsaFixture) -> TestCaseResult {
    let context = fixture.describe();
    let graph = fixture.graph();

    let mut rng = SmallRng::seed_from_u64(fixture.edges.len() as u64);
    let mut vertices = fixture.vertices.clone();
    let mut edges = fixture.edges.clone();
    shuffle(&mut vertices, &mut rng);
    shuffle(&mut edges, &mut rng);
    let shuffled = DirectedGraph::build(&vertices, &edges, &fixture.weights)
        .map_err(|error| TestCaseError::fail(format!("shuffled build failed: {error}")))?;

    let engines: [(&str, Engine); 2] = [("classical", edmonds), ("fast", ggst)];
    for (engine, solve) in engines {
        let runs = [&graph, &graph, &shuffled]
            .into_iter()
            .map(|input| {
                solve(input, fixture.root)
                    .map(|tree| edge_pairs(&tree))
                    .map_err(|error| solve_failure(engine, &error, &context))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if runs.windows(2).any(|pair| pair[0] != pair[1]) {
            return Err(TestCaseError::fail(format!(
                "{engine} returned different edges across runs ({context})"
            )));
        }
    }
    Ok(())
}
