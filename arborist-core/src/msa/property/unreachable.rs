//! Unreachability detection.
//!
//! Cutting every edge that enters a random vertex set from outside makes
//! the set unreachable; both engines must then fail and name a vertex that
//! truly has no path from the root.

use proptest::test_runner::{TestCaseError, TestCaseResult};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{DirectedGraph, MsaError, edmonds, ggst};

use super::helpers::reachable_from;
use super::types::MsaFixture;

/// Removes the in-edges of a random non-root vertex set and checks that both
/// engines report an unreachable vertex.
pub(super) fn run_unreachable_property(fixture: &MsaFixture, seed: u64) -> TestCaseResult {
    let mut rng = SmallRng::seed_from_u64(seed);
    let candidates: Vec<u32> = fixture
        .vertices
        .iter()
        .copied()
        .filter(|&v| v != fixture.root)
        .collect();
    if candidates.is_empty() {
        return Ok(());
    }
    let mut cut: Vec<u32> = candidates
        .iter()
        .copied()
        .filter(|_| rng.gen_bool(0.25))
        .collect();
    if cut.is_empty() {
        cut.push(candidates[rng.gen_range(0..candidates.len())]);
    }

    let edges: Vec<(u32, u32)> = fixture
        .edges
        .iter()
        .copied()
        .filter(|(tail, head)| cut.contains(tail) || !cut.contains(head))
        .collect();
    let reachable = reachable_from(fixture.root, &edges);
    let graph = DirectedGraph::build(&fixture.vertices, &edges, &fixture.weights)
        .map_err(|error| TestCaseError::fail(format!("cut build failed: {error}")))?;
    let context = format!("{}, cut={cut:?}", fixture.describe());

    for (engine, outcome) in [
        ("classical", edmonds(&graph, fixture.root)),
        ("fast", ggst(&graph, fixture.root)),
    ] {
        match outcome {
            Err(MsaError::Unreachable(error)) if !reachable.contains(&error.vertex()) => {}
            Err(MsaError::Unreachable(error)) => {
                return Err(TestCaseError::fail(format!(
                    "{engine} blamed reachable vertex {} ({context})",
                    error.vertex()
                )));
            }
            Err(other) => {
                return Err(TestCaseError::fail(format!(
                    "{engine} failed with {other} instead of unreachability ({context})"
                )));
            }
            Ok(tree) => {
                return Err(TestCaseError::fail(format!(
                    "{engine} returned {} edges for a graph with unreachable vertices ({context})",
                    tree.len()
                )));
            }
        }
    }
    Ok(())
}
