//! Structural invariants of every returned arborescence.
//!
//! - `|V| - 1` edges, each an edge of the input graph with its input weight.
//! - The root has no parent; every other vertex has exactly one.
//! - Following parents from any vertex reaches the root, so the edge set is
//!   acyclic and spans the graph.

use std::collections::BTreeMap;

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{Arborescence, edmonds, ggst};

use super::helpers::{solve_failure, weights_match};
use super::types::MsaFixture;

/// Runs the structural checks against both engines.
pub(super) fn run_structural_invariants_property(fixture: &MsaFixture) -> TestCaseResult {
    let context = fixture.describe();
    let graph = fixture.graph();
    let classical = edmonds(&graph, fixture.root)
        .map_err(|error| solve_failure("classical", &error, &context))?;
    let fast = ggst(&graph, fixture.root).map_err(|error| solve_failure("fast", &error, &context))?;

    validate_arborescence(fixture, &classical)
        .map_err(|reason| TestCaseError::fail(format!("classical: {reason} ({context})")))?;
    validate_arborescence(fixture, &fast)
        .map_err(|reason| TestCaseError::fail(format!("fast: {reason} ({context})")))?;
    Ok(())
}

fn validate_arborescence(fixture: &MsaFixture, tree: &Arborescence<u32>) -> Result<(), String> {
    if tree.root() != fixture.root {
        return Err(format!("root {} differs from {}", tree.root(), fixture.root));
    }
    if tree.len() + 1 != fixture.vertices.len() {
        return Err(format!(
            "{} edges for {} vertices",
            tree.len(),
            fixture.vertices.len()
        ));
    }

    let mut parents = BTreeMap::new();
    for edge in tree.edges() {
        let expected = fixture
            .weights
            .get(&(edge.tail(), edge.head()))
            .ok_or_else(|| format!("edge ({}, {}) is not in the input", edge.tail(), edge.head()))?;
        if !weights_match(*expected, edge.weight()) {
            return Err(format!(
                "edge ({}, {}) reports weight {} instead of {expected}",
                edge.tail(),
                edge.head(),
                edge.weight()
            ));
        }
        if edge.head() == fixture.root {
            return Err("root has a parent".to_owned());
        }
        if parents.insert(edge.head(), edge.tail()).is_some() {
            return Err(format!("vertex {} has two parents", edge.head()));
        }
    }

    for &vertex in &fixture.vertices {
        let mut current = vertex;
        let mut steps = 0;
        while current != fixture.root {
            current = *parents
                .get(&current)
                .ok_or_else(|| format!("vertex {current} has no parent"))?;
            steps += 1;
            if steps > fixture.vertices.len() {
                return Err(format!("vertex {vertex} lies on a cycle"));
            }
        }
    }

    let sum: f64 = tree.edges().iter().map(|e| e.weight()).sum();
    if !weights_match(sum, tree.total_weight()) {
        return Err(format!("total weight {} differs from edge sum {sum}", tree.total_weight()));
    }
    Ok(())
}
