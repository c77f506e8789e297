//! Shared helper functions for arborescence property tests.

use std::collections::{BTreeSet, HashMap, VecDeque};

use proptest::test_runner::TestCaseError;

use crate::{Arborescence, MsaError};

/// Returns the vertices reachable from `root` along `edges`.
pub(super) fn reachable_from(root: u32, edges: &[(u32, u32)]) -> BTreeSet<u32> {
    let mut adjacency: HashMap<u32, Vec<u32>> = HashMap::new();
    for &(tail, head) in edges {
        adjacency.entry(tail).or_default().push(head);
    }
    let mut seen = BTreeSet::from([root]);
    let mut queue = VecDeque::from([root]);
    while let Some(vertex) = queue.pop_front() {
        for &next in adjacency.get(&vertex).map_or(&[][..], Vec::as_slice) {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

/// Sorted `(tail, head)` pairs of an arborescence.
pub(super) fn edge_pairs(tree: &Arborescence<u32>) -> Vec<(u32, u32)> {
    let mut pairs: Vec<_> = tree.edges().iter().map(|e| (e.tail(), e.head())).collect();
    pairs.sort_unstable();
    pairs
}

/// Converts a solver failure into a proptest failure with fixture context.
pub(super) fn solve_failure(engine: &str, error: &MsaError<u32>, context: &str) -> TestCaseError {
    TestCaseError::fail(format!("{engine} failed: {error} ({context})"))
}

/// Compares two weights that are sums of small integers.
pub(super) fn weights_match(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}
