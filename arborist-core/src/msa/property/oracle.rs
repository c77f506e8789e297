//! Brute-force oracle for arborescence property verification.
//!
//! Enumerates every assignment of one in-edge to each non-root vertex and
//! keeps the cheapest assignment that forms no cycle. Exponential, so only
//! used on graphs of at most a handful of vertices.

use std::collections::HashMap;

/// Returns the minimum arborescence weight, or `None` when no spanning
/// arborescence rooted at `root` exists.
pub(super) fn brute_force_minimum(
    vertices: &[u32],
    edges: &[(u32, u32)],
    weights: &HashMap<(u32, u32), f64>,
    root: u32,
) -> Option<f64> {
    let heads: Vec<u32> = vertices.iter().copied().filter(|&v| v != root).collect();
    let candidates: Vec<Vec<(u32, f64)>> = heads
        .iter()
        .map(|&head| {
            edges
                .iter()
                .filter(|&&(tail, target)| target == head && tail != head)
                .map(|&(tail, target)| (tail, weights[&(tail, target)]))
                .collect()
        })
        .collect();
    if candidates.iter().any(Vec::is_empty) {
        return None;
    }

    let mut best: Option<f64> = None;
    let mut choice = vec![0_usize; heads.len()];
    loop {
        let parents: HashMap<u32, u32> = heads
            .iter()
            .zip(&choice)
            .zip(&candidates)
            .map(|((&head, &pick), options)| (head, options[pick].0))
            .collect();
        if reaches_root(&parents, root, vertices.len()) {
            let total: f64 = choice
                .iter()
                .zip(&candidates)
                .map(|(&pick, options)| options[pick].1)
                .sum();
            best = Some(best.map_or(total, |current| current.min(total)));
        }
        if !advance(&mut choice, &candidates) {
            return best;
        }
    }
}

/// Every vertex must reach the root by following parents within
/// `vertex_count` steps; otherwise the assignment contains a cycle.
fn reaches_root(parents: &HashMap<u32, u32>, root: u32, vertex_count: usize) -> bool {
    parents.keys().all(|&start| {
        let mut current = start;
        for _ in 0..vertex_count {
            if current == root {
                return true;
            }
            match parents.get(&current) {
                Some(&parent) => current = parent,
                None => return false,
            }
        }
        current == root
    })
}

/// Odometer-style increment over the candidate lists.
fn advance(choice: &mut [usize], candidates: &[Vec<(u32, f64)>]) -> bool {
    for (slot, options) in choice.iter_mut().zip(candidates) {
        *slot += 1;
        if *slot < options.len() {
            return true;
        }
        *slot = 0;
    }
    false
}
