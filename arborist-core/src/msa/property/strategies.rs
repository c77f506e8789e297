//! Strategy builders for arborescence property tests.
//!
//! Every generator starts from a random spanning arborescence so the root
//! reaches every vertex, then layers shape-specific extra edges on top.
//! Weights are small integers stored as `f64`, which keeps every sum exact.

use std::collections::HashMap;

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::types::{GraphShape, MsaFixture};

const MIN_VERTICES: usize = 8;
const MAX_VERTICES: usize = 48;
/// Dense graphs stay small to bound the quadratic edge count.
const DENSE_MAX_VERTICES: usize = 20;
/// Largest graph the brute-force oracle enumerates.
const ORACLE_MAX_VERTICES: usize = 6;

/// Generates fixtures across every [`GraphShape`].
pub(super) fn msa_fixture_strategy() -> impl Strategy<Value = MsaFixture> {
    (any::<GraphShape>(), any::<u64>()).prop_map(|(shape, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(shape, &mut rng)
    })
}

/// Generates small dense fixtures the oracle can enumerate.
pub(super) fn oracle_fixture_strategy() -> impl Strategy<Value = MsaFixture> {
    any::<u64>().prop_map(|seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_small(&mut rng)
    })
}

/// Generates a fixture for a specific shape.
pub(super) fn generate_fixture(shape: GraphShape, rng: &mut SmallRng) -> MsaFixture {
    match shape {
        GraphShape::Sparse => generate_sparse(rng),
        GraphShape::Medium => generate_probabilistic(rng, MAX_VERTICES, (0.2, 0.4), shape, |r| {
            f64::from(r.gen_range(1_u8..=100))
        }),
        GraphShape::Dense => {
            generate_probabilistic(rng, DENSE_MAX_VERTICES, (0.7, 0.95), shape, |r| {
                f64::from(r.gen_range(1_u8..=100))
            })
        }
        GraphShape::ManyIdentical => generate_identical(rng),
        GraphShape::NestedCycles => generate_nested_cycles(rng),
    }
}

/// Accumulates edges, keeping the first weight drawn for each pair.
struct EdgeBuilder {
    vertices: Vec<u32>,
    edges: Vec<(u32, u32)>,
    weights: HashMap<(u32, u32), f64>,
    root: u32,
}

impl EdgeBuilder {
    /// Seeds the builder with a random spanning arborescence whose edges
    /// weigh `tree_weight`.
    fn with_spanning_tree(
        vertex_count: usize,
        rng: &mut SmallRng,
        mut tree_weight: impl FnMut(&mut SmallRng) -> f64,
    ) -> Self {
        let vertices: Vec<u32> = (0..vertex_count).map(to_vertex).collect();
        let mut order = vertices.clone();
        shuffle(&mut order, rng);
        let mut builder = Self {
            root: order[0],
            vertices,
            edges: Vec::new(),
            weights: HashMap::new(),
        };
        for position in 1..order.len() {
            let parent = order[rng.gen_range(0..position)];
            let weight = tree_weight(rng);
            builder.push(parent, order[position], weight);
        }
        builder
    }

    fn push(&mut self, tail: u32, head: u32, weight: f64) {
        if tail == head || self.weights.contains_key(&(tail, head)) {
            return;
        }
        self.edges.push((tail, head));
        self.weights.insert((tail, head), weight);
    }

    fn finish(self, shape: GraphShape) -> MsaFixture {
        MsaFixture {
            vertices: self.vertices,
            edges: self.edges,
            weights: self.weights,
            root: self.root,
            shape,
        }
    }
}

fn generate_sparse(rng: &mut SmallRng) -> MsaFixture {
    let vertex_count = rng.gen_range(MIN_VERTICES..=MAX_VERTICES);
    let mut builder =
        EdgeBuilder::with_spanning_tree(vertex_count, rng, |r| f64::from(r.gen_range(1_u8..=100)));
    let extra = rng.gen_range(vertex_count / 2..=vertex_count);
    for _ in 0..extra {
        let tail = to_vertex(rng.gen_range(0..vertex_count));
        let head = to_vertex(rng.gen_range(0..vertex_count));
        let weight = f64::from(rng.gen_range(1_u8..=100));
        builder.push(tail, head, weight);
    }
    builder.finish(GraphShape::Sparse)
}

fn generate_probabilistic(
    rng: &mut SmallRng,
    max_vertices: usize,
    probability: (f64, f64),
    shape: GraphShape,
    mut weight: impl FnMut(&mut SmallRng) -> f64,
) -> MsaFixture {
    let vertex_count = rng.gen_range(MIN_VERTICES..=max_vertices);
    let probability = rng.gen_range(probability.0..=probability.1);
    let mut builder = EdgeBuilder::with_spanning_tree(vertex_count, rng, &mut weight);
    for tail in 0..vertex_count {
        for head in 0..vertex_count {
            if tail != head && rng.gen_bool(probability) {
                let drawn = weight(rng);
                builder.push(to_vertex(tail), to_vertex(head), drawn);
            }
        }
    }
    builder.finish(shape)
}

fn generate_identical(rng: &mut SmallRng) -> MsaFixture {
    let pool_size = rng.gen_range(1..=3);
    let pool: Vec<f64> = (0..pool_size)
        .map(|_| f64::from(rng.gen_range(1_u8..=5)))
        .collect();
    generate_probabilistic(
        rng,
        MAX_VERTICES,
        (0.3, 0.6),
        GraphShape::ManyIdentical,
        move |r| pool[r.gen_range(0..pool.len())],
    )
}

/// Splits the vertices into groups joined by cheap directed cycles and
/// links neighbouring groups with cheap back edges, while the spanning
/// arborescence that guarantees reachability is expensive.
fn generate_nested_cycles(rng: &mut SmallRng) -> MsaFixture {
    let vertex_count = rng.gen_range(MIN_VERTICES..=MAX_VERTICES);
    let mut builder = EdgeBuilder::with_spanning_tree(vertex_count, rng, |r| {
        f64::from(r.gen_range(60_u8..=120))
    });

    let mut groups = Vec::new();
    let mut start = 0;
    while start < vertex_count {
        let size = rng.gen_range(2..=5).min(vertex_count - start);
        groups.push(start..start + size);
        start += size;
    }

    for group in &groups {
        let members: Vec<usize> = group.clone().collect();
        for (index, &member) in members.iter().enumerate() {
            let next = members[(index + 1) % members.len()];
            let weight = f64::from(rng.gen_range(1_u8..=5));
            builder.push(to_vertex(member), to_vertex(next), weight);
        }
        if members.len() > 2 && rng.gen_bool(0.5) {
            let weight = f64::from(rng.gen_range(1_u8..=5));
            builder.push(to_vertex(members[members.len() - 1]), to_vertex(members[1]), weight);
        }
    }

    for pair in groups.windows(2) {
        let tail = rng.gen_range(pair[1].clone());
        let head = rng.gen_range(pair[0].clone());
        let weight = f64::from(rng.gen_range(5_u8..=20));
        builder.push(to_vertex(tail), to_vertex(head), weight);
        let tail = rng.gen_range(pair[0].clone());
        let head = rng.gen_range(pair[1].clone());
        let weight = f64::from(rng.gen_range(5_u8..=20));
        builder.push(to_vertex(tail), to_vertex(head), weight);
    }

    builder.finish(GraphShape::NestedCycles)
}

/// Generates a fixture small enough for the brute-force oracle.
pub(super) fn generate_small(rng: &mut SmallRng) -> MsaFixture {
    let vertex_count = rng.gen_range(2..=ORACLE_MAX_VERTICES);
    let probability = rng.gen_range(0.3..=0.9);
    let mut builder =
        EdgeBuilder::with_spanning_tree(vertex_count, rng, |r| f64::from(r.gen_range(1_u8..=9)));
    for tail in 0..vertex_count {
        for head in 0..vertex_count {
            if tail != head && rng.gen_bool(probability) {
                let weight = f64::from(rng.gen_range(1_u8..=9));
                builder.push(to_vertex(tail), to_vertex(head), weight);
            }
        }
    }
    builder.finish(GraphShape::Dense)
}

/// Fisher-Yates shuffle using the provided RNG.
pub(super) fn shuffle<T>(slice: &mut [T], rng: &mut SmallRng) {
    for i in (1..slice.len()).rev() {
        let j = rng.gen_range(0..=i);
        slice.swap(i, j);
    }
}

fn to_vertex(index: usize) -> u32 {
    u32::try_from(index).expect("generated vertex counts fit in u32")
}
