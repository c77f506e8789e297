//! Chu–Liu/Edmonds minimum arborescence by repeated cycle contraction.
//!
//! Each round selects the cheapest in-edge of every non-root vertex. If the
//! selection is acyclic it is optimal. Otherwise every cycle is collapsed into
//! a super-vertex, edges entering a cycle are re-weighted by the cost of the
//! cycle edge they would displace, and the round repeats on the smaller graph.
//! Rounds are kept on an explicit stack and unwound afterwards, restoring each
//! cycle minus the edge displaced by the chosen entry.

use std::cmp::Ordering;

use tracing::debug;

use crate::error::UnreachableVertexError;
use crate::graph::{DirectedGraph, VertexId};

use super::Solution;

/// Edge of one contraction level.
#[derive(Clone, Copy, Debug)]
struct LevelEdge {
    tail: usize,
    head: usize,
    /// Weight reduced by every contraction the head has been folded into.
    weight: f64,
    /// Index of the edge this one was derived from on the level below; a
    /// graph edge id on the first level.
    origin: usize,
    /// Tail of the underlying graph edge, for tie-breaking.
    source_tail: usize,
    /// Id of the underlying graph edge, for tie-breaking.
    graph_edge: usize,
}

impl LevelEdge {
    /// Deterministic selection order: reduced weight, then lowest original
    /// tail, then lowest graph edge id.
    fn precedence(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.source_tail.cmp(&other.source_tail))
            .then_with(|| self.graph_edge.cmp(&other.graph_edge))
    }
}

struct Level {
    vertex_count: usize,
    root: usize,
    edges: Vec<LevelEdge>,
    /// Lowest graph vertex folded into each level vertex.
    witness: Vec<usize>,
}

/// What a contraction discarded, kept until the level is expanded again.
struct ContractionRecord {
    edges: Vec<LevelEdge>,
    /// Cycle each level vertex belongs to, if any.
    cycle_of: Vec<Option<usize>>,
    /// Members of each cycle paired with their selected in-edge.
    cycles: Vec<Vec<(usize, usize)>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unseen,
    Walk(usize),
    Done,
}

/// Computes the minimum arborescence of `graph` rooted at the dense index
/// `root`, returning graph edge ids.
pub(crate) fn solve<V: VertexId>(
    graph: &DirectedGraph<V>,
    root: usize,
) -> Result<Solution, UnreachableVertexError<V>> {
    let mut level = initial_level(graph, root);
    let mut stack: Vec<ContractionRecord> = Vec::new();

    let selected = loop {
        let selected = select_min_in_edges(&level)
            .map_err(|vertex| UnreachableVertexError::new(graph.vertex(level.witness[vertex])))?;
        let cycles = find_cycles(&level, &selected);
        if cycles.is_empty() {
            break selected;
        }

        let (next, record) = contract(&level, &selected, cycles);
        debug!(
            depth = stack.len(),
            cycles = record.cycles.len(),
            vertices = next.vertex_count,
            edges = next.edges.len(),
            "contracted selection cycles"
        );
        stack.push(record);
        level = next;
    };

    let contractions = stack.iter().map(|record| record.cycles.len()).sum();
    let mut chosen: Vec<usize> = selected.into_iter().flatten().collect();
    let mut upper = level.edges;
    while let Some(record) = stack.pop() {
        chosen = expand(&record, &upper, &chosen);
        upper = record.edges;
    }

    let edge_ids = chosen.into_iter().map(|index| upper[index].origin).collect();
    Ok(Solution {
        edge_ids,
        contractions,
    })
}

/// Copies the graph edges, dropping every edge into the root.
fn initial_level<V: VertexId>(graph: &DirectedGraph<V>, root: usize) -> Level {
    let edges = graph
        .indexed_edges()
        .iter()
        .enumerate()
        .filter(|(_, edge)| edge.head != root)
        .map(|(id, edge)| LevelEdge {
            tail: edge.tail,
            head: edge.head,
            weight: edge.weight,
            origin: id,
            source_tail: edge.tail,
            graph_edge: id,
        })
        .collect();
    Level {
        vertex_count: graph.vertex_count(),
        root,
        edges,
        witness: (0..graph.vertex_count()).collect(),
    }
}

/// Picks the cheapest in-edge of every non-root vertex, or reports the first
/// vertex that has none.
fn select_min_in_edges(level: &Level) -> Result<Vec<Option<usize>>, usize> {
    let mut best: Vec<Option<usize>> = vec![None; level.vertex_count];
    for (index, edge) in level.edges.iter().enumerate() {
        let slot = &mut best[edge.head];
        let replace = match *slot {
            None => true,
            Some(current) => edge.precedence(&level.edges[current]).is_lt(),
        };
        if replace {
            *slot = Some(index);
        }
    }

    match (0..level.vertex_count).find(|&vertex| vertex != level.root && best[vertex].is_none()) {
        Some(vertex) => Err(vertex),
        None => Ok(best),
    }
}

/// Finds every cycle in the functional graph `vertex -> tail(selected[vertex])`.
fn find_cycles(level: &Level, selected: &[Option<usize>]) -> Vec<Vec<usize>> {
    let predecessor =
        |vertex: usize| selected[vertex].map(|index| level.edges[index].tail);
    let mut marks = vec![Mark::Unseen; level.vertex_count];
    marks[level.root] = Mark::Done;
    let mut cycles = Vec::new();

    for start in 0..level.vertex_count {
        let mut current = start;
        while marks[current] == Mark::Unseen {
            marks[current] = Mark::Walk(start);
            match predecessor(current) {
                Some(next) => current = next,
                None => break,
            }
        }

        if marks[current] == Mark::Walk(start) {
            let mut members = vec![current];
            let mut member = current;
            while let Some(next) = predecessor(member).filter(|&next| next != current) {
                members.push(next);
                member = next;
            }
            cycles.push(members);
        }

        let mut current = start;
        while marks[current] == Mark::Walk(start) {
            marks[current] = Mark::Done;
            if let Some(next) = predecessor(current) {
                current = next;
            }
        }
    }

    cycles
}

/// Collapses each cycle into one vertex and re-weights the edges entering it.
fn contract(
    level: &Level,
    selected: &[Option<usize>],
    cycles: Vec<Vec<usize>>,
) -> (Level, ContractionRecord) {
    let mut component: Vec<Option<usize>> = vec![None; level.vertex_count];
    let mut cycle_of: Vec<Option<usize>> = vec![None; level.vertex_count];
    let mut next_count = 0;

    let mut recorded = Vec::with_capacity(cycles.len());
    for (cycle, members) in cycles.into_iter().enumerate() {
        let mut with_edges = Vec::with_capacity(members.len());
        for member in members {
            component[member] = Some(next_count);
            cycle_of[member] = Some(cycle);
            if let Some(edge) = selected[member] {
                with_edges.push((member, edge));
            }
        }
        recorded.push(with_edges);
        next_count += 1;
    }

    let component: Vec<usize> = component
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| {
                next_count += 1;
                next_count - 1
            })
        })
        .collect();

    let mut witness = vec![usize::MAX; next_count];
    for (vertex, &target) in component.iter().enumerate() {
        witness[target] = witness[target].min(level.witness[vertex]);
    }

    let edges = level
        .edges
        .iter()
        .enumerate()
        .filter_map(|(index, edge)| {
            let tail = component[edge.tail];
            let head = component[edge.head];
            if tail == head {
                return None;
            }
            let weight = match (cycle_of[edge.head], selected[edge.head]) {
                (Some(_), Some(displaced)) => edge.weight - level.edges[displaced].weight,
                _ => edge.weight,
            };
            Some(LevelEdge {
                tail,
                head,
                weight,
                origin: index,
                ..*edge
            })
        })
        .collect();

    let next = Level {
        vertex_count: next_count,
        root: component[level.root],
        edges,
        witness,
    };
    let record = ContractionRecord {
        edges: level.edges.clone(),
        cycle_of,
        cycles: recorded,
    };
    (next, record)
}

/// Maps a selection on the contracted level back onto `record`'s level,
/// reopening each cycle at the member its entering edge lands on.
fn expand(record: &ContractionRecord, upper: &[LevelEdge], chosen: &[usize]) -> Vec<usize> {
    let mut entered: Vec<Option<usize>> = vec![None; record.cycles.len()];
    let mut lower = Vec::with_capacity(record.cycle_of.len());

    for &index in chosen {
        let origin = upper[index].origin;
        let head = record.edges[origin].head;
        if let Some(cycle) = record.cycle_of[head] {
            entered[cycle] = Some(head);
        }
        lower.push(origin);
    }

    for (cycle, members) in record.cycles.iter().enumerate() {
        lower.extend(
            members
                .iter()
                .filter(|&&(member, _)| entered[cycle] != Some(member))
                .map(|&(_, edge)| edge),
        );
    }

    lower
}
