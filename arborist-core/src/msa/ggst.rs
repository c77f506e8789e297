//! Growth-path minimum arborescence (Gabow, Galil, Spencer and Tarjan).
//!
//! A path of super-vertices is grown backwards from an unsettled vertex by
//! repeatedly taking the cheapest in-edge of the path head. When that edge
//! leaves a vertex already on the path, the closed suffix is contracted: the
//! union-find merges its vertices, their heaps are melded, and growth resumes
//! from the merged vertex. When the edge leaves a settled vertex (or the root)
//! every edge on the path becomes final.
//!
//! Reduced weights are never written back to the graph. Selecting an edge of
//! reduced weight `w` for a super-vertex subtracts `w` from the rest of its
//! heap in `O(1)`, which is exactly the re-weighting of the classical
//! algorithm applied lazily.
//!
//! Contractions are recorded in a forest whose leaves are graph vertices.
//! Expansion starts from the top-level nodes, most recent contraction first:
//! the edge entering a node serves every node on the way down to its head
//! leaf, and each sibling off that way is expanded with its own cycle edge.

use tracing::{debug, trace};

use crate::error::UnreachableVertexError;
use crate::graph::{DirectedGraph, IndexedEdge, VertexId};

use super::Solution;
use super::heap::{HeapArena, HeapEntry, IncidentHeap};
use super::union_find::UnionFind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Fresh,
    OnPath,
    Settled,
}

/// One tentatively selected edge of the growth path.
#[derive(Clone, Copy, Debug)]
struct PathStep {
    /// Union-find representative of the super-vertex the edge enters.
    vertex: usize,
    /// Forest node standing for that super-vertex.
    node: usize,
    edge: usize,
}

/// Contraction history: leaves `0..leaves` are graph vertices, every later
/// node is one contracted cycle.
#[derive(Debug)]
struct ContractionForest {
    leaves: usize,
    parent: Vec<Option<usize>>,
    /// Edge selected to enter each node: its cycle edge, or its final edge
    /// for top-level nodes.
    entering: Vec<Option<usize>>,
    /// Cycle members of every non-leaf node, in path order.
    cycles: Vec<Vec<usize>>,
}

impl ContractionForest {
    fn new(leaves: usize) -> Self {
        Self {
            leaves,
            parent: vec![None; leaves],
            entering: vec![None; leaves],
            cycles: Vec::new(),
        }
    }

    fn contractions(&self) -> usize {
        self.cycles.len()
    }

    /// Records a cycle whose members were entered by the paired edges and
    /// returns the new node.
    fn add_cycle(&mut self, members: &[PathStep]) -> usize {
        let node = self.parent.len();
        self.parent.push(None);
        self.entering.push(None);
        for step in members {
            self.parent[step.node] = Some(node);
            self.entering[step.node] = Some(step.edge);
        }
        self.cycles
            .push(members.iter().map(|step| step.node).collect());
        node
    }

    fn finalise(&mut self, step: PathStep) {
        self.entering[step.node] = Some(step.edge);
    }

    fn children(&self, node: usize) -> &[usize] {
        node.checked_sub(self.leaves)
            .and_then(|cycle| self.cycles.get(cycle))
            .map_or(&[], Vec::as_slice)
    }

    /// Unfolds the forest into one entering edge per non-root vertex.
    fn expand(&self, edges: &[IndexedEdge]) -> Vec<usize> {
        let mut removed = vec![false; self.parent.len()];
        let mut pending: Vec<usize> = (0..self.parent.len())
            .filter(|&node| self.parent[node].is_none())
            .collect();
        let mut chosen = Vec::with_capacity(self.leaves.saturating_sub(1));

        while let Some(node) = pending.pop() {
            let Some(edge) = self.entering[node] else {
                continue;
            };
            chosen.push(edge);

            let mut current = edges[edge].head;
            loop {
                removed[current] = true;
                pending.extend(
                    self.children(current)
                        .iter()
                        .copied()
                        .filter(|&child| !removed[child]),
                );
                if current == node {
                    break;
                }
                match self.parent[current] {
                    Some(parent) => current = parent,
                    None => break,
                }
            }
        }

        chosen
    }
}

/// Computes the minimum arborescence of `graph` rooted at the dense index
/// `root`, returning graph edge ids.
pub(crate) fn solve<V: VertexId>(
    graph: &DirectedGraph<V>,
    root: usize,
) -> Result<Solution, UnreachableVertexError<V>> {
    let vertex_count = graph.vertex_count();
    let mut arena = HeapArena::with_capacity(graph.edge_count());
    let mut heaps: Vec<IncidentHeap> = (0..vertex_count).map(|_| IncidentHeap::default()).collect();
    for (id, edge) in graph.indexed_edges().iter().enumerate() {
        if edge.head != root {
            heaps[edge.head].insert(
                &mut arena,
                HeapEntry {
                    edge: id,
                    tail: edge.tail,
                    weight: edge.weight,
                },
            );
        }
    }

    let mut sets = UnionFind::new(vertex_count);
    let mut forest = ContractionForest::new(vertex_count);
    let mut node_of: Vec<usize> = (0..vertex_count).collect();
    let mut status = vec![Status::Fresh; vertex_count];
    status[root] = Status::Settled;
    let mut path: Vec<PathStep> = Vec::new();

    for start in 0..vertex_count {
        let mut head = sets.find(start);
        while status[head] != Status::Settled {
            let entry = heaps[head]
                .extract_min(&mut arena, |candidate| sets.find(candidate.tail) == head)
                .ok_or_else(|| UnreachableVertexError::new(graph.vertex(head)))?;
            heaps[head].add_to_all(&mut arena, -entry.weight);
            status[head] = Status::OnPath;
            path.push(PathStep {
                vertex: head,
                node: node_of[head],
                edge: entry.edge,
            });

            let tail = sets.find(entry.tail);
            head = if status[tail] == Status::OnPath {
                contract_suffix(
                    tail,
                    &mut path,
                    &mut Workspace {
                        arena: &mut arena,
                        heaps: &mut heaps,
                        sets: &mut sets,
                        forest: &mut forest,
                        node_of: &mut node_of,
                        status: &mut status,
                    },
                )
            } else {
                tail
            };
        }

        if !path.is_empty() {
            trace!(start, length = path.len(), "settled growth path");
        }
        for step in path.drain(..) {
            forest.finalise(step);
            status[step.vertex] = Status::Settled;
        }
    }

    let passive: usize = heaps.iter().map(|heap| heap.passive().len()).sum();
    debug!(
        contractions = forest.contractions(),
        super_vertices = sets.sets(),
        passive,
        "growth paths exhausted"
    );

    Ok(Solution {
        edge_ids: forest.expand(graph.indexed_edges()),
        contractions: forest.contractions(),
    })
}

/// Mutable per-solve state touched by a contraction.
struct Workspace<'a> {
    arena: &'a mut HeapArena,
    heaps: &'a mut [IncidentHeap],
    sets: &'a mut UnionFind,
    forest: &'a mut ContractionForest,
    node_of: &'a mut [usize],
    status: &'a mut [Status],
}

/// Contracts the path suffix that starts at `tail` into one super-vertex and
/// returns its representative.
fn contract_suffix(tail: usize, path: &mut Vec<PathStep>, state: &mut Workspace<'_>) -> usize {
    let start = path
        .iter()
        .rposition(|step| step.vertex == tail)
        .unwrap_or(0);
    let members = path.split_off(start);

    let mut merged = IncidentHeap::default();
    let mut representative = tail;
    for step in &members {
        merged.merge(state.arena, std::mem::take(&mut state.heaps[step.vertex]));
        state.status[step.vertex] = Status::Fresh;
        representative = state.sets.union(representative, step.vertex);
    }

    let node = state.forest.add_cycle(&members);
    state.node_of[representative] = node;
    debug!(
        size = members.len(),
        representative,
        candidates = merged.len(),
        cheapest = merged.peek(state.arena).map(|entry| entry.weight),
        "contracted growth-path cycle"
    );
    state.heaps[representative] = merged;
    representative
}
