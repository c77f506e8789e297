//! Mergeable priority queues of candidate in-edges for the growth-path engine.
//!
//! Every super-vertex owns an [`IncidentHeap`] handle; the nodes themselves
//! live in one [`HeapArena`] per solve so that merging two super-vertices is a
//! pointer operation. The heaps are leftist trees: merge and extract are
//! `O(log n)` worst case. Adding a constant to every key of a heap only tags
//! its root; tags are pushed one level down whenever a node's children are
//! about to be inspected.

use std::cmp::Ordering;

/// A candidate in-edge and its current reduced weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct HeapEntry {
    /// Graph edge id.
    pub(super) edge: usize,
    /// Dense index of the edge's tail, used to break weight ties and to
    /// detect self-loops after contraction.
    pub(super) tail: usize,
    /// Weight after every offset applied to the owning heap.
    pub(super) weight: f64,
}

impl HeapEntry {
    fn precedence(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.tail.cmp(&other.tail))
            .then_with(|| self.edge.cmp(&other.edge))
    }
}

#[derive(Clone, Debug)]
struct Node {
    entry: HeapEntry,
    /// Offset already applied to `entry` but not yet to the children.
    pending: f64,
    left: Option<usize>,
    right: Option<usize>,
    /// Length of the right spine (null path length).
    rank: u32,
}

/// Node storage shared by every heap of one solve.
#[derive(Debug, Default)]
pub(super) struct HeapArena {
    nodes: Vec<Node>,
}

impl HeapArena {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    fn allocate(&mut self, entry: HeapEntry) -> usize {
        self.nodes.push(Node {
            entry,
            pending: 0.0,
            left: None,
            right: None,
            rank: 1,
        });
        self.nodes.len() - 1
    }

    fn rank(&self, node: Option<usize>) -> u32 {
        node.map_or(0, |index| self.nodes[index].rank)
    }

    fn apply(&mut self, node: usize, delta: f64) {
        let target = &mut self.nodes[node];
        target.entry.weight += delta;
        target.pending += delta;
    }

    fn push_down(&mut self, node: usize) {
        let Node {
            pending,
            left,
            right,
            ..
        } = self.nodes[node];
        if pending == 0.0 {
            return;
        }
        for child in [left, right].into_iter().flatten() {
            self.apply(child, pending);
        }
        self.nodes[node].pending = 0.0;
    }

    /// Melds two leftist trees whose roots carry up-to-date keys.
    fn meld(&mut self, first: Option<usize>, second: Option<usize>) -> Option<usize> {
        let (first, second) = match (first, second) {
            (None, only) | (only, None) => return only,
            (Some(first), Some(second)) => (first, second),
        };
        let (top, other) = if self.nodes[second]
            .entry
            .precedence(&self.nodes[first].entry)
            .is_lt()
        {
            (second, first)
        } else {
            (first, second)
        };

        self.push_down(top);
        let right = self.meld(self.nodes[top].right, Some(other));
        let left = self.nodes[top].left;
        let (left, right) = if self.rank(left) < self.rank(right) {
            (right, left)
        } else {
            (left, right)
        };
        let rank = self.rank(right) + 1;
        let node = &mut self.nodes[top];
        node.left = left;
        node.right = right;
        node.rank = rank;
        Some(top)
    }
}

/// Candidate in-edges of one super-vertex.
///
/// Active edges sit in the heap; edges discovered to be self-loops of the
/// super-vertex are moved to the passive pool when they surface.
#[derive(Debug, Default)]
pub(super) struct IncidentHeap {
    root: Option<usize>,
    len: usize,
    passive: Vec<usize>,
}

impl IncidentHeap {
    pub(super) fn insert(&mut self, arena: &mut HeapArena, entry: HeapEntry) {
        let node = arena.allocate(entry);
        self.root = arena.meld(self.root, Some(node));
        self.len += 1;
    }

    /// Returns the cheapest active entry without removing it.
    pub(super) fn peek(&self, arena: &HeapArena) -> Option<HeapEntry> {
        self.root.map(|root| arena.nodes[root].entry)
    }

    /// Removes and returns the cheapest entry that is not a self-loop.
    ///
    /// Entries rejected by `is_self_loop` are moved to the passive pool.
    pub(super) fn extract_min(
        &mut self,
        arena: &mut HeapArena,
        mut is_self_loop: impl FnMut(&HeapEntry) -> bool,
    ) -> Option<HeapEntry> {
        while let Some(root) = self.root {
            arena.push_down(root);
            let Node {
                entry, left, right, ..
            } = arena.nodes[root];
            self.root = arena.meld(left, right);
            self.len -= 1;
            if is_self_loop(&entry) {
                self.passive.push(entry.edge);
                continue;
            }
            return Some(entry);
        }
        None
    }

    /// Adds `delta` to every active key in `O(1)`.
    pub(super) fn add_to_all(&mut self, arena: &mut HeapArena, delta: f64) {
        if let Some(root) = self.root {
            arena.apply(root, delta);
        }
    }

    /// Absorbs `other`, leaving the union of both active sets and both
    /// passive pools in `self`.
    pub(super) fn merge(&mut self, arena: &mut HeapArena, mut other: Self) {
        self.root = arena.meld(self.root, other.root);
        self.len += other.len;
        if self.passive.len() < other.passive.len() {
            std::mem::swap(&mut self.passive, &mut other.passive);
        }
        self.passive.append(&mut other.passive);
    }

    /// Number of active entries, including self-loops not yet surfaced.
    pub(super) fn len(&self) -> usize {
        self.len
    }

    /// Edge ids excluded as self-loops.
    pub(super) fn passive(&self) -> &[usize] {
        &self.passive
    }
}
