//! Union-find over dense vertex indices used by the growth-path engine.
//!
//! Each set stands for one super-vertex produced by cycle contraction. Sets
//! only ever grow during a solve; expansion works from the contraction forest
//! rather than splitting sets, so no rollback support is needed.

#[derive(Clone, Debug)]
pub(super) struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl UnionFind {
    pub(super) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            sets: n,
        }
    }

    /// Number of disjoint sets remaining.
    pub(super) fn sets(&self) -> usize {
        self.sets
    }

    /// Finds the representative of `node`, compressing the walked path.
    pub(super) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Merges the sets holding `left` and `right` and returns the surviving
    /// representative.
    pub(super) fn union(&mut self, left: usize, right: usize) -> usize {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return left;
        }
        let left_rank = self.rank[left];
        let right_rank = self.rank[right];
        if left_rank < right_rank {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if left_rank == right_rank {
            self.rank[left] = left_rank.saturating_add(1);
        }
        self.sets -= 1;
        left
    }
}
