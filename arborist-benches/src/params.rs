//! Benchmark parameter types.

use std::fmt;

use crate::source::Density;

/// Parameters for an arborescence benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct MsaBenchParams {
    /// Number of vertices in the graph.
    pub vertex_count: usize,
    /// Edge density of the generated graph.
    pub density: Density,
}

impl fmt::Display for MsaBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},density={}", self.vertex_count, self.density)
    }
}
