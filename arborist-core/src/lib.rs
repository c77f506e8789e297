//! Arborist core library.
//!
//! Computes minimum spanning arborescences (optimum branchings) of weighted
//! directed graphs with two interchangeable engines: a level-by-level
//! contraction algorithm and a growth-path algorithm built on mergeable heaps.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
mod graph;
mod msa;
mod result;

pub use crate::{
    builder::{Algorithm, MsaSolver, MsaSolverBuilder},
    error::{
        InvalidGraphError, InvalidGraphErrorCode, MsaError, MsaErrorCode, Result,
        UnreachableVertexError,
    },
    graph::{DirectedGraph, Edge, VertexId},
    msa::{compute_msa_classical, compute_msa_fast, edmonds, ggst},
    result::Arborescence,
};
