//! Benchmark support crate for arborist.
//!
//! Provides seeded synthetic graphs and parameter types used by the Criterion
//! benchmarks that compare the classical and fast arborescence engines.

pub mod error;
pub mod params;
pub mod source;
