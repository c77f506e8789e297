//! Property-based tests for the arborescence engines.
//!
//! Checks both engines against a brute-force oracle on small graphs, against
//! each other on larger ones, and validates the structural invariants of
//! every returned arborescence across graph shapes that stress sparse
//! inputs, dense inputs, weight ties and nested cycles.

mod determinism;
mod helpers;
mod oracle;
mod strategies;
mod structural;
mod types;
mod unreachable;
