//! Command-line interface for computing minimum spanning arborescences.
//!
//! The `solve` command reads a JSON graph document, runs the selected engine
//! and renders the chosen edges with their total weight.

mod commands;

pub use commands::{
    AlgorithmArg, Cli, CliError, Command, EdgeRecord, GraphDocument, SolveCommand, SolveSummary,
    render_summary, run_cli,
};
