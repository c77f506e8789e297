//! Command implementations and argument parsing for the arborist CLI.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use arborist_core::{Algorithm, Arborescence, DirectedGraph, MsaError, MsaSolverBuilder};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "arborist",
    about = "Compute minimum spanning arborescences of weighted directed graphs."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Solve the graph stored in a JSON document.
    Solve(SolveCommand),
}

/// Options accepted by the `solve` command.
#[derive(Debug, Args, Clone)]
pub struct SolveCommand {
    /// Path to the JSON graph document.
    pub path: PathBuf,

    /// Engine used to compute the arborescence.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Auto)]
    pub algorithm: AlgorithmArg,

    /// Root vertex overriding the one stored in the document.
    #[arg(long, value_parser = clap::value_parser!(u64))]
    pub root: Option<u64>,
}

/// Engine selections accepted on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    /// Level-by-level cycle contraction.
    Classical,
    /// Growth-path contraction with mergeable heaps.
    Fast,
    /// Let the library pick.
    #[default]
    Auto,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Classical => Self::Classical,
            AlgorithmArg::Fast => Self::Fast,
            AlgorithmArg::Auto => Self::Auto,
        }
    }
}

/// Weighted edge as stored in a graph document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source vertex.
    pub tail: u64,
    /// Target vertex.
    pub head: u64,
    /// Edge weight.
    pub weight: f64,
}

/// JSON graph document read by the `solve` command.
///
/// ```json
/// {"vertices": [0, 1], "root": 0, "edges": [{"tail": 0, "head": 1, "weight": 2.5}]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Every vertex of the graph.
    pub vertices: Vec<u64>,
    /// Default root vertex.
    pub root: u64,
    /// Weighted directed edges.
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

type WeightMap = HashMap<(u64, u64), f64>;

impl GraphDocument {
    /// Splits the edge records into the pair list and weight map the solvers
    /// expect.
    fn edge_table(&self) -> Result<(Vec<(u64, u64)>, WeightMap), CliError> {
        let mut pairs = Vec::with_capacity(self.edges.len());
        let mut weights = HashMap::with_capacity(self.edges.len());
        for record in &self.edges {
            match weights.entry((record.tail, record.head)) {
                Entry::Vacant(slot) => {
                    slot.insert(record.weight);
                    pairs.push((record.tail, record.head));
                }
                Entry::Occupied(slot) if *slot.get() == record.weight => {}
                Entry::Occupied(slot) => {
                    return Err(CliError::ConflictingWeight {
                        tail: record.tail,
                        head: record.head,
                        first: *slot.get(),
                        second: record.weight,
                    });
                }
            }
        }
        Ok((pairs, weights))
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading the graph document.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The graph document was not valid JSON for the expected shape.
    #[error("failed to parse `{path}`: {source}")]
    Parse {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The same edge was listed twice with different weights.
    #[error("edge ({tail}, {head}) is listed with weights {first} and {second}")]
    ConflictingWeight {
        /// Source vertex.
        tail: u64,
        /// Target vertex.
        head: u64,
        /// Weight seen first.
        first: f64,
        /// Conflicting weight seen later.
        second: f64,
    },
    /// Graph validation or solving failed.
    #[error(transparent)]
    Core(#[from] MsaError<u64>),
}

/// Summarises the outcome of a `solve` command.
#[derive(Debug, Clone)]
pub struct SolveSummary {
    /// Engine that actually ran.
    pub algorithm: Algorithm,
    /// Arborescence produced by the engine.
    pub arborescence: Arborescence<u64>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, validation or solving fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use arborist_cli::cli::{AlgorithmArg, Cli, Command, SolveCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(
///     file.path(),
///     r#"{"vertices":[0,1,2],"root":0,"edges":[
///         {"tail":0,"head":1,"weight":5},{"tail":1,"head":2,"weight":3},
///         {"tail":2,"head":0,"weight":4}]}"#,
/// )?;
/// let cli = Cli {
///     command: Command::Solve(SolveCommand {
///         path: file.path().to_path_buf(),
///         algorithm: AlgorithmArg::Auto,
///         root: None,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.arborescence.total_weight(), 8.0);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<SolveSummary, CliError> {
    match cli.command {
        Command::Solve(solve) => {
            Span::current().record("command", field::display("solve"));
            run_solve(solve)
        }
    }
}

#[instrument(
    name = "cli.solve",
    err,
    skip(command),
    fields(algorithm = field::Empty, root = field::Empty),
)]
pub(super) fn run_solve(command: SolveCommand) -> Result<SolveSummary, CliError> {
    let solver = MsaSolverBuilder::new()
        .with_algorithm(command.algorithm.into())
        .build();
    let algorithm = solver.algorithm().resolve();

    let document = load_document(&command.path)?;
    let root = command.root.unwrap_or(document.root);
    let span = Span::current();
    span.record("algorithm", field::display(algorithm.as_str()));
    span.record("root", root);

    let (pairs, weights) = document.edge_table()?;
    let graph =
        DirectedGraph::build(&document.vertices, &pairs, &weights).map_err(MsaError::from)?;
    let arborescence = solver.solve(&graph, root)?;
    info!(
        algorithm = algorithm.as_str(),
        edges = arborescence.len(),
        total_weight = arborescence.total_weight(),
        "command completed"
    );
    Ok(SolveSummary {
        algorithm,
        arborescence,
    })
}

#[instrument(name = "cli.load_document", err, fields(path = field::Empty))]
pub(super) fn load_document(path: &Path) -> Result<GraphDocument, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use arborist_cli::cli::{SolveSummary, render_summary};
/// # use std::collections::HashMap;
/// # use arborist_core::{Algorithm, compute_msa_fast};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let weights = HashMap::from([((0, 1), 2.5)]);
/// let summary = SolveSummary {
///     algorithm: Algorithm::Fast,
///     arborescence: compute_msa_fast(&[0, 1], &[(0, 1)], 0, &weights)?,
/// };
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer.into_inner())?,
///     "algorithm: fast\nroot: 0\n0 -> 1 (2.5)\ntotal weight: 2.5\n"
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &SolveSummary, mut writer: impl Write) -> io::Result<()> {
    let tree = &summary.arborescence;
    writeln!(writer, "algorithm: {}", summary.algorithm.as_str())?;
    writeln!(writer, "root: {}", tree.root())?;
    for edge in tree.edges() {
        writeln!(writer, "{} -> {} ({})", edge.tail(), edge.head(), edge.weight())?;
    }
    writeln!(writer, "total weight: {}", tree.total_weight())?;
    Ok(())
}
