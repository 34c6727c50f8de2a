//! Command implementations and argument parsing for the edgewalk CLI.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use edgewalk_config::{ConfigError, RunConfig};
use edgewalk_core::{
    CandidateStrategy, ExecutionStrategy, Point, SamplerBuilder, SamplerError, SamplingReport,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "edgewalk",
    about = "Sample connected graphs on a planar vertex set."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the sampler over a vertex configuration file.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
///
/// Flags left unset fall back to the configuration file and then to the
/// library defaults.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Configuration file listing `x,y` vertices and optional `T=`, `r=` and
    /// `iterations=` lines.
    pub path: PathBuf,

    /// Temperature `T`; overrides the configuration file.
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Edge-cost coefficient `r`; overrides the configuration file.
    #[arg(long = "edge-cost")]
    pub edge_cost: Option<f64>,

    /// Total iteration budget; overrides the configuration file.
    #[arg(long, value_parser = clap::value_parser!(u64))]
    pub iterations: Option<u64>,

    /// Number of worker chains (defaults to the available parallelism).
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub workers: Option<usize>,

    /// Base seed; a random seed is drawn and logged when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// How worker chains are scheduled.
    #[arg(long, value_enum, default_value_t = ExecutionArg::Auto)]
    pub strategy: ExecutionArg,

    /// How chains evaluate candidate graphs.
    #[arg(long, value_enum, default_value_t = CandidateArg::Auto)]
    pub candidates: CandidateArg,

    /// Write the top topologies to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Scheduling choices exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExecutionArg {
    /// Parallel when available.
    Auto,
    /// One chain after another on the main thread.
    Sequential,
    /// Chains on the Rayon pool.
    Parallel,
}

impl From<ExecutionArg> for ExecutionStrategy {
    fn from(value: ExecutionArg) -> Self {
        match value {
            ExecutionArg::Auto => Self::Auto,
            ExecutionArg::Sequential => Self::Sequential,
            ExecutionArg::Parallel => Self::Parallel,
        }
    }
}

/// Candidate evaluation choices exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CandidateArg {
    /// Delta above the vertex threshold, clone below it.
    Auto,
    /// Copy the graph for every candidate.
    Clone,
    /// Toggle in place and revert on rejection.
    Delta,
}

impl From<CandidateArg> for CandidateStrategy {
    fn from(value: CandidateArg) -> Self {
        match value {
            CandidateArg::Auto => Self::Auto,
            CandidateArg::Clone => Self::Clone,
            CandidateArg::Delta => Self::Delta,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading the configuration file failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Sampler construction or execution failed.
    #[error(transparent)]
    Core(#[from] SamplerError),
    /// Writing the topology file failed.
    #[error("failed to write `{path}`: {source}")]
    Write {
        /// Destination that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Vertex coordinates the run sampled over.
    pub vertices: Vec<Point>,
    /// Merged statistics of every worker chain.
    pub report: SamplingReport,
    /// Destination for the top topologies, or `None` for stdout.
    pub output: Option<PathBuf>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the configuration or sampling fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use edgewalk_cli::cli::{CandidateArg, Cli, Command, ExecutionArg, RunCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0,0\n1,0\n0,1\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         path: file.path().to_path_buf(),
///         temperature: None,
///         edge_cost: None,
///         iterations: Some(100),
///         workers: Some(2),
///         seed: Some(7),
///         strategy: ExecutionArg::Sequential,
///         candidates: CandidateArg::Auto,
///         output: None,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.report.frequencies().total(), 100);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(path = field::Empty, seed = field::Empty, seed_source = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    span.record("path", field::display(command.path.display()));

    let config = RunConfig::load_path(&command.path)?;
    let (seed, seed_source) = match command.seed {
        Some(seed) => (seed, "flag"),
        None => (rand::random(), "random"),
    };
    span.record("seed", seed);
    span.record("seed_source", field::display(seed_source));

    let sampler = command_builder(&config, &command, seed).build()?;
    let report = sampler.run(config.vertices())?;

    info!(
        seed,
        workers = report.workers(),
        distinct = report.distinct_topologies(),
        "command completed"
    );
    Ok(ExecutionSummary {
        vertices: config.vertices().to_vec(),
        report,
        output: command.output,
    })
}

pub(super) fn command_builder(config: &RunConfig, command: &RunCommand, seed: u64) -> SamplerBuilder {
    let mut builder = config
        .configure(SamplerBuilder::new())
        .with_seed(seed)
        .with_execution_strategy(command.strategy.into())
        .with_candidate_strategy(command.candidates.into());
    if let Some(temperature) = command.temperature {
        builder = builder.with_temperature(temperature);
    }
    if let Some(edge_cost) = command.edge_cost {
        builder = builder.with_edge_cost(edge_cost);
    }
    if let Some(iterations) = command.iterations {
        builder = builder.with_iterations(iterations);
    }
    if let Some(workers) = command.workers {
        builder = builder.with_workers(workers);
    }
    builder
}

/// Renders the run parameters and expectations of `summary` to `writer`.
///
/// A zero-iteration run has no expectations and prints `n/a` for them.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let report = &summary.report;
    writeln!(writer, "vertices: {}", summary.vertices.len())?;
    writeln!(writer, "iterations: {}", report.iterations())?;
    writeln!(writer, "workers: {}", report.workers())?;
    writeln!(writer, "seed: {}", report.seed())?;
    match report.expectations() {
        Some(expectations) => {
            writeln!(writer, "expected vertex 0 degree: {:.6}", expectations.vertex0_degree)?;
            writeln!(writer, "expected edge count: {:.6}", expectations.edge_count)?;
            writeln!(
                writer,
                "expected max path length: {:.6}",
                expectations.max_path_length
            )?;
        }
        None => {
            writeln!(writer, "expected vertex 0 degree: n/a")?;
            writeln!(writer, "expected edge count: n/a")?;
            writeln!(writer, "expected max path length: n/a")?;
        }
    }
    if let Some(rate) = report.acceptance_rate() {
        writeln!(writer, "acceptance rate: {rate:.4}")?;
    }
    writeln!(writer, "distinct topologies: {}", report.distinct_topologies())?;
    Ok(())
}

/// Writes the top-fraction topologies of `summary`, one edge set per line.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use edgewalk_cli::cli::{ExecutionSummary, render_topologies};
/// # use edgewalk_core::{ExecutionStrategy, Point, SamplerBuilder};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let vertices = vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)];
/// let report = SamplerBuilder::new()
///     .with_iterations(5)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()?
///     .run(&vertices)?;
/// let summary = ExecutionSummary { vertices, report, output: None };
/// let mut buffer = Vec::new();
/// render_topologies(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "{(0.0, 0.0)-(3.0, 4.0)}\n");
/// # Ok(())
/// # }
/// ```
pub fn render_topologies(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    for topology in summary.report.top_fraction() {
        writeln!(writer, "{}", topology.display(&summary.vertices))?;
    }
    Ok(())
}

/// Renders the summary to `stdout` and the top topologies to the summary's
/// output file, or after the summary when no file was requested.
///
/// # Errors
/// Returns [`CliError::Write`] when `stdout` or the output file cannot be
/// written.
pub fn emit_report(summary: &ExecutionSummary, mut stdout: impl Write) -> Result<(), CliError> {
    let stdout_error = |source| CliError::Write {
        path: PathBuf::from("<stdout>"),
        source,
    };
    render_summary(summary, &mut stdout).map_err(stdout_error)?;
    match summary.output.as_deref() {
        Some(path) => write_topology_file(summary, path),
        None => render_topologies(summary, &mut stdout).map_err(stdout_error),
    }
}

#[instrument(name = "cli.write_topologies", err, skip(summary))]
fn write_topology_file(summary: &ExecutionSummary, path: &Path) -> Result<(), CliError> {
    let write_error = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    render_topologies(summary, &mut writer).map_err(write_error)?;
    writer.flush().map_err(write_error)?;
    info!(path = %path.display(), "topologies written");
    Ok(())
}
