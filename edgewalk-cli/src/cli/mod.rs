//! Command-line interface orchestration for edgewalk.
//!
//! The `run` command loads a vertex configuration, applies command-line
//! overrides, samples connected graphs and reports the expectations together
//! with the most frequently visited topologies.

mod commands;

pub use commands::{
    CandidateArg, Cli, CliError, Command, ExecutionArg, ExecutionSummary, RunCommand, emit_report,
    render_summary, render_topologies, run_cli,
};
