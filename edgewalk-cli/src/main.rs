//! CLI entry point for the edgewalk graph sampler.
//!
//! Parses command-line arguments with clap, runs the sampler, renders the
//! summary to stdout and maps errors to exit codes. Logging is initialised
//! first so every later step can emit structured diagnostics via `tracing`.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use edgewalk_cli::{
    cli::{Cli, CliError, emit_report, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

/// Parse CLI arguments, execute the command, emit the report, and flush the
/// output stream.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    emit_report(&summary, &mut writer).context("failed to write report")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let (code, worker_code) = err
            .downcast_ref::<CliError>()
            .map(|cli_error| match cli_error {
                CliError::Core(core) => (
                    Some(core.code().as_str()),
                    core.worker_code().map(|code| code.as_str()),
                ),
                CliError::Config(config) => (Some(config.code().as_str()), None),
                CliError::Write { .. } => (None, None),
            })
            .unwrap_or((None, None));

        error!(
            error = %err,
            code = code.map(field::display),
            worker_code = worker_code.map(field::display),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
