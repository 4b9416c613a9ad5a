// crates/xprin-spec-cli/src/main.rs
// ============================================================================
// Module: xprin Suite CLI Entry Point
// Description: Command dispatcher for checking and resolving test suites.
// Purpose: Report suite validation failures before any test case runs.
// Dependencies: clap, serde_json, thiserror, xprin-spec
// ============================================================================

//! ## Overview
//! The `xprin-spec` binary loads test suite files, merges every case with the
//! common block, and validates the result. `check` reports each suite file as
//! valid or lists its violations; `resolve` prints the fully merged suite as
//! JSON so executors and humans see exactly what will run.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use thiserror::Error;
use xprin_spec::CaseFailurePolicy;
use xprin_spec::FileAuditSink;
use xprin_spec::NoopAuditSink;
use xprin_spec::ResolutionAuditSink;
use xprin_spec::ResolveOptions;
use xprin_spec::ResolvedSuite;
use xprin_spec::Resolver;
use xprin_spec::StderrAuditSink;
use xprin_spec::load::discover_suite_files;
use xprin_spec::load::resolve_suite_path;
use xprin_spec::load_suite;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "xprin-spec", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate test suite files without running them.
    Check(CheckCommand),
    /// Print the resolved test suite as JSON.
    Resolve(ResolveCommand),
}

/// Arguments for `check`.
#[derive(Args, Debug)]
struct CheckCommand {
    /// Suite file, or a directory holding `xprin.yaml` / `*_xprin.yaml` files.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
    /// Stop checking a suite after its first failing test case.
    #[arg(long, action = ArgAction::SetTrue)]
    stop_at_first: bool,
    /// Append resolution audit events (JSON lines) to this file, or `-` for stderr.
    #[arg(long, value_name = "PATH")]
    audit_log: Option<PathBuf>,
}

/// Arguments for `resolve`.
#[derive(Args, Debug)]
struct ResolveCommand {
    /// Suite file to resolve.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
}

/// Audit destination selected by `--audit-log`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuditTarget<'a> {
    /// No audit output.
    Disabled,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to a file.
    File(&'a Path),
}

/// `--audit-log` value that routes audit events to stderr.
const STDERR_AUDIT_LOG: &str = "-";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("xprin-spec {version}"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Check(command) => command_check(&command),
        Commands::Resolve(command) => command_resolve(&command),
    }
}

/// Prints the top-level help text.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Check Command
// ============================================================================

/// Executes `check` across every selected suite file.
fn command_check(command: &CheckCommand) -> CliResult<ExitCode> {
    let paths = suite_paths(command.file.as_deref())?;
    let audit = audit_sink(command.audit_log.as_deref())?;
    let options = ResolveOptions {
        case_failure: if command.stop_at_first {
            CaseFailurePolicy::StopAtFirst
        } else {
            CaseFailurePolicy::CollectAll
        },
    };

    let mut failed = 0_usize;
    for path in &paths {
        match resolve_file(path, options, audit.as_ref()) {
            Ok(suite) => {
                write_stdout_line(&format!(
                    "{}: ok ({} test cases)",
                    path.display(),
                    suite.len()
                ))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
            Err(message) => {
                failed += 1;
                write_stderr_line(&format!("{}: {message}", path.display()))
                    .map_err(|err| CliError::new(output_error("stderr", &err)))?;
            }
        }
    }

    if failed == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::new(format!("{failed} of {} test suite files failed validation", paths.len())))
    }
}

// ============================================================================
// SECTION: Resolve Command
// ============================================================================

/// Executes `resolve` for a single suite file.
fn command_resolve(command: &ResolveCommand) -> CliResult<ExitCode> {
    let path = resolve_suite_path(command.file.as_deref())
        .map_err(|err| CliError::new(err.to_string()))?;
    if path.is_dir() {
        return Err(CliError::new(format!(
            "{} is a directory; resolve takes a single test suite file",
            path.display()
        )));
    }
    let suite = resolve_file(&path, ResolveOptions::default(), &NoopAuditSink)
        .map_err(|message| CliError::new(format!("{}: {message}", path.display())))?;
    let rendered = serde_json::to_string_pretty(&suite)
        .map_err(|err| CliError::new(format!("failed to render resolved suite: {err}")))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Expands the `--file` argument into the suite files to process.
fn suite_paths(file: Option<&Path>) -> CliResult<Vec<PathBuf>> {
    let path = resolve_suite_path(file).map_err(|err| CliError::new(err.to_string()))?;
    if !path.is_dir() {
        return Ok(vec![path]);
    }
    let files = discover_suite_files(&path).map_err(|err| CliError::new(err.to_string()))?;
    if files.is_empty() {
        return Err(CliError::new(format!("no test suite files found in {}", path.display())));
    }
    Ok(files)
}

/// Opens the audit sink selected by `--audit-log`.
fn audit_sink(path: Option<&Path>) -> CliResult<Box<dyn ResolutionAuditSink>> {
    match audit_target(path) {
        AuditTarget::Disabled => Ok(Box::new(NoopAuditSink)),
        AuditTarget::Stderr => Ok(Box::new(StderrAuditSink)),
        AuditTarget::File(path) => {
            let sink = FileAuditSink::new(path).map_err(|err| {
                CliError::new(format!("failed to open audit log {}: {err}", path.display()))
            })?;
            Ok(Box::new(sink))
        }
    }
}

/// Maps the `--audit-log` argument to an audit destination.
fn audit_target(path: Option<&Path>) -> AuditTarget<'_> {
    match path {
        None => AuditTarget::Disabled,
        Some(path) if path == Path::new(STDERR_AUDIT_LOG) => AuditTarget::Stderr,
        Some(path) => AuditTarget::File(path),
    }
}

/// Loads and resolves one suite file, rendering any failure as text.
fn resolve_file(
    path: &Path,
    options: ResolveOptions,
    audit: &dyn ResolutionAuditSink,
) -> Result<ResolvedSuite, String> {
    let spec = load_suite(Some(path)).map_err(|err| err.to_string())?;
    Resolver::new(audit).with_options(options).resolve(&spec).map_err(|err| err.to_string())
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
