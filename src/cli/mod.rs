//! CLI for the solotest runner
//!
//! ## Usage
//!
//! - `solotest <identifier>` - resolve the test through cargo and run it
//! - `solotest <identifier> --harness PATH` - run against prebuilt binaries
//!
//! ## Modules
//!
//! - `runner` - single-test orchestration
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! The runner returns `CliResult<ExitCode>` instead of calling
//! `process::exit`. Only the top-level `run()` function handles errors and
//! exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod runner;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::version::SOLOTEST_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    /// The targeted test passed.
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// The targeted test failed.
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The identifier never resolved to a runnable test.
    pub const RESOLUTION_FAILURE: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message to stderr, and exits with the
/// code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create a resolution error (exit code 2). The run stopped before any
    /// test executed; no summary is printed on this path.
    pub fn resolution(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::RESOLUTION_FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run exactly one test and report pass/fail via the process exit code
#[derive(Parser, Debug)]
#[command(name = "solotest")]
#[command(version = SOLOTEST_VERSION)]
#[command(about = "Run exactly one test, pass/fail via exit code", long_about = None)]
pub struct Cli {
    /// Test to run: a full libtest name, or `module::path#test_name`
    #[arg(value_name = "IDENTIFIER")]
    pub identifier: String,

    /// Prebuilt libtest binary to search instead of building via cargo
    /// (repeatable)
    #[arg(long = "harness", value_name = "PATH")]
    pub harness: Vec<PathBuf>,

    /// Cargo project directory to resolve the test in
    #[arg(
        long = "manifest-dir",
        value_name = "DIR",
        default_value = ".",
        conflicts_with = "harness"
    )]
    pub manifest_dir: PathBuf,

    /// Print the resolved test and its harness before running
    #[arg(short, long)]
    pub verbose: bool,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. The runner
/// returns `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the parsed CLI invocation and return the resulting exit code.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    runner::run_single(
        &cli.identifier,
        &cli.harness,
        &cli.manifest_dir,
        cli.verbose,
    )
}

// ============================================================================
// Tests
// ============================================================================
