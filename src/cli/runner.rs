//! Single-test orchestration
//!
//! The run is linear: parse the identifier, resolve it to exactly one test,
//! execute it, summarize, report, derive the exit code. Resolution errors
//! stop the run before anything executes (exit 2, no summary printed); a
//! failing test is recovered into the summary (exit 1).

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::identifier::TestIdentifier;
use crate::platform::{CargoPlatform, HarnessSet, Outcome, TestPlatform};
use crate::summary::{ExecutionSummary, FailureRecord};

use super::{CliError, CliResult, ExitCode};

/// Run the single test named by `identifier`, reporting to stderr.
///
/// With `--harness` paths the given binaries are searched directly;
/// otherwise the test is resolved through cargo in `manifest_dir`.
pub fn run_single(
    identifier: &str,
    harnesses: &[PathBuf],
    manifest_dir: &Path,
    verbose: bool,
) -> CliResult<ExitCode> {
    let platform: Box<dyn TestPlatform> = if harnesses.is_empty() {
        Box::new(CargoPlatform::new(manifest_dir))
    } else {
        Box::new(HarnessSet::new(harnesses.to_vec()))
    };

    run_with_platform(identifier, platform.as_ref(), verbose, &mut io::stderr())
}

/// Platform- and sink-generic core of the run.
///
/// Kept separate from [`run_single`] so the behavior can be exercised
/// against a mock platform with a captured sink.
pub fn run_with_platform(
    identifier: &str,
    platform: &dyn TestPlatform,
    verbose: bool,
    sink: &mut impl Write,
) -> CliResult<ExitCode> {
    let id = TestIdentifier::parse(identifier)
        .map_err(|e| CliError::resolution(format!("invalid test identifier: {e}")))?;
    debug!(identifier = %id, "parsed test identifier");

    let handle = platform
        .discover(&id)
        .map_err(|e| CliError::resolution(e.to_string()))?;
    debug!(test = %handle.test_name, harness = %handle.harness.display(), "resolved test");

    if verbose {
        writeln!(
            sink,
            "running {} ({})",
            handle.test_name,
            handle.harness.display()
        )
        .map_err(|e| CliError::failure(format!("failed to write report: {e}")))?;
    }

    let outcome = platform
        .execute(&handle)
        .map_err(|e| CliError::resolution(e.to_string()))?;

    let mut summary = ExecutionSummary::new();
    match outcome {
        Outcome::Passed(duration) => {
            info!(test = %handle.test_name, ms = duration.as_millis() as u64, "test passed");
        }
        Outcome::Failed(duration, diagnostic) => {
            info!(test = %handle.test_name, ms = duration.as_millis() as u64, "test failed");
            summary.record(FailureRecord {
                test_name: handle.test_name.clone(),
                diagnostic,
            });
        }
    }

    summary
        .report(sink)
        .map_err(|e| CliError::failure(format!("failed to write report: {e}")))?;

    Ok(summary.exit_code())
}
