//! Execution summary and failure reporting
//!
//! One summary exists per run. It is created by the runner, consumed once
//! for printing and exit-code derivation, and then discarded; nothing
//! persists across runs.

use std::io::{self, Write};

use crate::cli::ExitCode;

/// Separator line written after each failure diagnostic.
pub const FAILURE_SEPARATOR: &str = "\n ===";

/// Captured error data for one failed test execution. Read-only, owned by
/// the [`ExecutionSummary`] it was recorded into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub test_name: String,
    pub diagnostic: String,
}

/// Aggregate result of one run: a failed-test count and the ordered
/// failures behind it. With a single targeted test the count is 0 or 1,
/// but the contract generalizes to any number of recorded failures.
#[derive(Debug, Default)]
pub struct ExecutionSummary {
    failures: Vec<FailureRecord>,
}

impl ExecutionSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, failure: FailureRecord) {
        self.failures.push(failure);
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }

    /// `0` when nothing failed, `1` otherwise. The exit code is the only
    /// machine-readable signal callers may rely on.
    pub fn exit_code(&self) -> ExitCode {
        if self.failures.is_empty() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }

    /// Write each failure's diagnostic followed by the separator line, in
    /// recording order. A clean run writes nothing.
    pub fn report(&self, sink: &mut impl Write) -> io::Result<()> {
        for failure in &self.failures {
            writeln!(sink, "{}", failure.diagnostic)?;
            writeln!(sink, "{FAILURE_SEPARATOR}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
