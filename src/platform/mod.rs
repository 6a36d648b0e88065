//! Test platform capability interface
//!
//! Discovery and execution are abstracted behind the [`TestPlatform`] trait
//! so the concrete host-runtime test infrastructure is swappable:
//! - [`LibtestHarness`] drives one libtest-compatible binary
//! - [`HarnessSet`] resolves across several prebuilt binaries
//! - [`CargoPlatform`] locates the binaries through cargo first
//!
//! The runner orchestration only ever sees `discover` and `execute`, which
//! also lets the integration tests run against a mock platform.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod cargo;
mod libtest;

pub use cargo::CargoPlatform;
pub use libtest::{HarnessSet, LibtestHarness};

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::identifier::TestIdentifier;

/// Errors on the resolution tier. All of these are fatal: the process must
/// stop before any test runs, with a diagnostic and no summary.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("no test matches '{0}'")]
    TestNotFound(String),

    #[error("identifier '{id}' is ambiguous, matches: {candidates:?}")]
    AmbiguousIdentifier { id: String, candidates: Vec<String> },

    #[error("failed to spawn test harness '{path}': {source}")]
    HarnessSpawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("test harness '{0}' did not produce a readable test listing")]
    ListUnreadable(PathBuf),

    #[error("cargo produced no test artifacts in '{0}'")]
    NoTestArtifacts(PathBuf),

    #[error("cargo test --no-run failed in '{dir}':\n{stderr}")]
    CargoFailed { dir: PathBuf, stderr: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A resolved, unambiguous reference to one test inside one harness binary.
/// Produced by discovery, consumed by execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestHandle {
    /// Path to the libtest binary containing the test
    pub harness: PathBuf,
    /// Exact test name as the harness lists it
    pub test_name: String,
}

/// Result of running the resolved test once.
///
/// A failing test is recovered into `Failed` with its captured diagnostic;
/// it is never propagated as a process-level error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed(Duration),
    Failed(Duration, String),
}

/// Capability interface over the host test infrastructure.
pub trait TestPlatform {
    /// Resolve an identifier to exactly one runnable test.
    ///
    /// Zero matches and more than one match are both resolution errors;
    /// the exactly-one invariant is enforced here, not by the caller.
    fn discover(&self, id: &TestIdentifier) -> Result<TestHandle, PlatformError>;

    /// Run a resolved test to completion and capture its outcome.
    fn execute(&self, handle: &TestHandle) -> Result<Outcome, PlatformError>;
}
