//! libtest harness driver
//!
//! Lists tests with `--list --format terse` and runs the resolved test with
//! `--exact`. The harness is an ordinary child process; nothing is forked
//! beyond it and its exit status plus captured output are the only signals
//! read back.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use tracing::debug;

use super::{Outcome, PlatformError, TestHandle, TestPlatform};
use crate::identifier::TestIdentifier;

/// One libtest-compatible test binary.
pub struct LibtestHarness {
    binary: PathBuf,
}

impl LibtestHarness {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// All test names the harness reports, in listing order.
    pub fn list_tests(&self) -> Result<Vec<String>, PlatformError> {
        let output = Command::new(&self.binary)
            .args(["--list", "--format", "terse"])
            .output()
            .map_err(|e| PlatformError::HarnessSpawn {
                path: self.binary.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(PlatformError::ListUnreadable(self.binary.clone()));
        }

        let listing = String::from_utf8_lossy(&output.stdout);
        let tests = parse_terse_listing(&listing);
        debug!(harness = %self.binary.display(), tests = tests.len(), "listed harness tests");
        Ok(tests)
    }

    /// Run one test by exact name, capturing its output.
    fn run_exact(&self, test_name: &str) -> Result<Outcome, PlatformError> {
        let start = Instant::now();
        let output = Command::new(&self.binary)
            .args([test_name, "--exact", "--nocapture"])
            .output()
            .map_err(|e| PlatformError::HarnessSpawn {
                path: self.binary.clone(),
                source: e,
            })?;
        let duration = start.elapsed();

        if output.status.success() {
            return Ok(Outcome::Passed(duration));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let diagnostic = distill_failure(test_name, &stdout, &stderr);
        Ok(Outcome::Failed(duration, diagnostic))
    }
}

impl TestPlatform for LibtestHarness {
    fn discover(&self, id: &TestIdentifier) -> Result<TestHandle, PlatformError> {
        let mut matches: Vec<String> = self
            .list_tests()?
            .into_iter()
            .filter(|name| id.matches(name))
            .collect();

        match matches.len() {
            0 => Err(PlatformError::TestNotFound(id.to_string())),
            1 => Ok(TestHandle {
                harness: self.binary.clone(),
                test_name: matches.swap_remove(0),
            }),
            _ => Err(PlatformError::AmbiguousIdentifier {
                id: id.to_string(),
                candidates: matches,
            }),
        }
    }

    fn execute(&self, handle: &TestHandle) -> Result<Outcome, PlatformError> {
        self.run_exact(&handle.test_name)
    }
}

/// Several prebuilt harness binaries resolved as one platform. The
/// exactly-one invariant holds across the whole set, so the same test name
/// appearing in two binaries is ambiguous.
pub struct HarnessSet {
    binaries: Vec<PathBuf>,
}

impl HarnessSet {
    pub fn new(binaries: Vec<PathBuf>) -> Self {
        Self { binaries }
    }
}

impl TestPlatform for HarnessSet {
    fn discover(&self, id: &TestIdentifier) -> Result<TestHandle, PlatformError> {
        let mut found: Vec<TestHandle> = Vec::new();
        for binary in &self.binaries {
            let harness = LibtestHarness::new(binary);
            for test_name in harness.list_tests()? {
                if id.matches(&test_name) {
                    found.push(TestHandle {
                        harness: binary.clone(),
                        test_name,
                    });
                }
            }
        }

        match found.len() {
            0 => Err(PlatformError::TestNotFound(id.to_string())),
            1 => Ok(found.swap_remove(0)),
            _ => Err(PlatformError::AmbiguousIdentifier {
                id: id.to_string(),
                candidates: found.into_iter().map(|h| h.test_name).collect(),
            }),
        }
    }

    fn execute(&self, handle: &TestHandle) -> Result<Outcome, PlatformError> {
        LibtestHarness::new(&handle.harness).execute(handle)
    }
}

/// Parse `--list --format terse` output: one `name: test` line per test.
/// Benchmark entries and blank lines are skipped.
pub(crate) fn parse_terse_listing(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter_map(|line| line.strip_suffix(": test"))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Distill one failure diagnostic from captured harness output.
///
/// Prefers the `panicked at` block, keeping the location line and the
/// message lines that follow it up to the first blank line or backtrace
/// note. Falls back to the raw combined output when no panic is found
/// (e.g. the harness was killed by a signal).
pub(crate) fn distill_failure(test_name: &str, stdout: &str, stderr: &str) -> String {
    for source in [stdout, stderr] {
        let mut in_panic = false;
        let mut msg = String::new();

        for line in source.lines() {
            if line.contains("panicked at") {
                in_panic = true;
                msg.push_str(line.trim_start());
                msg.push('\n');
            } else if in_panic {
                if line.trim().is_empty() || line.starts_with("note:") {
                    break;
                }
                msg.push_str(line);
                msg.push('\n');
            }
        }

        if !msg.is_empty() {
            return msg.trim_end().to_string();
        }
    }

    format!(
        "test '{}' failed\n{}\n{}",
        test_name,
        stdout.trim_end(),
        stderr.trim_end()
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_terse_listing() {
        let listing = "btree::checks_inserts: test\nbtree::checks_splits: test\n";
        assert_eq!(
            parse_terse_listing(listing),
            vec!["btree::checks_inserts", "btree::checks_splits"]
        );
    }

    #[test]
    fn listing_skips_benchmarks_and_noise() {
        let listing = "alloc_bench: benchmark\n\nbtree::checks_inserts: test\n2 tests, 1 benchmark\n";
        assert_eq!(parse_terse_listing(listing), vec!["btree::checks_inserts"]);
    }

    #[test]
    fn empty_listing_yields_no_tests() {
        assert!(parse_terse_listing("").is_empty());
    }

    #[test]
    fn distills_assertion_panic() {
        let stdout = "\nrunning 1 test\ntest btree::checks_inserts ... FAILED\n\nfailures:\n";
        let stderr = "thread 'btree::checks_inserts' panicked at src/btree.rs:42:9:\n\
                      assertion `left == right` failed\n  left: 4\n right: 5\n\
                      note: run with `RUST_BACKTRACE=1` environment variable to display a backtrace\n";
        let diagnostic = distill_failure("btree::checks_inserts", stdout, stderr);
        assert!(diagnostic.contains("panicked at src/btree.rs:42:9"));
        assert!(diagnostic.contains("assertion `left == right` failed"));
        assert!(!diagnostic.contains("RUST_BACKTRACE"));
    }

    #[test]
    fn falls_back_to_raw_output_without_panic() {
        let diagnostic = distill_failure("t", "some output", "killed by signal");
        assert!(diagnostic.contains("test 't' failed"));
        assert!(diagnostic.contains("some output"));
        assert!(diagnostic.contains("killed by signal"));
    }
}
