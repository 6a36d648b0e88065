//! Cargo-backed platform
//!
//! Locates test harness binaries by building the project with
//! `cargo test --no-run --message-format=json` and reading the
//! compiler-artifact messages, then resolves and runs through the
//! harness set those binaries form.

use std::path::PathBuf;
use std::process::Command;

use serde_json::Value;
use tracing::debug;

use super::{HarnessSet, Outcome, PlatformError, TestHandle, TestPlatform};
use crate::identifier::TestIdentifier;

/// Test platform rooted at a Cargo project directory.
pub struct CargoPlatform {
    manifest_dir: PathBuf,
}

impl CargoPlatform {
    pub fn new(manifest_dir: impl Into<PathBuf>) -> Self {
        Self {
            manifest_dir: manifest_dir.into(),
        }
    }

    /// Build the project's tests (if needed) and return the harness binaries.
    fn test_binaries(&self) -> Result<Vec<PathBuf>, PlatformError> {
        debug!(dir = %self.manifest_dir.display(), "building test artifacts via cargo");
        let output = Command::new("cargo")
            .args(["test", "--no-run", "--message-format=json"])
            .current_dir(&self.manifest_dir)
            .output()?;

        if !output.status.success() {
            return Err(PlatformError::CargoFailed {
                dir: self.manifest_dir.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let stream = String::from_utf8_lossy(&output.stdout);
        let binaries = parse_artifact_messages(&stream);
        if binaries.is_empty() {
            return Err(PlatformError::NoTestArtifacts(self.manifest_dir.clone()));
        }
        debug!(count = binaries.len(), "found test harness binaries");
        Ok(binaries)
    }
}

impl TestPlatform for CargoPlatform {
    fn discover(&self, id: &TestIdentifier) -> Result<TestHandle, PlatformError> {
        HarnessSet::new(self.test_binaries()?).discover(id)
    }

    fn execute(&self, handle: &TestHandle) -> Result<Outcome, PlatformError> {
        HarnessSet::new(vec![handle.harness.clone()]).execute(handle)
    }
}

/// Pull test-profile executables out of cargo's JSON message stream.
/// Non-JSON lines and artifacts without an executable are skipped.
pub(crate) fn parse_artifact_messages(stream: &str) -> Vec<PathBuf> {
    let mut binaries = Vec::new();

    for line in stream.lines() {
        let Ok(msg) = serde_json::from_str::<Value>(line) else {
            continue;
        };
        if msg["reason"] != "compiler-artifact" {
            continue;
        }
        if msg["profile"]["test"].as_bool() != Some(true) {
            continue;
        }
        if let Some(path) = msg["executable"].as_str() {
            binaries.push(PathBuf::from(path));
        }
    }

    binaries
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_only_test_profile_executables() {
        let stream = concat!(
            r#"{"reason":"compiler-artifact","profile":{"test":false},"executable":"/t/release/app"}"#,
            "\n",
            r#"{"reason":"compiler-artifact","profile":{"test":true},"executable":"/t/debug/deps/app-abc123"}"#,
            "\n",
            r#"{"reason":"build-finished","success":true}"#,
            "\n",
        );
        assert_eq!(
            parse_artifact_messages(stream),
            vec![PathBuf::from("/t/debug/deps/app-abc123")]
        );
    }

    #[test]
    fn skips_artifacts_without_executable() {
        let stream = r#"{"reason":"compiler-artifact","profile":{"test":true},"executable":null}"#;
        assert!(parse_artifact_messages(stream).is_empty());
    }

    #[test]
    fn tolerates_non_json_noise() {
        let stream = "warning: something\nnot json at all\n";
        assert!(parse_artifact_messages(stream).is_empty());
    }
}
