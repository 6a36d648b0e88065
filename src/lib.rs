#![forbid(unsafe_code)]
//! solotest — run exactly one test, report pass/fail via exit code.
//!
//! Given an identifier naming a single test, solotest resolves it inside a
//! libtest-compatible harness binary, runs it to completion, prints failure
//! diagnostics to stderr, and exits `0` (passed) or `1` (failed). An
//! identifier that does not name exactly one test is a resolution error:
//! the process stops before anything runs (exit `2`, no summary).
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `platform` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod identifier;
pub mod platform;
pub mod summary;
pub mod version;

pub use identifier::TestIdentifier;
pub use platform::{CargoPlatform, HarnessSet, LibtestHarness};
pub use platform::{Outcome, PlatformError, TestHandle, TestPlatform};
pub use summary::{ExecutionSummary, FailureRecord};
