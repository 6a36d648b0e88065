//! Test identifier parsing
//!
//! One identifier string names the single test to run. Two encodings are
//! accepted and unified behind one parser:
//!
//! - a raw libtest selector, e.g. `btree::checks_inserts`
//! - a delimited pair `<module::path>#<test_name>`, e.g. `btree#checks_inserts`
//!
//! Both render to the same canonical selector; which encoding the caller
//! used is irrelevant after parsing.

use std::fmt;

use thiserror::Error;

/// Delimiter separating the qualifying path from the test name.
pub const PATH_DELIMITER: char = '#';

/// Errors produced while parsing an identifier string.
///
/// All of these are on the resolution tier: the run stops before any test
/// executes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier '{0}' has an empty segment around '{PATH_DELIMITER}'")]
    EmptySegment(String),

    #[error("identifier '{0}' contains more than one '{PATH_DELIMITER}'")]
    MultipleDelimiters(String),
}

/// A parsed test identifier. Must resolve to exactly one discoverable test
/// at runtime; enforcing that is discovery's job, not the parser's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestIdentifier {
    /// Raw selector taken verbatim, e.g. `btree::checks_inserts`.
    Selector(String),
    /// Delimited form, path and name split on [`PATH_DELIMITER`].
    Delimited { path: String, name: String },
}

impl TestIdentifier {
    /// Parse an identifier string in either encoding.
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(IdentifierError::Empty);
        }

        match raw.matches(PATH_DELIMITER).count() {
            0 => Ok(Self::Selector(raw.to_string())),
            1 => {
                let Some((path, name)) = raw.split_once(PATH_DELIMITER) else {
                    return Err(IdentifierError::EmptySegment(raw.to_string()));
                };
                let (path, name) = (path.trim(), name.trim());
                if path.is_empty() || name.is_empty() {
                    return Err(IdentifierError::EmptySegment(raw.to_string()));
                }
                Ok(Self::Delimited {
                    path: path.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(IdentifierError::MultipleDelimiters(raw.to_string())),
        }
    }

    /// The canonical libtest name this identifier selects.
    pub fn selector(&self) -> String {
        match self {
            Self::Selector(s) => s.clone(),
            Self::Delimited { path, name } => format!("{path}::{name}"),
        }
    }

    /// Whether a test name from a harness listing is selected by this
    /// identifier. A full match always wins; a suffix match at a `::`
    /// boundary covers qualifying modules the caller did not spell out.
    pub fn matches(&self, test_name: &str) -> bool {
        let selector = self.selector();
        test_name == selector || test_name.ends_with(&format!("::{selector}"))
    }
}

impl fmt::Display for TestIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_raw_selector() {
        let id = TestIdentifier::parse("btree::checks_inserts").unwrap();
        assert_eq!(id, TestIdentifier::Selector("btree::checks_inserts".to_string()));
        assert_eq!(id.selector(), "btree::checks_inserts");
    }

    #[test]
    fn parses_delimited_form() {
        let id = TestIdentifier::parse("btree#checks_inserts").unwrap();
        assert_eq!(
            id,
            TestIdentifier::Delimited {
                path: "btree".to_string(),
                name: "checks_inserts".to_string(),
            }
        );
        assert_eq!(id.selector(), "btree::checks_inserts");
    }

    #[test]
    fn both_encodings_agree_on_selector() {
        let raw = TestIdentifier::parse("a::b::c").unwrap();
        let delimited = TestIdentifier::parse("a::b#c").unwrap();
        assert_eq!(raw.selector(), delimited.selector());
    }

    #[test]
    fn rejects_empty_identifier() {
        assert_eq!(TestIdentifier::parse(""), Err(IdentifierError::Empty));
        assert_eq!(TestIdentifier::parse("   "), Err(IdentifierError::Empty));
    }

    #[test]
    fn rejects_empty_segments() {
        for raw in ["#name", "path#", "#"] {
            assert!(matches!(
                TestIdentifier::parse(raw),
                Err(IdentifierError::EmptySegment(_))
            ));
        }
    }

    #[test]
    fn rejects_multiple_delimiters() {
        assert!(matches!(
            TestIdentifier::parse("a#b#c"),
            Err(IdentifierError::MultipleDelimiters(_))
        ));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let id = TestIdentifier::parse("  btree # checks_inserts ").unwrap();
        assert_eq!(id.selector(), "btree::checks_inserts");
    }

    #[test]
    fn matches_full_name() {
        let id = TestIdentifier::parse("btree#checks_inserts").unwrap();
        assert!(id.matches("btree::checks_inserts"));
    }

    #[test]
    fn matches_suffix_at_module_boundary() {
        let id = TestIdentifier::parse("btree#checks_inserts").unwrap();
        assert!(id.matches("storage::btree::checks_inserts"));
    }

    #[test]
    fn rejects_partial_segment_match() {
        let id = TestIdentifier::parse("tree#checks_inserts").unwrap();
        assert!(!id.matches("btree::checks_inserts"));
        let id = TestIdentifier::parse("btree#inserts").unwrap();
        assert!(!id.matches("btree::checks_inserts"));
    }
}
