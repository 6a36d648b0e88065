//! Property-based tests for identifier parsing
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use solotest::identifier::TestIdentifier;

const SEGMENT: &str = "[a-z_][a-z0-9_]{0,12}";

fn module_path() -> impl Strategy<Value = String> {
    proptest::collection::vec(SEGMENT, 1..4).prop_map(|segs| segs.join("::"))
}

proptest! {
    /// Property: parsing never panics, whatever the input.
    #[test]
    fn parse_never_panics(raw in ".*") {
        let _ = TestIdentifier::parse(&raw);
    }

    /// Property: the raw and delimited encodings of the same test agree on
    /// the canonical selector.
    #[test]
    fn encodings_agree_on_selector(path in module_path(), name in SEGMENT) {
        let raw = TestIdentifier::parse(&format!("{path}::{name}")).unwrap();
        let delimited = TestIdentifier::parse(&format!("{path}#{name}")).unwrap();
        prop_assert_eq!(raw.selector(), delimited.selector());
    }

    /// Property: an identifier always selects its own canonical name.
    #[test]
    fn identifier_selects_its_own_selector(path in module_path(), name in SEGMENT) {
        let id = TestIdentifier::parse(&format!("{path}#{name}")).unwrap();
        prop_assert!(id.matches(&id.selector()));
    }

    /// Property: an identifier also selects its selector behind extra
    /// qualifying modules.
    #[test]
    fn suffix_match_allows_extra_qualification(
        prefix in module_path(),
        path in module_path(),
        name in SEGMENT,
    ) {
        let id = TestIdentifier::parse(&format!("{path}#{name}")).unwrap();
        let qualified = format!("{prefix}::{}", id.selector());
        prop_assert!(id.matches(&qualified));
    }

    /// Property: parsing a selector round-trips through Display.
    #[test]
    fn display_round_trips(path in module_path(), name in SEGMENT) {
        let id = TestIdentifier::parse(&format!("{path}#{name}")).unwrap();
        let reparsed = TestIdentifier::parse(&id.to_string()).unwrap();
        prop_assert_eq!(id.selector(), reparsed.selector());
    }
}
