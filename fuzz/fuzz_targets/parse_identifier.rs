#![no_main]

use libfuzzer_sys::fuzz_target;
use solotest::identifier::TestIdentifier;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(id) = TestIdentifier::parse(s) {
            // Rendering and self-matching must never panic either
            let selector = id.selector();
            let _ = id.matches(&selector);
        }
    }
});
