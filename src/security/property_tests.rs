//! Property-based tests for script path sanitization.
//!
//! # Tested Invariants
//!
//! - Output always has a non-hidden filename with the forced extension
//! - Output is relative and free of traversal segments
//! - No segment (or final stem) is a reserved name
//! - Output is under the length cap or is exactly the overlong fallback
//! - Only allowed characters appear in the output
//!
//! # Running Tests
//!
//! ```bash
//! cargo test security::property_tests
//! ```

use std::path::{Component, Path};

use proptest::prelude::*;

use super::{ReservedNames, Sanitizer};

// ============================================================================
// Test Strategies - Input Generation
// ============================================================================

/// Arbitrary unicode, including control characters.
fn any_input() -> impl Strategy<Value = String> {
    any::<String>()
}

/// Inputs built from path-like pieces, so traversal and reserved names
/// show up far more often than in random strings.
fn pathlike_input() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("..".to_string()),
        Just(".".to_string()),
        Just("".to_string()),
        Just("CON".to_string()),
        Just("nul.txt".to_string()),
        Just("lpt10".to_string()),
        Just(".hidden".to_string()),
        Just("C:".to_string()),
        "[a-zA-Z0-9_. -]{1,12}",
    ];
    let sep = prop_oneof![Just("/"), Just("\\")];
    prop::collection::vec((piece, sep), 0..12).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(piece, sep)| format!("{piece}{sep}"))
            .collect::<String>()
    })
}

/// Long runs that sit near the length cap.
fn long_input() -> impl Strategy<Value = String> {
    "[a-z/]{150,260}"
}

fn table() -> impl Strategy<Value = ReservedNames> {
    prop_oneof![Just(ReservedNames::WINDOWS), Just(ReservedNames::NONE)]
}

fn input() -> impl Strategy<Value = String> {
    prop_oneof![any_input(), pathlike_input(), long_input()]
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    /// Invariant: every output names a visible `.lua` file.
    #[test]
    fn output_has_visible_lua_filename(reserved in table(), raw in input()) {
        let out = Sanitizer::new(reserved).sanitize(&raw);

        prop_assert!(!out.as_os_str().is_empty());
        let name = out.file_name().and_then(|n| n.to_str());
        prop_assert!(name.is_some(), "no filename in {:?}", out);
        prop_assert!(!name.unwrap_or_default().starts_with('.'), "hidden: {:?}", out);
        prop_assert_eq!(out.extension().and_then(|e| e.to_str()), Some("lua"));
    }

    /// Invariant: output is relative and contains only normal components.
    #[test]
    fn output_is_relative(reserved in table(), raw in input()) {
        let out = Sanitizer::new(reserved).sanitize(&raw);

        prop_assert!(out.is_relative());
        for component in out.components() {
            prop_assert!(
                matches!(component, Component::Normal(_)),
                "unexpected component {:?} in {:?}", component, out
            );
        }
    }

    /// Invariant: no segment or final stem is a reserved device name.
    #[test]
    fn output_avoids_reserved_names(raw in input()) {
        let reserved = ReservedNames::WINDOWS;
        let out = Sanitizer::new(reserved).sanitize(&raw);

        for component in out.components() {
            let segment = component.as_os_str().to_str().unwrap_or_default();
            prop_assert!(!reserved.contains(segment), "reserved segment in {:?}", out);
        }
        let stem = out.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        prop_assert!(!reserved.contains(stem), "reserved stem in {:?}", out);
    }

    /// Invariant: output fits under the cap unless it is the fallback.
    #[test]
    fn output_respects_length_cap(reserved in table(), raw in input()) {
        let sanitizer = Sanitizer::new(reserved);
        let out = sanitizer.sanitize(&raw);

        prop_assert!(
            out.as_os_str().len() < 200 || out == sanitizer.overlong_fallback(),
            "{} bytes: {:?}", out.as_os_str().len(), out
        );
    }

    /// Invariant: only ASCII alphanumerics, `_`, `-`, `.` and separators.
    #[test]
    fn output_uses_allowed_characters(reserved in table(), raw in input()) {
        let out = Sanitizer::new(reserved).sanitize(&raw);
        let text = out.to_str().unwrap_or_default();

        prop_assert!(
            text.chars().all(|c| c.is_ascii_alphanumeric()
                || matches!(c, '_' | '-' | '.')
                || std::path::is_separator(c)),
            "bad character in {:?}", out
        );
    }

    /// Sanitizing a sanitized path is a no-op for ordinary names.
    #[test]
    fn simple_names_are_stable(name in "[a-z][a-z0-9_]{0,30}") {
        let sanitizer = Sanitizer::new(ReservedNames::WINDOWS);
        let once = sanitizer.sanitize(&name);
        let twice = sanitizer.sanitize(once.to_str().unwrap_or_default());
        prop_assert_eq!(once, twice);
    }

    /// Sanitization is a pure function of its input.
    #[test]
    fn sanitize_is_deterministic(reserved in table(), raw in input()) {
        let sanitizer = Sanitizer::new(reserved);
        prop_assert_eq!(sanitizer.sanitize(&raw), sanitizer.sanitize(&raw));
    }
}

#[test]
fn concurrent_callers_agree() {
    let sanitizer = Sanitizer::new(ReservedNames::WINDOWS);
    let expected = sanitizer.sanitize("../con/aux.txt");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| sanitizer.sanitize("../con/aux.txt")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
    assert_eq!(expected, Path::new("_con").join("_aux.lua"));
}
