//! Property-based tests for sg-input.
//!
//! Uses proptest to check that analysis and sanitization hold their
//! guarantees for arbitrary strings, not only the curated attack list.

use proptest::prelude::*;
use sg_input::{analyze_input_security, is_path_safe, sanitize_input, MAX_RISK_SCORE};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The risk score never leaves [0, 100].
    #[test]
    fn risk_score_is_bounded(input in any::<String>()) {
        let result = analyze_input_security(input.as_str());
        prop_assert!(result.risk_score <= MAX_RISK_SCORE);
    }

    /// is_secure is exactly "no violations".
    #[test]
    fn secure_iff_no_violations(input in "[ -~]{0,64}") {
        let result = analyze_input_security(input.as_str());
        prop_assert_eq!(result.is_secure, result.violations.is_empty());
        if result.is_secure {
            prop_assert_eq!(result.risk_score, 0);
        }
    }

    /// Sanitized output contains no parent segments or shell metacharacters.
    #[test]
    fn sanitized_output_has_no_traversal_or_meta(input in r"[a-z./\\;&|`$<> ]{0,48}") {
        let cleaned = sanitize_input(input.as_str());
        prop_assert!(!cleaned.contains("../"), "{:?} -> {:?}", input, cleaned);
        prop_assert!(!cleaned.contains("..\\"), "{:?} -> {:?}", input, cleaned);
        for meta in [';', '&', '|', '`', '$', '<', '>'] {
            prop_assert!(!cleaned.contains(meta), "{:?} -> {:?}", input, cleaned);
        }
    }

    /// Plain relative paths built from safe segments are accepted.
    #[test]
    fn plain_relative_paths_are_safe(segments in prop::collection::vec("[a-z]{1,6}_[0-9]{1,3}", 1..5)) {
        let path = segments.join("/");
        prop_assert!(is_path_safe(&path), "{:?} rejected", path);
    }
}
