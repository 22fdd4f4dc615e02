//! Property-based tests for sg-redact.
//!
//! Uses proptest to check the length, path and size guarantees for
//! arbitrary messages, stacks and context, not only curated samples.

use proptest::prelude::*;
use sg_config::{ErrorContextConfig, ErrorSanitizationConfig, StackTraceLevel};
use sg_redact::context::forward::FORWARDING_SIZE_CAP;
use sg_redact::{
    analyze_stack_trace_security, create_safe_error_for_forwarding, sanitize_error_message,
    sanitize_stack_trace, ContextObject, ErrorInfo,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Redacted messages never exceed the configured limit.
    #[test]
    fn message_respects_max_length(message in any::<String>(), max in 10usize..600) {
        let config = ErrorSanitizationConfig {
            max_message_length: max,
            ..ErrorSanitizationConfig::default()
        };
        let out = sanitize_error_message(&message, &config);
        prop_assert!(out.chars().count() <= max, "{} > {}", out.chars().count(), max);
    }

    /// Sanitized stacks never name a user's home directory.
    #[test]
    fn sanitized_stack_hides_home(
        user in "[a-z][a-z0-9._-]{2,95}",
        first in "[A-Z][a-z]{1,10}",
        last in "[A-Z][a-z]{1,10}",
        file in "[a-z]{1,10}",
        line in 1u32..9999,
        column in 1u32..200,
    ) {
        let stack = format!(
            "Error: boom\n    at run (/Users/{user}/proj/{file}.js:{line}:{column})\n    at main (/home/{user}/proj/{file}.js:1:1)\n    at win (C:\\Users\\{user}\\proj\\{file}.js:2:2)\n    at profile (C:\\Users\\{first} {last}\\proj\\{file}.js:3:3)",
        );
        let config = ErrorSanitizationConfig {
            stack_trace_level: StackTraceLevel::Sanitized,
            ..ErrorSanitizationConfig::default()
        };
        let out = sanitize_stack_trace(&stack, &config);
        let unix_mac = format!("/Users/{}", user);
        let unix_linux = format!("/home/{}", user);
        let windows = format!("\\Users\\{}", user);
        prop_assert!(!out.contains(&unix_mac), "{}", out);
        prop_assert!(!out.contains(&unix_linux), "{}", out);
        prop_assert!(!out.contains(&windows), "{}", out);
        let profile_tail = format!(" {}\\", last);
        prop_assert!(!out.contains(&profile_tail), "{}", out);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Forwarded payloads stay under the telemetry cap whatever the context.
    #[test]
    fn forwarding_stays_under_cap(
        fields in prop::collection::vec(("[a-z]{1,12}", "[ -~]{0,800}"), 0..120),
        message in "[ -~]{0,2000}",
    ) {
        let context = ContextObject::new();
        for (key, value) in fields {
            context.insert(key, value);
        }
        let out = create_safe_error_for_forwarding(
            &ErrorInfo::new("Error", message),
            Some(&context),
            &ErrorContextConfig::default(),
        );
        let len = serde_json::to_string(&out).unwrap().len();
        prop_assert!(len <= FORWARDING_SIZE_CAP, "{} > {}", len, FORWARDING_SIZE_CAP);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Pathological repeats are audited within the caps.
    #[test]
    fn audit_handles_repeats(c in any::<char>(), count in 1usize..100_000) {
        let input: String = std::iter::repeat(c).take(count).collect();
        let report = analyze_stack_trace_security(&input);
        let within_cap = report.findings.iter().all(|f| {
            f.location
                .strip_prefix("line ")
                .and_then(|n| n.parse::<usize>().ok())
                .map_or(false, |n| n <= 100)
        });
        prop_assert!(within_cap);
    }
}
