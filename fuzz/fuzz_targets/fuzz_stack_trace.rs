//! Fuzz target for stack trace redaction and auditing.
//!
//! Every level must handle arbitrary text without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sg_config::{ErrorSanitizationConfig, StackTraceLevel};
use sg_redact::{analyze_stack_trace_security, sanitize_stack_trace};

const LEVELS: [StackTraceLevel; 4] = [
    StackTraceLevel::None,
    StackTraceLevel::Minimal,
    StackTraceLevel::Sanitized,
    StackTraceLevel::Full,
];

fuzz_target!(|data: &[u8]| {
    let stack = String::from_utf8_lossy(data);

    for level in LEVELS {
        let config = ErrorSanitizationConfig {
            stack_trace_level: level,
            remove_line_numbers: data.len() % 2 == 0,
            ..ErrorSanitizationConfig::default()
        };
        let out = sanitize_stack_trace(&stack, &config);
        if level == StackTraceLevel::None {
            assert!(out.is_empty());
        }
    }

    let _ = analyze_stack_trace_security(&stack);
});
