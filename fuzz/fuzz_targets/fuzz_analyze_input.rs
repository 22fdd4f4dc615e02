//! Fuzz target for input threat analysis and the gates.
//!
//! Analysis must never panic, the score must stay in range and the
//! sanitizer must reach a fixed point.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sg_input::{
    analyze_input_security, is_command_safe, is_path_safe, is_project_name_safe, sanitize_input,
    MAX_RISK_SCORE,
};

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);

    let result = analyze_input_security(input.as_ref());
    assert!(result.risk_score <= MAX_RISK_SCORE);
    assert_eq!(result.is_secure, result.violations.is_empty());

    let cleaned = sanitize_input(input.as_ref());
    assert!(!cleaned.contains("../"));

    let _ = is_path_safe(&input);
    let _ = is_command_safe(input.as_ref());
    let _ = is_project_name_safe(&input);
});
