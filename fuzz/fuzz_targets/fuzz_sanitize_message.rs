//! Fuzz target for error message redaction.
//!
//! The output must respect the (clamped) length limit for any message and
//! any combination of category switches.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sg_config::ErrorSanitizationConfig;
use sg_redact::sanitize_error_message;

#[derive(Debug, Arbitrary)]
struct Input {
    message: String,
    max_message_length: u32,
    flags: u8,
}

fuzz_target!(|input: Input| {
    let config = ErrorSanitizationConfig {
        max_message_length: input.max_message_length as usize,
        redact_passwords: input.flags & 0x01 != 0,
        redact_api_keys: input.flags & 0x02 != 0,
        redact_file_paths: input.flags & 0x04 != 0,
        redact_database_urls: input.flags & 0x08 != 0,
        redact_network_info: input.flags & 0x10 != 0,
        redact_personal_info: input.flags & 0x20 != 0,
        ..ErrorSanitizationConfig::default()
    };
    let (normalized, _) = config.normalized();

    let out = sanitize_error_message(&input.message, &config);
    assert!(out.chars().count() <= normalized.max_message_length);
});
