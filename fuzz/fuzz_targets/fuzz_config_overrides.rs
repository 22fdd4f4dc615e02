//! Fuzz target for JSON configuration overrides.
//!
//! Parsing returns an error for bad input, and any parsed override merges
//! into a preset that normalizes to in-range values.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sg_config::{create_environment_config, Environment, ErrorSanitizationOverrides};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(overrides) = ErrorSanitizationOverrides::from_json(text) else {
        return;
    };
    for env in Environment::ALL {
        let config = create_environment_config(*env, Some(&overrides));
        assert!((1..=1000).contains(&config.max_stack_depth));
        assert!((10..=100_000).contains(&config.max_message_length));
        let _ = sg_config::compile_patterns(&config.custom_patterns);
    }
});
