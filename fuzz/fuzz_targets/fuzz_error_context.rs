//! Fuzz target for context redaction and forwarding.
//!
//! Arbitrary JSON becomes error context; dangerous keys must never reach the
//! output and forwarded payloads must stay under the size cap.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sg_config::ErrorContextConfig;
use sg_redact::context::forward::FORWARDING_SIZE_CAP;
use sg_redact::context::DANGEROUS_KEYS;
use sg_redact::{
    analyze_error_context_security, create_safe_error_for_forwarding, sanitize_error_context,
    ContextObject, ContextValue, ErrorInfo,
};

fn has_dangerous_key(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Object(map) => map
            .iter()
            .any(|(k, v)| DANGEROUS_KEYS.contains(&k.as_str()) || has_dangerous_key(v)),
        serde_json::Value::Array(items) => items.iter().any(has_dangerous_key),
        _ => false,
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let context = match ContextValue::from(value) {
        ContextValue::Object(object) => object,
        other => {
            let object = ContextObject::new();
            object.insert("value", other);
            object
        }
    };
    let error = ErrorInfo::new("FuzzError", String::from_utf8_lossy(data));

    let out = sanitize_error_context(&error, Some(&context), &ErrorContextConfig::default());
    assert!(!has_dangerous_key(&serde_json::Value::Object(out.context)));

    let forwarded = create_safe_error_for_forwarding(&error, Some(&context), &ErrorContextConfig::default());
    assert!(forwarded.serialized_len() <= FORWARDING_SIZE_CAP);

    let _ = analyze_error_context_security(&context);
});
