//! Size-bounded error payloads for telemetry forwarding.

use super::{ContextObject, ContextRedactor, SanitizedErrorContext};
use crate::error_info::ErrorInfo;
use crate::text::{char_len, truncate_chars, truncate_with_suffix};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use sg_config::{ErrorContextConfig, RedactionLevel};
use sg_patterns::Severity;

/// Upper bound on the serialized size of a [`ForwardedError`], in bytes.
pub const FORWARDING_SIZE_CAP: usize = 8_000;

/// Per-property budget applied on top of the caller's configuration.
pub const FORWARDING_MAX_CONTEXT_LENGTH: usize = 2_000;

/// Warnings kept in a forwarded payload, including the summary line.
pub const MAX_FORWARDED_WARNINGS: usize = 10;

/// Context keys retained before any other.
pub const PRIORITY_KEYS: &[&str] = &[
    "code",
    "type",
    "status",
    "statusCode",
    "operation",
    "command",
    "component",
];

const MAX_NAME_CHARS: usize = 128;
const MAX_WARNING_CHARS: usize = 160;
const MIN_TRUNCATED_CHARS: usize = 16;

static RE_SECURITY_CONDITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:security|unauthori[sz]ed|forbidden|permission denied|access denied|authentication|csrf|xss|injection|traversal|tamper(?:ed|ing)?|privilege)").unwrap()
});

/// Sanitized error ready to leave the process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardedError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
    pub name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Low, medium or high; never critical.
    pub severity: Severity,
    pub context: Map<String, Value>,
    pub had_sensitive_data: bool,
    pub redacted_count: usize,
    pub security_warnings: Vec<String>,
    /// Context was dropped entirely to honour the size cap.
    pub context_truncated: bool,
}

impl ForwardedError {
    /// Serialized size in bytes.
    pub fn serialized_len(&self) -> usize {
        serde_json::to_string(self).map(|s| s.len()).unwrap_or(usize::MAX)
    }
}

/// Stricter redaction plus the forwarding size and warning caps.
pub fn create_safe_error_for_forwarding(
    error: &ErrorInfo,
    context: Option<&ContextObject>,
    config: &ErrorContextConfig,
) -> ForwardedError {
    let (mut strict, _warnings) = config.normalized();
    strict.max_context_length = strict.max_context_length.min(FORWARDING_MAX_CONTEXT_LENGTH);
    if strict.redaction_level != RedactionLevel::Full {
        strict.redaction_level = RedactionLevel::Partial;
    }

    let sanitized = ContextRedactor::new(&strict).sanitize(error, context);
    let severity = classify_severity(error, &sanitized);
    build_payload(sanitized, severity)
}

fn classify_severity(error: &ErrorInfo, sanitized: &SanitizedErrorContext) -> Severity {
    let message = sanitized
        .context
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if RE_SECURITY_CONDITION.is_match(&error.name) || RE_SECURITY_CONDITION.is_match(message) {
        Severity::High
    } else if sanitized.had_sensitive_data {
        Severity::Medium
    } else {
        Severity::Low
    }
}

fn build_payload(sanitized: SanitizedErrorContext, severity: Severity) -> ForwardedError {
    let SanitizedErrorContext {
        error_id,
        mut context,
        code,
        timestamp,
        redacted_properties,
        security_warnings,
        had_sensitive_data,
        ..
    } = sanitized;

    let name = take_string(&mut context, "name");
    let message = take_string(&mut context, "message");

    let mut payload = ForwardedError {
        error_id,
        name: truncate_chars(&name, MAX_NAME_CHARS).to_string(),
        message,
        code,
        timestamp,
        severity,
        context: Map::new(),
        had_sensitive_data,
        redacted_count: redacted_properties.len(),
        security_warnings: Vec::new(),
        context_truncated: false,
    };

    let mut warnings: Vec<String> = security_warnings
        .iter()
        .map(|w| truncate_with_suffix(w, MAX_WARNING_CHARS, "..."))
        .collect();

    // Budget for context: cap minus the envelope with the (capped) warnings.
    payload.security_warnings = cap_warnings(warnings.clone());
    let envelope = payload.serialized_len();
    let mut remaining = FORWARDING_SIZE_CAP.saturating_sub(envelope + 128);

    let (retained, omitted) = retain_by_priority(context, &mut remaining);
    payload.context = retained;
    if omitted > 0 {
        tracing::debug!(
            target: "sg_redact::forward",
            omitted,
            "context properties omitted for forwarding cap"
        );
        warnings.push(format!(
            "{} context properties omitted to fit forwarding size limit",
            omitted
        ));
        payload.security_warnings = cap_warnings(warnings);
    }

    enforce_cap(&mut payload);
    payload
}

fn take_string(context: &mut Map<String, Value>, key: &str) -> String {
    match context.remove(key) {
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn cap_warnings(mut warnings: Vec<String>) -> Vec<String> {
    if warnings.len() > MAX_FORWARDED_WARNINGS {
        let extra = warnings.len() - (MAX_FORWARDED_WARNINGS - 1);
        warnings.truncate(MAX_FORWARDED_WARNINGS - 1);
        warnings.push(format!("... and {} more security warnings", extra));
    }
    warnings
}

fn entry_len(key: &str, value: &Value) -> usize {
    // "key":value,
    serde_json::to_string(key).map(|k| k.len()).unwrap_or(usize::MAX / 4)
        + serde_json::to_string(value).map(|v| v.len()).unwrap_or(usize::MAX / 4)
        + 2
}

fn retain_by_priority(
    mut context: Map<String, Value>,
    remaining: &mut usize,
) -> (Map<String, Value>, usize) {
    let mut ordered: Vec<(String, Value)> = Vec::with_capacity(context.len());
    for key in PRIORITY_KEYS {
        if let Some(v) = context.remove(*key) {
            ordered.push((key.to_string(), v));
        }
    }
    ordered.extend(context);

    let mut retained = Map::new();
    let mut omitted = 0usize;
    for (key, value) in ordered {
        let size = entry_len(&key, &value);
        if size <= *remaining {
            *remaining -= size;
            retained.insert(key, value);
            continue;
        }
        match shrink_to_fit(&key, &value, *remaining) {
            Some((shrunk, size)) => {
                *remaining -= size;
                retained.insert(key, shrunk);
            }
            None => omitted += 1,
        }
    }
    (retained, omitted)
}

/// Truncated string form of `value` whose entry fits in `budget`, if any.
fn shrink_to_fit(key: &str, value: &Value, budget: usize) -> Option<(Value, usize)> {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let mut chars = char_len(&text).min(budget);
    while chars >= MIN_TRUNCATED_CHARS {
        let candidate = Value::String(truncate_with_suffix(&text, chars, "..."));
        let size = entry_len(key, &candidate);
        if size <= budget {
            return Some((candidate, size));
        }
        chars /= 2;
    }
    None
}

fn enforce_cap(payload: &mut ForwardedError) {
    if payload.serialized_len() <= FORWARDING_SIZE_CAP {
        return;
    }
    tracing::debug!(target: "sg_redact::forward", "forwarded payload over cap; dropping context");
    payload.context = Map::new();
    payload.context_truncated = true;
    if payload.serialized_len() <= FORWARDING_SIZE_CAP {
        return;
    }

    let count = payload.security_warnings.len();
    payload.security_warnings = vec![format!("{} security warnings omitted", count)];
    if payload.serialized_len() <= FORWARDING_SIZE_CAP {
        return;
    }

    for limit in [200, 50] {
        payload.message = truncate_with_suffix(&payload.message, limit, "...");
        if payload.serialized_len() <= FORWARDING_SIZE_CAP {
            return;
        }
    }
    payload.name = truncate_chars(&payload.name, 32).to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ContextValue, CONTEXT_TRUNCATION_SUFFIX};
    use serde_json::json;

    fn object(value: Value) -> ContextObject {
        match ContextValue::from(value) {
            ContextValue::Object(o) => o,
            _ => ContextObject::new(),
        }
    }

    #[test]
    fn test_small_payload_kept_whole() {
        let ctx = object(json!({"operation": "upload", "statusCode": 502, "attempt": 2}));
        let out = create_safe_error_for_forwarding(
            &ErrorInfo::new("UploadError", "upstream unavailable"),
            Some(&ctx),
            &ErrorContextConfig::default(),
        );
        assert_eq!(out.name, "UploadError");
        assert_eq!(out.message, "upstream unavailable");
        assert_eq!(out.context["operation"], "upload");
        assert_eq!(out.context["attempt"], 2);
        assert!(!out.context.contains_key("name"));
        assert_eq!(out.severity, Severity::Low);
        assert!(!out.context_truncated);
    }

    #[test]
    fn test_out_of_range_limit_still_capped_for_forwarding() {
        let detail = "lorem ipsum ".repeat(250);
        let ctx = object(json!({"detail": detail}));
        let config = ErrorContextConfig {
            max_context_length: 50,
            ..Default::default()
        };
        let out = create_safe_error_for_forwarding(
            &ErrorInfo::new("ReportError", "render failed"),
            Some(&ctx),
            &config,
        );
        let kept = out.context["detail"].as_str().unwrap();
        assert!(kept.chars().count() <= FORWARDING_MAX_CONTEXT_LENGTH, "len {}", kept.len());
        assert!(kept.ends_with(CONTEXT_TRUNCATION_SUFFIX));
    }

    #[test]
    fn test_large_context_fits_cap_and_keeps_priority_keys() {
        let mut map = serde_json::Map::new();
        for i in 0..200 {
            map.insert(format!("field{}", i), json!("v".repeat(500)));
        }
        map.insert("component".to_string(), json!("billing"));
        map.insert("statusCode".to_string(), json!(500));
        let ctx = object(Value::Object(map));

        let out = create_safe_error_for_forwarding(
            &ErrorInfo::new("Error", "batch failed"),
            Some(&ctx),
            &ErrorContextConfig::default(),
        );
        assert!(out.serialized_len() <= FORWARDING_SIZE_CAP, "{}", out.serialized_len());
        assert_eq!(out.context["component"], "billing");
        assert_eq!(out.context["statusCode"], 500);
        assert!(out.context.len() < 202);
        assert!(out
            .security_warnings
            .iter()
            .any(|w| w.contains("omitted to fit forwarding size limit")));
    }

    #[test]
    fn test_warnings_capped_with_summary() {
        let ctx = ContextObject::new();
        for i in 0..15 {
            let cyclic = ContextObject::new();
            cyclic.insert("me", cyclic.clone());
            ctx.insert(format!("c{}", i), cyclic);
        }
        let out = create_safe_error_for_forwarding(
            &ErrorInfo::new("Error", "m"),
            Some(&ctx),
            &ErrorContextConfig::default(),
        );
        assert_eq!(out.security_warnings.len(), MAX_FORWARDED_WARNINGS);
        assert_eq!(
            out.security_warnings.last().map(String::as_str),
            Some("... and 6 more security warnings")
        );
        for (_, value) in ctx.entries() {
            if let ContextValue::Object(o) = value {
                o.insert("me", ContextValue::Null);
            }
        }
    }

    #[test]
    fn test_severity() {
        let cfg = ErrorContextConfig::default();
        let high = create_safe_error_for_forwarding(
            &ErrorInfo::new("AuthError", "Permission denied for resource"),
            None,
            &cfg,
        );
        assert_eq!(high.severity, Severity::High);

        let ctx = object(json!({"token": "abc"}));
        let medium =
            create_safe_error_for_forwarding(&ErrorInfo::new("Error", "m"), Some(&ctx), &cfg);
        assert_eq!(medium.severity, Severity::Medium);
        assert!(medium.had_sensitive_data);
        assert_eq!(medium.redacted_count, 1);
        assert!(!medium.context.contains_key("token"));
    }

    #[test]
    fn test_per_property_budget_tightened() {
        let ctx = object(json!({"detail": "d".repeat(3_000)}));
        let out = create_safe_error_for_forwarding(
            &ErrorInfo::new("Error", "m"),
            Some(&ctx),
            &ErrorContextConfig::default(),
        );
        let detail = out.context["detail"].as_str().unwrap();
        assert!(detail.chars().count() <= FORWARDING_MAX_CONTEXT_LENGTH);
    }
}
