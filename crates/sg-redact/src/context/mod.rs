//! Redaction of structured diagnostic context.
//!
//! The pipeline for one error:
//! 1. Serialize name, redacted message, own properties and additional context
//!    through [`SafeSerializer`] (dangerous keys, cycles, exotic values)
//! 2. Pre-truncate oversized properties when the rough size exceeds three
//!    times `max_context_length`
//! 3. Apply the redaction level (none, partial, full)
//! 4. Re-truncate any string still above `max_context_length`

pub mod detect;
pub mod forward;
pub mod id;
pub mod value;

pub use detect::{SensitiveContextDetection, SensitiveDataDetector, SensitiveType};
pub use forward::{create_safe_error_for_forwarding, ForwardedError};
pub use id::{generate_error_id, is_error_id};
pub use value::{ContextObject, ContextValue, SafeSerializer, DANGEROUS_KEYS};

use crate::error_info::ErrorInfo;
use crate::message::MessageRedactor;
use crate::text::{char_len, truncate_with_suffix};
use chrono::{SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use sg_config::{ErrorContextConfig, ErrorSanitizationConfig, RedactionLevel};
use std::collections::BTreeMap;
use value::join_path;

/// Replacement for sensitive array elements.
pub const REDACTED_ELEMENT: &str = "[REDACTED]";

/// Appended to context strings cut to `max_context_length`.
pub const CONTEXT_TRUNCATION_SUFFIX: &str = "...[truncated]";

static RE_PLAIN_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]{1,64}$").unwrap());

/// Result of context redaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedErrorContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
    pub context: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub redacted_properties: Vec<String>,
    pub security_warnings: Vec<String>,
    pub had_sensitive_data: bool,
    /// Property path to the reason it was removed.
    pub redaction_hints: BTreeMap<String, String>,
}

/// Reusable context redactor for one configuration.
#[derive(Debug, Clone)]
pub struct ContextRedactor {
    config: ErrorContextConfig,
    detector: SensitiveDataDetector,
    messages: MessageRedactor,
}

impl ContextRedactor {
    pub fn new(config: &ErrorContextConfig) -> Self {
        let (config, _warnings) = config.normalized();
        let custom = sg_config::compile_patterns(&config.custom_context_patterns)
            .into_iter()
            .enumerate()
            .filter_map(|(index, compiled)| match compiled {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!(target: "sg_redact::context", index, error = %e, "custom context pattern skipped");
                    None
                }
            })
            .collect();
        Self {
            config,
            detector: SensitiveDataDetector::new(custom),
            messages: MessageRedactor::new(&ErrorSanitizationConfig::default()),
        }
    }

    /// Use `messages` for the error message instead of the default redactor.
    pub fn with_message_redactor(mut self, messages: MessageRedactor) -> Self {
        self.messages = messages;
        self
    }

    pub fn config(&self) -> &ErrorContextConfig {
        &self.config
    }

    pub fn detector(&self) -> &SensitiveDataDetector {
        &self.detector
    }

    pub fn sanitize(
        &self,
        error: &ErrorInfo,
        additional: Option<&ContextObject>,
    ) -> SanitizedErrorContext {
        let now = Utc::now();
        let mut out = SanitizedErrorContext {
            error_id: None,
            context: Map::new(),
            code: error
                .code
                .as_deref()
                .filter(|c| RE_PLAIN_CODE.is_match(c))
                .map(str::to_string),
            timestamp: None,
            redacted_properties: Vec::new(),
            security_warnings: Vec::new(),
            had_sensitive_data: false,
            redaction_hints: BTreeMap::new(),
        };

        let mut context = self.collect(error, additional, &mut out);
        self.pre_truncate(&mut context, &mut out);

        match self.config.redaction_level {
            RedactionLevel::None => {
                let found = self.detector.detect(&Value::Object(context.clone()), "");
                out.had_sensitive_data = !found.is_empty();
            }
            RedactionLevel::Partial => {
                self.redact_map(&mut context, "", &mut out);
            }
            RedactionLevel::Full => {
                let mut kept = Map::new();
                for (key, value) in context {
                    if self.config.allows(&key) {
                        kept.insert(key, value);
                    } else {
                        out.redacted_properties.push(key);
                    }
                }
                context = kept;
                self.redact_map(&mut context, "", &mut out);
            }
        }

        self.post_truncate(&mut context, &mut out);
        out.context = context;

        if self.config.generate_secure_ids {
            out.error_id = Some(generate_error_id(&error.name, char_len(&error.message), now));
        }
        if self.config.preserve_timestamps {
            out.timestamp = Some(now.to_rfc3339_opts(SecondsFormat::Millis, true));
        }
        out
    }

    fn collect(
        &self,
        error: &ErrorInfo,
        additional: Option<&ContextObject>,
        out: &mut SanitizedErrorContext,
    ) -> Map<String, Value> {
        let mut serializer = SafeSerializer::new();
        let mut context = serializer.serialize_object(&error.properties, "");
        if let Some(extra) = additional {
            context.extend(serializer.serialize_object(extra, ""));
        }

        context.insert(
            "name".to_string(),
            Value::String(self.messages.strip_injection(&error.name)),
        );
        context.insert(
            "message".to_string(),
            Value::String(self.messages.sanitize(&error.message)),
        );

        for path in serializer.removed {
            out.security_warnings
                .push(format!("Removed dangerous property {}", path));
            out.redacted_properties.push(path);
        }
        out.security_warnings.extend(serializer.warnings);
        context
    }

    fn pre_truncate(&self, context: &mut Map<String, Value>, out: &mut SanitizedErrorContext) {
        let max = self.config.max_context_length;
        let estimate: usize = context
            .iter()
            .map(|(k, v)| k.len() + serialized_len(v))
            .sum();
        if estimate <= max.saturating_mul(3) {
            return;
        }

        tracing::debug!(
            target: "sg_redact::context",
            estimate,
            limit = max,
            "context pre-truncated"
        );
        let mut truncated = 0usize;
        for value in context.values_mut() {
            if serialized_len(value) <= max {
                continue;
            }
            let text = match &mut *value {
                Value::String(s) => std::mem::take(s),
                other => other.to_string(),
            };
            *value = Value::String(truncate_with_suffix(&text, max, CONTEXT_TRUNCATION_SUFFIX));
            truncated += 1;
        }
        out.security_warnings.push(format!(
            "Context size ~{} exceeds limit; {} properties truncated before redaction",
            estimate, truncated
        ));
    }

    fn redact_map(&self, map: &mut Map<String, Value>, path: &str, out: &mut SanitizedErrorContext) {
        let keys: Vec<String> = map.keys().cloned().collect();
        for key in keys {
            let child = join_path(path, &key);
            let sensitive = map
                .get(&key)
                .and_then(|v| self.detector.classify(Some(&key), v));
            if let Some(kind) = sensitive {
                map.remove(&key);
                record(out, &child, kind);
                continue;
            }
            if !self.config.sanitize_nested_objects {
                continue;
            }
            if let Some(v) = map.get_mut(&key) {
                self.redact_nested(v, &child, out);
            }
        }
    }

    fn redact_nested(&self, value: &mut Value, path: &str, out: &mut SanitizedErrorContext) {
        match value {
            Value::Object(inner) => self.redact_map(inner, path, out),
            Value::Array(items) => {
                for (i, item) in items.iter_mut().enumerate() {
                    let child = format!("{}[{}]", path, i);
                    if let Some(kind) = self.detector.classify(None, item) {
                        *item = Value::String(REDACTED_ELEMENT.to_string());
                        record(out, &child, kind);
                    } else {
                        self.redact_nested(item, &child, out);
                    }
                }
            }
            _ => {}
        }
    }

    fn post_truncate(&self, context: &mut Map<String, Value>, out: &mut SanitizedErrorContext) {
        let max = self.config.max_context_length;
        let mut count = 0usize;
        for value in context.values_mut() {
            count += truncate_strings(value, max);
        }
        if count > 0 {
            out.security_warnings.push(format!(
                "{} oversized context values truncated after redaction",
                count
            ));
        }
    }
}

fn record(out: &mut SanitizedErrorContext, path: &str, kind: SensitiveType) {
    out.had_sensitive_data = true;
    out.redacted_properties.push(path.to_string());
    out.redaction_hints
        .insert(path.to_string(), kind.hint().to_string());
}

fn serialized_len(value: &Value) -> usize {
    match value {
        Value::String(s) => s.len() + 2,
        other => other.to_string().len(),
    }
}

fn truncate_strings(value: &mut Value, max: usize) -> usize {
    match value {
        Value::String(s) if char_len(s) > max => {
            *s = truncate_with_suffix(s, max, CONTEXT_TRUNCATION_SUFFIX);
            1
        }
        Value::Array(items) => items.iter_mut().map(|v| truncate_strings(v, max)).sum(),
        Value::Object(map) => map.values_mut().map(|v| truncate_strings(v, max)).sum(),
        _ => 0,
    }
}

/// Redact `error` and `additional` context under `config`.
pub fn sanitize_error_context(
    error: &ErrorInfo,
    additional: Option<&ContextObject>,
    config: &ErrorContextConfig,
) -> SanitizedErrorContext {
    ContextRedactor::new(config).sanitize(error, additional)
}
