//! One-call sanitization of an error for user-facing output.

use crate::error_info::ErrorInfo;
use crate::message::MessageRedactor;
use crate::stack::StackTraceRedactor;
use crate::text::truncate_chars;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use sg_config::ErrorSanitizationConfig;

static RE_ERROR_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]{1,64}$").unwrap());

const MAX_NAME_CHARS: usize = 128;

/// Error with message and stack redacted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizedError {
    pub name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Redact `error` for display under `config`.
///
/// The stack is omitted when the error has none or the stack level yields
/// nothing. The code survives only with `preserve_error_codes` and only when
/// it is a plain identifier.
pub fn sanitize_error_for_production(
    error: &ErrorInfo,
    config: &ErrorSanitizationConfig,
) -> SanitizedError {
    let messages = MessageRedactor::new(config);
    let name = messages.strip_injection(truncate_chars(&error.name, MAX_NAME_CHARS));
    let message = messages.sanitize(&error.message);
    let preserve_codes = messages.config().preserve_error_codes;

    let stack = error
        .stack
        .as_deref()
        .map(|s| StackTraceRedactor::from_message_redactor(messages).sanitize(s))
        .filter(|s| !s.is_empty());

    let code = error
        .code
        .as_deref()
        .filter(|c| preserve_codes && RE_ERROR_CODE.is_match(c))
        .map(str::to_string);

    SanitizedError {
        name: if name.trim().is_empty() {
            "Error".to_string()
        } else {
            name
        },
        message,
        stack,
        code,
    }
}
