//! Error message and stack trace redaction settings.

use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much of a stack trace survives redaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackTraceLevel {
    /// Drop the stack entirely.
    None,
    /// First line and first frame only.
    Minimal,
    /// Every frame, through the full path pipeline.
    #[default]
    Sanitized,
    /// Every frame, only the most sensitive paths redacted.
    Full,
}

impl StackTraceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StackTraceLevel::None => "none",
            StackTraceLevel::Minimal => "minimal",
            StackTraceLevel::Sanitized => "sanitized",
            StackTraceLevel::Full => "full",
        }
    }
}

impl fmt::Display for StackTraceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settings for message and stack trace redaction.
///
/// Numeric fields are only trusted after [`normalized`](Self::normalized).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorSanitizationConfig {
    pub redact_passwords: bool,
    pub redact_api_keys: bool,
    pub redact_file_paths: bool,
    pub redact_database_urls: bool,
    pub redact_network_info: bool,
    pub redact_personal_info: bool,
    /// Extra regexes whose matches are replaced with `[REDACTED]`.
    pub custom_patterns: Vec<String>,
    /// Maximum message length in characters.
    pub max_message_length: usize,
    /// Maximum number of `at` frames kept.
    pub max_stack_depth: usize,
    pub stack_trace_level: StackTraceLevel,
    pub remove_source_maps: bool,
    pub sanitize_module_names: bool,
    pub remove_line_numbers: bool,
    pub preserve_error_codes: bool,
}

impl Default for ErrorSanitizationConfig {
    fn default() -> Self {
        Self {
            redact_passwords: true,
            redact_api_keys: true,
            redact_file_paths: true,
            redact_database_urls: true,
            redact_network_info: true,
            redact_personal_info: true,
            custom_patterns: Vec::new(),
            max_message_length: crate::validate::DEFAULT_MAX_MESSAGE_LENGTH,
            max_stack_depth: crate::validate::DEFAULT_MAX_STACK_DEPTH,
            stack_trace_level: StackTraceLevel::Sanitized,
            remove_source_maps: true,
            sanitize_module_names: true,
            remove_line_numbers: false,
            preserve_error_codes: true,
        }
    }
}

impl ErrorSanitizationConfig {
    /// Apply `overrides` on top of this config.
    pub fn merged(mut self, overrides: &ErrorSanitizationOverrides) -> Self {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = &overrides.$field { self.$field = v.clone(); })*
            };
        }
        take!(
            redact_passwords,
            redact_api_keys,
            redact_file_paths,
            redact_database_urls,
            redact_network_info,
            redact_personal_info,
            custom_patterns,
            max_message_length,
            max_stack_depth,
            stack_trace_level,
            remove_source_maps,
            sanitize_module_names,
            remove_line_numbers,
            preserve_error_codes,
        );
        self
    }

    /// Compile `custom_patterns`, skipping any that fail.
    ///
    /// Failures are logged with the pattern length only; pattern text may
    /// itself contain the secret it was written to catch.
    pub fn compiled_custom_patterns(&self) -> Vec<Regex> {
        compile_patterns(&self.custom_patterns)
            .into_iter()
            .filter_map(|r| match r {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!(target: "sg_config::patterns", error = %e, "skipping custom pattern");
                    None
                }
            })
            .collect()
    }
}

/// Compile caller patterns, one result per input.
pub fn compile_patterns(patterns: &[String]) -> Vec<Result<Regex, ConfigError>> {
    patterns
        .iter()
        .enumerate()
        .map(|(index, p)| {
            Regex::new(p).map_err(|e| {
                let kind = match e {
                    regex::Error::CompiledTooBig(_) => "compiled pattern too big",
                    _ => "syntax error",
                };
                ConfigError::InvalidPattern {
                    index,
                    message: format!("{} (pattern length {})", kind, p.len()),
                }
            })
        })
        .collect()
}

/// Caller overrides merged over an environment preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorSanitizationOverrides {
    pub redact_passwords: Option<bool>,
    pub redact_api_keys: Option<bool>,
    pub redact_file_paths: Option<bool>,
    pub redact_database_urls: Option<bool>,
    pub redact_network_info: Option<bool>,
    pub redact_personal_info: Option<bool>,
    pub custom_patterns: Option<Vec<String>>,
    pub max_message_length: Option<usize>,
    pub max_stack_depth: Option<usize>,
    pub stack_trace_level: Option<StackTraceLevel>,
    pub remove_source_maps: Option<bool>,
    pub sanitize_module_names: Option<bool>,
    pub remove_line_numbers: Option<bool>,
    pub preserve_error_codes: Option<bool>,
}

impl ErrorSanitizationOverrides {
    /// Parse overrides from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}
