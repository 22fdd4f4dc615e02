//! Environment presets.
//!
//! - Development: nothing path-like redacted, full stacks, generous limits
//! - Staging: sanitized stacks, moderate limits
//! - Production: minimal stacks, tight limits, everything stripped

use crate::error::ConfigError;
use crate::sanitization::{ErrorSanitizationConfig, ErrorSanitizationOverrides, StackTraceLevel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Maximum debuggability. Never use in production.
    #[default]
    Development,
    /// Pre-production: enough detail to debug, no raw paths.
    Staging,
    /// Least disclosure.
    Production,
}

impl Environment {
    pub const ALL: &'static [Environment] = &[
        Environment::Development,
        Environment::Staging,
        Environment::Production,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Parse an environment name, accepting common aliases.
    pub fn parse(s: &str) -> Option<Environment> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Some(Environment::Development),
            "staging" | "stage" | "test" | "qa" => Some(Environment::Staging),
            "production" | "prod" => Some(Environment::Production),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Environment::Development => "Full stacks and paths, large limits, for local debugging",
            Environment::Staging => "Sanitized stacks, source maps and module names stripped",
            Environment::Production => {
                "Minimal stacks, tight limits, line numbers and all paths removed"
            }
        }
    }

    /// Preset redaction settings for this environment.
    pub fn preset(&self) -> ErrorSanitizationConfig {
        let base = ErrorSanitizationConfig::default();
        match self {
            Environment::Development => ErrorSanitizationConfig {
                redact_file_paths: false,
                redact_network_info: false,
                max_message_length: 5000,
                max_stack_depth: 50,
                stack_trace_level: StackTraceLevel::Full,
                remove_source_maps: false,
                sanitize_module_names: false,
                remove_line_numbers: false,
                ..base
            },
            Environment::Staging => ErrorSanitizationConfig {
                max_message_length: 1000,
                max_stack_depth: 20,
                stack_trace_level: StackTraceLevel::Sanitized,
                remove_source_maps: true,
                sanitize_module_names: true,
                remove_line_numbers: false,
                ..base
            },
            Environment::Production => ErrorSanitizationConfig {
                max_message_length: 300,
                max_stack_depth: 5,
                stack_trace_level: StackTraceLevel::Minimal,
                remove_source_maps: true,
                sanitize_module_names: true,
                remove_line_numbers: true,
                ..base
            },
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::parse(s).ok_or_else(|| ConfigError::UnknownEnvironment(s.to_string()))
    }
}

/// Build the preset for `environment` with `overrides` merged on top.
///
/// The result is normalized; any clamped override is logged.
pub fn create_environment_config(
    environment: Environment,
    overrides: Option<&ErrorSanitizationOverrides>,
) -> ErrorSanitizationConfig {
    let preset = environment.preset();
    let merged = match overrides {
        Some(o) => preset.merged(o),
        None => preset,
    };
    let (config, _warnings) = merged.normalized();
    config
}
