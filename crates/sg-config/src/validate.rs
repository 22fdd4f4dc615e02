//! Range validation for numeric settings.
//!
//! Out-of-range values are replaced by their default and reported as
//! [`ConfigWarning`]s; they are never rejected.

use crate::context::ErrorContextConfig;
use crate::sanitization::ErrorSanitizationConfig;
use serde::Serialize;
use std::ops::RangeInclusive;

pub const DEFAULT_MAX_STACK_DEPTH: usize = 10;
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 500;
pub const DEFAULT_MAX_CONTEXT_LENGTH: usize = 10_000;

pub const STACK_DEPTH_RANGE: RangeInclusive<usize> = 1..=1000;
pub const MESSAGE_LENGTH_RANGE: RangeInclusive<usize> = 10..=100_000;
pub const CONTEXT_LENGTH_RANGE: RangeInclusive<usize> = 100..=1_000_000;

/// A setting that was replaced during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigWarning {
    pub field: &'static str,
    pub message: String,
}

fn clamp_field(
    field: &'static str,
    value: &mut usize,
    range: RangeInclusive<usize>,
    default: usize,
    warnings: &mut Vec<ConfigWarning>,
) {
    if range.contains(&*value) {
        return;
    }
    tracing::warn!(
        target: "sg_config::validate",
        field,
        supplied = *value,
        applied = default,
        "configuration value out of range"
    );
    warnings.push(ConfigWarning {
        field,
        message: format!(
            "{} is outside [{}, {}], using {}",
            value,
            range.start(),
            range.end(),
            default
        ),
    });
    *value = default;
}

impl ErrorSanitizationConfig {
    /// Copy with every numeric bound inside its safe range.
    pub fn normalized(&self) -> (Self, Vec<ConfigWarning>) {
        let mut config = self.clone();
        let mut warnings = Vec::new();
        clamp_field(
            "maxStackDepth",
            &mut config.max_stack_depth,
            STACK_DEPTH_RANGE,
            DEFAULT_MAX_STACK_DEPTH,
            &mut warnings,
        );
        clamp_field(
            "maxMessageLength",
            &mut config.max_message_length,
            MESSAGE_LENGTH_RANGE,
            DEFAULT_MAX_MESSAGE_LENGTH,
            &mut warnings,
        );
        (config, warnings)
    }
}

impl ErrorContextConfig {
    /// Copy with every numeric bound inside its safe range.
    pub fn normalized(&self) -> (Self, Vec<ConfigWarning>) {
        let mut config = self.clone();
        let mut warnings = Vec::new();
        clamp_field(
            "maxContextLength",
            &mut config.max_context_length,
            CONTEXT_LENGTH_RANGE,
            DEFAULT_MAX_CONTEXT_LENGTH,
            &mut warnings,
        );
        (config, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_untouched() {
        let (config, warnings) = ErrorSanitizationConfig::default().normalized();
        assert!(warnings.is_empty());
        assert_eq!(config, ErrorSanitizationConfig::default());
    }

    #[test]
    fn test_out_of_range_replaced_by_default() {
        let config = ErrorSanitizationConfig {
            max_stack_depth: 0,
            max_message_length: 5_000_000,
            ..Default::default()
        };
        let (config, warnings) = config.normalized();
        assert_eq!(config.max_stack_depth, DEFAULT_MAX_STACK_DEPTH);
        assert_eq!(config.max_message_length, DEFAULT_MAX_MESSAGE_LENGTH);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].field, "maxStackDepth");
        assert!(warnings[1].message.contains("5000000"));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let config = ErrorSanitizationConfig {
            max_stack_depth: 1000,
            max_message_length: 10,
            ..Default::default()
        };
        let (config, warnings) = config.normalized();
        assert!(warnings.is_empty());
        assert_eq!(config.max_stack_depth, 1000);
        assert_eq!(config.max_message_length, 10);
    }

    #[test]
    fn test_context_length_clamped() {
        let config = ErrorContextConfig {
            max_context_length: 99,
            ..Default::default()
        };
        let (config, warnings) = config.normalized();
        assert_eq!(config.max_context_length, DEFAULT_MAX_CONTEXT_LENGTH);
        assert_eq!(warnings[0].field, "maxContextLength");
    }
}
