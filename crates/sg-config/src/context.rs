//! Diagnostic context redaction settings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// How aggressively context properties are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedactionLevel {
    /// Pass everything through.
    None,
    /// Drop only properties with a sensitive-data detection.
    #[default]
    Partial,
    /// Keep only allow-listed properties.
    Full,
}

impl RedactionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedactionLevel::None => "none",
            RedactionLevel::Partial => "partial",
            RedactionLevel::Full => "full",
        }
    }
}

impl fmt::Display for RedactionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Properties retained under [`RedactionLevel::Full`] unless overridden.
pub const DEFAULT_ALLOWED_PROPERTIES: &[&str] = &[
    "code",
    "type",
    "name",
    "status",
    "statusCode",
    "timestamp",
    "errorId",
    "command",
    "operation",
];

/// Settings for context redaction and forwarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorContextConfig {
    /// Attach an opaque `ERR_<year>_<hex>` identifier.
    pub generate_secure_ids: bool,
    pub redaction_level: RedactionLevel,
    pub allowed_properties: BTreeSet<String>,
    /// Budget in characters for a single serialized property.
    pub max_context_length: usize,
    pub sanitize_nested_objects: bool,
    pub preserve_timestamps: bool,
    /// Extra regexes; string values matching one are treated as sensitive.
    pub custom_context_patterns: Vec<String>,
}

impl Default for ErrorContextConfig {
    fn default() -> Self {
        Self {
            generate_secure_ids: true,
            redaction_level: RedactionLevel::Partial,
            allowed_properties: DEFAULT_ALLOWED_PROPERTIES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            max_context_length: crate::validate::DEFAULT_MAX_CONTEXT_LENGTH,
            sanitize_nested_objects: true,
            preserve_timestamps: true,
            custom_context_patterns: Vec::new(),
        }
    }
}

impl ErrorContextConfig {
    pub fn allows(&self, property: &str) -> bool {
        self.allowed_properties.contains(property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allow_list() {
        let config = ErrorContextConfig::default();
        assert!(config.allows("statusCode"));
        assert!(config.allows("errorId"));
        assert!(!config.allows("password"));
        assert_eq!(config.redaction_level, RedactionLevel::Partial);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ErrorContextConfig =
            serde_json::from_str(r#"{"redactionLevel":"full","maxContextLength":2000}"#).unwrap();
        assert_eq!(config.redaction_level, RedactionLevel::Full);
        assert_eq!(config.max_context_length, 2000);
        assert!(config.generate_secure_ids);
        assert!(config.allows("code"));
    }
}
