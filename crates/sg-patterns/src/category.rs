//! Rule categories for the threat and disclosure catalogs.

use serde::{Deserialize, Serialize};

/// Family of an input threat rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatCategory {
    /// `..` sequences in any encoding, UNC/drive roots, null bytes
    PathTraversal,
    /// Shell metacharacters, chaining, substitution, env manipulation
    CommandInjection,
    /// Commands that destroy data or take the host down
    DangerousCommand,
    /// eval/Function, script tags, SQL/NoSQL, template interpolation
    ScriptInjection,
    /// sudo/su/runas, UAC bypass, setuid, services, kernel modules
    PrivilegeEscalation,
    /// System files, reserved device names, sensitive extensions
    SensitivePath,
    /// Suspicious protocols, private addresses, sensitive ports
    Network,
    /// Cyrillic/Greek look-alikes, bidi overrides, zero-width characters
    UnicodeSpoofing,
    /// `__proto__` / `constructor.prototype` keys
    PrototypePollution,
    /// Input longer than the analysis window
    ExcessiveLength,
}

impl ThreatCategory {
    pub const ALL: &'static [ThreatCategory] = &[
        ThreatCategory::PathTraversal,
        ThreatCategory::CommandInjection,
        ThreatCategory::DangerousCommand,
        ThreatCategory::ScriptInjection,
        ThreatCategory::PrivilegeEscalation,
        ThreatCategory::SensitivePath,
        ThreatCategory::Network,
        ThreatCategory::UnicodeSpoofing,
        ThreatCategory::PrototypePollution,
        ThreatCategory::ExcessiveLength,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatCategory::PathTraversal => "path_traversal",
            ThreatCategory::CommandInjection => "command_injection",
            ThreatCategory::DangerousCommand => "dangerous_command",
            ThreatCategory::ScriptInjection => "script_injection",
            ThreatCategory::PrivilegeEscalation => "privilege_escalation",
            ThreatCategory::SensitivePath => "sensitive_path",
            ThreatCategory::Network => "network",
            ThreatCategory::UnicodeSpoofing => "unicode_spoofing",
            ThreatCategory::PrototypePollution => "prototype_pollution",
            ThreatCategory::ExcessiveLength => "excessive_length",
        }
    }

    /// Categories that make a string unsafe to hand to a shell.
    pub fn is_command_threat(&self) -> bool {
        matches!(
            self,
            ThreatCategory::CommandInjection
                | ThreatCategory::DangerousCommand
                | ThreatCategory::PrivilegeEscalation
        )
    }
}

impl std::fmt::Display for ThreatCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Family of an information-disclosure rule.
///
/// The order of [`DisclosureCategory::REDACTION_ORDER`] is the order in which
/// the message redactor applies enabled categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisclosureCategory {
    /// HTML tags, control characters, ANSI escapes, inline script calls
    Injection,
    ApiKey,
    Password,
    DatabaseUrl,
    FilePath,
    NetworkInfo,
    PersonalInfo,
}

impl DisclosureCategory {
    pub const REDACTION_ORDER: &'static [DisclosureCategory] = &[
        DisclosureCategory::ApiKey,
        DisclosureCategory::Password,
        DisclosureCategory::DatabaseUrl,
        DisclosureCategory::FilePath,
        DisclosureCategory::NetworkInfo,
        DisclosureCategory::PersonalInfo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisclosureCategory::Injection => "injection",
            DisclosureCategory::ApiKey => "api_key",
            DisclosureCategory::Password => "password",
            DisclosureCategory::DatabaseUrl => "database_url",
            DisclosureCategory::FilePath => "file_path",
            DisclosureCategory::NetworkInfo => "network_info",
            DisclosureCategory::PersonalInfo => "personal_info",
        }
    }
}

impl std::fmt::Display for DisclosureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
