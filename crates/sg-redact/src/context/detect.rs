//! Sensitive data detection over sanitized context trees.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sg_patterns::{DisclosureCategory, PatternCatalog, Severity};
use std::fmt;

/// Kind of sensitive data found in a context property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitiveType {
    Password,
    Secret,
    ApiKey,
    Token,
    Email,
    FilePath,
    CredentialedUrl,
    DatabaseUrl,
    IpAddress,
    Custom,
}

impl SensitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensitiveType::Password => "password",
            SensitiveType::Secret => "secret",
            SensitiveType::ApiKey => "api_key",
            SensitiveType::Token => "token",
            SensitiveType::Email => "email",
            SensitiveType::FilePath => "file_path",
            SensitiveType::CredentialedUrl => "credentialed_url",
            SensitiveType::DatabaseUrl => "database_url",
            SensitiveType::IpAddress => "ip_address",
            SensitiveType::Custom => "custom",
        }
    }

    /// Hint recorded when a property of this type is removed.
    pub fn hint(&self) -> &'static str {
        match self {
            SensitiveType::Password => "Password value removed",
            SensitiveType::Secret => "Secret value removed",
            SensitiveType::ApiKey => "API key removed",
            SensitiveType::Token => "Token removed",
            SensitiveType::Email => "Email address removed",
            SensitiveType::FilePath => "File system path removed",
            SensitiveType::CredentialedUrl => "URL with embedded credentials removed",
            SensitiveType::DatabaseUrl => "Database connection string removed",
            SensitiveType::IpAddress => "IP address removed",
            SensitiveType::Custom => "Value matching a custom pattern removed",
        }
    }

    fn severity(&self) -> Severity {
        match self {
            SensitiveType::Password
            | SensitiveType::Secret
            | SensitiveType::ApiKey
            | SensitiveType::Token
            | SensitiveType::CredentialedUrl
            | SensitiveType::DatabaseUrl => Severity::High,
            SensitiveType::Email | SensitiveType::FilePath | SensitiveType::Custom => {
                Severity::Medium
            }
            SensitiveType::IpAddress => Severity::Low,
        }
    }
}

impl fmt::Display for SensitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A property that looks sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitiveContextDetection {
    pub property_path: String,
    pub sensitive_type: SensitiveType,
    pub hint: String,
    pub severity: Severity,
}

// Value shapes. Every class excludes '*' so redaction placeholders never re-trigger.
static RE_PASSWORD_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:password|passwd|pwd|passphrase)["']?\s{0,4}[=:]\s{0,4}["']?[^\s"'*]"#)
        .unwrap()
});
static RE_SECRET_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:secret|client[_-]?secret|private[_-]?key)["']?\s{0,4}[=:]\s{0,4}["']?[^\s"'*]"#)
        .unwrap()
});
static RE_CREDENTIALED_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[a-z][a-z0-9+.-]{1,32}://[^\s/:@*]{1,256}:[^\s/@*]{1,256}@").unwrap()
});
static RE_DATABASE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:postgres(?:ql)?|mysql|mariadb|mongodb(?:\+srv)?|redis|rediss|amqps?|mssql|sqlserver|oracle|cockroachdb|couchdb|cassandra|neo4j|clickhouse)://[^\s*]|(?:server|data source|host)\s{0,2}=\s{0,2}[^;\s*]{1,256};",
    )
    .unwrap()
});
static RE_PATH_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z]:[\\/]|\\\\|~/|/(?:Users|home|root|etc|var|opt|usr|srv|mnt|private|tmp)/)").unwrap()
});

/// Property-name and value-shape heuristics.
#[derive(Debug, Clone)]
pub struct SensitiveDataDetector {
    catalog: &'static PatternCatalog,
    custom: Vec<Regex>,
}

impl SensitiveDataDetector {
    pub fn new(custom: Vec<Regex>) -> Self {
        Self {
            catalog: PatternCatalog::global(),
            custom,
        }
    }

    /// Classify one property by its name and (string) value.
    pub fn classify(&self, key: Option<&str>, value: &Value) -> Option<SensitiveType> {
        if let Some(kind) = key.and_then(classify_name) {
            if !is_blank(value) {
                return Some(kind);
            }
        }
        match value {
            Value::String(s) => self.classify_text(s),
            _ => None,
        }
    }

    /// Classify a string by shape alone.
    pub fn classify_text(&self, text: &str) -> Option<SensitiveType> {
        if RE_PASSWORD_SHAPE.is_match(text) {
            return Some(SensitiveType::Password);
        }
        if RE_SECRET_SHAPE.is_match(text) {
            return Some(SensitiveType::Secret);
        }
        if self.matches_category(DisclosureCategory::ApiKey, text) {
            return Some(SensitiveType::ApiKey);
        }
        if RE_CREDENTIALED_URL.is_match(text) {
            return Some(SensitiveType::CredentialedUrl);
        }
        if RE_DATABASE_URL.is_match(text) {
            return Some(SensitiveType::DatabaseUrl);
        }
        if self.matches_rule("email_address", text) {
            return Some(SensitiveType::Email);
        }
        if RE_PATH_SHAPE.is_match(text) {
            return Some(SensitiveType::FilePath);
        }
        if self.matches_rule("ipv4_address", text) {
            return Some(SensitiveType::IpAddress);
        }
        if self.custom.iter().any(|re| re.is_match(text)) {
            return Some(SensitiveType::Custom);
        }
        None
    }

    fn matches_category(&self, category: DisclosureCategory, text: &str) -> bool {
        self.catalog.disclosures_in(category).any(|r| r.is_match(text))
    }

    fn matches_rule(&self, id: &str, text: &str) -> bool {
        self.catalog
            .disclosure(id)
            .map(|r| r.is_match(text))
            .unwrap_or(false)
    }

    /// Walk `value` and report every sensitive property, without mutating it.
    pub fn detect(&self, value: &Value, path: &str) -> Vec<SensitiveContextDetection> {
        let mut found = Vec::new();
        self.walk(None, value, path, &mut found);
        found
    }

    fn walk(
        &self,
        key: Option<&str>,
        value: &Value,
        path: &str,
        found: &mut Vec<SensitiveContextDetection>,
    ) {
        if let Some(kind) = self.classify(key, value) {
            found.push(detection(path, kind));
            return;
        }
        match value {
            Value::Object(map) => {
                for (k, v) in map {
                    let child = super::value::join_path(path, k);
                    self.walk(Some(k), v, &child, found);
                }
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.walk(None, item, &format!("{}[{}]", path, i), found);
                }
            }
            _ => {}
        }
    }
}

impl Default for SensitiveDataDetector {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

pub(crate) fn detection(path: &str, kind: SensitiveType) -> SensitiveContextDetection {
    SensitiveContextDetection {
        property_path: path.to_string(),
        sensitive_type: kind,
        hint: kind.hint().to_string(),
        severity: kind.severity(),
    }
}

/// Sensitive type implied by a property name.
pub fn classify_name(name: &str) -> Option<SensitiveType> {
    let lower = name.to_ascii_lowercase();
    if lower.contains("password") || lower.contains("passwd") || lower == "pwd" {
        Some(SensitiveType::Password)
    } else if lower.contains("secret") || lower.contains("credential") || lower.contains("private")
    {
        Some(SensitiveType::Secret)
    } else if lower.contains("token") || lower == "authorization" || lower == "cookie" {
        Some(SensitiveType::Token)
    } else if lower.ends_with("key") || lower.contains("apikey") || lower.contains("api_key") {
        Some(SensitiveType::ApiKey)
    } else {
        None
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
