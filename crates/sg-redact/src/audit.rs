//! Read-only risk assessment of stack traces and diagnostic context.
//!
//! The auditor never modifies its input. It reports what a redactor would
//! have to deal with, aggregated into a [`RiskLevel`], plus one
//! recommendation per finding category.

use crate::context::{ContextObject, SafeSerializer, SensitiveDataDetector, SensitiveType};
use crate::stack::paths::REPEAT_RUN;
use crate::text::{char_len, has_repeat_run, truncate_chars};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use sg_patterns::{PatternCatalog, RiskLevel, Severity};
use std::fmt;

/// Stack text beyond this many characters is not examined.
pub const MAX_AUDIT_CHARS: usize = 10_000;
/// Stack lines beyond this count are not examined.
pub const MAX_AUDIT_LINES: usize = 100;
/// Lines longer than this are reported.
pub const LONG_LINE_CHARS: usize = 500;

static RE_HOME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"/(?:Users|home)/[^/\s:'"()\[\]*]|(?i:[A-Za-z]:[\\/]{1,4}(?:Users|Documents and Settings)[\\/]{1,4}[^\\/\s:'"()*])"#)
        .unwrap()
});
static RE_SOURCE_MAP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"sourceMappingURL|\.(?:[cm]?js|tsx?|jsx|css)\.map\b").unwrap()
});
static RE_SENSITIVE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:password|passwd|secret|token|api[_-]?key|credentials?|private[_-]?key)")
        .unwrap()
});
static RE_INTERNAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[\s(/\\])(?:node_modules|internal|lib|src)[\\/]").unwrap()
});
static RE_DEPLOYMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[\s(])(?:/(?:opt|srv|app|workspace|deploy(?:ments?)?|var/www|var/lib/docker|mnt)/|(?i:[A-Za-z]:[\\/](?:inetpub|deploy)[\\/]))")
        .unwrap()
});

/// What an audit finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    HomeDirectory,
    SourceMap,
    SensitiveName,
    Secret,
    PersonalData,
    InternalStructure,
    DeploymentPath,
    SensitiveFile,
    FileSystemPath,
    NetworkAddress,
    CustomPattern,
    DangerousKey,
    CircularReference,
    LongLine,
    RepetitiveLine,
}

impl FindingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingCategory::HomeDirectory => "home_directory",
            FindingCategory::SourceMap => "source_map",
            FindingCategory::SensitiveName => "sensitive_name",
            FindingCategory::Secret => "secret",
            FindingCategory::PersonalData => "personal_data",
            FindingCategory::InternalStructure => "internal_structure",
            FindingCategory::DeploymentPath => "deployment_path",
            FindingCategory::SensitiveFile => "sensitive_file",
            FindingCategory::FileSystemPath => "file_system_path",
            FindingCategory::NetworkAddress => "network_address",
            FindingCategory::CustomPattern => "custom_pattern",
            FindingCategory::DangerousKey => "dangerous_key",
            FindingCategory::CircularReference => "circular_reference",
            FindingCategory::LongLine => "long_line",
            FindingCategory::RepetitiveLine => "repetitive_line",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            FindingCategory::Secret => Severity::Critical,
            FindingCategory::HomeDirectory
            | FindingCategory::DeploymentPath
            | FindingCategory::SensitiveFile
            | FindingCategory::DangerousKey => Severity::High,
            FindingCategory::SensitiveName
            | FindingCategory::PersonalData
            | FindingCategory::FileSystemPath
            | FindingCategory::CustomPattern
            | FindingCategory::RepetitiveLine => Severity::Medium,
            FindingCategory::SourceMap
            | FindingCategory::InternalStructure
            | FindingCategory::NetworkAddress
            | FindingCategory::CircularReference
            | FindingCategory::LongLine => Severity::Low,
        }
    }

    /// Escalates a medium result to high on its own.
    fn escalates(&self) -> bool {
        matches!(
            self,
            FindingCategory::HomeDirectory
                | FindingCategory::DeploymentPath
                | FindingCategory::SensitiveFile
        )
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            FindingCategory::HomeDirectory => {
                "Redact user home directories before stack traces leave the process"
            }
            FindingCategory::SourceMap => "Strip source map references from production builds",
            FindingCategory::SensitiveName => {
                "Keep identifiers such as password, token or key out of error text"
            }
            FindingCategory::Secret => "Rotate the exposed credential and redact secrets at the source",
            FindingCategory::PersonalData => "Remove personal data such as email addresses from diagnostics",
            FindingCategory::InternalStructure => "Replace internal module and directory names with generic markers",
            FindingCategory::DeploymentPath => "Hide server and deployment directory layout",
            FindingCategory::SensitiveFile => "Never reference files like .env, .ssh or passwd in diagnostics",
            FindingCategory::FileSystemPath => "Replace absolute file paths with relative or generic forms",
            FindingCategory::NetworkAddress => "Mask IP addresses and internal hostnames",
            FindingCategory::CustomPattern => "Review values matching organisation-specific patterns",
            FindingCategory::DangerousKey => "Reject prototype-polluting keys in diagnostic context",
            FindingCategory::CircularReference => "Break circular references before attaching context to errors",
            FindingCategory::LongLine => "Bound line length in diagnostic output",
            FindingCategory::RepetitiveLine => "Collapse repeated characters; they can indicate a DoS payload",
        }
    }
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<SensitiveType> for FindingCategory {
    fn from(kind: SensitiveType) -> Self {
        match kind {
            SensitiveType::Password
            | SensitiveType::Secret
            | SensitiveType::ApiKey
            | SensitiveType::Token
            | SensitiveType::CredentialedUrl
            | SensitiveType::DatabaseUrl => FindingCategory::Secret,
            SensitiveType::Email => FindingCategory::PersonalData,
            SensitiveType::FilePath => FindingCategory::FileSystemPath,
            SensitiveType::IpAddress => FindingCategory::NetworkAddress,
            SensitiveType::Custom => FindingCategory::CustomPattern,
        }
    }
}

/// One observation. `location` is `line N` for stacks, a property path for context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditFinding {
    pub category: FindingCategory,
    pub severity: Severity,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityAuditReport {
    pub risk_level: RiskLevel,
    pub findings: Vec<AuditFinding>,
    /// One entry per distinct category, in order of first finding.
    pub recommendations: Vec<String>,
    /// Input exceeded the audit caps and was only partly examined.
    pub truncated: bool,
}

impl SecurityAuditReport {
    fn from_findings(findings: Vec<AuditFinding>, truncated: bool) -> Self {
        let mut seen: Vec<FindingCategory> = Vec::new();
        for f in &findings {
            if !seen.contains(&f.category) {
                seen.push(f.category);
            }
        }
        Self {
            risk_level: aggregate_risk(&findings),
            recommendations: seen.iter().map(|c| c.recommendation().to_string()).collect(),
            findings,
            truncated,
        }
    }

    pub fn has(&self, category: FindingCategory) -> bool {
        self.findings.iter().any(|f| f.category == category)
    }
}

fn finding(category: FindingCategory, location: String) -> AuditFinding {
    AuditFinding {
        category,
        severity: category.severity(),
        location,
    }
}

/// Collapse findings into one risk level.
pub fn aggregate_risk(findings: &[AuditFinding]) -> RiskLevel {
    if findings.is_empty() {
        return RiskLevel::Low;
    }
    if findings.iter().any(|f| f.severity == Severity::Critical) {
        return RiskLevel::Critical;
    }
    let high = findings.iter().filter(|f| f.severity >= Severity::High).count();
    if high >= 2 || findings.len() >= 5 {
        return RiskLevel::High;
    }
    if findings.iter().any(|f| f.category.escalates()) {
        return RiskLevel::High;
    }
    RiskLevel::Medium
}

/// Read-only auditor sharing the redactors' detection logic.
#[derive(Debug, Clone)]
pub struct SecurityAuditor {
    catalog: &'static PatternCatalog,
    detector: SensitiveDataDetector,
}

impl SecurityAuditor {
    pub fn new() -> Self {
        Self {
            catalog: PatternCatalog::global(),
            detector: SensitiveDataDetector::default(),
        }
    }

    pub fn with_detector(detector: SensitiveDataDetector) -> Self {
        Self {
            catalog: PatternCatalog::global(),
            detector,
        }
    }

    pub fn audit_stack(&self, stack: &str) -> SecurityAuditReport {
        let capped = truncate_chars(stack, MAX_AUDIT_CHARS);
        let mut truncated = capped.len() < stack.len();
        if truncated {
            tracing::debug!(
                target: "sg_redact::audit",
                original_len = stack.len(),
                limit = MAX_AUDIT_CHARS,
                "stack audit input capped"
            );
        }

        let mut findings = Vec::new();
        for (idx, line) in capped.lines().enumerate() {
            if idx >= MAX_AUDIT_LINES {
                truncated = true;
                break;
            }
            for category in self.scan_line(line) {
                findings.push(finding(category, format!("line {}", idx + 1)));
            }
        }
        SecurityAuditReport::from_findings(findings, truncated)
    }

    fn scan_line(&self, line: &str) -> Vec<FindingCategory> {
        let mut found = Vec::new();
        if self.is_secret(line) {
            found.push(FindingCategory::Secret);
        }
        if RE_HOME.is_match(line) {
            found.push(FindingCategory::HomeDirectory);
        }
        if RE_DEPLOYMENT.is_match(line) {
            found.push(FindingCategory::DeploymentPath);
        }
        if self
            .catalog
            .disclosure("sensitive_file")
            .map(|r| r.is_match(line))
            .unwrap_or(false)
        {
            found.push(FindingCategory::SensitiveFile);
        }
        if RE_SENSITIVE_NAME.is_match(line) {
            found.push(FindingCategory::SensitiveName);
        }
        if RE_SOURCE_MAP.is_match(line) {
            found.push(FindingCategory::SourceMap);
        }
        if RE_INTERNAL.is_match(line) {
            found.push(FindingCategory::InternalStructure);
        }
        if char_len(line) > LONG_LINE_CHARS {
            found.push(FindingCategory::LongLine);
        }
        if has_repeat_run(line, REPEAT_RUN) {
            found.push(FindingCategory::RepetitiveLine);
        }
        found
    }

    fn is_secret(&self, line: &str) -> bool {
        matches!(
            self.detector.classify_text(line),
            Some(
                SensitiveType::Password
                    | SensitiveType::Secret
                    | SensitiveType::ApiKey
                    | SensitiveType::CredentialedUrl
                    | SensitiveType::DatabaseUrl
            )
        )
    }

    pub fn audit_context(&self, context: &ContextObject) -> SecurityAuditReport {
        let mut serializer = SafeSerializer::new();
        let tree = Value::Object(serializer.serialize_object(context, ""));

        let mut findings: Vec<AuditFinding> = serializer
            .removed
            .into_iter()
            .map(|path| finding(FindingCategory::DangerousKey, path))
            .collect();
        findings.extend(
            serializer
                .cycles
                .into_iter()
                .map(|path| finding(FindingCategory::CircularReference, path)),
        );
        findings.extend(
            self.detector
                .detect(&tree, "")
                .into_iter()
                .map(|d| finding(d.sensitive_type.into(), d.property_path)),
        );
        SecurityAuditReport::from_findings(findings, false)
    }
}

impl Default for SecurityAuditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Assess the disclosure risk of `stack` without modifying it.
pub fn analyze_stack_trace_security(stack: &str) -> SecurityAuditReport {
    SecurityAuditor::new().audit_stack(stack)
}

/// Assess the disclosure risk of `context` without modifying it.
pub fn analyze_error_context_security(context: &ContextObject) -> SecurityAuditReport {
    SecurityAuditor::new().audit_context(context)
}
