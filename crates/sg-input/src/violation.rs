//! Analysis result types.

use serde::{Deserialize, Serialize};
use sg_patterns::{Severity, ThreatCategory, ThreatRule};

/// A single rule hit reported by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityViolation {
    #[serde(rename = "type")]
    pub violation_type: ThreatCategory,
    /// Identifier of the rule that fired.
    pub rule_id: String,
    /// Source of the pattern that matched.
    pub pattern: String,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
}

impl SecurityViolation {
    pub(crate) fn from_rule(rule: &ThreatRule) -> Self {
        Self {
            violation_type: rule.category,
            rule_id: rule.id.to_string(),
            pattern: rule.regex.as_str().to_string(),
            severity: rule.severity,
            description: rule.description.to_string(),
            recommendation: rule.recommendation.to_string(),
        }
    }
}

/// Outcome of [`analyze_input_security`](crate::analyze_input_security).
///
/// `risk_score` is the sum of violation weights clamped to 100, and
/// `is_secure` holds exactly when `violations` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityAnalysisResult {
    pub is_secure: bool,
    pub violations: Vec<SecurityViolation>,
    pub risk_score: u32,
    pub sanitized_input: String,
}

impl SecurityAnalysisResult {
    /// Result for absent or empty input.
    pub fn secure(input: &str) -> Self {
        Self {
            is_secure: true,
            violations: Vec::new(),
            risk_score: 0,
            sanitized_input: input.to_string(),
        }
    }

    pub(crate) fn from_violations(violations: Vec<SecurityViolation>, sanitized_input: String) -> Self {
        let risk_score = violations
            .iter()
            .map(|v| v.severity.weight())
            .sum::<u32>()
            .min(MAX_RISK_SCORE);
        Self {
            is_secure: violations.is_empty(),
            violations,
            risk_score,
            sanitized_input,
        }
    }

    /// Whether any violation belongs to the given family.
    pub fn has_category(&self, category: ThreatCategory) -> bool {
        self.violations.iter().any(|v| v.violation_type == category)
    }

    /// Highest severity among the violations.
    pub fn max_severity(&self) -> Option<Severity> {
        self.violations.iter().map(|v| v.severity).max()
    }
}

/// Upper bound of the risk score.
pub const MAX_RISK_SCORE: u32 = 100;
