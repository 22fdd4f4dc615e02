//! Rule definitions: static specs and their compiled forms.
//!
//! Rules are kept as data so the tables can be audited in one place. Every
//! pattern uses bounded repetition (`{n,m}`) instead of `*`/`+` over open
//! character classes; the `regex` crate already guarantees linear-time
//! matching, the bounds additionally keep the amount of text a single match
//! can consume small. Home-directory rules are the exception: they consume
//! the whole user-name segment so no tail of a long name survives.

use crate::{DisclosureCategory, Severity, ThreatCategory};
use regex::Regex;
use std::borrow::Cow;

/// Static description of an input threat rule.
#[derive(Debug, Clone, Copy)]
pub struct ThreatRuleSpec {
    pub id: &'static str,
    pub category: ThreatCategory,
    pub severity: Severity,
    pub pattern: &'static str,
    pub description: &'static str,
    pub recommendation: &'static str,
}

/// Compiled input threat rule.
#[derive(Debug, Clone)]
pub struct ThreatRule {
    pub id: &'static str,
    pub category: ThreatCategory,
    pub severity: Severity,
    pub regex: Regex,
    pub description: &'static str,
    pub recommendation: &'static str,
}

impl ThreatRule {
    pub(crate) fn compile(spec: &ThreatRuleSpec) -> Option<Self> {
        match Regex::new(spec.pattern) {
            Ok(regex) => Some(Self {
                id: spec.id,
                category: spec.category,
                severity: spec.severity,
                regex,
                description: spec.description,
                recommendation: spec.recommendation,
            }),
            Err(e) => {
                tracing::error!(target: "sg_patterns::catalog", rule = spec.id, error = %e, "built-in threat rule failed to compile");
                None
            }
        }
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}

/// Static description of a disclosure (redaction) rule.
///
/// `replacement` is a `regex` replacement template; `${1}` style group
/// references keep the structural prefix (the `password=` part) of a match.
#[derive(Debug, Clone, Copy)]
pub struct DisclosureRuleSpec {
    pub id: &'static str,
    pub category: DisclosureCategory,
    pub severity: Severity,
    pub pattern: &'static str,
    pub replacement: &'static str,
    pub hint: &'static str,
}

/// Compiled disclosure rule.
#[derive(Debug, Clone)]
pub struct DisclosureRule {
    pub id: &'static str,
    pub category: DisclosureCategory,
    pub severity: Severity,
    pub regex: Regex,
    pub replacement: &'static str,
    pub hint: &'static str,
}

impl DisclosureRule {
    pub(crate) fn compile(spec: &DisclosureRuleSpec) -> Option<Self> {
        match Regex::new(spec.pattern) {
            Ok(regex) => Some(Self {
                id: spec.id,
                category: spec.category,
                severity: spec.severity,
                regex,
                replacement: spec.replacement,
                hint: spec.hint,
            }),
            Err(e) => {
                tracing::error!(target: "sg_patterns::catalog", rule = spec.id, error = %e, "built-in disclosure rule failed to compile");
                None
            }
        }
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    /// Replace every match with the rule's replacement template.
    pub fn apply<'a>(&self, input: &'a str) -> Cow<'a, str> {
        self.regex.replace_all(input, self.replacement)
    }
}
