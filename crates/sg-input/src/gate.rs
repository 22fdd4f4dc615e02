//! Boolean gates used before touching the filesystem or spawning processes.

use crate::analyze::InputThreatAnalyzer;
use once_cell::sync::Lazy;
use regex::Regex;
use sg_patterns::{PatternCatalog, ThreatCategory};

/// Paths scoring at or above this are rejected.
const PATH_RISK_THRESHOLD: u32 = 10;

/// npm's limit on package name length.
const MAX_PROJECT_NAME_LENGTH: usize = 214;

static RE_PROJECT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9\x{00C0}-\x{024F}][A-Za-z0-9\x{00C0}-\x{024F}._-]{0,213}$").unwrap()
});

/// Whether `path` is free of every threat family.
pub fn is_path_safe(path: &str) -> bool {
    let result = InputThreatAnalyzer::new().analyze(path);
    result.is_secure && result.risk_score < PATH_RISK_THRESHOLD
}

/// Whether `command` is safe to hand to a shell.
///
/// An absent command is vacuously safe. Other threat families (for example
/// network addresses in arguments) do not make a command unsafe.
pub fn is_command_safe<'a>(command: impl Into<Option<&'a str>>) -> bool {
    let Some(command) = command.into() else {
        return true;
    };

    let result = InputThreatAnalyzer::new().analyze(command);
    if result
        .violations
        .iter()
        .any(|v| v.violation_type.is_command_threat())
    {
        return false;
    }

    // The analyzer only sees a bounded prefix; check the denylist on the whole string.
    !PatternCatalog::global()
        .threats_in(ThreatCategory::DangerousCommand)
        .any(|rule| rule.is_match(command))
}

/// Whether `name` is usable as a project/package directory name.
pub fn is_project_name_safe(name: &str) -> bool {
    if name.is_empty() || name.chars().count() > MAX_PROJECT_NAME_LENGTH {
        return false;
    }
    if !RE_PROJECT_NAME.is_match(name) {
        return false;
    }
    InputThreatAnalyzer::new().analyze(name).is_secure
}
