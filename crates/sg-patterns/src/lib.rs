//! Pattern catalog for the safeguard sanitization engine.
//!
//! Holds the categorized detection rules shared by the input threat analyzer
//! and the output redactors:
//!
//! - **Threat rules** score attacker-influenced strings (paths, shell command
//!   strings, project names): traversal in its encoded forms, command and
//!   script injection, privilege escalation, sensitive locations, network
//!   targets, unicode spoofing and prototype pollution.
//! - **Disclosure rules** describe what must not leave the process in error
//!   messages and diagnostics: credentials, keys, connection strings, paths,
//!   network identifiers and personal data, plus markup/escape injection.
//!
//! Each rule carries its category, severity and replacement strategy.
//!
//! # Example
//!
//! ```
//! use sg_patterns::{PatternCatalog, ThreatCategory};
//!
//! let catalog = PatternCatalog::global();
//! let traversal = catalog
//!     .threats_in(ThreatCategory::PathTraversal)
//!     .any(|rule| rule.is_match("../../etc/passwd"));
//! assert!(traversal);
//! ```

pub mod catalog;
pub mod category;
mod disclosure;
pub mod rule;
pub mod severity;
mod threat;

pub use catalog::PatternCatalog;
pub use category::{DisclosureCategory, ThreatCategory};
pub use rule::{DisclosureRule, DisclosureRuleSpec, ThreatRule, ThreatRuleSpec};
pub use severity::{RiskLevel, Severity};
