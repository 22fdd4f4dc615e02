//! Input threat analysis for attacker-influenced strings.
//!
//! File paths, shell command strings and project names are scored against
//! the shared [`PatternCatalog`](sg_patterns::PatternCatalog) before they
//! reach the filesystem or a subprocess.
//!
//! - [`analyze_input_security`] reports violations and a 0-100 risk score
//! - [`sanitize_input`] deletes what the analyzer flags
//! - [`is_path_safe`], [`is_command_safe`], [`is_project_name_safe`] are the
//!   boolean gates collaborators call before acting
//!
//! # Example
//!
//! ```
//! use sg_input::{analyze_input_security, is_command_safe};
//!
//! let result = analyze_input_security("../../etc/passwd");
//! assert!(!result.is_secure);
//! assert!(is_command_safe("npm install"));
//! assert!(!is_command_safe("rm -rf /"));
//! ```

pub mod analyze;
pub mod gate;
pub mod homograph;
pub mod sanitize;
pub mod violation;

pub use analyze::{analyze_input_security, InputThreatAnalyzer, MAX_ANALYSIS_LENGTH};
pub use gate::{is_command_safe, is_path_safe, is_project_name_safe};
pub use sanitize::{sanitize_input, InputSanitizer};
pub use violation::{SecurityAnalysisResult, SecurityViolation, MAX_RISK_SCORE};
