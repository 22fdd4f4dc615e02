//! Information-disclosure redaction for errors and diagnostics.
//!
//! Everything that leaves the process after a failure passes through here:
//!
//! - **Messages**: injection stripping, custom patterns, then category
//!   redaction (API keys, passwords, database URLs, paths, network and
//!   personal data) under a hard length bound.
//! - **Stack traces**: `none` / `minimal` / `sanitized` / `full` levels, an
//!   ordered path pipeline, depth limits, chunked processing of large input.
//! - **Context**: cycle-safe serialization of arbitrary value graphs,
//!   sensitive-property detection, allow-list or partial redaction, opaque
//!   error ids and a size-capped forwarding payload for telemetry.
//! - **Audit**: read-only risk assessment over stacks and context.
//!
//! No entry point returns an error. Bad input degrades to empty or neutral
//! output; dropped data is reported through warnings in the result.
//!
//! # Example
//!
//! ```
//! use sg_config::ErrorSanitizationConfig;
//! use sg_redact::{sanitize_error_message, sanitize_stack_trace};
//!
//! let config = ErrorSanitizationConfig::default();
//! assert_eq!(
//!     sanitize_error_message("Connection failed: password=secret123", &config),
//!     "Connection failed: password=***"
//! );
//!
//! let stack = sanitize_stack_trace("Error: x\n    at run (/Users/alice/app/index.js:10:5)", &config);
//! assert!(stack.contains("/Users/***"));
//! ```

pub mod audit;
pub mod context;
pub mod error_info;
pub mod message;
pub mod production;
pub mod stack;
mod text;

pub use audit::{
    analyze_error_context_security, analyze_stack_trace_security, AuditFinding, FindingCategory,
    SecurityAuditReport, SecurityAuditor,
};
pub use context::{
    create_safe_error_for_forwarding, sanitize_error_context, ContextObject, ContextRedactor,
    ContextValue, ForwardedError, SanitizedErrorContext, SensitiveContextDetection,
    SensitiveDataDetector, SensitiveType,
};
pub use error_info::ErrorInfo;
pub use message::{sanitize_error_message, MessageRedactor, TRUNCATION_SUFFIX};
pub use production::{sanitize_error_for_production, SanitizedError};
pub use stack::{sanitize_stack_trace, StackTraceRedactor};
