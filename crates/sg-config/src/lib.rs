//! Safeguard configuration.
//!
//! This crate provides:
//! - Typed settings for message/stack redaction and context redaction
//! - Clamping normalization with reported warnings
//! - Development / staging / production presets with caller overrides
//! - Environment and debug signal resolution

pub mod context;
pub mod error;
pub mod preset;
pub mod resolve;
pub mod sanitization;
pub mod validate;

pub use context::{ErrorContextConfig, RedactionLevel, DEFAULT_ALLOWED_PROPERTIES};
pub use error::ConfigError;
pub use preset::{create_environment_config, Environment};
pub use resolve::{is_debug_mode, should_show_detailed_errors, DebugSignals};
pub use sanitization::{
    compile_patterns, ErrorSanitizationConfig, ErrorSanitizationOverrides, StackTraceLevel,
};
pub use validate::ConfigWarning;
