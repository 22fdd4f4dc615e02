//! Configuration errors.

use thiserror::Error;

/// Errors from parsing or compiling configuration.
///
/// The sanitization entry points never surface these; they are returned by
/// the explicit parsing helpers only.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown environment '{0}'. Available: development, staging, production")]
    UnknownEnvironment(String),

    #[error("Invalid custom pattern #{index}: {message}")]
    InvalidPattern { index: usize, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ConfigError::UnknownEnvironment(_) => 70,
            ConfigError::InvalidPattern { .. } => 71,
            ConfigError::Json(_) => 72,
        }
    }
}
