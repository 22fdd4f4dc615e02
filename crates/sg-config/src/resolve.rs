//! Environment and debug signal resolution.
//!
//! Resolution order for the environment name: `SAFEGUARD_ENV` → `NODE_ENV`.
//! Debug flag: `SAFEGUARD_DEBUG` → `DEBUG`, or `--debug` / `--verbose` on argv.

use crate::preset::Environment;
use std::ffi::OsString;

/// Environment variable names.
const ENV_ENVIRONMENT: &str = "SAFEGUARD_ENV";
const ENV_ENVIRONMENT_FALLBACK: &str = "NODE_ENV";
const ENV_DEBUG: &str = "SAFEGUARD_DEBUG";
const ENV_DEBUG_FALLBACK: &str = "DEBUG";

/// Command-line flags that request debug output.
const DEBUG_FLAGS: &[&str] = &["--debug", "--verbose"];

/// Raw signals that decide whether detailed errors may be shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugSignals {
    /// Environment name as supplied (not yet parsed).
    pub environment: Option<String>,
    /// Value of the debug variable.
    pub debug_var: Option<String>,
    /// Command-line arguments, program name excluded.
    pub args: Vec<String>,
}

impl DebugSignals {
    /// Capture signals from the current process.
    pub fn from_process() -> Self {
        Self {
            environment: first_var(&[ENV_ENVIRONMENT, ENV_ENVIRONMENT_FALLBACK]),
            debug_var: first_var(&[ENV_DEBUG, ENV_DEBUG_FALLBACK]),
            args: lossy_args(std::env::args_os().skip(1)),
        }
    }

    /// Parsed environment; unknown or absent names are `None`.
    pub fn environment(&self) -> Option<Environment> {
        self.environment.as_deref().and_then(Environment::parse)
    }

    /// Environment to build presets for; unknown or absent means development.
    pub fn profile_environment(&self) -> Environment {
        self.environment().unwrap_or_default()
    }

    pub fn is_production(&self) -> bool {
        self.environment() == Some(Environment::Production)
    }

    /// Debug variable set to a truthy value, or a debug flag on argv.
    pub fn is_debug_mode(&self) -> bool {
        let var_set = self.debug_var.as_deref().map(is_truthy).unwrap_or(false);
        var_set || self.args.iter().any(|a| DEBUG_FLAGS.contains(&a.as_str()))
    }

    /// Production never shows detailed errors; otherwise debug mode or an
    /// explicit development environment does.
    pub fn should_show_detailed_errors(&self) -> bool {
        if self.is_production() {
            return false;
        }
        self.is_debug_mode() || self.environment() == Some(Environment::Development)
    }
}

/// Arguments as text; invalid UTF-8 is replaced rather than rejected.
fn lossy_args(args: impl IntoIterator<Item = OsString>) -> Vec<String> {
    args.into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

fn first_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
}

fn is_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}

/// Whether the current process runs in debug mode.
pub fn is_debug_mode() -> bool {
    DebugSignals::from_process().is_debug_mode()
}

/// Whether the current process may show raw errors.
pub fn should_show_detailed_errors() -> bool {
    DebugSignals::from_process().should_show_detailed_errors()
}
