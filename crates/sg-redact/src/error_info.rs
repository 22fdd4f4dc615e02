//! Error records handed to the redactors.

use crate::context::{ContextObject, ContextValue};
use std::error::Error;

/// Name, message, stack, code and extra properties of a runtime error.
#[derive(Debug, Clone, Default)]
pub struct ErrorInfo {
    pub name: String,
    pub message: String,
    pub stack: Option<String>,
    pub code: Option<String>,
    /// Additional own properties; may be a cyclic graph.
    pub properties: ContextObject,
}

impl ErrorInfo {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_property(self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.properties.insert(key, value);
        self
    }

    /// Build a record from any error type.
    ///
    /// The name is the short type name, the message its `Display` text. The
    /// `source()` chain becomes a `causes` array of display strings.
    pub fn from_error<E: Error>(error: &E) -> Self {
        let info = Self::new(short_type_name(std::any::type_name::<E>()), error.to_string());

        let causes: Vec<ContextValue> = std::iter::successors(error.source(), |&e| e.source())
            .map(|cause| ContextValue::Str(cause.to_string()))
            .collect();
        if !causes.is_empty() {
            info.properties.insert("causes", ContextValue::Array(causes));
        }
        info
    }
}

fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
