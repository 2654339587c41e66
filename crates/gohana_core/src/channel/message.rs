//! Method-call envelopes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One inbound call on a named channel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: BTreeMap<String, String>,
}

impl MethodCall {
    /// Creates a call without arguments.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: BTreeMap::new(),
        }
    }

    /// Adds one named argument.
    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    /// Returns one named argument.
    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments.get(name).map(String::as_str)
    }
}

/// Reply to one `MethodCall`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResponse {
    Success { value: Option<String> },
    Error { code: String, message: String },
    NotImplemented,
}

impl MethodResponse {
    pub fn success(value: impl Into<String>) -> Self {
        Self::Success {
            value: Some(value.into()),
        }
    }

    pub fn empty_success() -> Self {
        Self::Success { value: None }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
