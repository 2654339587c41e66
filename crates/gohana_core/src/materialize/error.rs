//! Materialization error taxonomy and wire codes.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Wire code for a call without a handle.
pub const ERROR_CODE_NO_URI: &str = "NO_URI";
/// Wire code for a handle the resolver could not open.
pub const ERROR_CODE_NO_INPUT_STREAM: &str = "NO_INPUT_STREAM";
/// Wire code for I/O failures while opening, copying or closing.
pub const ERROR_CODE_CONTENT_URI_ERROR: &str = "CONTENT_URI_ERROR";

pub type MaterializeResult<T> = Result<T, MaterializeError>;

/// Terminal failure of a single materialize call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterializeError {
    /// Caller supplied no handle; no I/O was attempted.
    NoUri,
    /// Handle could not be parsed or the resolver had no stream for it.
    NoInputStream,
    /// I/O failure; carries the underlying diagnostic text.
    ContentUriError(String),
}

impl MaterializeError {
    /// Stable wire code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoUri => ERROR_CODE_NO_URI,
            Self::NoInputStream => ERROR_CODE_NO_INPUT_STREAM,
            Self::ContentUriError(_) => ERROR_CODE_CONTENT_URI_ERROR,
        }
    }

    /// Human-readable message sent alongside the code.
    pub fn message(&self) -> &str {
        match self {
            Self::NoUri => "No URI provided",
            Self::NoInputStream => "Cannot open input stream for URI",
            Self::ContentUriError(message) => message.as_str(),
        }
    }
}

impl Display for MaterializeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl Error for MaterializeError {}

impl From<std::io::Error> for MaterializeError {
    fn from(value: std::io::Error) -> Self {
        Self::ContentUriError(value.to_string())
    }
}
