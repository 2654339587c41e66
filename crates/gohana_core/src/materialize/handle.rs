//! Resource handle parsing.

use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;

/// Parsed platform resource handle (`content://...`, `file://...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    url: Url,
}

impl ResourceHandle {
    /// Parses a handle string. Surrounding whitespace is ignored.
    ///
    /// # Errors
    /// - `HandleParseError::Empty` for blank input.
    /// - `HandleParseError::Invalid` when the value is not an absolute URI.
    pub fn parse(value: &str) -> Result<Self, HandleParseError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(HandleParseError::Empty);
        }
        Url::parse(trimmed)
            .map(|url| Self { url })
            .map_err(|err| HandleParseError::Invalid(err.to_string()))
    }

    /// Lowercase scheme, e.g. `content`.
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Authority host, e.g. the content provider name.
    pub fn authority(&self) -> Option<&str> {
        self.url.host_str()
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl Display for ResourceHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Handle parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleParseError {
    Empty,
    Invalid(String),
}

impl Display for HandleParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "resource handle must not be empty"),
            Self::Invalid(reason) => write!(f, "resource handle is invalid: {reason}"),
        }
    }
}

impl Error for HandleParseError {}
