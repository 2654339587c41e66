//! Materializer configuration.
//!
//! # Invariants
//! - `cache_dir` is a non-empty absolute path.
//! - File prefix and suffix never contain path separators.
//! - Suffix starts with `.` so every generated file carries the marker extension.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default temp file name prefix.
pub const DEFAULT_FILE_PREFIX: &str = "gohana_import";
/// Default marker extension of materialized files.
pub const DEFAULT_FILE_SUFFIX: &str = ".gohana";

/// Where and how materialized files are created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializerConfig {
    /// Private cache area owned by the host process.
    pub cache_dir: PathBuf,
    pub file_prefix: String,
    pub file_suffix: String,
}

impl MaterializerConfig {
    /// Creates a config with default file naming.
    pub fn new(cache_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::with_file_name(cache_dir, DEFAULT_FILE_PREFIX, DEFAULT_FILE_SUFFIX)
    }

    /// Creates a config with custom file naming.
    ///
    /// # Errors
    /// - `cache_dir` empty or relative.
    /// - `prefix` empty or containing a path separator.
    /// - `suffix` not starting with `.` or containing a path separator.
    pub fn with_file_name(
        cache_dir: impl AsRef<Path>,
        prefix: &str,
        suffix: &str,
    ) -> Result<Self, ConfigError> {
        let cache_dir = cache_dir.as_ref();
        if cache_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyCacheDir);
        }
        if !cache_dir.is_absolute() {
            return Err(ConfigError::RelativeCacheDir(cache_dir.to_path_buf()));
        }
        if prefix.is_empty() || has_separator(prefix) {
            return Err(ConfigError::InvalidFilePrefix(prefix.to_string()));
        }
        if suffix.len() < 2 || !suffix.starts_with('.') || has_separator(suffix) {
            return Err(ConfigError::InvalidFileSuffix(suffix.to_string()));
        }
        Ok(Self {
            cache_dir: cache_dir.to_path_buf(),
            file_prefix: prefix.to_string(),
            file_suffix: suffix.to_string(),
        })
    }
}

fn has_separator(value: &str) -> bool {
    value.contains('/') || value.contains('\\')
}

/// Config validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyCacheDir,
    RelativeCacheDir(PathBuf),
    InvalidFilePrefix(String),
    InvalidFileSuffix(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCacheDir => write!(f, "cache_dir cannot be empty"),
            Self::RelativeCacheDir(path) => write!(
                f,
                "cache_dir must be an absolute path, got `{}`",
                path.display()
            ),
            Self::InvalidFilePrefix(value) => write!(f, "file prefix is invalid: `{value}`"),
            Self::InvalidFileSuffix(value) => {
                write!(f, "file suffix must look like `.ext`, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}
