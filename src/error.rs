use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for update-versions operations
#[derive(Error, Debug)]
pub enum UpdateVersionsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Invalid value for '--new-version': {0}")]
    BadParameter(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Pattern '{pattern}' not found in {}", .path.display())]
    PatternNotFound { path: PathBuf, pattern: String },

    #[error("Invalid regex in rule '{rule}': {source}")]
    Regex {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results in update-versions
pub type Result<T> = std::result::Result<T, UpdateVersionsError>;

impl UpdateVersionsError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        UpdateVersionsError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        UpdateVersionsError::Version(msg.into())
    }

    /// Create a user-facing parameter error
    pub fn bad_parameter(msg: impl Into<String>) -> Self {
        UpdateVersionsError::BadParameter(msg.into())
    }

    /// Create a precondition error with context
    pub fn precondition(msg: impl Into<String>) -> Self {
        UpdateVersionsError::Precondition(msg.into())
    }

    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        UpdateVersionsError::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error.
    ///
    /// Parameter errors share clap's usage-error code; everything else is 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            UpdateVersionsError::BadParameter(_) => 2,
            _ => 1,
        }
    }
}
