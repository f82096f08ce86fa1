//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Error type for the host, configuration and output layers.
///
/// The analysis engine itself is total and never produces one of these.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snapshot that parsed but does not describe a usable tree
    #[error("Invalid snapshot {path}: {message}")]
    Snapshot { path: PathBuf, message: String },

    /// Analysis stopped by the host before all units were visited
    #[error("Analysis cancelled")]
    Cancelled,

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn snapshot(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Snapshot {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_wraps_message() {
        let result: Result<()> = Err(Error::Config("unknown key".into()));
        let err = result.context("Loading .cqs-analyzer.toml").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Loading .cqs-analyzer.toml: Configuration error: unknown key"
        );
    }

    #[test]
    fn test_snapshot_error_names_path() {
        let err = Error::snapshot("units.json", "duplicate node id 4");
        assert_eq!(
            err.to_string(),
            "Invalid snapshot units.json: duplicate node id 4"
        );
    }
}
