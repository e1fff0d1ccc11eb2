//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for index pipeline operations
#[derive(Debug, Error)]
pub enum Error {
    /// A stage input is absent; names the command that should have produced it
    #[error("Required input file not found: {path}. Run `ai-maturity {producer}` first.")]
    MissingInput { path: PathBuf, producer: String },

    /// A CSV row could not be interpreted
    #[error("Invalid record in {path} at line {line}: {message}")]
    InvalidRecord {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Indicator API errors that are not transport failures
    #[error("Indicator API error: {0}")]
    Api(String),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// HTTP transport errors
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// CSV errors
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Formatting errors while rendering documents
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}

impl Error {
    /// Create a missing-input error naming the producing command
    pub fn missing_input(path: impl Into<PathBuf>, producer: impl Into<String>) -> Self {
        Self::MissingInput {
            path: path.into(),
            producer: producer.into(),
        }
    }

    pub fn invalid_record(path: impl Into<PathBuf>, line: u64, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            path: path.into(),
            line,
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

    /// True when the failure is a request timeout, the only retryable class
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
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
