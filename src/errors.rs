//! Shared error types for grading operations

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of an [`Error`], used by callers that only need to
/// decide whether a failure is fatal to the grading run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The grading configuration is unusable. Fatal to the run.
    InvalidConfiguration,
    /// A single report record could not be scored. The record is skipped.
    InvalidInput,
    /// Reading or writing a file failed.
    Io,
    /// A configuration or input document could not be decoded.
    Decode,
}

/// Main error type for autograde operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Raw counts that cannot be scored
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// File system related errors
    #[error("File system error for {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document at a known path that could not be decoded
    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create an input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a file system error with path context
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Create a decode error with path context
    pub fn decode(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfiguration { .. } => ErrorKind::InvalidConfiguration,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::FileSystem { .. } | Self::Io(_) => ErrorKind::Io,
            Self::Decode { .. } | Self::Json(_) | Self::Toml(_) => ErrorKind::Decode,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
