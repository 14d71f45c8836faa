//! Error types for tree-to-JSON conversion.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which filesystem operation produced an I/O failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    List,
    Classify,
    Read,
    Write,
}

/// Classified I/O failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoErrorKind {
    NotFound,
    PermissionDenied,
    ReadFailure,
    WriteFailure,
    Other,
}

impl IoErrorKind {
    /// Classify an OS error raised while performing `operation`.
    pub fn classify(operation: IoOperation, err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => IoErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => IoErrorKind::PermissionDenied,
            _ => match operation {
                IoOperation::Read => IoErrorKind::ReadFailure,
                IoOperation::Write => IoErrorKind::WriteFailure,
                IoOperation::List | IoOperation::Classify => IoErrorKind::Other,
            },
        }
    }
}

impl fmt::Display for IoErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IoErrorKind::NotFound => "not found",
            IoErrorKind::PermissionDenied => "permission denied",
            IoErrorKind::ReadFailure => "read failure",
            IoErrorKind::WriteFailure => "write failure",
            IoErrorKind::Other => "I/O error",
        };
        f.write_str(label)
    }
}

/// Conversion errors
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{kind} at {path:?}: {source}")]
    Io {
        kind: IoErrorKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Duplicate key '{key}' in directory {path:?}")]
    DuplicateKey { key: String, path: PathBuf },

    #[error("Traversal cancelled")]
    Cancelled,

    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to resolve source tree: {0}")]
    Resolve(String),
}

impl ConvertError {
    /// Wrap an OS error with the path it concerns, classifying it by operation.
    pub fn io(operation: IoOperation, path: &Path, source: std::io::Error) -> Self {
        ConvertError::Io {
            kind: IoErrorKind::classify(operation, &source),
            path: path.to_path_buf(),
            source,
        }
    }

    /// The I/O kind, if this is an I/O failure
    pub fn io_kind(&self) -> Option<IoErrorKind> {
        match self {
            ConvertError::Io { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for ConvertError {
    fn from(err: config::ConfigError) -> Self {
        ConvertError::Config(err.to_string())
    }
}
