//! Error types for the audit crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during audit operations.
///
/// The hook stages never see these: [`crate::AuditRecorder::append`] logs and
/// drops them. They surface through `try_append` and `read`.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Failed to create the logs directory.
    #[error("failed to create audit directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read an existing log file.
    #[error("failed to read audit log {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An existing log file does not hold a JSON array.
    #[error("audit log {path} is not a JSON array of records: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Failed to write a log file.
    #[error("failed to write audit log {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
