//! # Storage Error Types
//!
//! Error types for file-backed persistence.
//!
//! ## Error Flow
//! ```text
//! std::io::Error / serde_json::Error
//!      │
//!      ▼
//! StoreError (this module) ← adds the file path and categorization
//!      │
//!      ▼
//! ApiError (terminal app) ← shown to the operator
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Storage operation errors.
///
/// Every variant carries the path involved so the operator can tell which
/// of the two documents (or which data directory) is the problem.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted document exists but is not valid JSON for its schema.
    ///
    /// ## When This Occurs
    /// - Hand-edited file with a typo
    /// - A truncated write from a crashed process
    #[error("Malformed document at {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing state for writing failed.
    #[error("Could not serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The platform application data directory could not be determined.
    #[error("Could not determine a data directory; set WIRELINE_DATA_DIR")]
    NoDataDir,
}

impl StoreError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
