//! # Persistence Errors
//!
//! These never reach a client: the store logs them and carries on with what
//! it has in memory.

use thiserror::Error;

/// Result type for backend operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Submission document I/O failures
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt submissions document '{path}': {reason}")]
    Corrupt { path: String, reason: String },

    #[error("Failed to serialize submissions: {0}")]
    Serialize(String),
}

impl PersistenceError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
