//! Error types
//!
//! The simulation itself is total; only the persistence collaborator can fail,
//! and callers degrade rather than propagate.

/// Failure reading or writing persisted state
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable")]
    Unavailable,

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Date formatting error: {0}")]
    DateFormat(#[from] time::error::Format),
}
