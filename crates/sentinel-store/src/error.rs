//! Error types for the storage layer.

use thiserror::Error;

/// Errors that can occur in a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend is unreachable or refused the operation. Fatal for
    /// the request that triggered it; no partial state is left behind.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected a write that would violate a uniqueness
    /// constraint (e.g. duplicate key secret or project code).
    #[error("constraint violation: {0}")]
    Constraint(String),
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
