//! Library-specific error types.

use thiserror::Error;

/// Errors that can occur during library operations.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The referenced record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A unique name is already taken.
    #[error("{0}")]
    Conflict(String),

    /// Required field missing or reference invalid.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reading or writing the snapshot file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot file could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LibraryError {
    /// Create a new "not found" error.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create a new "conflict" error for a duplicate name.
    pub fn duplicate_name(kind: &'static str) -> Self {
        Self::Conflict(format!("{} with this name already exists", kind))
    }

    /// Create a new "invalid input" error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error is a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
