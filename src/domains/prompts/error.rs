//! Prompt-specific error types.

use thiserror::Error;

use crate::domains::library::LibraryError;

/// Errors that can occur during prompt operations.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The requested prompt was not found.
    #[error("Prompt not found: {0}")]
    NotFound(String),

    /// A title lookup matched more than one prompt.
    #[error("Prompt title '{0}' is ambiguous, use the prompt id")]
    Ambiguous(String),

    /// The library failed while serving the prompt.
    #[error(transparent)]
    Library(#[from] LibraryError),
}

impl PromptError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "ambiguous" error.
    pub fn ambiguous(title: impl Into<String>) -> Self {
        Self::Ambiguous(title.into())
    }
}
