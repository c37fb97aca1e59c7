//! Error types and handling for the MCP server.
//!
//! Each domain owns its error enum; this module folds them into one crate
//! level `Error` so callers outside the domains can use a single `Result`.

use thiserror::Error;

use crate::domains::library::LibraryError;
use crate::domains::prompts::PromptError;
use crate::domains::resources::ResourceError;
use crate::domains::tools::ToolError;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the prompt library.
    #[error("Library error: {0}")]
    Library(#[from] LibraryError),

    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// Error originating from the resources domain.
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Error originating from the prompts domain.
    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    /// Error raised while starting or running a transport.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from file operations or network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_error_converts() {
        let err: Error = LibraryError::not_found("Folder", "f1").into();
        assert!(matches!(err, Error::Library(_)));
        assert!(err.to_string().starts_with("Library error:"));
    }

    #[test]
    fn test_prompt_error_converts() {
        let err: Error = PromptError::ambiguous("Twin").into();
        assert!(err.to_string().contains("Twin"));
    }
}
