//! Tool-specific error types.
//!
//! These cover failures to reach a tool at all. Failures inside a tool are
//! reported in its `CallToolResult` instead.

use thiserror::Error;

/// Errors that can occur while dispatching a tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The arguments did not match the tool's parameters.
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: &'static str, message: String },

    /// The tool result could not be serialized.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(tool: &'static str, msg: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool,
            message: msg.into(),
        }
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
