//! Result builders shared by the tool definitions.

use rmcp::model::{CallToolResult, Content};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domains::library::LibraryError;

/// Parameters for tools that take none.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Parameters for tools addressing one record by id.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IdParams {
    /// Record id.
    pub id: String,
}

/// A human-readable summary plus the structured payload.
pub fn structured_result<T: Serialize>(summary: impl Into<String>, value: &T) -> CallToolResult {
    match serde_json::to_value(value) {
        Ok(structured) => CallToolResult {
            content: vec![Content::text(summary.into())],
            structured_content: Some(structured),
            is_error: Some(false),
            meta: None,
        },
        Err(e) => error_result(format!("Failed to serialize result: {}", e)),
    }
}

pub fn error_result(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}

/// Report a failed library operation, e.g. `library_error("create folder", &e)`.
pub fn library_error(action: &str, err: &LibraryError) -> CallToolResult {
    warn!("Failed to {}: {}", action, err);
    error_result(format!("Failed to {}: {}", action, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_result_sets_content() {
        let result = structured_result("done", &serde_json::json!({ "count": 2 }));
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content.unwrap()["count"], 2);
    }

    #[test]
    fn test_library_error_is_error() {
        let result = library_error("delete tag", &LibraryError::not_found("Tag", "t1"));
        assert_eq!(result.is_error, Some(true));
    }
}
