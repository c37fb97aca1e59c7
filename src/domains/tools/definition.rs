//! The contract every tool implements, and the glue that turns a tool into
//! an rmcp route or an HTTP dispatch target.

use async_trait::async_trait;
use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use super::error::ToolError;
use crate::domains::library::PromptLibrary;
use crate::domains::selection::SharedView;

/// Shared state handed to every tool call.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub library: Arc<PromptLibrary>,
    pub view: Arc<SharedView>,
}

impl ToolContext {
    pub fn new(library: Arc<PromptLibrary>, view: Arc<SharedView>) -> Self {
        Self { library, view }
    }

    /// A fresh in-memory library with the view on `All`.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(PromptLibrary::in_memory()), Arc::new(SharedView::new()))
    }
}

/// A tool exposed over MCP.
///
/// Parameters are decoded from the call arguments before `execute` runs, so
/// a malformed call is rejected as invalid params and never reaches the
/// tool. Domain failures are reported inside the returned
/// `CallToolResult` with `is_error` set.
#[async_trait]
pub trait ToolDefinition: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    async fn execute(&self, params: Self::Params, ctx: &ToolContext) -> CallToolResult;
}

/// Tool metadata for listing.
pub fn to_tool<T: ToolDefinition>() -> Tool {
    Tool {
        name: T::NAME.into(),
        description: Some(T::DESCRIPTION.into()),
        input_schema: Arc::new(schema_for_type::<T::Params>()),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Decode call arguments. A missing argument object counts as `{}`.
pub fn parse_params<T: ToolDefinition>(arguments: Value) -> Result<T::Params, ToolError> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(T::NAME, e.to_string()))
}

/// Create a ToolRoute for STDIO/TCP transport.
pub fn route<T, S>(tool: T, ctx: ToolContext) -> ToolRoute<S>
where
    T: ToolDefinition,
    S: Send + Sync + 'static,
{
    let tool = Arc::new(tool);
    ToolRoute::new_dyn(to_tool::<T>(), move |call: ToolCallContext<'_, S>| {
        let args = call.arguments.clone().unwrap_or_default();
        let tool = tool.clone();
        let ctx = ctx.clone();
        async move {
            let params = parse_params::<T>(Value::Object(args))
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
            Ok(tool.execute(params, &ctx).await)
        }
        .boxed()
    })
}

/// Run a tool for the HTTP transport and serialize the full result.
#[cfg(feature = "http")]
pub async fn dispatch<T: ToolDefinition>(
    tool: T,
    arguments: Value,
    ctx: &ToolContext,
) -> Result<Value, ToolError> {
    let params = parse_params::<T>(arguments)?;
    let result = tool.execute(params, ctx).await;
    serde_json::to_value(&result).map_err(|e| ToolError::internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::{FolderCreateTool, TagListTool};

    #[test]
    fn test_null_arguments_are_empty_object() {
        assert!(parse_params::<TagListTool>(Value::Null).is_ok());
    }

    #[test]
    fn test_invalid_arguments_name_the_tool() {
        let err = parse_params::<FolderCreateTool>(serde_json::json!({ "name": 3 })).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { tool: "folder_create", .. }));
    }

    #[test]
    fn test_tool_metadata() {
        let tool = to_tool::<FolderCreateTool>();
        assert_eq!(tool.name, "folder_create");
        assert!(tool.input_schema.contains_key("properties"));
    }
}
