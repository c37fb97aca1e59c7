//! Tool Registry - tool metadata and HTTP dispatch.

use rmcp::model::Tool;
#[cfg(feature = "http")]
use tracing::warn;

#[cfg(feature = "http")]
use super::definition::dispatch;
use super::definition::{ToolContext, ToolDefinition, to_tool};
use super::definitions::*;
#[cfg(feature = "http")]
use super::error::ToolError;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - lists tools and dispatches HTTP tool calls.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    ctx: ToolContext,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            PromptListTool::NAME,
            PromptGetTool::NAME,
            PromptCreateTool::NAME,
            PromptUpdateTool::NAME,
            PromptDeleteTool::NAME,
            FolderListTool::NAME,
            FolderCreateTool::NAME,
            FolderUpdateTool::NAME,
            FolderDeleteTool::NAME,
            TagListTool::NAME,
            TagCreateTool::NAME,
            TagUpdateTool::NAME,
            TagDeleteTool::NAME,
            VariablesExtractTool::NAME,
            PromptPreviewTool::NAME,
            PromptFillTool::NAME,
            ViewSelectTool::NAME,
            ViewCurrentTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            to_tool::<PromptListTool>(),
            to_tool::<PromptGetTool>(),
            to_tool::<PromptCreateTool>(),
            to_tool::<PromptUpdateTool>(),
            to_tool::<PromptDeleteTool>(),
            to_tool::<FolderListTool>(),
            to_tool::<FolderCreateTool>(),
            to_tool::<FolderUpdateTool>(),
            to_tool::<FolderDeleteTool>(),
            to_tool::<TagListTool>(),
            to_tool::<TagCreateTool>(),
            to_tool::<TagUpdateTool>(),
            to_tool::<TagDeleteTool>(),
            to_tool::<VariablesExtractTool>(),
            to_tool::<PromptPreviewTool>(),
            to_tool::<PromptFillTool>(),
            to_tool::<ViewSelectTool>(),
            to_tool::<ViewCurrentTool>(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate tool.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let ctx = &self.ctx;
        match name {
            PromptListTool::NAME => dispatch(PromptListTool, arguments, ctx).await,
            PromptGetTool::NAME => dispatch(PromptGetTool, arguments, ctx).await,
            PromptCreateTool::NAME => dispatch(PromptCreateTool, arguments, ctx).await,
            PromptUpdateTool::NAME => dispatch(PromptUpdateTool, arguments, ctx).await,
            PromptDeleteTool::NAME => dispatch(PromptDeleteTool, arguments, ctx).await,
            FolderListTool::NAME => dispatch(FolderListTool, arguments, ctx).await,
            FolderCreateTool::NAME => dispatch(FolderCreateTool, arguments, ctx).await,
            FolderUpdateTool::NAME => dispatch(FolderUpdateTool, arguments, ctx).await,
            FolderDeleteTool::NAME => dispatch(FolderDeleteTool, arguments, ctx).await,
            TagListTool::NAME => dispatch(TagListTool, arguments, ctx).await,
            TagCreateTool::NAME => dispatch(TagCreateTool, arguments, ctx).await,
            TagUpdateTool::NAME => dispatch(TagUpdateTool, arguments, ctx).await,
            TagDeleteTool::NAME => dispatch(TagDeleteTool, arguments, ctx).await,
            VariablesExtractTool::NAME => dispatch(VariablesExtractTool, arguments, ctx).await,
            PromptPreviewTool::NAME => dispatch(PromptPreviewTool, arguments, ctx).await,
            PromptFillTool::NAME => dispatch(PromptFillTool, arguments, ctx).await,
            ViewSelectTool::NAME => dispatch(ViewSelectTool, arguments, ctx).await,
            ViewCurrentTool::NAME => dispatch(ViewCurrentTool, arguments, ctx).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
