//! Tool Router - builds the rmcp ToolRouter for STDIO/TCP transport.

use rmcp::handler::server::tool::ToolRouter;

use super::definition::{ToolContext, route};
use super::definitions::*;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(ctx: ToolContext) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(route::<_, S>(PromptListTool, ctx.clone()))
        .with_route(route::<_, S>(PromptGetTool, ctx.clone()))
        .with_route(route::<_, S>(PromptCreateTool, ctx.clone()))
        .with_route(route::<_, S>(PromptUpdateTool, ctx.clone()))
        .with_route(route::<_, S>(PromptDeleteTool, ctx.clone()))
        .with_route(route::<_, S>(FolderListTool, ctx.clone()))
        .with_route(route::<_, S>(FolderCreateTool, ctx.clone()))
        .with_route(route::<_, S>(FolderUpdateTool, ctx.clone()))
        .with_route(route::<_, S>(FolderDeleteTool, ctx.clone()))
        .with_route(route::<_, S>(TagListTool, ctx.clone()))
        .with_route(route::<_, S>(TagCreateTool, ctx.clone()))
        .with_route(route::<_, S>(TagUpdateTool, ctx.clone()))
        .with_route(route::<_, S>(TagDeleteTool, ctx.clone()))
        .with_route(route::<_, S>(VariablesExtractTool, ctx.clone()))
        .with_route(route::<_, S>(PromptPreviewTool, ctx.clone()))
        .with_route(route::<_, S>(PromptFillTool, ctx.clone()))
        .with_route(route::<_, S>(ViewSelectTool, ctx.clone()))
        .with_route(route::<_, S>(ViewCurrentTool, ctx))
}
