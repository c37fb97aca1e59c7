//! MCP Server implementation and lifecycle management.
//!
//! `McpServer` owns the prompt library and the shared view, and hands them
//! to the prompt, resource and tool domains. Clones share the same library
//! and view, so every TCP connection sees one selection.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    library::PromptLibrary,
    prompts::{PromptError, PromptService},
    resources::{ResourceError, ResourceService},
    selection::SharedView,
    tools::{ToolContext, build_tool_router},
};

#[cfg(feature = "http")]
use crate::domains::tools::{ToolError, ToolRegistry};

/// Instructions reported to clients on initialize.
pub const INSTRUCTIONS: &str = "Prompt library server. Stored prompts are available as MCP prompts whose arguments are their {{variables}}. Tools manage prompts, folders and tags, preview or fill templates, and drive a shared view (all, uncategorized, folder, tag or search).";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// State handed to every tool call.
    tools: ToolContext,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Service for handling prompt-related requests.
    prompt_service: Arc<PromptService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server over an already opened library.
    pub fn new(config: Config, library: Arc<PromptLibrary>) -> Self {
        let config = Arc::new(config);
        let view = Arc::new(SharedView::new());
        let tools = ToolContext::new(library.clone(), view.clone());

        let resource_service = Arc::new(ResourceService::new(library.clone(), view));
        let prompt_service = Arc::new(PromptService::new(config.prompts.clone(), library));

        Self {
            tool_router: build_tool_router::<Self>(tools.clone()),
            config,
            tools,
            resource_service,
            prompt_service,
        }
    }

    /// Open the configured library and create the server.
    pub async fn open(config: Config) -> super::Result<Self> {
        let library = PromptLibrary::open(&config.library).await?;
        Ok(Self::new(config, Arc::new(library)))
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn library(&self) -> &Arc<PromptLibrary> {
        &self.tools.library
    }

    pub fn view(&self) -> &Arc<SharedView> {
        &self.tools.view
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<Value, ToolError> {
        ToolRegistry::new(self.tools.clone())
            .call_tool(name, arguments)
            .await
    }

    /// List all available resources (for HTTP transport).
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resource_service.list_resources().await
    }

    /// List all available resource templates (for HTTP transport).
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.resource_service.list_resource_templates().await
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(
        &self,
        uri: &str,
    ) -> Result<ReadResourceResult, ResourceError> {
        self.resource_service.read_resource(uri).await
    }

    /// List all available prompts (for HTTP transport).
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.prompt_service.list_prompts().await
    }

    /// Get a prompt by name (for HTTP transport).
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<&serde_json::Map<String, Value>>,
    ) -> Result<GetPromptResult, PromptError> {
        self.prompt_service
            .get_prompt(name, arguments.map(string_arguments))
            .await
    }
}

/// Keep the string-valued prompt arguments. Other JSON values are dropped.
fn string_arguments(map: &serde_json::Map<String, Value>) -> HashMap<String, String> {
    map.iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
        .collect()
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        let templates = self.resource_service.list_resource_templates().await;
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        let prompts = self.prompt_service.list_prompts().await;
        Ok(ListPromptsResult {
            prompts,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        let arguments = request.arguments.as_ref().map(string_arguments);
        self.prompt_service
            .get_prompt(&request.name, arguments)
            .await
            .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LibraryConfig;
    use crate::domains::library::PromptInput;
    use crate::domains::selection::{FilterDescriptor, SelectionAction};

    fn server() -> McpServer {
        McpServer::new(Config::default(), Arc::new(PromptLibrary::in_memory()))
    }

    #[test]
    fn test_server_info() {
        let server = server();
        let info = server.get_info();
        assert_eq!(info.server_info.name, server.name());
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.prompts.is_some());
        assert!(info.capabilities.resources.is_some());
    }

    #[test]
    fn test_lists_all_tools() {
        assert_eq!(server().list_tools().len(), 18);
    }

    #[tokio::test]
    async fn test_clones_share_view_and_library() {
        let server = server();
        let other = server.clone();

        other
            .view()
            .apply(SelectionAction::SelectUncategorized)
            .await;
        assert_eq!(server.view().current().await, FilterDescriptor::Uncategorized);

        other
            .library()
            .create_prompt(PromptInput {
                title: "Shared".into(),
                content: "Hi {{who}}".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(server.list_prompts().await.len(), 1);
    }

    #[tokio::test]
    async fn test_get_prompt_ignores_non_string_arguments() {
        let server = server();
        let prompt = server
            .library()
            .create_prompt(PromptInput {
                title: "Count".into(),
                content: "{{n}} items".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let args = serde_json::json!({ "n": 3 });
        let result = server
            .get_prompt(&prompt.id, args.as_object())
            .await
            .unwrap();
        assert_eq!(result.messages.len(), 1);
        match &result.messages[0].content {
            PromptMessageContent::Text { text } => assert_eq!(text, " items"),
            other => panic!("Expected text content, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_open_in_memory() {
        let mut config = Config::default();
        config.library = LibraryConfig::default();
        let server = McpServer::open(config).await.unwrap();
        assert!(server.library().snapshot_path().is_none());
    }
}
