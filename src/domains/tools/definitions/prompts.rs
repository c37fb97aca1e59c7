//! Prompt tools: list, get, create, update and delete.

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::common::{IdParams, library_error, structured_result};
use crate::domains::library::{Prompt, PromptInput, PromptRecord};
use crate::domains::selection::{FilterDescriptor, ListQuery};
use crate::domains::templating::{VariableSet, extract_variables};
use crate::domains::tools::definition::{ToolContext, ToolDefinition};

// ============================================================================
// prompt_list
// ============================================================================

/// Parameters for listing prompts in an explicit view.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PromptListParams {
    /// The view to list: `{"view": "all"}`, `{"view": "uncategorized"}`,
    /// `{"view": "folder", "value": "<id>"}`, `{"view": "tag", "value": "<id>"}`
    /// or `{"view": "search", "value": "<term>"}`.
    #[serde(flatten)]
    pub view: FilterDescriptor,
}

#[derive(Debug, Serialize)]
struct PromptListOutput {
    view: FilterDescriptor,
    query: ListQuery,
    count: usize,
    prompts: Vec<PromptRecord>,
}

/// Lists prompts for a view without touching the shared selection.
pub struct PromptListTool;

#[async_trait]
impl ToolDefinition for PromptListTool {
    const NAME: &'static str = "prompt_list";
    const DESCRIPTION: &'static str = "List prompts in a view (all, uncategorized, folder, tag or search), most recently updated first. Does not change the shared view.";

    type Params = PromptListParams;

    #[instrument(skip_all, fields(view = %params.view.label()))]
    async fn execute(&self, params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        let view = match params.view {
            FilterDescriptor::Search(term) => FilterDescriptor::search(term),
            other => other,
        };
        let query = view.to_query();
        let prompts = ctx.library.list_prompts(&query).await;
        info!("Listed {} prompts", prompts.len());

        let summary = format!("{} prompt(s) in view {}", prompts.len(), view.label());
        structured_result(
            summary,
            &PromptListOutput {
                view,
                query,
                count: prompts.len(),
                prompts,
            },
        )
    }
}

// ============================================================================
// prompt_get
// ============================================================================

#[derive(Debug, Serialize)]
struct PromptDetail {
    prompt: PromptRecord,
    variables: VariableSet,
}

/// Returns one prompt with its folder, tags and variables.
pub struct PromptGetTool;

#[async_trait]
impl ToolDefinition for PromptGetTool {
    const NAME: &'static str = "prompt_get";
    const DESCRIPTION: &'static str =
        "Get one prompt by id, with its folder, tags and the {{variables}} its content uses.";

    type Params = IdParams;

    #[instrument(skip_all, fields(id = %params.id))]
    async fn execute(&self, params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        match ctx.library.get_prompt(&params.id).await {
            Ok(prompt) => {
                let variables = extract_variables(prompt.content.as_str());
                let summary = format!(
                    "Prompt '{}' with {} variable(s)",
                    prompt.title,
                    variables.len()
                );
                structured_result(summary, &PromptDetail { prompt, variables })
            }
            Err(e) => library_error("get prompt", &e),
        }
    }
}

// ============================================================================
// prompt_create
// ============================================================================

/// Creates a prompt.
pub struct PromptCreateTool;

#[async_trait]
impl ToolDefinition for PromptCreateTool {
    const NAME: &'static str = "prompt_create";
    const DESCRIPTION: &'static str = "Create a prompt. Title and content are required; tags are tag ids and folder is a folder id.";

    type Params = PromptInput;

    #[instrument(skip_all, fields(title = %params.title))]
    async fn execute(&self, params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        match ctx.library.create_prompt(params).await {
            Ok(prompt) => structured_result(format!("Created prompt '{}'", prompt.title), &prompt),
            Err(e) => library_error("create prompt", &e),
        }
    }
}

// ============================================================================
// prompt_update
// ============================================================================

/// Parameters for replacing a prompt's fields.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PromptUpdateParams {
    /// Id of the prompt to update.
    pub id: String,

    #[serde(flatten)]
    pub input: PromptInput,
}

/// Replaces a prompt's fields.
pub struct PromptUpdateTool;

#[async_trait]
impl ToolDefinition for PromptUpdateTool {
    const NAME: &'static str = "prompt_update";
    const DESCRIPTION: &'static str = "Replace the title, content, description, tags and folder of a prompt. Omitted tags and folder are cleared.";

    type Params = PromptUpdateParams;

    #[instrument(skip_all, fields(id = %params.id))]
    async fn execute(&self, params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        match ctx.library.update_prompt(&params.id, params.input).await {
            Ok(prompt) => structured_result(format!("Updated prompt '{}'", prompt.title), &prompt),
            Err(e) => library_error("update prompt", &e),
        }
    }
}

// ============================================================================
// prompt_delete
// ============================================================================

#[derive(Debug, Serialize)]
struct PromptDeleted {
    deleted: Prompt,
}

/// Deletes a prompt.
pub struct PromptDeleteTool;

#[async_trait]
impl ToolDefinition for PromptDeleteTool {
    const NAME: &'static str = "prompt_delete";
    const DESCRIPTION: &'static str = "Delete a prompt by id.";

    type Params = IdParams;

    #[instrument(skip_all, fields(id = %params.id))]
    async fn execute(&self, params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        match ctx.library.delete_prompt(&params.id).await {
            Ok(deleted) => {
                structured_result(
                    format!("Deleted prompt '{}'", deleted.title),
                    &PromptDeleted { deleted },
                )
            }
            Err(e) => library_error("delete prompt", &e),
        }
    }
}
