//! Folder tools.
//!
//! Deleting a folder also moves the shared view back to `All` when that
//! folder was selected.

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::common::{IdParams, NoParams, library_error, structured_result};
use crate::domains::library::{Folder, FolderInput};
use crate::domains::selection::{FilterDescriptor, SelectionAction};
use crate::domains::tools::definition::{ToolContext, ToolDefinition};

#[derive(Debug, Serialize)]
struct FolderList {
    count: usize,
    folders: Vec<Folder>,
}

pub struct FolderListTool;

#[async_trait]
impl ToolDefinition for FolderListTool {
    const NAME: &'static str = "folder_list";
    const DESCRIPTION: &'static str = "List all folders sorted by name.";

    type Params = NoParams;

    async fn execute(&self, _params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        let folders = ctx.library.list_folders().await;
        structured_result(
            format!("{} folder(s)", folders.len()),
            &FolderList {
                count: folders.len(),
                folders,
            },
        )
    }
}

pub struct FolderCreateTool;

#[async_trait]
impl ToolDefinition for FolderCreateTool {
    const NAME: &'static str = "folder_create";
    const DESCRIPTION: &'static str = "Create a folder. Folder names are unique.";

    type Params = FolderInput;

    #[instrument(skip_all, fields(name = %params.name))]
    async fn execute(&self, params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        match ctx.library.create_folder(params).await {
            Ok(folder) => structured_result(format!("Created folder '{}'", folder.name), &folder),
            Err(e) => library_error("create folder", &e),
        }
    }
}

/// Parameters for renaming or redescribing a folder.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FolderUpdateParams {
    /// Id of the folder to update.
    pub id: String,

    #[serde(flatten)]
    pub input: FolderInput,
}

pub struct FolderUpdateTool;

#[async_trait]
impl ToolDefinition for FolderUpdateTool {
    const NAME: &'static str = "folder_update";
    const DESCRIPTION: &'static str = "Rename a folder or change its description.";

    type Params = FolderUpdateParams;

    #[instrument(skip_all, fields(id = %params.id))]
    async fn execute(&self, params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        match ctx.library.update_folder(&params.id, params.input).await {
            Ok(folder) => structured_result(format!("Updated folder '{}'", folder.name), &folder),
            Err(e) => library_error("update folder", &e),
        }
    }
}

#[derive(Debug, Serialize)]
struct FolderDeleted {
    deleted: Folder,
    uncategorized_prompts: usize,
    view: FilterDescriptor,
}

pub struct FolderDeleteTool;

#[async_trait]
impl ToolDefinition for FolderDeleteTool {
    const NAME: &'static str = "folder_delete";
    const DESCRIPTION: &'static str = "Delete a folder. Its prompts become uncategorized. If the folder was the selected view, the view returns to all prompts.";

    type Params = IdParams;

    #[instrument(skip_all, fields(id = %params.id))]
    async fn execute(&self, params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        let outcome = ctx.library.delete_folder(&params.id).await;
        let view = ctx
            .view
            .apply(SelectionAction::FolderDeleted(params.id.clone()))
            .await;

        match outcome {
            Ok((deleted, moved)) => {
                structured_result(
                    format!(
                        "Deleted folder '{}', {} prompt(s) are now uncategorized",
                        deleted.name, moved
                    ),
                    &FolderDeleted {
                        deleted,
                        uncategorized_prompts: moved,
                        view,
                    },
                )
            }
            Err(e) => library_error("delete folder", &e),
        }
    }
}
