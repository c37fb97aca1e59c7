//! Tools driving the server's shared view.

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{NoParams, structured_result};
use crate::domains::selection::{SelectionAction, ViewSnapshot};
use crate::domains::tools::definition::{ToolContext, ToolDefinition};

/// The selection actions a client may request. Deletion notices only come
/// from the folder and tag delete tools.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum ViewAction {
    SelectAll,
    SelectUncategorized,
    SelectFolder(String),
    SelectTag(String),
    Search(String),
}

impl From<ViewAction> for SelectionAction {
    fn from(action: ViewAction) -> Self {
        match action {
            ViewAction::SelectAll => Self::SelectAll,
            ViewAction::SelectUncategorized => Self::SelectUncategorized,
            ViewAction::SelectFolder(id) => Self::SelectFolder(id),
            ViewAction::SelectTag(id) => Self::SelectTag(id),
            ViewAction::Search(term) => Self::Search(term),
        }
    }
}

/// Parameters for applying one selection action.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ViewSelectParams {
    /// `{"action": "select_all"}`, `{"action": "select_uncategorized"}`,
    /// `{"action": "select_folder", "value": "<id>"}`,
    /// `{"action": "select_tag", "value": "<id>"}` or
    /// `{"action": "search", "value": "<term>"}`.
    #[serde(flatten)]
    pub action: ViewAction,
}

fn snapshot_result(snapshot: ViewSnapshot) -> CallToolResult {
    let summary = format!(
        "View {}: {} prompt(s)",
        snapshot.descriptor.label(),
        snapshot.prompts.len()
    );
    structured_result(summary, &snapshot)
}

pub struct ViewSelectTool;

#[async_trait]
impl ToolDefinition for ViewSelectTool {
    const NAME: &'static str = "view_select";
    const DESCRIPTION: &'static str = "Change the shared view: select all prompts, uncategorized prompts, a folder, a tag, or search. Returns the new view with its listing.";

    type Params = ViewSelectParams;

    #[instrument(skip_all)]
    async fn execute(&self, params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        let descriptor = ctx.view.apply(params.action.into()).await;
        info!("View is now {}", descriptor.label());
        snapshot_result(ctx.view.snapshot(ctx.library.as_ref()).await)
    }
}

pub struct ViewCurrentTool;

#[async_trait]
impl ToolDefinition for ViewCurrentTool {
    const NAME: &'static str = "view_current";
    const DESCRIPTION: &'static str = "Show the shared view: the active filter, its query, the sidebar with the highlighted entry, and the matching prompts.";

    type Params = NoParams;

    async fn execute(&self, _params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        snapshot_result(ctx.view.snapshot(ctx.library.as_ref()).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::library::{FolderInput, PromptInput};
    use crate::domains::tools::definition::parse_params;
    use serde_json::json;

    #[tokio::test]
    async fn test_select_then_current() {
        let ctx = ToolContext::in_memory();
        let folder = ctx
            .library
            .create_folder(FolderInput {
                name: "Work".into(),
                description: None,
            })
            .await
            .unwrap();
        ctx.library
            .create_prompt(PromptInput {
                title: "Report".into(),
                content: "weekly".into(),
                folder: Some(folder.id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        ctx.library
            .create_prompt(PromptInput {
                title: "Loose".into(),
                content: "note".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let params = parse_params::<ViewSelectTool>(json!({
            "action": "select_folder",
            "value": folder.id
        }))
        .unwrap();
        let selected = ViewSelectTool.execute(params, &ctx).await;
        let snapshot = selected.structured_content.unwrap();
        assert_eq!(snapshot["descriptor"]["view"], "folder");
        assert_eq!(snapshot["prompts"].as_array().unwrap().len(), 1);

        let current = ViewCurrentTool.execute(NoParams {}, &ctx).await;
        let snapshot = current.structured_content.unwrap();
        assert_eq!(snapshot["query"]["folderId"], json!(folder.id));
        let highlighted: Vec<_> = snapshot["sidebar"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|e| e["selected"] == json!(true))
            .collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0]["item"]["kind"], "folder");
    }

    #[tokio::test]
    async fn test_empty_search_selects_all() {
        let ctx = ToolContext::in_memory();
        let params =
            parse_params::<ViewSelectTool>(json!({ "action": "search", "value": "" })).unwrap();
        let result = ViewSelectTool.execute(params, &ctx).await;
        assert_eq!(result.structured_content.unwrap()["descriptor"]["view"], "all");
    }

    #[tokio::test]
    async fn test_deletion_actions_are_not_selectable() {
        let ctx = ToolContext::in_memory();
        ctx.view
            .apply(SelectionAction::SelectFolder("f1".into()))
            .await;

        for action in ["folder_deleted", "tag_deleted"] {
            let params = parse_params::<ViewSelectTool>(json!({ "action": action, "value": "f1" }));
            assert!(params.is_err(), "{} should be rejected", action);
        }
        assert_eq!(
            ctx.view.current().await,
            crate::domains::selection::FilterDescriptor::Folder("f1".into())
        );
    }
}
