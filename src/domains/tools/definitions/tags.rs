//! Tag tools.

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::common::{IdParams, NoParams, library_error, structured_result};
use crate::domains::library::{Tag, TagInput};
use crate::domains::selection::{FilterDescriptor, SelectionAction};
use crate::domains::tools::definition::{ToolContext, ToolDefinition};

#[derive(Debug, Serialize)]
struct TagList {
    count: usize,
    tags: Vec<Tag>,
}

pub struct TagListTool;

#[async_trait]
impl ToolDefinition for TagListTool {
    const NAME: &'static str = "tag_list";
    const DESCRIPTION: &'static str = "List all tags sorted by name.";

    type Params = NoParams;

    async fn execute(&self, _params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        let tags = ctx.library.list_tags().await;
        structured_result(
            format!("{} tag(s)", tags.len()),
            &TagList {
                count: tags.len(),
                tags,
            },
        )
    }
}

pub struct TagCreateTool;

#[async_trait]
impl ToolDefinition for TagCreateTool {
    const NAME: &'static str = "tag_create";
    const DESCRIPTION: &'static str = "Create a tag with an optional color. Tag names are unique.";

    type Params = TagInput;

    #[instrument(skip_all, fields(name = %params.name))]
    async fn execute(&self, params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        match ctx.library.create_tag(params).await {
            Ok(tag) => structured_result(format!("Created tag '{}'", tag.name), &tag),
            Err(e) => library_error("create tag", &e),
        }
    }
}

/// Parameters for renaming or recoloring a tag.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TagUpdateParams {
    /// Id of the tag to update.
    pub id: String,

    #[serde(flatten)]
    pub input: TagInput,
}

pub struct TagUpdateTool;

#[async_trait]
impl ToolDefinition for TagUpdateTool {
    const NAME: &'static str = "tag_update";
    const DESCRIPTION: &'static str = "Rename a tag or change its color.";

    type Params = TagUpdateParams;

    #[instrument(skip_all, fields(id = %params.id))]
    async fn execute(&self, params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        match ctx.library.update_tag(&params.id, params.input).await {
            Ok(tag) => structured_result(format!("Updated tag '{}'", tag.name), &tag),
            Err(e) => library_error("update tag", &e),
        }
    }
}

#[derive(Debug, Serialize)]
struct TagDeleted {
    deleted: Tag,
    untagged_prompts: usize,
    view: FilterDescriptor,
}

pub struct TagDeleteTool;

#[async_trait]
impl ToolDefinition for TagDeleteTool {
    const NAME: &'static str = "tag_delete";
    const DESCRIPTION: &'static str = "Delete a tag and remove it from every prompt. If the tag was the selected view, the view returns to all prompts.";

    type Params = IdParams;

    #[instrument(skip_all, fields(id = %params.id))]
    async fn execute(&self, params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        let outcome = ctx.library.delete_tag(&params.id).await;
        let view = ctx
            .view
            .apply(SelectionAction::TagDeleted(params.id.clone()))
            .await;

        match outcome {
            Ok((deleted, stripped)) => {
                structured_result(
                    format!(
                        "Deleted tag '{}', removed from {} prompt(s)",
                        deleted.name, stripped
                    ),
                    &TagDeleted {
                        deleted,
                        untagged_prompts: stripped,
                        view,
                    },
                )
            }
            Err(e) => library_error("delete tag", &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::library::PromptInput;

    fn tag(name: &str) -> TagInput {
        TagInput {
            name: name.into(),
            color: Some("#ff8800".into()),
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let ctx = ToolContext::in_memory();
        let created = TagCreateTool.execute(tag("email"), &ctx).await;
        assert_eq!(created.structured_content.unwrap()["color"], "#ff8800");

        let dup = TagCreateTool.execute(tag("email"), &ctx).await;
        assert_eq!(dup.is_error, Some(true));

        let list = TagListTool.execute(NoParams {}, &ctx).await;
        assert_eq!(list.structured_content.unwrap()["count"], 1);
    }

    #[tokio::test]
    async fn test_delete_strips_tag_and_resets_view() {
        let ctx = ToolContext::in_memory();
        let email = ctx.library.create_tag(tag("email")).await.unwrap();
        let prompt = ctx
            .library
            .create_prompt(PromptInput {
                title: "Intro".into(),
                content: "Hello".into(),
                tags: vec![email.id.clone()],
                ..Default::default()
            })
            .await
            .unwrap();
        ctx.view
            .apply(SelectionAction::SelectTag(email.id.clone()))
            .await;

        let result = TagDeleteTool
            .execute(IdParams { id: email.id.clone() }, &ctx)
            .await;
        assert_eq!(result.structured_content.unwrap()["untagged_prompts"], 1);
        assert_eq!(ctx.view.current().await, FilterDescriptor::All);

        let prompt = ctx.library.get_prompt(&prompt.id).await.unwrap();
        assert!(prompt.tags.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_tag() {
        let ctx = ToolContext::in_memory();
        let result = TagUpdateTool
            .execute(
                TagUpdateParams {
                    id: "missing".into(),
                    input: tag("x"),
                },
                &ctx,
            )
            .await;
        assert_eq!(result.is_error, Some(true));
    }
}
