//! Template tools: variable extraction, live preview and final fill.
//!
//! Each tool works on either a stored prompt (`prompt_id`) or raw template
//! text (`template`).

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::instrument;

use super::common::{error_result, library_error, structured_result};
use crate::domains::templating::{FillMode, FillSession, VariableSet, extract_variables};
use crate::domains::tools::definition::{ToolContext, ToolDefinition};

/// Where the template text comes from.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct TemplateSource {
    /// Id of a stored prompt whose content is the template.
    #[serde(default)]
    pub prompt_id: Option<String>,

    /// Raw template text with `{{variable}}` placeholders.
    #[serde(default)]
    pub template: Option<String>,
}

impl TemplateSource {
    /// Load the template text, or the error result to return.
    async fn load(&self, ctx: &ToolContext) -> Result<String, CallToolResult> {
        match (&self.prompt_id, &self.template) {
            (Some(_), Some(_)) => Err(error_result(
                "Provide either prompt_id or template, not both",
            )),
            (Some(id), None) => ctx
                .library
                .get_prompt(id)
                .await
                .map(|prompt| prompt.content)
                .map_err(|e| library_error("load prompt", &e)),
            (None, Some(template)) => Ok(template.clone()),
            (None, None) => Err(error_result("Provide prompt_id or template")),
        }
    }
}

/// Parameters for rendering a template with values.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct FillParams {
    #[serde(flatten)]
    pub source: TemplateSource,

    /// Variable values keyed by name. Names the template does not use are
    /// ignored.
    #[serde(default)]
    pub values: HashMap<String, String>,
}

// ============================================================================
// variables_extract
// ============================================================================

#[derive(Debug, Serialize)]
struct Extracted {
    count: usize,
    variables: VariableSet,
}

pub struct VariablesExtractTool;

#[async_trait]
impl ToolDefinition for VariablesExtractTool {
    const NAME: &'static str = "variables_extract";
    const DESCRIPTION: &'static str = "List the distinct {{variable}} names used by a prompt or template, in order of first appearance.";

    type Params = TemplateSource;

    #[instrument(skip_all)]
    async fn execute(&self, params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        let template = match params.load(ctx).await {
            Ok(template) => template,
            Err(result) => return result,
        };
        let variables = extract_variables(template.as_str());
        let summary = if variables.is_empty() {
            "No variables".to_string()
        } else {
            format!("Variables: {}", variables.as_slice().join(", "))
        };
        structured_result(
            summary,
            &Extracted {
                count: variables.len(),
                variables,
            },
        )
    }
}

// ============================================================================
// prompt_preview / prompt_fill
// ============================================================================

async fn fill(params: FillParams, ctx: &ToolContext, mode: FillMode) -> CallToolResult {
    let template = match params.source.load(ctx).await {
        Ok(template) => template,
        Err(result) => return result,
    };
    let mut session = FillSession::open(template);
    session.set_many(params.values);
    let outcome = session.outcome(mode);
    structured_result(outcome.text.clone(), &outcome)
}

pub struct PromptPreviewTool;

#[async_trait]
impl ToolDefinition for PromptPreviewTool {
    const NAME: &'static str = "prompt_preview";
    const DESCRIPTION: &'static str = "Preview a prompt or template. Only non-blank values are substituted; unfilled variables stay visible as {{name}}.";

    type Params = FillParams;

    #[instrument(skip_all)]
    async fn execute(&self, params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        fill(params, ctx, FillMode::Preview).await
    }
}

pub struct PromptFillTool;

#[async_trait]
impl ToolDefinition for PromptFillTool {
    const NAME: &'static str = "prompt_fill";
    const DESCRIPTION: &'static str = "Produce the final text of a prompt or template. Every variable is substituted; missing or blank values become empty text.";

    type Params = FillParams;

    #[instrument(skip_all)]
    async fn execute(&self, params: Self::Params, ctx: &ToolContext) -> CallToolResult {
        fill(params, ctx, FillMode::Final).await
    }
}
