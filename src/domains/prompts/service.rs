//! Prompt service implementation.
//!
//! Every prompt stored in the library is exposed as an MCP prompt. Its
//! arguments are the variables found in its content, and fetching it
//! performs a final fill: variables without a supplied value collapse to
//! empty text.

use rmcp::model::{GetPromptResult, Prompt, PromptArgument, PromptMessage, PromptMessageRole};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::error::PromptError;
use crate::core::config::PromptsConfig;
use crate::domains::library::{PromptLibrary, PromptRecord};
use crate::domains::selection::ListQuery;
use crate::domains::templating::{FillSession, extract_variables};

/// Service exposing library prompts over the MCP prompts API.
pub struct PromptService {
    /// Configuration for the prompts domain.
    config: PromptsConfig,

    /// The library prompts are read from.
    library: Arc<PromptLibrary>,
}

impl PromptService {
    /// Create a new PromptService over the given library.
    pub fn new(config: PromptsConfig, library: Arc<PromptLibrary>) -> Self {
        info!("Initializing PromptService");
        Self { config, library }
    }

    /// List every library prompt as an MCP prompt.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.library
            .list_prompts(&ListQuery::default())
            .await
            .iter()
            .map(to_mcp_prompt)
            .collect()
    }

    /// Find a prompt by id, or by exact title when enabled and unique.
    pub async fn resolve(&self, name: &str) -> Result<PromptRecord, PromptError> {
        match self.library.get_prompt(name).await {
            Ok(record) => return Ok(record),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }

        if !self.config.resolve_titles {
            return Err(PromptError::not_found(name));
        }

        let mut matches = self.library.find_prompts_by_title(name).await;
        match matches.len() {
            0 => Err(PromptError::not_found(name)),
            1 => Ok(matches.remove(0)),
            _ => {
                warn!("Prompt title '{}' matches {} prompts", name, matches.len());
                Err(PromptError::ambiguous(name))
            }
        }
    }

    /// Get a prompt with its variables filled in.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let record = self.resolve(name).await?;
        let mut session = FillSession::open(record.content.as_str());
        session.set_many(arguments.unwrap_or_default());
        let content = session.finish();

        Ok(GetPromptResult {
            description: record.description.clone().or(Some(record.title.clone())),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}

/// MCP metadata for one library prompt.
fn to_mcp_prompt(record: &PromptRecord) -> Prompt {
    let arguments = extract_variables(record.content.as_str())
        .iter()
        .map(|name| PromptArgument {
            name: name.to_string(),
            title: None,
            description: Some(format!("Value for {{{{{}}}}}", name)),
            required: Some(false),
        })
        .collect();

    Prompt {
        name: record.id.clone(),
        title: Some(record.title.clone()),
        description: record.description.clone(),
        arguments: Some(arguments),
        icons: None,
        meta: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::library::PromptInput;
    use rmcp::model::PromptMessageContent;

    async fn service_with(prompts: &[(&str, &str)], config: PromptsConfig) -> PromptService {
        let library = Arc::new(PromptLibrary::in_memory());
        for (title, content) in prompts {
            library
                .create_prompt(PromptInput {
                    title: title.to_string(),
                    content: content.to_string(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }
        PromptService::new(config, library)
    }

    fn message_text(result: &GetPromptResult) -> &str {
        match &result.messages[0].content {
            PromptMessageContent::Text { text } => text,
            _ => panic!("Expected text content"),
        }
    }

    #[tokio::test]
    async fn test_list_prompts_exposes_variables() {
        let service = service_with(
            &[("Greeting", "Hello {{name}}, welcome to {{ place }}. Bye {{name}}")],
            PromptsConfig::default(),
        )
        .await;

        let prompts = service.list_prompts().await;
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].title.as_deref(), Some("Greeting"));

        let args = prompts[0].arguments.as_ref().unwrap();
        let names: Vec<_> = args.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["name", "place"]);
        assert!(args.iter().all(|a| a.required == Some(false)));
    }

    #[tokio::test]
    async fn test_get_prompt_final_fill() {
        let service = service_with(
            &[("Greeting", "Hello {{name}} from {{ place }}!")],
            PromptsConfig::default(),
        )
        .await;
        let id = service.list_prompts().await[0].name.clone();

        let mut args = HashMap::new();
        args.insert("name".to_string(), "Ada".to_string());
        args.insert("unused".to_string(), "x".to_string());

        let result = service.get_prompt(&id, Some(args)).await.unwrap();
        assert_eq!(message_text(&result), "Hello Ada from !");

        let result = service.get_prompt(&id, None).await.unwrap();
        assert_eq!(message_text(&result), "Hello  from !");
    }

    #[tokio::test]
    async fn test_get_prompt_by_title() {
        let service = service_with(
            &[("Greeting", "Hi"), ("Twin", "one"), ("Twin", "two")],
            PromptsConfig::default(),
        )
        .await;

        assert!(service.get_prompt("Greeting", None).await.is_ok());
        assert!(matches!(
            service.get_prompt("Twin", None).await,
            Err(PromptError::Ambiguous(_))
        ));
    }

    #[tokio::test]
    async fn test_title_lookup_can_be_disabled() {
        let service = service_with(
            &[("Greeting", "Hi")],
            PromptsConfig {
                resolve_titles: false,
            },
        )
        .await;
        assert!(matches!(
            service.get_prompt("Greeting", None).await,
            Err(PromptError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_get_nonexistent_prompt() {
        let service = service_with(&[], PromptsConfig::default()).await;
        let result = service.get_prompt("nonexistent", None).await;
        assert!(result.is_err());
    }
}
