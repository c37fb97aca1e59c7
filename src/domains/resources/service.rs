//! Resource service implementation.
//!
//! Every resource is computed on read, so clients always see the current
//! library and the current shared view.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::error::ResourceError;
use super::registry::{get_all_resource_templates, get_all_resources};
use super::uri::LibraryResource;
use crate::domains::library::{PromptLibrary, PromptRecord};
use crate::domains::selection::SharedView;
use crate::domains::templating::{VariableSet, extract_variables};

/// Service for listing and reading library resources.
pub struct ResourceService {
    library: Arc<PromptLibrary>,
    view: Arc<SharedView>,
    resources: Vec<Resource>,
    templates: Vec<ResourceTemplate>,
}

#[derive(Debug, Serialize)]
struct PromptResource {
    prompt: PromptRecord,
    variables: VariableSet,
}

impl ResourceService {
    /// Create a new ResourceService over the library and shared view.
    pub fn new(library: Arc<PromptLibrary>, view: Arc<SharedView>) -> Self {
        info!("Initializing ResourceService");
        Self {
            library,
            view,
            resources: get_all_resources(),
            templates: get_all_resource_templates(),
        }
    }

    /// List all fixed-URI resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources.clone()
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.clone()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let resource = LibraryResource::parse(uri).ok_or_else(|| ResourceError::not_found(uri))?;
        debug!("Reading resource {}", resource);

        let body = match resource {
            LibraryResource::Folders => to_json(&self.library.list_folders().await)?,
            LibraryResource::Tags => to_json(&self.library.list_tags().await)?,
            LibraryResource::View => to_json(&self.view.snapshot(self.library.as_ref()).await)?,
            LibraryResource::Prompt(id) => {
                let prompt = match self.library.get_prompt(&id).await {
                    Ok(prompt) => prompt,
                    Err(e) if e.is_not_found() => return Err(ResourceError::not_found(uri)),
                    Err(e) => return Err(e.into()),
                };
                let variables = extract_variables(prompt.content.as_str());
                to_json(&PromptResource { prompt, variables })?
            }
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(body, uri)],
        })
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ResourceError> {
    serde_json::to_string_pretty(value).map_err(|e| ResourceError::internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::library::{FolderInput, PromptInput};
    use crate::domains::selection::SelectionAction;

    fn text_of(result: &ReadResourceResult) -> serde_json::Value {
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => {
                serde_json::from_str(text).unwrap()
            }
            _ => panic!("Expected text contents"),
        }
    }

    fn service() -> ResourceService {
        ResourceService::new(Arc::new(PromptLibrary::in_memory()), Arc::new(SharedView::new()))
    }

    #[tokio::test]
    async fn test_list_resources() {
        let service = service();
        assert_eq!(service.list_resources().await.len(), 3);
        assert_eq!(service.list_resource_templates().await.len(), 1);
    }

    #[tokio::test]
    async fn test_read_folders() {
        let service = service();
        service
            .library
            .create_folder(FolderInput {
                name: "Work".into(),
                description: None,
            })
            .await
            .unwrap();

        let result = service.read_resource("library://folders").await.unwrap();
        assert_eq!(text_of(&result)[0]["name"], "Work");
    }

    #[tokio::test]
    async fn test_read_prompt_template() {
        let service = service();
        let prompt = service
            .library
            .create_prompt(PromptInput {
                title: "Greeting".into(),
                content: "Hi {{name}}".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let uri = format!("library://prompts/{}", prompt.id);
        let body = text_of(&service.read_resource(&uri).await.unwrap());
        assert_eq!(body["prompt"]["title"], "Greeting");
        assert_eq!(body["variables"][0], "name");

        let missing = service.read_resource("library://prompts/nope").await;
        assert!(matches!(missing, Err(ResourceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_read_view_tracks_selection() {
        let service = service();
        service
            .view
            .apply(SelectionAction::Search("draft".into()))
            .await;

        let body = text_of(&service.read_resource("library://view").await.unwrap());
        assert_eq!(body["descriptor"]["view"], "search");
        assert_eq!(body["query_string"], "search=draft");
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let result = service().read_resource("mcp://server/nonexistent").await;
        assert!(result.is_err());
    }
}
