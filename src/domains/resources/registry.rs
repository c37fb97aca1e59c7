//! Resource Registry - metadata for every library resource.

use rmcp::model::{AnnotateAble, RawResource, RawResourceTemplate, Resource, ResourceTemplate};

use super::uri::{FOLDERS_URI, PROMPT_URI_TEMPLATE, TAGS_URI, VIEW_URI};

const JSON_MIME: &str = "application/json";

fn build_resource(uri: &str, name: &str, description: &str) -> Resource {
    let mut raw = RawResource::new(uri, name);
    raw.description = Some(description.to_string());
    raw.mime_type = Some(JSON_MIME.to_string());
    raw.no_annotation()
}

/// Get all fixed-URI resources.
pub fn get_all_resources() -> Vec<Resource> {
    vec![
        build_resource(FOLDERS_URI, "folders", "All folders, sorted by name"),
        build_resource(TAGS_URI, "tags", "All tags, sorted by name"),
        build_resource(
            VIEW_URI,
            "view",
            "The shared view: active filter, query, highlighted sidebar and matching prompts",
        ),
    ]
}

/// Get all registered resource templates.
pub fn get_all_resource_templates() -> Vec<ResourceTemplate> {
    vec![
        RawResourceTemplate {
            uri_template: PROMPT_URI_TEMPLATE.to_string(),
            name: "prompt".to_string(),
            title: Some("Library Prompt".to_string()),
            description: Some(
                "One prompt with its folder, tags and template variables".to_string(),
            ),
            mime_type: Some(JSON_MIME.to_string()),
        }
        .no_annotation(),
    ]
}

/// Get the list of all fixed resource URIs.
pub fn resource_uris() -> Vec<&'static str> {
    vec![FOLDERS_URI, TAGS_URI, VIEW_URI]
}
