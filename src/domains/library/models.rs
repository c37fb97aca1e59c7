//! Library records.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A folder grouping prompts. A prompt lives in at most one folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A label attached to any number of prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A stored prompt. `tags` and `folder` hold ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub folder: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A prompt with its folder and tags resolved, as returned by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptRecord {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<Tag>,
    pub folder: Option<Folder>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating or updating a prompt.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PromptInput {
    /// Prompt title (required, trimmed).
    pub title: String,

    /// Template text with optional `{{variable}}` placeholders (required).
    pub content: String,

    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Ids of tags to attach.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Folder id; omit or leave empty for an uncategorized prompt.
    #[serde(default)]
    pub folder: Option<String>,
}

/// Fields supplied when creating or updating a folder.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct FolderInput {
    /// Unique folder name.
    pub name: String,

    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Fields supplied when creating or updating a tag.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct TagInput {
    /// Unique tag name.
    pub name: String,

    /// Optional display color, e.g. `#3b82f6`.
    #[serde(default)]
    pub color: Option<String>,
}

/// On-disk form of the whole library.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub prompts: Vec<Prompt>,
}

/// Trim an optional text field, mapping blank text to `None`.
pub(crate) fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
