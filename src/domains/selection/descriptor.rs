//! Filter descriptors and the listing query they produce.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reserved `folderId` value meaning "prompts without a folder".
pub const UNCATEGORIZED: &str = "uncategorized";

/// The single criterion deciding which prompts are visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "view", content = "value", rename_all = "lowercase")]
pub enum FilterDescriptor {
    /// No constraint.
    #[default]
    All,

    /// Prompts without a folder.
    Uncategorized,

    /// Prompts in the given folder.
    Folder(String),

    /// Prompts carrying the given tag.
    Tag(String),

    /// Free-text search.
    Search(String),
}

impl FilterDescriptor {
    /// Build the search view for a term. An empty term is the same as `All`.
    pub fn search(term: impl Into<String>) -> Self {
        let term = term.into();
        if term.is_empty() {
            Self::All
        } else {
            Self::Search(term)
        }
    }

    /// Query parameters for the listing collaborator.
    pub fn to_query(&self) -> ListQuery {
        match self {
            Self::All => ListQuery::default(),
            Self::Uncategorized => ListQuery {
                folder_id: Some(UNCATEGORIZED.to_string()),
                ..Default::default()
            },
            Self::Folder(id) => ListQuery {
                folder_id: Some(id.clone()),
                ..Default::default()
            },
            Self::Tag(id) => ListQuery {
                tag_id: Some(id.clone()),
                ..Default::default()
            },
            Self::Search(term) => ListQuery {
                search: Some(term.clone()),
                ..Default::default()
            },
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> String {
        match self {
            Self::All => "all".to_string(),
            Self::Uncategorized => "uncategorized".to_string(),
            Self::Folder(id) => format!("folder:{}", id),
            Self::Tag(id) => format!("tag:{}", id),
            Self::Search(term) => format!("search:{:?}", term),
        }
    }
}

/// Parameters accepted by the prompt listing.
///
/// The listing combines present fields with AND. Descriptors only ever set
/// one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Folder id, or `uncategorized` for prompts without a folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,

    /// Tag id the prompt must carry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<String>,

    /// Case-insensitive text matched against title, description and content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListQuery {
    pub fn is_empty(&self) -> bool {
        self.folder_id.is_none() && self.tag_id.is_none() && self.search.is_none()
    }

    /// Whether the query asks for prompts without a folder.
    pub fn wants_uncategorized(&self) -> bool {
        self.folder_id.as_deref() == Some(UNCATEGORIZED)
    }

    /// URL query string form, e.g. `folderId=abc` or `search=hello+world`.
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self).unwrap_or_default()
    }

    /// Parse a URL query string. Unknown keys are ignored.
    pub fn from_query_string(query: &str) -> Result<Self, serde_urlencoded::de::Error> {
        serde_urlencoded::from_str(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_has_no_parameters() {
        let query = FilterDescriptor::All.to_query();
        assert!(query.is_empty());
        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn test_uncategorized_uses_sentinel() {
        let query = FilterDescriptor::Uncategorized.to_query();
        assert_eq!(query.folder_id.as_deref(), Some(UNCATEGORIZED));
        assert!(query.wants_uncategorized());
        assert_eq!(query.to_query_string(), "folderId=uncategorized");
    }

    #[test]
    fn test_single_parameter_per_view() {
        let query = FilterDescriptor::Folder("f1".into()).to_query();
        assert_eq!(query.folder_id.as_deref(), Some("f1"));
        assert!(query.tag_id.is_none() && query.search.is_none());

        let query = FilterDescriptor::Tag("t1".into()).to_query();
        assert_eq!(query.tag_id.as_deref(), Some("t1"));
        assert!(query.folder_id.is_none() && query.search.is_none());

        let query = FilterDescriptor::Search("code review".into()).to_query();
        assert_eq!(query.search.as_deref(), Some("code review"));
        assert_eq!(query.to_query_string(), "search=code+review");
    }

    #[test]
    fn test_empty_search_is_all() {
        assert_eq!(FilterDescriptor::search(""), FilterDescriptor::All);
        assert_eq!(
            FilterDescriptor::search(" "),
            FilterDescriptor::Search(" ".into())
        );
    }

    #[test]
    fn test_query_string_parse() {
        let query = ListQuery::from_query_string("tagId=t9&other=1").unwrap();
        assert_eq!(query.tag_id.as_deref(), Some("t9"));
        assert!(query.folder_id.is_none());
    }

    #[test]
    fn test_descriptor_serde_shape() {
        let json = serde_json::to_value(FilterDescriptor::Folder("f1".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "view": "folder", "value": "f1" }));

        let json = serde_json::to_value(FilterDescriptor::All).unwrap();
        assert_eq!(json, serde_json::json!({ "view": "all" }));
    }
}
