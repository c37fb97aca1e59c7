//! Library resource URIs.

use std::fmt;

pub const FOLDERS_URI: &str = "library://folders";
pub const TAGS_URI: &str = "library://tags";
pub const VIEW_URI: &str = "library://view";
pub const PROMPT_URI_PREFIX: &str = "library://prompts/";
pub const PROMPT_URI_TEMPLATE: &str = "library://prompts/{id}";

/// A readable library resource, parsed from its URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryResource {
    Folders,
    Tags,
    View,
    Prompt(String),
}

impl LibraryResource {
    /// Parse a URI. Unknown URIs and an empty prompt id yield `None`.
    pub fn parse(uri: &str) -> Option<Self> {
        match uri {
            FOLDERS_URI => Some(Self::Folders),
            TAGS_URI => Some(Self::Tags),
            VIEW_URI => Some(Self::View),
            _ => uri
                .strip_prefix(PROMPT_URI_PREFIX)
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| Self::Prompt(id.to_string())),
        }
    }
}

impl fmt::Display for LibraryResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Folders => f.write_str(FOLDERS_URI),
            Self::Tags => f.write_str(TAGS_URI),
            Self::View => f.write_str(VIEW_URI),
            Self::Prompt(id) => write!(f, "{}{}", PROMPT_URI_PREFIX, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_static_uris() {
        assert_eq!(LibraryResource::parse("library://folders"), Some(LibraryResource::Folders));
        assert_eq!(LibraryResource::parse("library://tags"), Some(LibraryResource::Tags));
        assert_eq!(LibraryResource::parse("library://view"), Some(LibraryResource::View));
    }

    #[test]
    fn test_parse_prompt_uri() {
        let parsed = LibraryResource::parse("library://prompts/abc").unwrap();
        assert_eq!(parsed, LibraryResource::Prompt("abc".into()));
        assert_eq!(parsed.to_string(), "library://prompts/abc");
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(LibraryResource::parse("library://prompts/").is_none());
        assert!(LibraryResource::parse("library://prompts/a/b").is_none());
        assert!(LibraryResource::parse("file:///etc/passwd").is_none());
    }
}
