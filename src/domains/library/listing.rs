//! The listing seam between views and storage.

use async_trait::async_trait;

use super::models::{Folder, PromptRecord, Tag};
use super::store::PromptLibrary;
use crate::domains::selection::ListQuery;

/// Anything that can answer a [`ListQuery`] and enumerate the sidebar.
///
/// Views only depend on this trait, so the backing store can be swapped
/// without touching the selection logic.
#[async_trait]
pub trait PromptListing: Send + Sync {
    /// Prompts matching the query. No ordering is promised.
    async fn list_prompts(&self, query: &ListQuery) -> Vec<PromptRecord>;

    async fn list_folders(&self) -> Vec<Folder>;

    async fn list_tags(&self) -> Vec<Tag>;
}

#[async_trait]
impl PromptListing for PromptLibrary {
    async fn list_prompts(&self, query: &ListQuery) -> Vec<PromptRecord> {
        PromptLibrary::list_prompts(self, query).await
    }

    async fn list_folders(&self) -> Vec<Folder> {
        PromptLibrary::list_folders(self).await
    }

    async fn list_tags(&self) -> Vec<Tag> {
        PromptLibrary::list_tags(self).await
    }
}
