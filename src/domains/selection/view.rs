//! Server-side view shared by every client of one server instance.

use serde::Serialize;
use tokio::sync::Mutex;

use super::descriptor::{FilterDescriptor, ListQuery};
use super::resolver::{SelectionAction, SelectionResolver, SidebarEntry};
use crate::domains::library::{PromptListing, PromptRecord};

/// The resolver behind a lock, so each action is one atomic transition.
#[derive(Debug, Default)]
pub struct SharedView {
    resolver: Mutex<SelectionResolver>,
}

/// Everything a client needs to draw the current view.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    pub descriptor: FilterDescriptor,
    pub query: ListQuery,
    pub query_string: String,
    pub sidebar: Vec<SidebarEntry>,
    pub prompts: Vec<PromptRecord>,
}

impl SharedView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action and return the new descriptor.
    pub async fn apply(&self, action: SelectionAction) -> FilterDescriptor {
        self.resolver.lock().await.apply(action).clone()
    }

    pub async fn current(&self) -> FilterDescriptor {
        self.resolver.lock().await.current().clone()
    }

    /// Resolve the current view against a listing.
    ///
    /// The descriptor is read once, so the sidebar highlight and the listed
    /// prompts always describe the same view.
    pub async fn snapshot(&self, listing: &dyn PromptListing) -> ViewSnapshot {
        let resolver = self.resolver.lock().await.clone();
        let query = resolver.query();

        let folders = listing.list_folders().await;
        let tags = listing.list_tags().await;
        let prompts = listing.list_prompts(&query).await;

        let sidebar = resolver.sidebar(
            folders.iter().map(|f| (f.id.as_str(), f.name.as_str())),
            tags.iter().map(|t| (t.id.as_str(), t.name.as_str())),
        );

        ViewSnapshot {
            descriptor: resolver.current().clone(),
            query_string: query.to_query_string(),
            query,
            sidebar,
            prompts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::library::{FolderInput, PromptInput, PromptLibrary, TagInput};
    use crate::domains::selection::SidebarItem;

    async fn seeded_library() -> (PromptLibrary, String, String) {
        let library = PromptLibrary::in_memory();
        let folder = library
            .create_folder(FolderInput {
                name: "Work".into(),
                description: None,
            })
            .await
            .unwrap();
        let tag = library
            .create_tag(TagInput {
                name: "email".into(),
                color: None,
            })
            .await
            .unwrap();
        library
            .create_prompt(PromptInput {
                title: "Weekly report".into(),
                content: "Summarize {{week}}".into(),
                folder: Some(folder.id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        library
            .create_prompt(PromptInput {
                title: "Intro email".into(),
                content: "Hello {{name}}".into(),
                tags: vec![tag.id.clone()],
                ..Default::default()
            })
            .await
            .unwrap();
        (library, folder.id, tag.id)
    }

    #[tokio::test]
    async fn test_snapshot_follows_selection() {
        let (library, folder_id, tag_id) = seeded_library().await;
        let view = SharedView::new();

        let snapshot = view.snapshot(&library).await;
        assert_eq!(snapshot.descriptor, FilterDescriptor::All);
        assert_eq!(snapshot.prompts.len(), 2);
        assert_eq!(snapshot.sidebar.len(), 4);
        assert!(snapshot.sidebar[0].selected);

        view.apply(SelectionAction::SelectFolder(folder_id.clone()))
            .await;
        let snapshot = view.snapshot(&library).await;
        assert_eq!(snapshot.prompts.len(), 1);
        assert_eq!(snapshot.prompts[0].title, "Weekly report");
        assert_eq!(snapshot.query_string, format!("folderId={}", folder_id));
        let selected: Vec<_> = snapshot.sidebar.iter().filter(|e| e.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].item, SidebarItem::Folder(folder_id));

        view.apply(SelectionAction::SelectTag(tag_id)).await;
        let snapshot = view.snapshot(&library).await;
        assert_eq!(snapshot.prompts.len(), 1);
        assert_eq!(snapshot.prompts[0].title, "Intro email");
    }

    #[tokio::test]
    async fn test_search_view_highlights_all() {
        let (library, _, _) = seeded_library().await;
        let view = SharedView::new();

        view.apply(SelectionAction::Search("HELLO".into())).await;
        let snapshot = view.snapshot(&library).await;
        assert_eq!(snapshot.prompts.len(), 1);
        assert_eq!(snapshot.sidebar.iter().filter(|e| e.selected).count(), 1);
        assert!(snapshot.sidebar[0].selected);
    }

    #[test]
    fn test_apply_is_atomic_transition() {
        let view = SharedView::new();
        tokio_test::block_on(async {
            view.apply(SelectionAction::SelectFolder("f1".into())).await;
            let after = view.apply(SelectionAction::FolderDeleted("f1".into())).await;
            assert_eq!(after, FilterDescriptor::All);
            assert_eq!(view.current().await, FilterDescriptor::All);
        });
    }
}
