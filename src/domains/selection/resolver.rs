//! Selection state machine.
//!
//! The resolver owns the one active [`FilterDescriptor`]. Every action
//! replaces it outright, so folder, tag, uncategorized and search can never
//! be active together. Which sidebar entry is highlighted is derived from
//! the descriptor on demand and never stored.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::descriptor::{FilterDescriptor, ListQuery};

/// A user action that changes the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum SelectionAction {
    /// Show every prompt.
    SelectAll,
    /// Show prompts without a folder.
    SelectUncategorized,
    /// Show prompts in a folder.
    SelectFolder(String),
    /// Show prompts carrying a tag.
    SelectTag(String),
    /// Enter or clear a search term. Empty clears the search.
    Search(String),
    /// A folder was deleted.
    FolderDeleted(String),
    /// A tag was deleted.
    TagDeleted(String),
}

/// An entry of the presented list: All, Uncategorized, folders, tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum SidebarItem {
    All,
    Uncategorized,
    Folder(String),
    Tag(String),
}

/// One rendered row of the presented list.
#[derive(Debug, Clone, Serialize)]
pub struct SidebarEntry {
    pub item: SidebarItem,
    pub label: String,
    pub selected: bool,
}

/// Holds the current view and applies transitions.
#[derive(Debug, Clone, Default)]
pub struct SelectionResolver {
    current: FilterDescriptor,
}

impl SelectionResolver {
    /// A resolver showing all prompts.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &FilterDescriptor {
        &self.current
    }

    /// Query parameters for the current view.
    pub fn query(&self) -> ListQuery {
        self.current.to_query()
    }

    /// Apply one action and return the resulting view.
    pub fn apply(&mut self, action: SelectionAction) -> &FilterDescriptor {
        let next = Self::transition(&self.current, action);
        if next != self.current {
            debug!("Selection {} -> {}", self.current.label(), next.label());
        }
        self.current = next;
        &self.current
    }

    /// The next view for `action` taken from `current`.
    pub fn transition(current: &FilterDescriptor, action: SelectionAction) -> FilterDescriptor {
        match action {
            SelectionAction::SelectAll => FilterDescriptor::All,
            SelectionAction::SelectUncategorized => FilterDescriptor::Uncategorized,
            SelectionAction::SelectFolder(id) => FilterDescriptor::Folder(id),
            SelectionAction::SelectTag(id) => FilterDescriptor::Tag(id),
            SelectionAction::Search(term) => FilterDescriptor::search(term),
            SelectionAction::FolderDeleted(id) => match current {
                FilterDescriptor::Folder(selected) if *selected == id => FilterDescriptor::All,
                other => other.clone(),
            },
            SelectionAction::TagDeleted(id) => match current {
                FilterDescriptor::Tag(selected) if *selected == id => FilterDescriptor::All,
                other => other.clone(),
            },
        }
    }

    pub fn select_all(&mut self) -> &FilterDescriptor {
        self.apply(SelectionAction::SelectAll)
    }

    pub fn select_uncategorized(&mut self) -> &FilterDescriptor {
        self.apply(SelectionAction::SelectUncategorized)
    }

    pub fn select_folder(&mut self, id: impl Into<String>) -> &FilterDescriptor {
        self.apply(SelectionAction::SelectFolder(id.into()))
    }

    pub fn select_tag(&mut self, id: impl Into<String>) -> &FilterDescriptor {
        self.apply(SelectionAction::SelectTag(id.into()))
    }

    pub fn search(&mut self, term: impl Into<String>) -> &FilterDescriptor {
        self.apply(SelectionAction::Search(term.into()))
    }

    pub fn folder_deleted(&mut self, id: impl Into<String>) -> &FilterDescriptor {
        self.apply(SelectionAction::FolderDeleted(id.into()))
    }

    pub fn tag_deleted(&mut self, id: impl Into<String>) -> &FilterDescriptor {
        self.apply(SelectionAction::TagDeleted(id.into()))
    }

    /// The highlighted entry for the current view. A search highlights `All`.
    pub fn highlighted(&self) -> SidebarItem {
        highlighted_item(&self.current)
    }

    /// Render the presented list with exactly one entry selected.
    ///
    /// If the highlighted folder or tag is missing from the given lists,
    /// `All` is selected instead.
    pub fn sidebar<'a, F, T>(&self, folders: F, tags: T) -> Vec<SidebarEntry>
    where
        F: IntoIterator<Item = (&'a str, &'a str)>,
        T: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut entries = vec![
            SidebarEntry {
                item: SidebarItem::All,
                label: "All Prompts".to_string(),
                selected: false,
            },
            SidebarEntry {
                item: SidebarItem::Uncategorized,
                label: "Uncategorized".to_string(),
                selected: false,
            },
        ];
        entries.extend(folders.into_iter().map(|(id, name)| SidebarEntry {
            item: SidebarItem::Folder(id.to_string()),
            label: name.to_string(),
            selected: false,
        }));
        entries.extend(tags.into_iter().map(|(id, name)| SidebarEntry {
            item: SidebarItem::Tag(id.to_string()),
            label: name.to_string(),
            selected: false,
        }));

        let highlighted = self.highlighted();
        let index = entries
            .iter()
            .position(|entry| entry.item == highlighted)
            .unwrap_or(0);
        entries[index].selected = true;
        entries
    }
}

fn highlighted_item(descriptor: &FilterDescriptor) -> SidebarItem {
    match descriptor {
        FilterDescriptor::All | FilterDescriptor::Search(_) => SidebarItem::All,
        FilterDescriptor::Uncategorized => SidebarItem::Uncategorized,
        FilterDescriptor::Folder(id) => SidebarItem::Folder(id.clone()),
        FilterDescriptor::Tag(id) => SidebarItem::Tag(id.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Count of simultaneously active criteria among folder/tag/uncategorized/search.
    fn active_criteria(query: &ListQuery) -> usize {
        [
            query.folder_id.is_some(),
            query.tag_id.is_some(),
            query.search.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    #[test]
    fn test_initial_state_is_all() {
        let resolver = SelectionResolver::new();
        assert_eq!(resolver.current(), &FilterDescriptor::All);
        assert!(resolver.query().is_empty());
    }

    #[test]
    fn test_transition_table() {
        let mut resolver = SelectionResolver::new();
        assert_eq!(resolver.select_folder("f1"), &FilterDescriptor::Folder("f1".into()));
        assert_eq!(resolver.select_tag("t1"), &FilterDescriptor::Tag("t1".into()));
        assert_eq!(resolver.select_uncategorized(), &FilterDescriptor::Uncategorized);
        assert_eq!(resolver.search("x"), &FilterDescriptor::Search("x".into()));
        assert_eq!(resolver.search(""), &FilterDescriptor::All);
        resolver.select_tag("t1");
        assert_eq!(resolver.select_all(), &FilterDescriptor::All);
    }

    #[test]
    fn test_folder_after_search_exits_search() {
        let mut resolver = SelectionResolver::new();
        resolver.search("summary");
        resolver.select_folder("f1");
        assert_eq!(resolver.current(), &FilterDescriptor::Folder("f1".into()));
        assert!(resolver.query().search.is_none());
    }

    #[test]
    fn test_search_after_tag_clears_tag() {
        let mut resolver = SelectionResolver::new();
        resolver.select_tag("t1");
        resolver.search("email");
        assert_eq!(resolver.query().tag_id, None);
        assert_eq!(resolver.query().search.as_deref(), Some("email"));
    }

    #[test]
    fn test_empty_search_equals_select_all() {
        let mut a = SelectionResolver::new();
        a.select_folder("f1");
        a.search("");

        let mut b = SelectionResolver::new();
        b.select_folder("f1");
        b.select_all();

        assert_eq!(a.current(), b.current());
        assert_eq!(a.query(), b.query());
    }

    #[test]
    fn test_deleting_selected_folder_resets() {
        let mut resolver = SelectionResolver::new();
        resolver.select_folder("f1");
        assert_eq!(resolver.folder_deleted("f1"), &FilterDescriptor::All);
    }

    #[test]
    fn test_deleting_other_folder_keeps_state() {
        let mut resolver = SelectionResolver::new();
        resolver.select_folder("f1");
        assert_eq!(resolver.folder_deleted("f2"), &FilterDescriptor::Folder("f1".into()));

        resolver.select_tag("f2");
        assert_eq!(resolver.folder_deleted("f2"), &FilterDescriptor::Tag("f2".into()));
    }

    #[test]
    fn test_deleting_selected_tag_resets() {
        let mut resolver = SelectionResolver::new();
        resolver.select_tag("t1");
        assert_eq!(resolver.tag_deleted("t2"), &FilterDescriptor::Tag("t1".into()));
        assert_eq!(resolver.tag_deleted("t1"), &FilterDescriptor::All);
    }

    #[test]
    fn test_at_most_one_criterion_for_any_sequence() {
        let actions = [
            SelectionAction::SelectFolder("f1".into()),
            SelectionAction::Search("abc".into()),
            SelectionAction::SelectTag("t1".into()),
            SelectionAction::SelectUncategorized,
            SelectionAction::FolderDeleted("f1".into()),
            SelectionAction::TagDeleted("t1".into()),
            SelectionAction::Search(String::new()),
            SelectionAction::SelectAll,
        ];

        // Every ordered pair and triple of actions.
        for a in &actions {
            for b in &actions {
                for c in &actions {
                    let mut resolver = SelectionResolver::new();
                    for action in [a, b, c] {
                        resolver.apply(action.clone());
                        assert!(active_criteria(&resolver.query()) <= 1);
                    }
                }
            }
        }
    }

    #[test]
    fn test_highlight_follows_descriptor() {
        let mut resolver = SelectionResolver::new();
        assert_eq!(resolver.highlighted(), SidebarItem::All);
        resolver.search("abc");
        assert_eq!(resolver.highlighted(), SidebarItem::All);
        resolver.select_uncategorized();
        assert_eq!(resolver.highlighted(), SidebarItem::Uncategorized);
        resolver.select_tag("t1");
        assert_eq!(resolver.highlighted(), SidebarItem::Tag("t1".into()));
    }

    #[test]
    fn test_sidebar_has_exactly_one_selected() {
        let folders = [("f1", "Work"), ("f2", "Personal")];
        let tags = [("t1", "email")];

        let mut resolver = SelectionResolver::new();
        let cases: Vec<Box<dyn Fn(&mut SelectionResolver)>> = vec![
            Box::new(|_| {}),
            Box::new(|r| {
                r.select_folder("f2");
            }),
            Box::new(|r| {
                r.select_tag("t1");
            }),
            Box::new(|r| {
                r.search("x");
            }),
            Box::new(|r| {
                r.select_uncategorized();
            }),
            Box::new(|r| {
                r.select_folder("gone");
            }),
        ];

        for case in cases {
            case(&mut resolver);
            let sidebar = resolver.sidebar(folders, tags);
            assert_eq!(sidebar.len(), 5);
            assert_eq!(sidebar.iter().filter(|e| e.selected).count(), 1);
        }

        resolver.select_folder("f2");
        let sidebar = resolver.sidebar(folders, tags);
        let selected = sidebar.iter().find(|e| e.selected).unwrap();
        assert_eq!(selected.label, "Personal");
    }

    #[test]
    fn test_action_serde() {
        let action: SelectionAction =
            serde_json::from_value(serde_json::json!({ "action": "select_folder", "value": "f1" }))
                .unwrap();
        assert_eq!(action, SelectionAction::SelectFolder("f1".into()));

        let action: SelectionAction =
            serde_json::from_value(serde_json::json!({ "action": "select_all" })).unwrap();
        assert_eq!(action, SelectionAction::SelectAll);
    }
}
