//! In-memory prompt library with optional JSON snapshot persistence.

use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::LibraryError;
use super::models::{
    Folder, FolderInput, LibrarySnapshot, Prompt, PromptInput, PromptRecord, Tag, TagInput,
    trimmed,
};
use crate::core::config::LibraryConfig;
use crate::domains::selection::ListQuery;

/// The prompt library: prompts, folders and tags.
///
/// Reads run concurrently. A mutation edits a copy of the state under the
/// write lock and only swaps it in once the snapshot (when enabled) has been
/// written.
#[derive(Debug)]
pub struct PromptLibrary {
    state: RwLock<LibrarySnapshot>,
    snapshot_path: Option<PathBuf>,
    autosave: bool,
}

impl PromptLibrary {
    /// An empty library that is never written to disk.
    pub fn in_memory() -> Self {
        Self::from_snapshot(LibrarySnapshot::default())
    }

    /// A library seeded from an existing snapshot, never written to disk.
    pub fn from_snapshot(snapshot: LibrarySnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
            snapshot_path: None,
            autosave: false,
        }
    }

    /// Open the library described by the configuration.
    ///
    /// A configured path that does not exist yet starts an empty library.
    pub async fn open(config: &LibraryConfig) -> Result<Self, LibraryError> {
        let Some(path) = config.snapshot_path.clone() else {
            info!("Prompt library is in-memory only");
            return Ok(Self::in_memory());
        };

        let snapshot = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str::<LibrarySnapshot>(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Library snapshot {:?} not found, starting empty", path);
                LibrarySnapshot::default()
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            "Loaded library from {:?}: {} prompts, {} folders, {} tags",
            path,
            snapshot.prompts.len(),
            snapshot.folders.len(),
            snapshot.tags.len()
        );

        Ok(Self {
            state: RwLock::new(snapshot),
            snapshot_path: Some(path),
            autosave: config.autosave,
        })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// A copy of the whole library.
    pub async fn snapshot(&self) -> LibrarySnapshot {
        self.state.read().await.clone()
    }

    /// Write the snapshot file now, regardless of autosave.
    pub async fn save(&self) -> Result<(), LibraryError> {
        let state = self.state.read().await;
        self.write_snapshot(&state).await
    }

    async fn write_snapshot(&self, state: &LibrarySnapshot) -> Result<(), LibraryError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(state)?;
        tokio::fs::write(path, json).await?;
        debug!("Library snapshot written to {:?}", path);
        Ok(())
    }

    /// Replace the live state with `next`, writing it first when autosave is
    /// on. A failed write leaves the live state untouched.
    async fn commit(
        &self,
        live: &mut LibrarySnapshot,
        next: LibrarySnapshot,
    ) -> Result<(), LibraryError> {
        if self.autosave {
            self.write_snapshot(&next).await?;
        }
        *live = next;
        Ok(())
    }

    // ========================================================================
    // Prompts
    // ========================================================================

    /// List prompts matching every constraint present in `query`, most
    /// recently updated first.
    pub async fn list_prompts(&self, query: &ListQuery) -> Vec<PromptRecord> {
        let state = self.state.read().await;
        let needle = query
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut prompts: Vec<&Prompt> = state
            .prompts
            .iter()
            .filter(|p| matches_query(p, query, needle.as_deref()))
            .collect();
        prompts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        prompts
            .into_iter()
            .map(|p| populate(&state, p))
            .collect()
    }

    pub async fn get_prompt(&self, id: &str) -> Result<PromptRecord, LibraryError> {
        let state = self.state.read().await;
        state
            .prompts
            .iter()
            .find(|p| p.id == id)
            .map(|p| populate(&state, p))
            .ok_or_else(|| LibraryError::not_found("Prompt", id))
    }

    /// All prompts whose title equals `title` exactly.
    pub async fn find_prompts_by_title(&self, title: &str) -> Vec<PromptRecord> {
        let state = self.state.read().await;
        state
            .prompts
            .iter()
            .filter(|p| p.title == title)
            .map(|p| populate(&state, p))
            .collect()
    }

    pub async fn create_prompt(&self, input: PromptInput) -> Result<PromptRecord, LibraryError> {
        let mut guard = self.state.write().await;
        let mut state = guard.clone();
        let fields = validate_prompt(&state, input)?;

        let now = Utc::now();
        let prompt = Prompt {
            id: new_id(),
            title: fields.title,
            content: fields.content,
            description: fields.description,
            tags: fields.tags,
            folder: fields.folder,
            created_at: now,
            updated_at: now,
        };
        info!("Created prompt {} ({})", prompt.id, prompt.title);
        let record = populate(&state, &prompt);
        state.prompts.push(prompt);

        self.commit(&mut guard, state).await?;
        Ok(record)
    }

    pub async fn update_prompt(
        &self,
        id: &str,
        input: PromptInput,
    ) -> Result<PromptRecord, LibraryError> {
        let mut guard = self.state.write().await;
        let mut state = guard.clone();
        let fields = validate_prompt(&state, input)?;

        let index = state
            .prompts
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| LibraryError::not_found("Prompt", id))?;

        let prompt = &mut state.prompts[index];
        prompt.title = fields.title;
        prompt.content = fields.content;
        prompt.description = fields.description;
        prompt.tags = fields.tags;
        prompt.folder = fields.folder;
        prompt.updated_at = Utc::now();
        info!("Updated prompt {}", id);

        let record = populate(&state, &state.prompts[index]);
        self.commit(&mut guard, state).await?;
        Ok(record)
    }

    pub async fn delete_prompt(&self, id: &str) -> Result<Prompt, LibraryError> {
        let mut guard = self.state.write().await;
        let mut state = guard.clone();
        let index = state
            .prompts
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| LibraryError::not_found("Prompt", id))?;
        let removed = state.prompts.remove(index);
        info!("Deleted prompt {}", id);

        self.commit(&mut guard, state).await?;
        Ok(removed)
    }

    // ========================================================================
    // Folders
    // ========================================================================

    /// All folders, sorted by name.
    pub async fn list_folders(&self) -> Vec<Folder> {
        let mut folders = self.state.read().await.folders.clone();
        folders.sort_by(|a, b| a.name.cmp(&b.name));
        folders
    }

    pub async fn create_folder(&self, input: FolderInput) -> Result<Folder, LibraryError> {
        let mut guard = self.state.write().await;
        let mut state = guard.clone();
        let name = required_name(&input.name, "Folder")?;
        if state.folders.iter().any(|f| f.name == name) {
            return Err(LibraryError::duplicate_name("Folder"));
        }

        let folder = Folder {
            id: new_id(),
            name,
            description: trimmed(input.description),
            created_at: Utc::now(),
        };
        info!("Created folder {} ({})", folder.id, folder.name);
        state.folders.push(folder.clone());

        self.commit(&mut guard, state).await?;
        Ok(folder)
    }

    pub async fn update_folder(&self, id: &str, input: FolderInput) -> Result<Folder, LibraryError> {
        let mut guard = self.state.write().await;
        let mut state = guard.clone();
        let name = required_name(&input.name, "Folder")?;
        if state.folders.iter().any(|f| f.name == name && f.id != id) {
            return Err(LibraryError::duplicate_name("Folder"));
        }

        let folder = state
            .folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| LibraryError::not_found("Folder", id))?;
        folder.name = name;
        folder.description = trimmed(input.description);
        let folder = folder.clone();
        info!("Updated folder {}", id);

        self.commit(&mut guard, state).await?;
        Ok(folder)
    }

    /// Delete a folder. Its prompts become uncategorized.
    ///
    /// Returns the removed folder and the number of prompts moved out of it.
    pub async fn delete_folder(&self, id: &str) -> Result<(Folder, usize), LibraryError> {
        let mut guard = self.state.write().await;
        let mut state = guard.clone();
        let index = state
            .folders
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| LibraryError::not_found("Folder", id))?;

        let mut moved = 0;
        for prompt in state
            .prompts
            .iter_mut()
            .filter(|p| p.folder.as_deref() == Some(id))
        {
            prompt.folder = None;
            moved += 1;
        }
        let removed = state.folders.remove(index);
        info!("Deleted folder {} ({} prompts uncategorized)", id, moved);

        self.commit(&mut guard, state).await?;
        Ok((removed, moved))
    }

    // ========================================================================
    // Tags
    // ========================================================================

    /// All tags, sorted by name.
    pub async fn list_tags(&self) -> Vec<Tag> {
        let mut tags = self.state.read().await.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        tags
    }

    pub async fn create_tag(&self, input: TagInput) -> Result<Tag, LibraryError> {
        let mut guard = self.state.write().await;
        let mut state = guard.clone();
        let name = required_name(&input.name, "Tag")?;
        if state.tags.iter().any(|t| t.name == name) {
            return Err(LibraryError::duplicate_name("Tag"));
        }

        let tag = Tag {
            id: new_id(),
            name,
            color: trimmed(input.color),
            created_at: Utc::now(),
        };
        info!("Created tag {} ({})", tag.id, tag.name);
        state.tags.push(tag.clone());

        self.commit(&mut guard, state).await?;
        Ok(tag)
    }

    pub async fn update_tag(&self, id: &str, input: TagInput) -> Result<Tag, LibraryError> {
        let mut guard = self.state.write().await;
        let mut state = guard.clone();
        let name = required_name(&input.name, "Tag")?;
        if state.tags.iter().any(|t| t.name == name && t.id != id) {
            return Err(LibraryError::duplicate_name("Tag"));
        }

        let tag = state
            .tags
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| LibraryError::not_found("Tag", id))?;
        tag.name = name;
        tag.color = trimmed(input.color);
        let tag = tag.clone();
        info!("Updated tag {}", id);

        self.commit(&mut guard, state).await?;
        Ok(tag)
    }

    /// Delete a tag and remove it from every prompt.
    ///
    /// Returns the removed tag and the number of prompts that carried it.
    pub async fn delete_tag(&self, id: &str) -> Result<(Tag, usize), LibraryError> {
        let mut guard = self.state.write().await;
        let mut state = guard.clone();
        let index = state
            .tags
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LibraryError::not_found("Tag", id))?;

        let mut stripped = 0;
        for prompt in state.prompts.iter_mut() {
            let before = prompt.tags.len();
            prompt.tags.retain(|t| t != id);
            if prompt.tags.len() != before {
                stripped += 1;
            }
        }
        let removed = state.tags.remove(index);
        info!("Deleted tag {} (removed from {} prompts)", id, stripped);

        self.commit(&mut guard, state).await?;
        Ok((removed, stripped))
    }
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::in_memory()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn new_id() -> String {
    Uuid::now_v7().to_string()
}

struct PromptFields {
    title: String,
    content: String,
    description: Option<String>,
    tags: Vec<String>,
    folder: Option<String>,
}

fn validate_prompt(state: &LibrarySnapshot, input: PromptInput) -> Result<PromptFields, LibraryError> {
    let title = input.title.trim().to_string();
    if title.is_empty() || input.content.is_empty() {
        return Err(LibraryError::invalid_input("Title and Content are required"));
    }

    let mut tags: Vec<String> = Vec::with_capacity(input.tags.len());
    for tag_id in input.tags {
        if !state.tags.iter().any(|t| t.id == tag_id) {
            return Err(LibraryError::invalid_input(format!("Unknown tag id: {}", tag_id)));
        }
        if !tags.contains(&tag_id) {
            tags.push(tag_id);
        }
    }

    let folder = input.folder.filter(|f| !f.is_empty());
    if let Some(folder_id) = &folder {
        if !state.folders.iter().any(|f| &f.id == folder_id) {
            return Err(LibraryError::invalid_input(format!(
                "Unknown folder id: {}",
                folder_id
            )));
        }
    }

    Ok(PromptFields {
        title,
        content: input.content,
        description: trimmed(input.description),
        tags,
        folder,
    })
}

fn required_name(name: &str, kind: &str) -> Result<String, LibraryError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LibraryError::invalid_input(format!("{} name is required", kind)));
    }
    Ok(name.to_string())
}

fn matches_query(prompt: &Prompt, query: &ListQuery, needle: Option<&str>) -> bool {
    if query.wants_uncategorized() {
        if prompt.folder.is_some() {
            return false;
        }
    } else if let Some(folder_id) = &query.folder_id {
        if prompt.folder.as_ref() != Some(folder_id) {
            return false;
        }
    }

    if let Some(tag_id) = &query.tag_id {
        if !prompt.tags.contains(tag_id) {
            return false;
        }
    }

    match needle {
        Some(needle) => {
            prompt.title.to_lowercase().contains(needle)
                || prompt
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(needle))
                || prompt.content.to_lowercase().contains(needle)
        }
        None => true,
    }
}

fn populate(state: &LibrarySnapshot, prompt: &Prompt) -> PromptRecord {
    let tags = prompt
        .tags
        .iter()
        .filter_map(|id| state.tags.iter().find(|t| &t.id == id).cloned())
        .collect();
    let folder = prompt
        .folder
        .as_ref()
        .and_then(|id| state.folders.iter().find(|f| &f.id == id).cloned());

    PromptRecord {
        id: prompt.id.clone(),
        title: prompt.title.clone(),
        content: prompt.content.clone(),
        description: prompt.description.clone(),
        tags,
        folder,
        created_at: prompt.created_at,
        updated_at: prompt.updated_at,
    }
}
