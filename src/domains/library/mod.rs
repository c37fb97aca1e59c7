//! Library domain module.
//!
//! Stores prompts, folders and tags, and answers listing queries produced by
//! the selection domain.
//!
//! ## Architecture
//!
//! - `models.rs` - Records, inputs and the on-disk snapshot shape
//! - `store.rs` - `PromptLibrary`, the in-memory store with optional
//!   snapshot persistence
//! - `listing.rs` - `PromptListing`, the trait views list through
//! - `error.rs` - Library-specific error types
//!
//! Deleting a folder leaves its prompts uncategorized; deleting a tag
//! removes it from every prompt. Folder and tag names are unique.

mod error;
mod listing;
mod models;
mod store;

pub use error::LibraryError;
pub use listing::PromptListing;
pub use models::{
    Folder, FolderInput, LibrarySnapshot, Prompt, PromptInput, PromptRecord, Tag, TagInput,
};
pub use store::PromptLibrary;
