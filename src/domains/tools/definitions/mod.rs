//! Tool definitions module.
//!
//! One file per area: prompts, folders, tags, templating and the shared
//! view.

pub mod common;
pub mod folders;
pub mod prompts;
pub mod tags;
pub mod templating;
pub mod view;

pub use folders::{FolderCreateTool, FolderDeleteTool, FolderListTool, FolderUpdateTool};
pub use prompts::{PromptCreateTool, PromptDeleteTool, PromptGetTool, PromptListTool, PromptUpdateTool};
pub use tags::{TagCreateTool, TagDeleteTool, TagListTool, TagUpdateTool};
pub use templating::{PromptFillTool, PromptPreviewTool, VariablesExtractTool};
pub use view::{ViewCurrentTool, ViewSelectTool};
