//! Prompts domain module.
//!
//! Serves the prompts stored in the library through the MCP prompts API.
//! Each prompt's arguments are the `{{variables}}` its content uses.
//!
//! ## Architecture
//!
//! - `service.rs` - Listing, name resolution and final rendering
//! - `error.rs` - Prompt-specific error types

mod error;
mod service;

pub use error::PromptError;
pub use service::PromptService;
