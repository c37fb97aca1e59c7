//! Domains module containing business logic organized by bounded contexts.
//!
//! - `templating` - placeholder extraction, substitution and fill sessions
//! - `selection` - the sidebar view state and the query it produces
//! - `library` - storage for prompts, folders and tags
//! - `prompts`, `resources`, `tools` - the MCP surfaces over the above

pub mod library;
pub mod prompts;
pub mod resources;
pub mod selection;
pub mod templating;
pub mod tools;
