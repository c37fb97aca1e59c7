//! Tools domain module.
//!
//! Tools let MCP clients manage the library, render templates and drive
//! the shared view.
//!
//! ## Architecture
//!
//! - `definition.rs` - The `ToolDefinition` trait, `ToolContext`, and the
//!   glue turning a tool into an rmcp route or an HTTP dispatch target
//! - `definitions/` - Tool implementations, one file per area
//! - `router.rs` - ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Tool metadata and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Implement `ToolDefinition` in the matching `definitions/` file
//! 2. Export it in `definitions/mod.rs`
//! 3. Add its route in `router.rs`
//! 4. Register it in `registry.rs` for HTTP support

pub mod definition;
pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use definition::{ToolContext, ToolDefinition};
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
