//! Prompt Library MCP Server
//!
//! An MCP server over a library of reusable prompt templates. Prompts are
//! organized into folders and tags, browsed through a shared view, and
//! filled by substituting `{{variable}}` placeholders.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **library**: prompts, folders and tags, with optional JSON snapshots
//!   - **templating**: variable extraction and template filling
//!   - **selection**: the view filter, its query string and the sidebar
//!   - **tools**, **resources**, **prompts**: the MCP surfaces over the above
//!
//! # Example
//!
//! ```rust,no_run
//! use prompt_library_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let transport = TransportService::new(config.transport.clone());
//!     let server = McpServer::open(config).await?;
//!     transport.run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
