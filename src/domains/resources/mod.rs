//! Resources domain module.
//!
//! Read-only JSON views of the library for MCP clients.
//!
//! ## Architecture
//!
//! - `uri.rs` - `library://` URIs and their parser
//! - `registry.rs` - Resource and resource template metadata
//! - `service.rs` - Listing and reading against the library and shared view
//! - `error.rs` - Resource-specific error types

mod error;
mod registry;
mod service;
mod uri;

pub use error::ResourceError;
pub use registry::{get_all_resource_templates, get_all_resources, resource_uris};
pub use service::ResourceService;
pub use uri::LibraryResource;
