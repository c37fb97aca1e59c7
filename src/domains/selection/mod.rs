//! Selection domain module.
//!
//! Decides which prompts are visible. Exactly one view is active at a time:
//! all prompts, uncategorized prompts, one folder, one tag, or a search.
//!
//! ## Architecture
//!
//! - `descriptor.rs` - `FilterDescriptor` and the `ListQuery` it maps to
//! - `resolver.rs` - The transition table and the derived sidebar highlight
//! - `view.rs` - Shared server-side view combining the resolver with the
//!   prompt library

mod descriptor;
mod resolver;
mod view;

pub use descriptor::{FilterDescriptor, ListQuery, UNCATEGORIZED};
pub use resolver::{SelectionAction, SelectionResolver, SidebarEntry, SidebarItem};
pub use view::{SharedView, ViewSnapshot};
