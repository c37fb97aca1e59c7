//! Templating domain module.
//!
//! This module is the template variable engine. Prompt contents carry flat
//! `{{name}}` placeholders; the engine lists them and fills them in.
//!
//! ## Architecture
//!
//! - `variables.rs` - Placeholder scanning (`extract_variables`) and
//!   single-pass substitution (`substitute_variables`)
//! - `values.rs` - Per-session values and the preview/final fill modes
//! - `session.rs` - The fill workflow for one template
//!
//! Everything here is synchronous and free of shared state.

mod session;
mod values;
mod variables;

pub use session::{FillOutcome, FillSession};
pub use values::{FillMode, VariableValues, render};
pub use variables::{VariableSet, extract_variables, substitute_variables};
