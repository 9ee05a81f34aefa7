//! Flowgate Scripts - Chain script and event type generation
//!
//! This crate compiles the built-in script templates and the per-network
//! override table, and renders them against the chain parameters and the
//! token registry.

pub mod error;
pub mod generator;
pub mod template;
pub mod templates;

pub use error::ScriptError;
pub use generator::{Generator, ScriptKind};
pub use template::{Slot, Template, TemplateError};
