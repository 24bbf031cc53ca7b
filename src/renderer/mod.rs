//! Template rendering engine
//!
//! - `interface`: The [`TemplateRenderer`] seam used by the template walker
//! - `minijinja`: The MiniJinja implementation with strict undefined handling
//! - `filters`: Custom filters available to every template

pub mod filters;
pub mod interface;
pub mod minijinja;

pub use interface::TemplateRenderer;
pub use minijinja::MiniJinjaRenderer;
