//! Template tree processing
//!
//! This module contains the template walker components:
//! - `embedded`: The default template tree compiled into the binary
//! - `operation`: Defines operations to be performed for each template entry
//! - `processor`: Maps a single template entry to its operation
//! - `walker`: Walks a whole template tree and applies the operations

pub mod embedded;
pub mod operation;
pub mod processor;
pub mod walker;

pub use embedded::{builtin_file, TemplateTree};
pub use walker::render_tree;
