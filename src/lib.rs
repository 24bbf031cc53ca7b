/// Handles argument parsing and command dispatch.
pub mod cli;

/// The wrap request: parsing, validation and normalization.
pub mod config;

/// Constants shared across modules.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// Extension traits for standard library types.
pub mod ext;

/// Generated files with irregular layouts.
pub mod files;

/// Post-generation processing of a rendered project.
pub mod hooks;

/// Paths skipped while walking a template tree.
pub mod ignore;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Generation of a wrapped package.
pub mod render;

/// Template parsing and rendering functionality.
pub mod renderer;

/// Template tree processing.
pub mod template;

/// Re-generation of an existing project.
pub mod update;

/// Git repository handling.
pub mod vcs;

/// Version discovery of an existing project.
pub mod version;
